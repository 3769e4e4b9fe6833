//! Per-step performance metrics for agent systems.
//!
//! [`StepMetrics`] captures phase timings and population changes for a
//! single step, for telemetry and profiling.

/// Timing and population metrics collected during a single step.
///
/// All durations are in microseconds. The system populates these fields
/// after each `step()` call and keeps the most recent set readable via
/// [`AgentSystem::last_metrics`](crate::AgentSystem::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent running continuous emitters, in microseconds.
    pub spawn_us: u64,
    /// Time spent rebuilding the spatial index, in microseconds.
    pub rebuild_us: u64,
    /// Time spent querying neighbors and evaluating rules, in microseconds.
    pub evaluate_us: u64,
    /// Time spent integrating motion, in microseconds.
    pub integrate_us: u64,
    /// Time spent removing dead agents, in microseconds.
    pub cull_us: u64,
    /// Agents created by emitters this step.
    pub spawned: u32,
    /// Agents killed by `Eat` behaviors this step.
    pub eaten: u32,
    /// Agents removed because they were dead after integration.
    pub culled: u32,
    /// Velocity reflections off the environment boundary.
    pub bounces: u32,
    /// Teleports through a periodic boundary.
    pub wraps: u32,
    /// Index entries distance-tested during neighbor queries.
    pub candidates_visited: u64,
    /// Neighbors handed to rules after radius and view filtering.
    pub neighbors_seen: u64,
    /// Live agents after the step.
    pub live: usize,
}
