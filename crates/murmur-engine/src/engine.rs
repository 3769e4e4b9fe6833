//! Several agent systems driven in lockstep.

use crate::error::EngineError;
use crate::metrics::StepMetrics;
use crate::system::AgentSystem;

/// A set of [`AgentSystem`]s stepped or reset together.
///
/// Systems run in insertion order. Systems never see each other's agents;
/// they can share an environment through their configs.
#[derive(Default)]
pub struct Engine {
    systems: Vec<AgentSystem>,
}

impl Engine {
    /// An engine with no systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system and return its index.
    pub fn add_system(&mut self, system: AgentSystem) -> usize {
        self.systems.push(system);
        self.systems.len() - 1
    }

    /// All systems in run order.
    pub fn systems(&self) -> &[AgentSystem] {
        &self.systems
    }

    /// One system by index.
    pub fn system(&self, index: usize) -> Option<&AgentSystem> {
        self.systems.get(index)
    }

    /// One system by index, mutably.
    pub fn system_mut(&mut self, index: usize) -> Option<&mut AgentSystem> {
        self.systems.get_mut(index)
    }

    /// Number of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the engine has no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Total live agents across every system.
    pub fn agent_count(&self) -> usize {
        self.systems.iter().map(AgentSystem::len).sum()
    }

    /// Reset every system when `reset` is true, otherwise step every system.
    ///
    /// Returns one [`StepMetrics`] per system after a step, and an empty
    /// list after a reset.
    ///
    /// # Errors
    ///
    /// Stops at the first failing system. Systems before it have already
    /// advanced; systems after it have not.
    pub fn run(&mut self, reset: bool) -> Result<Vec<StepMetrics>, EngineError> {
        if reset {
            for (system, s) in self.systems.iter_mut().enumerate() {
                s.reset().map_err(|kind| EngineError { system, kind })?;
            }
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(self.systems.len());
        for (system, s) in self.systems.iter_mut().enumerate() {
            out.push(s.step().map_err(|kind| EngineError { system, kind })?);
        }
        Ok(out)
    }
}
