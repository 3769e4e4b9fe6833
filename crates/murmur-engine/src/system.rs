//! The agent system: one population, its emitters, rules and index.
//!
//! [`AgentSystem`] is the primary user-facing type. Each call to
//! [`step()`](AgentSystem::step) runs one complete step and returns its
//! [`StepMetrics`].
//!
//! # Ownership model
//!
//! The system exclusively owns its agents and spatial index. Emission
//! shapes and the environment are shared read-only through `Arc`, so
//! several systems can sit in one world. All mutating methods take
//! `&mut self`; steps never overlap.

use std::sync::Arc;
use std::time::Instant;

use glam::DVec3;
use indexmap::IndexMap;
use murmur_core::{Agent, AgentId, AgentSettings, Environment, StepId};
use murmur_rules::behavior;
use murmur_rules::neighbor::in_view;
use murmur_rules::{Neighbor, RuleSet};
use murmur_space::{Neighbors, SpaceError, SpatialIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{check_rules, ConfigError, IndexKind, SystemConfig};
use crate::emitter::Emitter;
use crate::error::StepError;
use crate::metrics::StepMetrics;

// Compile-time assertion: AgentSystem can move to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<AgentSystem>();
    }
};

fn micros(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

/// A population of agents stepped together.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use murmur_core::DVec3;
/// use murmur_engine::{AgentSystem, Emitter, PointShape, SystemConfig};
///
/// let config = SystemConfig {
///     emitters: vec![Emitter::burst(Arc::new(PointShape(DVec3::ZERO)), 10)],
///     ..SystemConfig::default()
/// };
/// let mut system = AgentSystem::new(config)?;
/// assert_eq!(system.len(), 10);
/// let metrics = system.step()?;
/// assert_eq!(metrics.live, 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AgentSystem {
    settings: Vec<AgentSettings>,
    emitters: Vec<Emitter>,
    rules: RuleSet,
    environment: Option<Arc<dyn Environment>>,
    index_kind: IndexKind,
    index: Box<dyn SpatialIndex>,
    agents: IndexMap<AgentId, Agent>,
    rng: ChaCha8Rng,
    seed: u64,
    next_id: u64,
    next_template: usize,
    step: StepId,
    last_metrics: StepMetrics,
}

impl AgentSystem {
    /// Create a system from a validated [`SystemConfig`].
    ///
    /// The new system is in its reset state: burst emitters have spawned
    /// and the step counter is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation fails, or
    /// [`ConfigError::Space`] if a burst emission point is non-finite.
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let SystemConfig {
            settings,
            emitters,
            rules,
            environment,
            index,
            seed,
        } = config;
        let mut system = Self {
            settings,
            emitters,
            rules,
            environment,
            index_kind: index,
            index: index.build()?,
            agents: IndexMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            next_id: 0,
            next_template: 0,
            step: StepId::default(),
            last_metrics: StepMetrics::default(),
        };
        system.reset().map_err(|e| match e {
            StepError::Space(s) => ConfigError::Space(s),
            StepError::NonFinitePosition { agent, position } => {
                ConfigError::Space(SpaceError::NonFinitePosition { id: agent, position })
            }
        })?;
        Ok(system)
    }

    /// Return the system to its initial state.
    ///
    /// Removes every agent, replaces the index with a fresh one (lattice
    /// bounds grown by the previous run are dropped), reseeds the RNG,
    /// zeroes the step counter and template cursor, then lets each burst
    /// emitter spawn its full count. Continuous emitters spawn nothing
    /// until the next step. Agent ids keep counting up across resets.
    pub fn reset(&mut self) -> Result<(), StepError> {
        self.agents.clear();
        self.index = self.index_kind.build()?;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.step = StepId::default();
        self.next_template = 0;
        self.last_metrics = StepMetrics::default();

        for e in 0..self.emitters.len() {
            if self.emitters[e].continuous_flow {
                continue;
            }
            for _ in 0..self.emitters[e].num_agents {
                self.spawn_from(e)?;
            }
        }
        log::info!("reset: seed {}, {} agents from burst emitters", self.seed, self.agents.len());
        debug_assert_eq!(self.index.len(), self.agents.len());
        Ok(())
    }

    /// Execute one step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::NonFinitePosition`] if an agent's position is
    /// NaN or infinite when the index is rebuilt. Agents spawned earlier in
    /// the step are kept; nothing is integrated.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();

        // 1. Spawn.
        let phase = Instant::now();
        for e in 0..self.emitters.len() {
            if self.emitters[e].should_spawn(self.step, self.agents.len()) {
                self.spawn_from(e)?;
                metrics.spawned += 1;
            }
        }
        metrics.spawn_us = micros(phase);

        // 2. Rebuild.
        let phase = Instant::now();
        let mut entries = self.agents.values().map(|a| (a.id(), a.position()));
        self.index.rebuild(&mut entries)?;
        debug_assert_eq!(self.index.len(), self.agents.len());
        metrics.rebuild_us = micros(phase);

        // 3. Evaluate against a frozen snapshot.
        let phase = Instant::now();
        let visited_before = self.index.candidates_visited();
        // Agents spawned with a zero lifespan are already dead: they are
        // neither perceived nor evaluated, only culled.
        let snapshot: IndexMap<AgentId, Neighbor> = self
            .agents
            .values()
            .filter(|a| a.is_alive())
            .map(|a| (a.id(), Neighbor::of(a)))
            .collect();
        let multiplier = self.rules.perception_multiplier();
        let environment = self.environment.as_deref();
        let mut perceived: Vec<Neighbor> = Vec::new();
        let mut kills: Vec<AgentId> = Vec::new();
        for agent in self.agents.values_mut().filter(|a| a.is_alive()) {
            perceived.clear();
            let range = agent.vision_radius() * multiplier;
            if range > 0.0 {
                let viewer: &Agent = agent;
                let found = self.index.query_radius(viewer.position(), range, Some(viewer.id()));
                perceived.extend(
                    found
                        .iter()
                        .filter_map(|id| snapshot.get(id))
                        .filter(|n| in_view(viewer, n.position)),
                );
            }
            metrics.neighbors_seen += perceived.len() as u64;
            let outcome = self.rules.evaluate(agent, &perceived, environment);
            metrics.bounces += u32::from(outcome.bounced);
            metrics.wraps += u32::from(outcome.wrapped);
            kills.extend(outcome.kills);
        }
        if !kills.is_empty() {
            kills.sort_unstable();
            kills.dedup();
            let step = self.step;
            let prey = self
                .agents
                .values_mut()
                .filter(|a| a.is_alive() && kills.binary_search(&a.id()).is_ok())
                .inspect(|a| {
                    metrics.eaten += 1;
                    log::trace!("step {step}: agent {} eaten", a.id());
                });
            behavior::eat(prey);
        }
        metrics.candidates_visited = self.index.candidates_visited().saturating_sub(visited_before);
        metrics.evaluate_us = micros(phase);

        // 4. Integrate.
        let phase = Instant::now();
        for agent in self.agents.values_mut().filter(|a| a.is_alive()) {
            agent.integrate();
        }
        metrics.integrate_us = micros(phase);

        // 5. Cull.
        let phase = Instant::now();
        let before = self.agents.len();
        let index = &mut self.index;
        self.agents.retain(|id, agent| {
            if agent.is_dead() {
                index.remove(*id);
                false
            } else {
                true
            }
        });
        metrics.culled = (before - self.agents.len()) as u32;
        debug_assert_eq!(self.index.len(), self.agents.len());
        metrics.cull_us = micros(phase);

        metrics.live = self.agents.len();
        metrics.total_us = micros(step_start);
        log::debug!(
            "step {}: live {}, spawned {}, eaten {}, culled {}, {}us",
            self.step,
            metrics.live,
            metrics.spawned,
            metrics.eaten,
            metrics.culled,
            metrics.total_us
        );
        self.step = self.step.next();
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    fn spawn_from(&mut self, emitter: usize) -> Result<AgentId, StepError> {
        let emitted = self.emitters[emitter].emit(&mut self.rng);
        let position = match &self.environment {
            Some(env) => env.closest_point(emitted),
            None => emitted,
        };
        let settings = self.settings[self.next_template];
        self.next_template = (self.next_template + 1) % self.settings.len();
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let agent = Agent::spawn(id, settings, position, &mut self.rng);
        self.index.insert(id, position)?;
        self.agents.insert(id, agent);
        Ok(id)
    }

    // ── Accessors ──────────────────────────────────────────────

    /// Live agents in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    /// Look up one agent.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Positions of live agents in spawn order.
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.agents.values().map(Agent::position)
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the system has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Steps completed since the last reset.
    pub fn step_id(&self) -> StepId {
        self.step
    }

    /// The seed the RNG is reset to.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The rules agents currently follow.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The shared environment, if any.
    pub fn environment(&self) -> Option<&Arc<dyn Environment>> {
        self.environment.as_ref()
    }

    /// The spatial index, as of the last rebuild plus later spawns.
    pub fn index(&self) -> &dyn SpatialIndex {
        self.index.as_ref()
    }

    // ── Mutators ───────────────────────────────────────────────

    /// Remove an agent immediately. Returns whether it was present.
    pub fn kill(&mut self, id: AgentId) -> bool {
        let removed = self.agents.shift_remove(&id).is_some();
        if removed {
            self.index.remove(id);
            log::trace!("step {}: agent {id} killed", self.step);
        }
        removed
    }

    /// Agents within `radius` of `id`, excluding `id` itself.
    ///
    /// Positions are those indexed at the last rebuild, so this matches
    /// what rules saw during the last step. `None` if `id` is not live.
    pub fn neighbors(&self, id: AgentId, radius: f64) -> Option<Neighbors> {
        let origin = self.index.position_of(id)?;
        Some(self.index.query_radius(origin, radius, Some(id)))
    }

    /// Replace the rules, effective from the next step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rules`] or [`ConfigError::MissingEnvironment`]
    /// and keeps the current rules.
    pub fn set_rules(&mut self, rules: RuleSet) -> Result<(), ConfigError> {
        check_rules(&rules, self.environment.is_some())?;
        self.rules = rules;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::PointShape;
    use murmur_rules::{BehaviorKind, ForceKind};
    use murmur_test_utils::{scatter, still_settings, SequenceShape};

    fn burst_at(points: Vec<DVec3>) -> SystemConfig {
        let n = points.len() as u32;
        SystemConfig {
            settings: vec![still_settings()],
            emitters: vec![Emitter::burst(Arc::new(SequenceShape::new(points)), n)],
            ..SystemConfig::default()
        }
    }

    #[test]
    fn new_spawns_bursts_and_indexes_them() {
        let sys = AgentSystem::new(burst_at(vec![DVec3::ZERO, DVec3::X, DVec3::Y])).unwrap();
        assert_eq!(sys.len(), 3);
        assert_eq!(sys.index().len(), 3);
        assert_eq!(sys.step_id(), StepId(0));
        for a in sys.agents() {
            assert_eq!(sys.index().position_of(a.id()), Some(a.position()));
        }
    }

    #[test]
    fn step_advances_counter_and_records_metrics() {
        let mut sys = AgentSystem::new(burst_at(vec![DVec3::ZERO])).unwrap();
        let m = sys.step().unwrap();
        assert_eq!(sys.step_id(), StepId(1));
        assert_eq!(m.live, 1);
        assert_eq!(sys.last_metrics(), &m);
    }

    #[test]
    fn templates_are_assigned_round_robin() {
        let a = AgentSettings {
            mass: 1.0,
            ..still_settings()
        };
        let b = AgentSettings {
            mass: 2.0,
            ..still_settings()
        };
        let cfg = SystemConfig {
            settings: vec![a, b],
            ..burst_at(vec![DVec3::ZERO; 5])
        };
        let sys = AgentSystem::new(cfg).unwrap();
        let masses: Vec<f64> = sys.agents().map(Agent::mass).collect();
        assert_eq!(masses, vec![1.0, 2.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn kill_removes_from_collection_and_index() {
        let mut sys = AgentSystem::new(burst_at(vec![DVec3::ZERO, DVec3::X])).unwrap();
        let first = sys.agents().next().map(Agent::id).unwrap();
        assert!(sys.kill(first));
        assert!(!sys.kill(first));
        assert_eq!(sys.len(), 1);
        assert!(!sys.index().contains(first));
    }

    #[test]
    fn neighbors_excludes_self_and_far_agents() {
        let sys = AgentSystem::new(burst_at(vec![DVec3::ZERO, DVec3::X, DVec3::new(10.0, 0.0, 0.0)])).unwrap();
        let ids: Vec<AgentId> = sys.agents().map(Agent::id).collect();
        let near = sys.neighbors(ids[0], 2.0).unwrap();
        assert_eq!(near.as_slice(), &[ids[1]]);
        assert!(sys.neighbors(AgentId(999), 2.0).is_none());
    }

    #[test]
    fn set_rules_validates_and_keeps_old_rules_on_error() {
        let mut sys = AgentSystem::new(burst_at(vec![DVec3::ZERO])).unwrap();
        let err = sys.set_rules(RuleSet::new().with_behavior(BehaviorKind::BounceContain));
        assert!(matches!(err, Err(ConfigError::MissingEnvironment { .. })));
        assert!(sys.rules().behaviors().is_empty());

        let seek = RuleSet::new().with_force(ForceKind::Seek { target: DVec3::X });
        sys.set_rules(seek.clone()).unwrap();
        assert_eq!(sys.rules(), &seek);
    }

    #[test]
    fn non_finite_burst_point_fails_construction() {
        let cfg = burst_at(vec![DVec3::new(f64::NAN, 0.0, 0.0)]);
        assert!(matches!(AgentSystem::new(cfg), Err(ConfigError::Space(_))));
    }

    #[test]
    fn list_backend_behaves_like_lattice() {
        let points = scatter(20, 4.0, 1);
        let rules = RuleSet::new().with_force(ForceKind::Separation {
            vision_radius_multiplier: 1.0,
        });
        let lattice = SystemConfig {
            rules: rules.clone(),
            ..burst_at(points.clone())
        };
        let list = SystemConfig {
            rules,
            index: IndexKind::List,
            ..burst_at(points)
        };
        let mut a = AgentSystem::new(lattice).unwrap();
        let mut b = AgentSystem::new(list).unwrap();
        for _ in 0..5 {
            a.step().unwrap();
            b.step().unwrap();
        }
        // Neighbor order differs between backends, so sums may differ in
        // the last bits.
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.positions().zip(b.positions()) {
            assert!((pa - pb).length() < 1e-9, "{pa} vs {pb}");
        }
    }
}
