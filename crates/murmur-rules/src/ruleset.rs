//! Ordered force and behavior lists, validated and evaluated as a unit.

use glam::DVec3;
use murmur_core::{Agent, AgentId, Environment};
use smallvec::SmallVec;

use crate::behavior::{self, BehaviorKind};
use crate::error::RuleError;
use crate::force::Force;
use crate::neighbor::Neighbor;

/// What one agent's evaluation did beyond accumulating acceleration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleOutcome {
    /// Neighbors an `Eat` behavior wants dead. The caller applies these
    /// after every agent has been evaluated.
    pub kills: SmallVec<[AgentId; 4]>,
    /// Whether a bounce reflected the velocity.
    pub bounced: bool,
    /// Whether a wrap teleported the agent.
    pub wrapped: bool,
}

/// The rules every agent of a system runs each step.
///
/// Forces run first, in list order, then behaviors, in list order.
///
/// # Examples
///
/// ```
/// use murmur_rules::{BehaviorKind, Force, ForceKind, RuleSet};
///
/// let rules = RuleSet::new()
///     .with_force(Force::weighted(ForceKind::Separation { vision_radius_multiplier: 0.5 }, 1.5))
///     .with_force(ForceKind::Cohesion { vision_radius_multiplier: 1.0 })
///     .with_behavior(BehaviorKind::BounceContain);
/// rules.validate().unwrap();
/// assert_eq!(rules.perception_multiplier(), 1.0);
/// assert!(rules.requires_environment());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    forces: Vec<Force>,
    behaviors: Vec<BehaviorKind>,
}

impl RuleSet {
    /// An empty rule set: agents drift on their initial velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a force.
    pub fn with_force(mut self, force: impl Into<Force>) -> Self {
        self.forces.push(force.into());
        self
    }

    /// Append a behavior.
    pub fn with_behavior(mut self, behavior: BehaviorKind) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Forces in evaluation order.
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Behaviors in evaluation order.
    pub fn behaviors(&self) -> &[BehaviorKind] {
        &self.behaviors
    }

    /// Check every rule, reporting the first failure with its position.
    pub fn validate(&self) -> Result<(), RuleError> {
        for (index, force) in self.forces.iter().enumerate() {
            force.validate().map_err(|source| RuleError::InvalidForce {
                index,
                name: force.kind.name(),
                source,
            })?;
        }
        for (index, behavior) in self.behaviors.iter().enumerate() {
            behavior.validate().map_err(|source| RuleError::InvalidBehavior {
                index,
                name: behavior.name(),
                source,
            })?;
        }
        Ok(())
    }

    /// Largest vision-radius multiplier any rule reads neighbors with.
    ///
    /// Zero when no rule needs neighbors; the caller can then skip the
    /// index query entirely.
    pub fn perception_multiplier(&self) -> f64 {
        self.forces
            .iter()
            .filter_map(|f| f.kind.neighbor_range_multiplier())
            .chain(self.behaviors.iter().filter_map(|b| b.neighbor_range_multiplier()))
            .fold(0.0, f64::max)
    }

    /// Names of rules that need an environment to do anything.
    pub fn environment_rules(&self) -> Vec<&'static str> {
        self.forces
            .iter()
            .filter(|f| f.kind.requires_environment())
            .map(|f| f.kind.name())
            .chain(
                self.behaviors
                    .iter()
                    .filter(|b| b.requires_environment())
                    .map(|b| b.name()),
            )
            .collect()
    }

    /// Whether any rule needs an environment.
    pub fn requires_environment(&self) -> bool {
        !self.environment_rules().is_empty()
    }

    /// Run every rule for `agent`.
    ///
    /// Forces accumulate into the agent's acceleration; bounce and wrap
    /// mutate the agent itself. Neighbors are read-only snapshots, and
    /// kills are returned rather than applied.
    pub fn evaluate(&self, agent: &mut Agent, neighbors: &[Neighbor], environment: Option<&dyn Environment>) -> RuleOutcome {
        for force in &self.forces {
            let f = force.evaluate(agent, neighbors, environment);
            agent.apply_force(f);
        }

        let mut outcome = RuleOutcome::default();
        for behavior in &self.behaviors {
            match *behavior {
                BehaviorKind::Eat {
                    vision_radius_multiplier,
                } => {
                    let reach = agent.vision_radius() * vision_radius_multiplier;
                    let here: DVec3 = agent.position();
                    outcome.kills.extend(
                        neighbors
                            .iter()
                            .filter(|n| n.position.distance(here) < reach)
                            .map(|n| n.id),
                    );
                }
                BehaviorKind::BounceContain => {
                    if let Some(env) = environment {
                        outcome.bounced |= behavior::bounce_contain(agent, env);
                    }
                }
                BehaviorKind::Wrap => {
                    if let Some(env) = environment {
                        outcome.wrapped |= behavior::wrap(agent, env);
                    }
                }
            }
        }
        outcome
    }
}
