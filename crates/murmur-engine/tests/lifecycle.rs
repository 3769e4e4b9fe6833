//! Integration tests: spawning, death, eating and culling.
//!
//! Drives whole systems through `step()` and `reset()` and checks the
//! population after each phase has had its effect.

use std::sync::Arc;

use murmur_core::{AgentSettings, DVec3, StepId};
use murmur_engine::{AgentSystem, Emitter, PointShape, StepError, SystemConfig};
use murmur_rules::{BehaviorKind, RuleSet};
use murmur_space::{Aabb, BoxEnvironment};
use murmur_test_utils::{still_settings, SequenceShape, WallEnvironment};

fn at_origin() -> Arc<PointShape> {
    Arc::new(PointShape(DVec3::ZERO))
}

fn system(settings: AgentSettings, emitters: Vec<Emitter>, rules: RuleSet) -> AgentSystem {
    AgentSystem::new(SystemConfig {
        settings: vec![settings],
        emitters,
        rules,
        ..SystemConfig::default()
    })
    .unwrap()
}

fn assert_indexed(sys: &AgentSystem) {
    assert_eq!(sys.index().len(), sys.len());
    for a in sys.agents() {
        assert!(sys.index().contains(a.id()), "agent {} not indexed", a.id());
    }
}

// ── Emitters ────────────────────────────────────────────────────

#[test]
fn burst_of_ten_at_origin() {
    let mut sys = system(still_settings(), vec![Emitter::burst(at_origin(), 10)], RuleSet::new());
    for _ in 0..3 {
        sys.step().unwrap();
    }
    sys.reset().unwrap();
    assert_eq!(sys.len(), 10);
    assert_eq!(sys.step_id(), StepId(0));
    assert!(sys.positions().all(|p| p == DVec3::ZERO));
    assert_indexed(&sys);
}

#[test]
fn continuous_emitter_honours_rate_and_cap() {
    let mut sys = system(still_settings(), vec![Emitter::continuous(at_origin(), 2, 3)], RuleSet::new());
    assert!(sys.is_empty());
    let spawned: Vec<u32> = (0..8).map(|_| sys.step().unwrap().spawned).collect();
    assert_eq!(spawned, vec![1, 0, 1, 0, 1, 0, 0, 0]);
    assert_eq!(sys.len(), 3);
}

#[test]
fn continuous_cap_refills_after_deaths() {
    let short = AgentSettings {
        lifespan: 2,
        ..still_settings()
    };
    let mut sys = system(short, vec![Emitter::continuous(at_origin(), 1, 2)], RuleSet::new());
    // Each agent lives two steps; the cap lets a replacement in every step
    // once the elder has been culled.
    for _ in 0..10 {
        let m = sys.step().unwrap();
        assert_eq!(m.spawned, 1);
        assert!(m.live <= 2);
    }
    assert_eq!(sys.len(), 1);
}

#[test]
fn emission_is_projected_into_the_environment() {
    let env = BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 5.0).unwrap(), false);
    let sys = AgentSystem::new(SystemConfig {
        settings: vec![still_settings()],
        emitters: vec![Emitter::burst(Arc::new(PointShape(DVec3::new(50.0, 1.0, 0.0))), 1)],
        environment: Some(Arc::new(env)),
        ..SystemConfig::default()
    })
    .unwrap();
    assert_eq!(sys.positions().next(), Some(DVec3::new(5.0, 1.0, 0.0)));
}

#[test]
fn non_finite_spawn_aborts_the_step() {
    let nan = Arc::new(SequenceShape::new(vec![DVec3::new(f64::NAN, 0.0, 0.0)]));
    let mut sys = system(still_settings(), vec![Emitter::continuous(nan, 1, 0)], RuleSet::new());
    match sys.step() {
        Err(StepError::NonFinitePosition { .. }) => {}
        other => panic!("expected NonFinitePosition, got {other:?}"),
    }
    assert_eq!(sys.step_id(), StepId(0));
    assert_indexed(&sys);
}

// ── Death ───────────────────────────────────────────────────────

#[test]
fn lifespan_one_is_culled_after_one_step() {
    let once = AgentSettings {
        lifespan: 1,
        ..still_settings()
    };
    let mut sys = system(once, vec![Emitter::burst(at_origin(), 1)], RuleSet::new());
    let m = sys.step().unwrap();
    assert_eq!(m.culled, 1);
    assert!(sys.is_empty());
    assert!(sys.index().is_empty());
}

#[test]
fn eat_removes_everything_in_reach() {
    let eat = RuleSet::new().with_behavior(BehaviorKind::Eat {
        vision_radius_multiplier: 1.0,
    });
    let mut sys = system(still_settings(), vec![Emitter::burst(at_origin(), 3)], eat);
    let m = sys.step().unwrap();
    // Kills are deferred, so every agent eats every other before anyone dies.
    assert_eq!(m.eaten, 3);
    assert_eq!(m.culled, 3);
    assert!(sys.is_empty());
}

#[test]
fn eat_with_nothing_in_reach_changes_nothing() {
    let far = Arc::new(SequenceShape::new(vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)]));
    let eat = RuleSet::new().with_behavior(BehaviorKind::Eat {
        vision_radius_multiplier: 1.0,
    });
    let mut sys = system(still_settings(), vec![Emitter::burst(far, 2)], eat);
    let m = sys.step().unwrap();
    assert_eq!(m.eaten, 0);
    assert_eq!(sys.len(), 2);
}

#[test]
fn zero_lifespan_agents_are_culled_without_acting() {
    let stillborn = AgentSettings {
        lifespan: 0,
        ..still_settings()
    };
    let eat = RuleSet::new().with_behavior(BehaviorKind::Eat {
        vision_radius_multiplier: 1.0,
    });
    // Templates alternate: agent 0 is stillborn, agent 1 lives.
    let mut sys = AgentSystem::new(SystemConfig {
        settings: vec![stillborn, still_settings()],
        emitters: vec![Emitter::burst(at_origin(), 2)],
        rules: eat,
        ..SystemConfig::default()
    })
    .unwrap();
    assert_eq!(sys.len(), 2);
    let m = sys.step().unwrap();
    assert_eq!(m.eaten, 0);
    assert_eq!(m.culled, 1);
    assert_eq!(m.neighbors_seen, 0);
    assert_eq!(sys.len(), 1);
    assert!(sys.agents().all(|a| a.is_alive()));
    assert_indexed(&sys);
}

#[test]
fn kill_between_steps_keeps_index_consistent() {
    let mut sys = system(still_settings(), vec![Emitter::burst(at_origin(), 4)], RuleSet::new());
    let victim = sys.agents().nth(2).map(|a| a.id()).unwrap();
    assert!(sys.kill(victim));
    assert_indexed(&sys);
    sys.step().unwrap();
    assert_eq!(sys.len(), 3);
    assert!(sys.agent(victim).is_none());
}

// ── Boundaries ──────────────────────────────────────────────────

#[test]
fn bouncing_agents_hit_the_walls() {
    let env = BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 5.0).unwrap(), false);
    let moving = AgentSettings {
        initial_speed: 1.0,
        ..still_settings()
    };
    let mut sys = AgentSystem::new(SystemConfig {
        settings: vec![moving],
        emitters: vec![Emitter::burst(at_origin(), 30)],
        rules: RuleSet::new().with_behavior(BehaviorKind::BounceContain),
        environment: Some(Arc::new(env)),
        seed: 11,
        ..SystemConfig::default()
    })
    .unwrap();
    let bounces: u32 = (0..100).map(|_| sys.step().unwrap().bounces).sum();
    assert!(bounces > 0);
}

#[test]
fn bounce_keeps_drifting_agents_behind_a_wall() {
    let moving = AgentSettings {
        initial_speed: 1.0,
        ..still_settings()
    };
    let mut sys = AgentSystem::new(SystemConfig {
        settings: vec![moving],
        emitters: vec![Emitter::burst(at_origin(), 20)],
        rules: RuleSet::new().with_behavior(BehaviorKind::BounceContain),
        environment: Some(Arc::new(WallEnvironment { wall: 3.0 })),
        seed: 2,
        ..SystemConfig::default()
    })
    .unwrap();
    let mut bounces = 0;
    for _ in 0..60 {
        bounces += sys.step().unwrap().bounces;
        assert!(sys.positions().all(|p| p.x <= 3.0), "an agent passed the wall");
    }
    assert!(bounces > 0);
}

#[test]
fn wrapping_agents_stay_near_the_box() {
    let env = BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 5.0).unwrap(), true);
    let moving = AgentSettings {
        initial_speed: 1.0,
        ..still_settings()
    };
    let mut sys = AgentSystem::new(SystemConfig {
        settings: vec![moving],
        emitters: vec![Emitter::burst(at_origin(), 30)],
        rules: RuleSet::new().with_behavior(BehaviorKind::Wrap),
        environment: Some(Arc::new(env)),
        seed: 5,
        ..SystemConfig::default()
    })
    .unwrap();
    let mut wraps = 0;
    for _ in 0..100 {
        wraps += sys.step().unwrap().wraps;
        // Wrapping runs before integration, so an agent can overshoot by
        // at most one step of its (constant) velocity.
        for a in sys.agents() {
            let v = a.velocity().abs();
            let p = a.position().abs();
            assert!(p.cmple(DVec3::splat(5.0) + v + 1e-9).all(), "{} escaped", a.position());
        }
    }
    assert!(wraps > 0);
}
