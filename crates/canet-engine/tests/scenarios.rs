//! Integration test: scripted drift scenarios on the Canet layout.
//!
//! Each scenario places particles by hand in calm water (no wind, tide
//! or noise unless stated) so that every outcome can be predicted from the
//! geometry alone.

use std::sync::Arc;

use canet_core::{ParticleStatus, Point, PopulationView, StepId};
use canet_engine::{
    run_to_completion, DriftConfig, DriftWorld, NullObserver, OutsideBarrierRule, Population,
};
use canet_space::{DomainGeometry, CANET_BOUNDS};
use canet_test_utils::geometry::{canet_geometry, square_lagoon_geometry};
use canet_test_utils::{floating_at, ring};

fn calm(threshold: u32, steps: u32) -> DriftConfig {
    DriftConfig {
        settlement_dwell_threshold: threshold,
        step_count: steps,
        seed: Some(0),
        ..DriftConfig::calm()
    }
}

fn canet() -> Arc<DomainGeometry> {
    Arc::new(canet_geometry())
}

// ── Recruitment ─────────────────────────────────────────────────────

#[test]
fn five_particles_in_lagoon_recruit_after_exactly_five_steps() {
    let pop = Population::from_positions(vec![Point::new(30.0, 50.0); 5]);
    let mut world = DriftWorld::with_population(calm(5, 10), canet(), pop).unwrap();

    for step in 1..=4u32 {
        let result = world.step().unwrap();
        let counts = result.snapshot.counts();
        assert_eq!(counts.floating, 5, "step {step}");
        assert_eq!(counts.recruited, 0, "step {step}");
        assert!(result
            .snapshot
            .particles()
            .iter()
            .all(|p| p.dwell_depth == step));
    }

    let result = world.step().unwrap();
    assert_eq!(result.snapshot.step_id(), StepId(5));
    assert_eq!(result.snapshot.counts().recruited, 5);
    assert_eq!(result.metrics.newly_recruited, 5);
    assert_eq!(result.metrics.dwell_increments, 5);

    let outcome = world.run(&mut NullObserver).unwrap();
    assert_eq!(outcome.counts.recruited, 5);
    assert_eq!(outcome.recruitment_rate, 1.0);
    // Dwell stops counting once recruited.
    assert!(world.population().particles().iter().all(|p| p.dwell_depth == 5));
}

#[test]
fn ring_inside_lagoon_recruits_together() {
    let pop = Population::from_particles(ring(Point::new(30.0, 50.0), 3.0, 12));
    let mut world = DriftWorld::with_population(calm(3, 3), canet(), pop).unwrap();
    let outcome = world.run(&mut NullObserver).unwrap();
    assert_eq!(outcome.steps_run, StepId(3));
    assert_eq!(outcome.counts.recruited, 12);
    assert_eq!(outcome.recruitment_rate, 1.0);
}

// ── Leaving the domain ──────────────────────────────────────────────

#[test]
fn particle_below_lowest_x_bound_is_lost_on_first_step() {
    let x = CANET_BOUNDS.0 - 1.0;
    let pop = Population::from_positions([Point::new(x, 50.0)]);
    let cfg = DriftConfig {
        outside_barrier: OutsideBarrierRule::Lose,
        ..calm(12, 5)
    };
    let mut world = DriftWorld::with_population(cfg, canet(), pop).unwrap();
    let result = world.step().unwrap();
    assert_eq!(result.snapshot.particles()[0].status, ParticleStatus::Lost);
    assert_eq!(result.metrics.lost_beyond_barrier, 1);
}

#[test]
fn particle_below_lowest_x_bound_strands_under_default_rule() {
    let x = CANET_BOUNDS.0 - 1.0;
    let pop = Population::from_positions([Point::new(x, 50.0)]);
    let mut world = DriftWorld::with_population(calm(12, 5), canet(), pop).unwrap();
    let result = world.step().unwrap();
    assert_eq!(result.snapshot.particles()[0].status, ParticleStatus::Stranded);
    assert_eq!(result.metrics.stranded_on_coast, 1);
}

#[test]
fn particle_beyond_far_bounds_is_lost_under_either_rule() {
    let (_, x_max, y_min, y_max) = CANET_BOUNDS;
    let positions = [
        Point::new(x_max + 1.0, 50.0),
        Point::new(100.0, y_max + 1.0),
        Point::new(100.0, y_min - 1.0),
    ];
    for rule in [OutsideBarrierRule::Strand, OutsideBarrierRule::Lose] {
        let cfg = DriftConfig {
            outside_barrier: rule,
            ..calm(12, 1)
        };
        let (end, outcome) =
            run_to_completion(Population::from_positions(positions), canet(), cfg).unwrap();
        assert_eq!(outcome.counts.lost, 3, "{rule:?}");
        assert!(end.particles().iter().all(|p| p.status == ParticleStatus::Lost));
    }
}

// ── Calm water ──────────────────────────────────────────────────────

#[test]
fn calm_water_is_a_no_op() {
    let positions: Vec<Point> = (0..10)
        .flat_map(|i| (0..10).map(move |j| Point::new(60.0 + 4.0 * i as f64, 5.0 + 10.0 * j as f64)))
        .collect();
    let pop = Population::from_positions(positions.clone());
    let mut world = DriftWorld::with_population(calm(12, 50), canet(), pop).unwrap();
    while !world.is_finished() {
        let result = world.step().unwrap();
        assert_eq!(result.snapshot.positions(), positions);
        assert_eq!(result.snapshot.counts().floating, 100);
        assert_eq!(result.metrics.transitions(), 0);
    }
}

// ── Precedence and passability ──────────────────────────────────────

#[test]
fn lagoon_inside_barrier_band_settles_instead_of_stranding() {
    // (49, 40) is inside the smooth lagoon, inside the barrier band and
    // below the breach.
    let g = canet();
    assert!(g.barrier().blocks(Point::new(49.0, 40.0)));
    let pop = Population::from_positions([Point::new(49.0, 40.0)]);
    let mut world = DriftWorld::with_population(calm(3, 5), g, pop).unwrap();
    let first = world.step().unwrap();
    assert_eq!(first.snapshot.particles()[0].status, ParticleStatus::Floating);
    assert_eq!(first.snapshot.particles()[0].dwell_depth, 1);
    assert_eq!(first.metrics.stranded_on_barrier, 0);
    let outcome = world.run(&mut NullObserver).unwrap();
    assert_eq!(outcome.counts.recruited, 1);
}

fn westward(threshold: u32, steps: u32) -> DriftConfig {
    // Wind from the east at 10 moves one unit west per step.
    DriftConfig {
        wind_direction_deg: 90.0,
        wind_speed: 10.0,
        ..calm(threshold, steps)
    }
}

#[test]
fn crossing_through_the_breach_never_strands() {
    let pop = Population::from_positions([Point::new(53.0, 50.0)]);
    let mut world = DriftWorld::with_population(westward(50, 8), canet(), pop).unwrap();
    while !world.is_finished() {
        let result = world.step().unwrap();
        let p = result.snapshot.particles()[0];
        assert_ne!(p.status, ParticleStatus::Stranded, "at {}", p.position);
    }
    let p = world.population().particles()[0];
    assert!(p.position.x < 48.5, "particle did not clear the band");
    assert!(p.dwell_depth >= 1, "particle never reached the lagoon");
}

#[test]
fn crossing_solid_barrier_strands() {
    let pop = Population::from_positions([Point::new(53.0, 30.0)]);
    let (end, outcome) = run_to_completion(pop, canet(), westward(50, 8)).unwrap();
    assert_eq!(outcome.counts.stranded, 1);
    // Frozen where it hit: the first step inside the band.
    assert!((end.particles()[0].position.x - 51.0).abs() < 1e-9);
}

// ── Square layout ───────────────────────────────────────────────────

#[test]
fn square_layout_sorts_a_mixed_cohort() {
    let particles = floating_at(&[
        (5.0, 5.0),   // lagoon
        (11.0, -5.0), // lagoon over solid barrier
        (11.0, 30.0), // solid barrier
        (11.0, 15.0), // breach
        (-5.0, 30.0), // coast side
        (50.0, 10.0), // open water
        (150.0, 0.0), // outside
    ]);
    let (end, outcome) = run_to_completion(
        Population::from_particles(particles),
        square_lagoon_geometry(),
        calm(2, 2),
    )
    .unwrap();
    let statuses = end.statuses();
    assert_eq!(
        statuses,
        vec![
            ParticleStatus::Recruited,
            ParticleStatus::Recruited,
            ParticleStatus::Stranded,
            ParticleStatus::Floating,
            ParticleStatus::Stranded,
            ParticleStatus::Floating,
            ParticleStatus::Lost,
        ]
    );
    assert_eq!(outcome.counts.total(), 7);
    assert!((outcome.recruitment_rate - 2.0 / 7.0).abs() < 1e-12);
}
