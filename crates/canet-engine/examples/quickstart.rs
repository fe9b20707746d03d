//! Quickstart: release 500 propagules off the Canet barrier and watch
//! where they end up.
//!
//! Run with `cargo run -p canet-engine --example quickstart [seed]`.

use std::error::Error;

use canet_core::PopulationView;
use canet_engine::{DriftConfig, DriftWorld, Snapshot, StepMetrics};
use canet_space::CurveMode;

fn main() -> Result<(), Box<dyn Error>> {
    let seed = std::env::args().nth(1).map(|s| s.parse::<u64>()).transpose()?;

    let config = DriftConfig {
        seed,
        ..DriftConfig::default()
    };
    let mut world = DriftWorld::canet(config, CurveMode::Smooth)?;
    println!(
        "seed {} | wind {}° at {} | tide {} | {} propagules",
        world.seed(),
        world.config().wind_direction_deg,
        world.config().wind_speed,
        world.config().tide_strength,
        world.config().particle_count
    );

    let mut print_every_fifth = |snapshot: &Snapshot<'_>, metrics: &StepMetrics| {
        if snapshot.step_id().0 % 5 == 0 {
            println!(
                "step {:>3}: {} ({} us)",
                snapshot.step_id(),
                snapshot.counts(),
                metrics.total_us
            );
        }
    };
    let outcome = world.run(&mut print_every_fifth)?;

    println!("final:    {}", outcome.counts);
    println!("recruitment rate: {:.1}%", outcome.recruitment_rate * 100.0);
    Ok(())
}
