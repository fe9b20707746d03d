//! Benchmark profiles for the Canet drift engine.
//!
//! - [`reference_profile`]: the standard Canet run, 500 propagules over 50 steps
//! - [`stress_profile`]: 10K propagules for throughput and threading
//! - [`sample_grid`]: evenly spaced points covering the domain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use canet_core::Point;
use canet_engine::DriftConfig;
use canet_space::DomainBounds;

/// The standard Canet run with a fixed seed.
pub fn reference_profile(seed: u64) -> DriftConfig {
    DriftConfig {
        seed: Some(seed),
        ..DriftConfig::default()
    }
}

/// 10K particles over the full step budget, split across `workers` threads.
pub fn stress_profile(seed: u64, workers: usize) -> DriftConfig {
    DriftConfig {
        seed: Some(seed),
        particle_count: 10_000,
        step_count: 200,
        worker_threads: workers,
        ..DriftConfig::default()
    }
}

/// `n * n` points evenly spaced across `bounds`.
pub fn sample_grid(bounds: &DomainBounds, n: usize) -> Vec<Point> {
    let n = n.max(2);
    let step_x = (bounds.x_max() - bounds.x_min()) / (n - 1) as f64;
    let step_y = (bounds.y_max() - bounds.y_min()) / (n - 1) as f64;
    (0..n)
        .flat_map(|i| {
            (0..n).map(move |j| {
                Point::new(
                    bounds.x_min() + step_x * i as f64,
                    bounds.y_min() + step_y * j as f64,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(1).validate().is_ok());
        assert!(stress_profile(1, 4).validate().is_ok());
    }

    #[test]
    fn sample_grid_covers_corners() {
        let b = DomainBounds::new(0.0, 10.0, -5.0, 5.0).unwrap();
        let g = sample_grid(&b, 3);
        assert_eq!(g.len(), 9);
        assert_eq!(g[0], Point::new(0.0, -5.0));
        assert_eq!(g[8], Point::new(10.0, 5.0));
    }
}
