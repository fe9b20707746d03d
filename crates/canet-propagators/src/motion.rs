//! Stylized kinematic drift: wind advection, tidal bias and diffusion.
//!
//! Per step, a floating particle moves by
//!
//! ```text
//! x += dx_wind + tide_x + N(0, sigma)
//! y += dy_wind          + N(0, sigma)
//! ```
//!
//! where the wind term points opposite to the bearing the wind blows
//! *from*, the tide term is a non-positive onshore bias oscillating with
//! the step index, and `sigma = base + per_wind * wind_speed` grows with
//! wind-driven turbulence. Settled particles only receive a small fixed
//! jitter ([`SettledJitter`]); stranded and lost particles never move.
//!
//! Constructed via the builder pattern: [`MotionModel::builder`].

use canet_core::{Particle, StepId};
use rand::Rng;

use crate::noise::gaussian;

/// Wind speed that produces one unit of drift per step.
pub const WIND_SPEED_SCALE: f64 = 10.0;

/// Angular frequency of the tidal bias, radians per step.
pub const TIDE_FREQUENCY: f64 = 0.3;

/// Wind forcing resolved to a planar drift vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindForcing {
    direction_deg: f64,
    speed: f64,
    dx: f64,
    dy: f64,
}

impl WindForcing {
    /// Wind blowing *from* `direction_deg` (compass bearing, 0 = north,
    /// 90 = east) at `speed`.
    pub fn new(direction_deg: f64, speed: f64) -> Self {
        let flow = (direction_deg + 180.0).to_radians();
        let scale = speed / WIND_SPEED_SCALE;
        Self {
            direction_deg,
            speed,
            dx: flow.sin() * scale,
            dy: flow.cos() * scale,
        }
    }

    /// Bearing the wind blows from.
    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    /// Wind speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Bearing the drift points toward, in `[0, 360)`.
    pub fn flow_bearing_deg(&self) -> f64 {
        (self.direction_deg + 180.0).rem_euclid(360.0)
    }

    /// Unit vector along the flow bearing, for drawing a wind arrow.
    pub fn unit_flow(&self) -> (f64, f64) {
        let flow = self.flow_bearing_deg().to_radians();
        (flow.sin(), flow.cos())
    }

    /// Per-step drift `(dx, dy)`.
    pub fn drift(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }
}

/// Tidal onshore bias for `step`: `-|sin(step * 0.3)| * strength`.
///
/// Never positive; its magnitude oscillates with a period of about 21
/// steps.
pub fn tide_term(step: StepId, strength: f64) -> f64 {
    -(f64::from(step.0) * TIDE_FREQUENCY).sin().abs() * strength
}

/// Deterministic part of one step's displacement, shared by every
/// floating particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    /// Wind drift along x.
    pub dx_wind: f64,
    /// Wind drift along y.
    pub dy_wind: f64,
    /// Tidal bias along x (never positive).
    pub tide_x: f64,
}

impl Displacement {
    /// Total deterministic x displacement.
    pub fn dx(&self) -> f64 {
        self.dx_wind + self.tide_x
    }

    /// Total deterministic y displacement.
    pub fn dy(&self) -> f64 {
        self.dy_wind
    }
}

/// Wind and tide terms for step `step`.
pub fn displacement(
    wind_direction_deg: f64,
    wind_speed: f64,
    tide_strength: f64,
    step: StepId,
) -> Displacement {
    let (dx_wind, dy_wind) = WindForcing::new(wind_direction_deg, wind_speed).drift();
    Displacement {
        dx_wind,
        dy_wind,
        tide_x: tide_term(step, tide_strength),
    }
}

/// Pre-settlement diffusion: `sigma = base + per_wind * wind_speed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Diffusion {
    /// Standard deviation in still air.
    pub base: f64,
    /// Extra standard deviation per unit of wind speed.
    pub per_wind: f64,
}

impl Diffusion {
    /// No diffusion at all; motion becomes fully deterministic.
    pub const NONE: Diffusion = Diffusion {
        base: 0.0,
        per_wind: 0.0,
    };

    /// Standard deviation at `wind_speed`.
    pub fn sigma(&self, wind_speed: f64) -> f64 {
        self.base + self.per_wind * wind_speed
    }
}

impl Default for Diffusion {
    fn default() -> Self {
        Self {
            base: 0.1,
            per_wind: 0.02,
        }
    }
}

/// Post-settlement local dispersal inside the lagoon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettledJitter {
    /// Standard deviation along x.
    pub sigma_x: f64,
    /// Standard deviation along y.
    pub sigma_y: f64,
}

impl Default for SettledJitter {
    fn default() -> Self {
        Self {
            sigma_x: 0.7,
            sigma_y: 1.0,
        }
    }
}

/// Wind, tide and diffusion parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionModel {
    wind: WindForcing,
    tide_strength: f64,
    sigma: f64,
    settled: Option<SettledJitter>,
}

/// Builder for [`MotionModel`].
pub struct MotionModelBuilder {
    wind_direction_deg: f64,
    wind_speed: f64,
    tide_strength: f64,
    diffusion: Diffusion,
    settled: Option<SettledJitter>,
}

impl MotionModel {
    /// Create a builder; defaults to still air, no tide, default
    /// diffusion and default settled jitter.
    pub fn builder() -> MotionModelBuilder {
        MotionModelBuilder {
            wind_direction_deg: 0.0,
            wind_speed: 0.0,
            tide_strength: 0.0,
            diffusion: Diffusion::default(),
            settled: Some(SettledJitter::default()),
        }
    }

    /// The resolved wind.
    pub fn wind(&self) -> &WindForcing {
        &self.wind
    }

    /// Pre-settlement diffusion standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Settled jitter, if enabled.
    pub fn settled_jitter(&self) -> Option<SettledJitter> {
        self.settled
    }

    /// Wind and tide terms for `step`.
    pub fn displacement(&self, step: StepId) -> Displacement {
        let (dx_wind, dy_wind) = self.wind.drift();
        Displacement {
            dx_wind,
            dy_wind,
            tide_x: tide_term(step, self.tide_strength),
        }
    }

    /// Move a floating particle by `d` plus diffusion noise.
    pub fn drift<R: Rng + ?Sized>(&self, particle: &mut Particle, d: &Displacement, rng: &mut R) {
        let nx = gaussian(rng, self.sigma);
        let ny = gaussian(rng, self.sigma);
        particle.position = particle.position.offset(d.dx() + nx, d.dy() + ny);
    }

    /// Apply settled jitter. Returns `false` when jitter is disabled.
    pub fn jitter<R: Rng + ?Sized>(&self, particle: &mut Particle, rng: &mut R) -> bool {
        let Some(j) = self.settled else {
            return false;
        };
        let nx = gaussian(rng, j.sigma_x);
        let ny = gaussian(rng, j.sigma_y);
        particle.position = particle.position.offset(nx, ny);
        true
    }
}

impl MotionModelBuilder {
    /// Bearing the wind blows from, in degrees.
    pub fn wind_direction_deg(mut self, deg: f64) -> Self {
        self.wind_direction_deg = deg;
        self
    }

    /// Wind speed (must be >= 0).
    pub fn wind_speed(mut self, speed: f64) -> Self {
        self.wind_speed = speed;
        self
    }

    /// Tide strength (must be >= 0).
    pub fn tide_strength(mut self, strength: f64) -> Self {
        self.tide_strength = strength;
        self
    }

    /// Pre-settlement diffusion.
    pub fn diffusion(mut self, diffusion: Diffusion) -> Self {
        self.diffusion = diffusion;
        self
    }

    /// Post-settlement jitter; `None` freezes recruited particles.
    pub fn settled_jitter(mut self, jitter: Option<SettledJitter>) -> Self {
        self.settled = jitter;
        self
    }

    /// Build the model, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any parameter is non-finite or any speed,
    /// strength or standard deviation is negative.
    pub fn build(self) -> Result<MotionModel, String> {
        if !self.wind_direction_deg.is_finite() {
            return Err(format!(
                "wind_direction_deg must be finite, got {}",
                self.wind_direction_deg
            ));
        }
        for (name, v) in [
            ("wind_speed", self.wind_speed),
            ("tide_strength", self.tide_strength),
            ("diffusion.base", self.diffusion.base),
            ("diffusion.per_wind", self.diffusion.per_wind),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must be finite and >= 0, got {v}"));
            }
        }
        if let Some(j) = self.settled {
            if !j.sigma_x.is_finite() || j.sigma_x < 0.0 || !j.sigma_y.is_finite() || j.sigma_y < 0.0 {
                return Err(format!(
                    "settled jitter sigmas must be finite and >= 0, got ({}, {})",
                    j.sigma_x, j.sigma_y
                ));
            }
        }
        Ok(MotionModel {
            wind: WindForcing::new(self.wind_direction_deg, self.wind_speed),
            tide_strength: self.tide_strength,
            sigma: self.diffusion.sigma(self.wind_speed),
            settled: self.settled,
        })
    }
}
