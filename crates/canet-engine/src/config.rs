//! Run configuration, validation, and error types.
//!
//! [`DriftConfig`] is the single input for constructing a
//! [`DriftWorld`](crate::DriftWorld). [`validate()`](DriftConfig::validate)
//! checks every field against its documented range before any particle is
//! created; geometry-dependent checks (source inside the domain) run in the
//! world constructor.

use std::error::Error;
use std::fmt;
use std::ops::RangeInclusive;

use canet_core::Point;
use canet_propagators::{
    BoundaryClassifier, Diffusion, MotionModel, OutsideBarrierRule, SettledJitter,
};
use canet_space::GeometryError;

/// Accepted wind bearings, degrees.
pub const WIND_DIRECTION_RANGE: RangeInclusive<f64> = 0.0..=359.0;
/// Accepted wind speeds.
pub const WIND_SPEED_RANGE: RangeInclusive<f64> = 0.0..=25.0;
/// Accepted tide strengths.
pub const TIDE_STRENGTH_RANGE: RangeInclusive<f64> = 0.0..=1.5;
/// Accepted cohort sizes.
pub const PARTICLE_COUNT_RANGE: RangeInclusive<usize> = 1..=10_000;
/// Accepted step budgets.
pub const STEP_COUNT_RANGE: RangeInclusive<u32> = 1..=1_000;
/// Accepted settlement dwell thresholds.
pub const DWELL_THRESHOLD_RANGE: RangeInclusive<u32> = 1..=1_000;
/// Upper bound on worker threads.
pub const MAX_WORKER_THREADS: usize = 64;

// ── SourceConfig ───────────────────────────────────────────────────

/// Release point of the cohort: a bivariate normal around `centre`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceConfig {
    /// Mean release position. Default: (70, 50), seaward of the barrier.
    pub centre: Point,
    /// Spread along x. Default: 4.
    pub sigma_x: f64,
    /// Spread along y. Default: 16.
    pub sigma_y: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            centre: Point::new(70.0, 50.0),
            sigma_x: 4.0,
            sigma_y: 16.0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected before a run starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A numeric parameter is outside its accepted range.
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },
    /// A numeric parameter is NaN or infinite.
    NonFinite {
        /// Name of the field.
        field: &'static str,
    },
    /// The release point or its spread is unusable.
    InvalidSource {
        /// Description of the problem.
        reason: String,
    },
    /// The release point lies outside the domain bounds.
    SourceOutsideBounds {
        /// The offending centre.
        centre: Point,
    },
    /// `worker_threads` is zero or above [`MAX_WORKER_THREADS`].
    InvalidWorkerThreads {
        /// The configured value.
        configured: usize,
    },
    /// A motion or classifier parameter was rejected.
    Motion {
        /// Description of the rejected parameter.
        reason: String,
    },
    /// The domain geometry is degenerate.
    Geometry(GeometryError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside [{min}, {max}]"),
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::InvalidSource { reason } => write!(f, "invalid source: {reason}"),
            Self::SourceOutsideBounds { centre } => {
                write!(f, "source centre {centre} lies outside the domain bounds")
            }
            Self::InvalidWorkerThreads { configured } => write!(
                f,
                "worker_threads must be in [1, {MAX_WORKER_THREADS}], got {configured}"
            ),
            Self::Motion { reason } => write!(f, "invalid motion parameters: {reason}"),
            Self::Geometry(e) => write!(f, "geometry: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

// ── DriftConfig ────────────────────────────────────────────────────

/// Parameters of one drift run.
///
/// Defaults describe the standard Canet run: easterly wind at 12, moderate
/// tide, 500 propagules over 50 steps with a 12-step dwell threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftConfig {
    /// Bearing the wind blows from, degrees in `[0, 359]`. Default: 90.
    pub wind_direction_deg: f64,
    /// Wind speed in `[0, 25]`. Default: 12.
    pub wind_speed: f64,
    /// Tidal onshore bias in `[0, 1.5]`. Default: 0.5.
    pub tide_strength: f64,
    /// Cohort size in `[1, 10000]`. Default: 500.
    pub particle_count: usize,
    /// Step budget in `[1, 1000]`. Default: 50.
    pub step_count: u32,
    /// Lagoon steps needed to recruit, in `[1, 1000]`. Default: 12.
    pub settlement_dwell_threshold: u32,
    /// RNG seed. `None` draws one from OS entropy at construction.
    pub seed: Option<u64>,
    /// Release distribution.
    pub source: SourceConfig,
    /// Pre-settlement diffusion.
    pub diffusion: Diffusion,
    /// Post-settlement jitter; `None` freezes recruited particles.
    pub settled_jitter: Option<SettledJitter>,
    /// Outcome for particles on the coast side of the barrier.
    pub outside_barrier: OutsideBarrierRule,
    /// Threads sharing the per-step particle update. Default: 1.
    pub worker_threads: usize,
    /// End the run once no particle is floating. Default: false.
    pub stop_when_settled: bool,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            wind_direction_deg: 90.0,
            wind_speed: 12.0,
            tide_strength: 0.5,
            particle_count: 500,
            step_count: 50,
            settlement_dwell_threshold: 12,
            seed: None,
            source: SourceConfig::default(),
            diffusion: Diffusion::default(),
            settled_jitter: Some(SettledJitter::default()),
            outside_barrier: OutsideBarrierRule::default(),
            worker_threads: 1,
            stop_when_settled: false,
        }
    }
}

fn check_f64(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if !range.contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn check_int<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd + Copy + Into<f64>,
{
    if !range.contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        });
    }
    Ok(())
}

impl DriftConfig {
    /// Check every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_f64("wind_direction_deg", self.wind_direction_deg, &WIND_DIRECTION_RANGE)?;
        check_f64("wind_speed", self.wind_speed, &WIND_SPEED_RANGE)?;
        check_f64("tide_strength", self.tide_strength, &TIDE_STRENGTH_RANGE)?;
        if !PARTICLE_COUNT_RANGE.contains(&self.particle_count) {
            return Err(ConfigError::OutOfRange {
                field: "particle_count",
                value: self.particle_count as f64,
                min: *PARTICLE_COUNT_RANGE.start() as f64,
                max: *PARTICLE_COUNT_RANGE.end() as f64,
            });
        }
        check_int("step_count", self.step_count, &STEP_COUNT_RANGE)?;
        check_int(
            "settlement_dwell_threshold",
            self.settlement_dwell_threshold,
            &DWELL_THRESHOLD_RANGE,
        )?;

        let s = &self.source;
        if !s.centre.is_finite() {
            return Err(ConfigError::InvalidSource {
                reason: format!("centre {} is not finite", s.centre),
            });
        }
        if !s.sigma_x.is_finite() || s.sigma_x < 0.0 || !s.sigma_y.is_finite() || s.sigma_y < 0.0 {
            return Err(ConfigError::InvalidSource {
                reason: format!(
                    "spread ({}, {}) must be finite and >= 0",
                    s.sigma_x, s.sigma_y
                ),
            });
        }

        if self.worker_threads == 0 || self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::InvalidWorkerThreads {
                configured: self.worker_threads,
            });
        }

        self.motion_model()?;
        Ok(())
    }

    /// Build the motion model described by this configuration.
    pub(crate) fn motion_model(&self) -> Result<MotionModel, ConfigError> {
        MotionModel::builder()
            .wind_direction_deg(self.wind_direction_deg)
            .wind_speed(self.wind_speed)
            .tide_strength(self.tide_strength)
            .diffusion(self.diffusion)
            .settled_jitter(self.settled_jitter)
            .build()
            .map_err(|reason| ConfigError::Motion { reason })
    }

    /// Build the boundary classifier described by this configuration.
    pub(crate) fn classifier(&self) -> Result<BoundaryClassifier, ConfigError> {
        BoundaryClassifier::new(self.settlement_dwell_threshold, self.outside_barrier)
            .map_err(|reason| ConfigError::Motion { reason })
    }

    /// Calm water: no wind, tide, diffusion or settled jitter.
    ///
    /// Every particle moves only if placed to; useful for scripted runs.
    pub fn calm() -> Self {
        Self {
            wind_speed: 0.0,
            tide_strength: 0.0,
            diffusion: Diffusion::NONE,
            settled_jitter: None,
            ..Self::default()
        }
    }
}
