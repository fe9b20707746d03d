//! The simulation clock.
//!
//! [`DriftWorld`] is the explicit context object for one run: it owns the
//! cohort, the motion model, the classifier and a shared reference to the
//! domain geometry. Each [`step()`](DriftWorld::step) applies one
//! per-particle update to every particle and returns a [`Snapshot`] of the
//! result.
//!
//! # Ownership model
//!
//! `DriftWorld` is [`Send`]. All mutating methods take `&mut self` and
//! [`step()`](DriftWorld::step) returns a snapshot that borrows from
//! `self`, so the caller cannot step again while holding it. Readers on
//! other threads use [`shared_snapshots()`](DriftWorld::shared_snapshots),
//! which only ever holds complete steps.
//!
//! # Determinism
//!
//! Every particle draws from its own stream keyed by `(seed, step, index)`.
//! A run is a pure function of its seed, configuration, geometry and
//! initial cohort, independent of `worker_threads`.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use canet_core::{Particle, PopulationView, StatusCounts, StepError, StepId};
use canet_propagators::noise::particle_rng;
use canet_propagators::{
    advance, BoundaryClassifier, Displacement, MotionModel, UpdateTally,
};
use canet_space::{CurveMode, DomainGeometry};

use crate::cancel::CancelToken;
use crate::config::{ConfigError, DriftConfig};
use crate::metrics::StepMetrics;
use crate::observer::{NullObserver, StepObserver};
use crate::population::Population;
use crate::snapshot::{Snapshot, SnapshotSlot};

// Compile-time assertion: DriftWorld is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<DriftWorld>();
    }
};

// ── StepResult / RunOutcome ─────────────────────────────────────

/// Result of a successful [`DriftWorld::step()`] call.
#[derive(Debug)]
pub struct StepResult<'w> {
    /// Read-only view of the cohort after this step.
    pub snapshot: Snapshot<'w>,
    /// Metrics for this step.
    pub metrics: StepMetrics,
}

/// Terminal summary of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Step index the run ended at.
    pub steps_run: StepId,
    /// Final per-status counts.
    pub counts: StatusCounts,
    /// `recruited / particle_count`.
    pub recruitment_rate: f64,
    /// The run stopped because its [`CancelToken`] was set.
    pub cancelled: bool,
    /// The run stopped because no particle was left floating.
    pub stopped_early: bool,
}

/// Errors from [`run_to_completion`].
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The run could not be set up.
    Config(ConfigError),
    /// A step failed.
    Step(StepError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StepError> for RunError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

// ── StepKernel ──────────────────────────────────────────────────

/// Everything a worker needs to advance a slice of the cohort by one step.
struct StepKernel<'a> {
    seed: u64,
    step: StepId,
    displacement: Displacement,
    motion: &'a MotionModel,
    classifier: &'a BoundaryClassifier,
    geometry: &'a DomainGeometry,
}

impl StepKernel<'_> {
    /// Advance `chunk`, whose first particle has cohort index `offset`.
    fn advance_chunk(&self, chunk: &mut [Particle], offset: usize) -> UpdateTally {
        let mut tally = UpdateTally::default();
        for (i, particle) in chunk.iter_mut().enumerate() {
            if particle.status.is_terminal() && !self.jitters(particle) {
                continue;
            }
            let mut rng = particle_rng(self.seed, self.step, offset + i);
            let update = advance(
                particle,
                &self.displacement,
                self.motion,
                self.classifier,
                self.geometry,
                &mut rng,
            );
            tally.record(update);
        }
        tally
    }

    fn jitters(&self, particle: &Particle) -> bool {
        particle.status == canet_core::ParticleStatus::Recruited
            && self.motion.settled_jitter().is_some()
    }
}

// ── DriftWorld ──────────────────────────────────────────────────

/// One drift run: a cohort advanced a fixed number of steps.
///
/// # Example
///
/// ```
/// use canet_engine::{DriftConfig, DriftWorld, NullObserver};
/// use canet_space::{CurveMode, DomainGeometry};
///
/// let geometry = DomainGeometry::canet(CurveMode::Smooth).unwrap();
/// let config = DriftConfig { seed: Some(7), particle_count: 100, ..DriftConfig::default() };
/// let mut world = DriftWorld::new(config, geometry).unwrap();
/// let outcome = world.run(&mut NullObserver).unwrap();
/// assert_eq!(outcome.counts.total(), 100);
/// ```
pub struct DriftWorld {
    config: DriftConfig,
    geometry: Arc<DomainGeometry>,
    motion: MotionModel,
    classifier: BoundaryClassifier,
    seed: u64,
    initial: Option<Vec<Particle>>,
    population: Population,
    last_metrics: StepMetrics,
    shared: Arc<SnapshotSlot>,
    cancel: CancelToken,
}

impl DriftWorld {
    /// Create a world whose cohort is released from `config.source`.
    ///
    /// Validates the configuration, checks that the release point lies in
    /// the domain, resolves the seed (drawing one if `config.seed` is
    /// `None`) and seeds the population.
    pub fn new(
        config: DriftConfig,
        geometry: impl Into<Arc<DomainGeometry>>,
    ) -> Result<Self, ConfigError> {
        let geometry = geometry.into();
        config.validate()?;
        if !geometry.bounds().contains(config.source.centre) {
            return Err(ConfigError::SourceOutsideBounds {
                centre: config.source.centre,
            });
        }
        let seed = resolve_seed(config.seed);
        let population = Population::seeded(config.particle_count, &config.source, seed);
        Self::assemble(config, geometry, seed, None, population)
    }

    /// Create a world on the standard Canet layout, built in `mode`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Geometry`] if the layout cannot be built, or any
    /// error from [`new()`](Self::new).
    pub fn canet(config: DriftConfig, mode: CurveMode) -> Result<Self, ConfigError> {
        let geometry = DomainGeometry::canet(mode)?;
        Self::new(config, geometry)
    }

    /// Create a world with an explicit initial cohort.
    ///
    /// `config.particle_count` is replaced by the cohort size and `source`
    /// is ignored. [`reset()`](Self::reset) restores this cohort.
    pub fn with_population(
        mut config: DriftConfig,
        geometry: impl Into<Arc<DomainGeometry>>,
        population: Population,
    ) -> Result<Self, ConfigError> {
        config.particle_count = population.len();
        config.validate()?;
        let seed = resolve_seed(config.seed);
        let initial = population.into_particles();
        let population = Population::from_particles(initial.clone());
        Self::assemble(config, geometry.into(), seed, Some(initial), population)
    }

    fn assemble(
        config: DriftConfig,
        geometry: Arc<DomainGeometry>,
        seed: u64,
        initial: Option<Vec<Particle>>,
        population: Population,
    ) -> Result<Self, ConfigError> {
        let motion = config.motion_model()?;
        let classifier = config.classifier()?;
        log::info!(
            "drift world ready: {} particles, {} steps, seed {}, wind {}° at {}, tide {}",
            population.len(),
            config.step_count,
            seed,
            config.wind_direction_deg,
            config.wind_speed,
            config.tide_strength
        );
        Ok(Self {
            config,
            geometry,
            motion,
            classifier,
            seed,
            initial,
            population,
            last_metrics: StepMetrics::default(),
            shared: Arc::new(SnapshotSlot::new()),
            cancel: CancelToken::new(),
        })
    }

    /// Execute one step.
    ///
    /// Computes the wind and tide terms for the current step index, applies
    /// the per-particle update to every particle, publishes the result to
    /// the shared slot, and returns a [`StepResult`] borrowing the cohort.
    ///
    /// # Errors
    ///
    /// [`StepError::BudgetExhausted`] once `step_count` steps have run;
    /// [`StepError::WorkerPanicked`] if a worker thread failed, in which
    /// case the step is not published.
    pub fn step(&mut self) -> Result<StepResult<'_>, StepError> {
        let current = self.population.step_id();
        if self.is_finished() {
            return Err(StepError::BudgetExhausted {
                step_count: self.config.step_count,
            });
        }
        let start = Instant::now();

        let tally = self.update_particles(current)?;
        let next = current.next();
        self.population.set_step(next);

        let mut metrics = StepMetrics::from_tally(next, &tally);
        let publish_start = Instant::now();
        self.publish_if_watched();
        metrics.snapshot_publish_us = publish_start.elapsed().as_micros() as u64;
        metrics.total_us = start.elapsed().as_micros() as u64;

        if tally.lost_non_finite > 0 {
            log::warn!(
                "step {}: {} particles reached a non-finite position and were marked lost",
                next,
                tally.lost_non_finite
            );
        }
        log::debug!(
            "step {}: {} floating, {} recruited, {} stranded, {} lost this step",
            next,
            metrics.floating,
            metrics.newly_recruited,
            metrics.stranded_on_barrier + metrics.stranded_on_coast,
            metrics.lost_beyond_barrier + metrics.lost_out_of_bounds + metrics.lost_non_finite
        );

        self.last_metrics = metrics.clone();
        Ok(StepResult {
            snapshot: self.snapshot(),
            metrics,
        })
    }

    fn update_particles(&mut self, step: StepId) -> Result<UpdateTally, StepError> {
        let kernel = StepKernel {
            seed: self.seed,
            step,
            displacement: self.motion.displacement(step),
            motion: &self.motion,
            classifier: &self.classifier,
            geometry: &self.geometry,
        };
        update_in_chunks(
            self.population.particles_mut(),
            self.config.worker_threads,
            |chunk, offset| kernel.advance_chunk(chunk, offset),
        )
    }

    // Only copy the cohort when a reader holds the slot.
    fn publish_if_watched(&self) {
        if Arc::strong_count(&self.shared) > 1 {
            self.shared.publish(self.snapshot().to_owned_snapshot());
        }
    }

    /// Step until the budget is consumed, notifying `observer` after every
    /// step.
    ///
    /// The cancellation token is checked before each step. With
    /// `stop_when_settled`, the run also ends once no particle is floating;
    /// terminal counts are the same as running the full budget.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<RunOutcome, StepError>
    where
        O: StepObserver + ?Sized,
    {
        let mut cancelled = false;
        let mut stopped_early = false;
        while !self.is_finished() {
            if self.cancel.is_cancelled() {
                log::warn!("run cancelled at step {}", self.current_step());
                cancelled = true;
                break;
            }
            if self.config.stop_when_settled && self.population.counts().floating == 0 {
                log::debug!("no floating particles left at step {}", self.current_step());
                stopped_early = true;
                break;
            }
            let result = self.step()?;
            observer.on_step(&result.snapshot, &result.metrics);
        }

        let outcome = self.outcome(cancelled, stopped_early);
        log::info!(
            "run finished at step {}: {} (recruitment rate {:.3})",
            outcome.steps_run,
            outcome.counts,
            outcome.recruitment_rate
        );
        Ok(outcome)
    }

    fn outcome(&self, cancelled: bool, stopped_early: bool) -> RunOutcome {
        let counts = self.population.counts();
        RunOutcome {
            steps_run: self.current_step(),
            counts,
            recruitment_rate: counts.recruitment_rate(),
            cancelled,
            stopped_early,
        }
    }

    /// Reset to step 0 with a new seed.
    ///
    /// A seeded world draws a fresh cohort from the source; a world built
    /// with [`with_population()`](Self::with_population) restores its
    /// initial cohort. Clears the cancellation flag and the last metrics.
    /// The shared slot receives the initial state if a reader holds it and
    /// is emptied otherwise. Returns a snapshot of the initial state.
    pub fn reset(&mut self, seed: u64) -> Snapshot<'_> {
        self.seed = seed;
        self.population = match &self.initial {
            Some(particles) => Population::from_particles(particles.clone()),
            None => Population::seeded(self.config.particle_count, &self.config.source, seed),
        };
        self.last_metrics = StepMetrics::default();
        self.shared.clear();
        self.publish_if_watched();
        self.cancel.clear();
        log::info!("drift world reset: {} particles, seed {}", self.population.len(), seed);
        self.snapshot()
    }

    /// Read-only view of the current cohort.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.population.step_id(), self.population.particles())
    }

    /// Slot receiving a copy of every completed step.
    ///
    /// The current state is published immediately unless the slot already
    /// holds it, so a reader attached before the first step sees the
    /// initial cohort and a reader attaching later never sees a step the
    /// world has moved past.
    pub fn shared_snapshots(&self) -> Arc<SnapshotSlot> {
        let current = self.current_step();
        if self.shared.latest().map(|s| s.step_id()) != Some(current) {
            self.shared.publish(self.snapshot().to_owned_snapshot());
        }
        Arc::clone(&self.shared)
    }

    /// Token that stops [`run()`](Self::run) at the next step boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Steps applied so far (0 after construction or reset).
    pub fn current_step(&self) -> StepId {
        self.population.step_id()
    }

    /// Steps left in the budget.
    pub fn remaining_steps(&self) -> u32 {
        self.config.step_count.saturating_sub(self.current_step().0)
    }

    /// Whether the step budget is consumed.
    pub fn is_finished(&self) -> bool {
        self.remaining_steps() == 0
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The resolved seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The validated configuration.
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// The domain geometry.
    pub fn geometry(&self) -> &Arc<DomainGeometry> {
        &self.geometry
    }

    /// The motion model.
    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }

    /// The current cohort.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Consume the world, returning its cohort.
    pub fn into_population(self) -> Population {
        self.population
    }
}

impl fmt::Debug for DriftWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriftWorld")
            .field("current_step", &self.current_step())
            .field("step_count", &self.config.step_count)
            .field("particles", &self.population.len())
            .field("seed", &self.seed)
            .finish()
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            log::info!("no seed configured, drew {seed}");
            seed
        }
    }
}

/// Apply `update` to `particles` split into at most `workers` contiguous
/// chunks, each on its own scoped thread. `update` receives a chunk and the
/// cohort index of its first particle.
///
/// Workers advance a scratch copy, which replaces `particles` only once
/// every worker has finished. After [`StepError::WorkerPanicked`] the
/// cohort is exactly as it was before the call.
fn update_in_chunks<F>(
    particles: &mut [Particle],
    workers: usize,
    update: F,
) -> Result<UpdateTally, StepError>
where
    F: Fn(&mut [Particle], usize) -> UpdateTally + Sync,
{
    let workers = workers.min(particles.len()).max(1);
    if workers == 1 {
        return Ok(update(particles, 0));
    }

    let chunk_len = particles.len().div_ceil(workers);
    let mut scratch = particles.to_vec();
    let update = &update;
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = scratch
            .chunks_mut(chunk_len)
            .enumerate()
            .map(|(i, chunk)| s.spawn(move || update(chunk, i * chunk_len)))
            .collect();
        // Join every handle so a panicking worker cannot escape the scope.
        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut total = UpdateTally::default();
    for (chunk, result) in results.into_iter().enumerate() {
        match result {
            Ok(tally) => total.merge(&tally),
            Err(_) => return Err(StepError::WorkerPanicked { chunk }),
        }
    }
    particles.copy_from_slice(&scratch);
    Ok(total)
}

/// Run `population` through the full step budget of `config` and return
/// the final cohort with its terminal counts.
pub fn run_to_completion(
    population: Population,
    geometry: impl Into<Arc<DomainGeometry>>,
    config: DriftConfig,
) -> Result<(Population, RunOutcome), RunError> {
    let mut world = DriftWorld::with_population(config, geometry, population)?;
    let outcome = world.run(&mut NullObserver)?;
    Ok((world.into_population(), outcome))
}
