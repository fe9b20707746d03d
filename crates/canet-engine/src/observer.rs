//! Step observers: how renderers receive each completed step.
//!
//! [`DriftWorld::run`](crate::DriftWorld::run) calls an observer after every
//! step with a borrowed [`Snapshot`]. Observers must not block for long; the
//! clock does not wait on rendering beyond the call itself.
//!
//! [`ChannelObserver`] hands owned frames to another thread through a
//! bounded crossbeam channel. When the channel is full the frame is dropped
//! and counted instead of stalling the run.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::metrics::StepMetrics;
use crate::snapshot::{OwnedSnapshot, Snapshot};

/// Receives each completed step.
pub trait StepObserver {
    /// Called once per step, after the step is fully applied.
    fn on_step(&mut self, snapshot: &Snapshot<'_>, metrics: &StepMetrics);
}

impl<F> StepObserver for F
where
    F: FnMut(&Snapshot<'_>, &StepMetrics),
{
    fn on_step(&mut self, snapshot: &Snapshot<'_>, metrics: &StepMetrics) {
        self(snapshot, metrics)
    }
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn on_step(&mut self, _snapshot: &Snapshot<'_>, _metrics: &StepMetrics) {}
}

/// One step as delivered through a [`ChannelObserver`].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Population after the step.
    pub snapshot: OwnedSnapshot,
    /// Metrics for the step.
    pub metrics: StepMetrics,
}

/// Forwards every `every`-th step to a bounded channel without blocking.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: Sender<Frame>,
    every: u32,
    sent: u64,
    dropped: u64,
}

impl ChannelObserver {
    /// Create an observer and its receiving end.
    ///
    /// `every` is clamped to at least 1; with `every = 2` steps 2, 4, 6 and
    /// so on are forwarded. `capacity` is the channel bound (at least 1).
    pub fn bounded(capacity: usize, every: u32) -> (Self, Receiver<Frame>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (
            Self {
                tx,
                every: every.max(1),
                sent: 0,
                dropped: 0,
            },
            rx,
        )
    }

    /// Frames delivered to the channel.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Frames discarded because the channel was full or disconnected.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl StepObserver for ChannelObserver {
    fn on_step(&mut self, snapshot: &Snapshot<'_>, metrics: &StepMetrics) {
        if metrics.step.0 % self.every != 0 {
            return;
        }
        let frame = Frame {
            snapshot: snapshot.to_owned_snapshot(),
            metrics: metrics.clone(),
        };
        match self.tx.try_send(frame) {
            Ok(()) => self.sent += 1,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
            }
        }
    }
}
