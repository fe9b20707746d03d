//! Read-only views of a completed step.
//!
//! [`Snapshot`] borrows the world's particles, so the borrow checker
//! prevents stepping while one is held. [`OwnedSnapshot`] is a copy that
//! can outlive the world or cross threads, and [`SnapshotSlot`] publishes
//! the latest one to concurrent readers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use canet_core::{Particle, PopulationView, StepId};

/// Borrowed view of the population after a step.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'w> {
    step: StepId,
    particles: &'w [Particle],
}

impl<'w> Snapshot<'w> {
    pub(crate) fn new(step: StepId, particles: &'w [Particle]) -> Self {
        Self { step, particles }
    }

    /// Copy into an [`OwnedSnapshot`].
    pub fn to_owned_snapshot(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            step: self.step,
            particles: self.particles.to_vec(),
        }
    }
}

impl PopulationView for Snapshot<'_> {
    fn step_id(&self) -> StepId {
        self.step
    }

    fn particles(&self) -> &[Particle] {
        self.particles
    }
}

/// Owned copy of the population after a step.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedSnapshot {
    step: StepId,
    particles: Vec<Particle>,
}

impl PopulationView for OwnedSnapshot {
    fn step_id(&self) -> StepId {
        self.step
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Latest completed step, shared with readers on other threads.
///
/// Single producer (the world), any number of readers. A reader sees
/// either the previous complete step or the new complete step, never a
/// partially updated cohort.
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    latest: Mutex<Option<Arc<OwnedSnapshot>>>,
    published: AtomicU64,
}

// Compile-time assertion: SnapshotSlot must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotSlot>();
};

impl SnapshotSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn publish(&self, snapshot: OwnedSnapshot) {
        let arc = Arc::new(snapshot);
        {
            let mut slot = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            *slot = Some(arc);
        }
        // Release so a reader that sees the new count also sees the snapshot.
        self.published.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn clear(&self) {
        let mut slot = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<OwnedSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    /// Number of snapshots published since the slot was created.
    ///
    /// Monotonic across resets; readers can poll it to detect new steps.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canet_core::Point;

    fn particles() -> Vec<Particle> {
        vec![
            Particle::floating(Point::new(1.0, 1.0)),
            Particle::floating(Point::new(2.0, 2.0)),
        ]
    }

    #[test]
    fn borrowed_and_owned_agree() {
        let ps = particles();
        let snap = Snapshot::new(StepId(3), &ps);
        let owned = snap.to_owned_snapshot();
        assert_eq!(owned.step_id(), StepId(3));
        assert_eq!(owned.particles(), snap.particles());
        assert_eq!(owned.counts(), snap.counts());
    }

    #[test]
    fn slot_starts_empty() {
        let slot = SnapshotSlot::new();
        assert!(slot.latest().is_none());
        assert_eq!(slot.published_count(), 0);
    }

    #[test]
    fn slot_replaces_and_counts() {
        let slot = SnapshotSlot::new();
        let ps = particles();
        slot.publish(Snapshot::new(StepId(1), &ps).to_owned_snapshot());
        let first = slot.latest().unwrap();
        slot.publish(Snapshot::new(StepId(2), &ps).to_owned_snapshot());
        assert_eq!(slot.published_count(), 2);
        assert_eq!(slot.latest().unwrap().step_id(), StepId(2));
        // Readers holding an older Arc keep it intact.
        assert_eq!(first.step_id(), StepId(1));
        slot.clear();
        assert!(slot.latest().is_none());
        assert_eq!(slot.published_count(), 2);
    }

    #[test]
    fn concurrent_readers_see_whole_steps() {
        let slot = Arc::new(SnapshotSlot::new());
        let n = 64;
        let reader = {
            let slot = Arc::clone(&slot);
            std::thread::spawn(move || {
                let mut seen = 0;
                while slot.published_count() < 100 {
                    if let Some(s) = slot.latest() {
                        let step = s.step_id().0 as f64;
                        assert_eq!(s.len(), n);
                        assert!(s.particles().iter().all(|p| p.position.x == step));
                        seen += 1;
                    }
                }
                seen
            })
        };
        for step in 1..=100u32 {
            let ps: Vec<Particle> = (0..n)
                .map(|_| Particle::floating(Point::new(f64::from(step), 0.0)))
                .collect();
            slot.publish(Snapshot::new(StepId(step), &ps).to_owned_snapshot());
        }
        let _ = reader.join().unwrap();
    }
}
