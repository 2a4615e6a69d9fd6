//! Occupancy admission controller.
//!
//! The controller is the single owner of the occupancy count. Capacity is
//! enforced by a pool of admission tokens (a [`Semaphore`] holding exactly
//! `capacity` permits when the resource is empty), and every mutation runs
//! under one [`Mutex`] that also guards the rendering [`Surface`].
//!
//! # Invariants
//!
//! - `0 <= occupancy <= capacity`
//! - `tokens_available + occupancy == capacity` whenever no operation is in
//!   progress
//!
//! Tokens are only taken or returned while the lock is held, so `reset`
//! always restores the pool to exactly `capacity`.
//!
//! # Serialization
//!
//! ```text
//!  entry poller ──┐
//!                 │      ┌───────────────────────────┐
//!  exit poller ───┼────► │ Mutex { occupancy, panel } │ ──► LED + display
//!                 │      └───────────────────────────┘
//!  reset task ────┘              │
//!                                ▼
//!                        Semaphore (tokens)
//! ```
//!
//! Each operation renders in the same lock episode as its mutation, so the
//! LED, the display and the count never disagree. Composing an operation with
//! a later render (e.g. restoring the status screen after an overlay) is not
//! atomic; the final render always reflects the current count.
//!
//! # Examples
//!
//! ```
//! use labcontrol_controller::{AdmissionController, Screen, Surface};
//! use labcontrol_core::{Admission, Capacity, Rejection, Snapshot};
//!
//! struct Headless;
//!
//! impl Surface for Headless {
//!     fn present(&mut self, _snapshot: Snapshot, _screen: Screen) {}
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let controller = AdmissionController::new(Capacity::new(1).unwrap(), Headless);
//!
//! assert!(controller.try_enter().await.is_admitted());
//! assert_eq!(
//!     controller.try_enter().await,
//!     Admission::Rejected(Rejection::Full)
//! );
//! assert_eq!(controller.reset().await, 1);
//! assert_eq!(controller.tokens_available(), 1);
//! # }
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

use labcontrol_core::{Admission, Capacity, ExitOutcome, Rejection, Snapshot};
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info};

use crate::panel::Surface;
use crate::screen::Screen;

/// Counters of controller decisions since start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionStats {
    /// Successful entries.
    pub admitted: u64,

    /// Entries refused because the resource was full.
    pub rejected: u64,

    /// Successful exits.
    pub exited: u64,

    /// Exit events ignored because nobody was inside.
    pub ignored_exits: u64,

    /// Resets performed.
    pub resets: u64,
}

/// State guarded by the controller lock.
#[derive(Debug)]
struct Guarded<S> {
    occupancy: u8,
    surface: S,
    stats: AdmissionStats,
}

/// Capacity-bounded occupancy counter with a rendering surface.
#[derive(Debug)]
pub struct AdmissionController<S> {
    capacity: Capacity,

    /// Admission tokens; one is held per occupant.
    tokens: Semaphore,

    /// Copy of the count for lock-free reads, written under the lock.
    occupancy: AtomicU8,

    inner: Mutex<Guarded<S>>,
}

impl<S: Surface> AdmissionController<S> {
    /// Create an empty controller with a full token pool.
    pub fn new(capacity: Capacity, surface: S) -> Self {
        Self {
            capacity,
            tokens: Semaphore::new(usize::from(capacity.get())),
            occupancy: AtomicU8::new(0),
            inner: Mutex::new(Guarded {
                occupancy: 0,
                surface,
                stats: AdmissionStats::default(),
            }),
        }
    }

    /// Try to admit one occupant without waiting for a token.
    ///
    /// On success the count is incremented and the status screen rendered.
    /// When no token is left the state is untouched and
    /// `Rejected(Full)` returned; rendering the refusal is up to the caller.
    pub async fn try_enter(&self) -> Admission {
        let mut guard = self.inner.lock().await;

        match self.tokens.try_acquire() {
            Ok(permit) => permit.forget(),
            Err(_) => {
                guard.stats.rejected += 1;
                debug!("Entry rejected, lab full ({})", self.snapshot_of(guard.occupancy));
                return Admission::Rejected(Rejection::Full);
            }
        }

        guard.occupancy += 1;
        guard.stats.admitted += 1;
        let snapshot = self.commit(&mut guard, Screen::Status);

        info!("Occupant admitted ({})", snapshot);
        Admission::Admitted {
            occupancy: snapshot.occupancy(),
        }
    }

    /// Remove one occupant.
    ///
    /// With nobody inside this is a no-op: neither the count nor the token
    /// pool change and nothing is rendered.
    pub async fn exit(&self) -> ExitOutcome {
        let mut guard = self.inner.lock().await;

        if guard.occupancy == 0 {
            guard.stats.ignored_exits += 1;
            debug!("Exit ignored, lab already empty");
            return ExitOutcome::NoOp;
        }

        guard.occupancy -= 1;
        self.tokens.add_permits(1);
        guard.stats.exited += 1;
        let snapshot = self.commit(&mut guard, Screen::Status);

        info!("Occupant left ({})", snapshot);
        ExitOutcome::Exited {
            occupancy: snapshot.occupancy(),
        }
    }

    /// Vacate the resource.
    ///
    /// Returns exactly the missing tokens to the pool, zeroes the count and
    /// renders the reset notice, all in one lock episode. Returns the
    /// occupancy before the reset.
    pub async fn reset(&self) -> u8 {
        let mut guard = self.inner.lock().await;

        let prior = guard.occupancy;
        self.tokens.add_permits(usize::from(prior));
        guard.occupancy = 0;
        guard.stats.resets += 1;
        self.commit(&mut guard, Screen::ResetNotice);

        info!("Lab reset, {} occupant(s) cleared", prior);
        prior
    }

    /// Current occupancy, read without taking the lock.
    pub fn occupancy(&self) -> u8 {
        self.occupancy.load(Ordering::Acquire)
    }

    /// Tokens currently available in the pool.
    pub fn tokens_available(&self) -> usize {
        self.tokens.available_permits()
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Occupancy against capacity, read without taking the lock.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_of(self.occupancy())
    }

    /// Render `screen` for the current occupancy.
    pub async fn show(&self, screen: Screen) {
        let mut guard = self.inner.lock().await;
        let snapshot = self.snapshot_of(guard.occupancy);
        guard.surface.present(snapshot, screen);
    }

    /// Render the status screen for the current occupancy.
    pub async fn refresh(&self) {
        self.show(Screen::Status).await;
    }

    /// Decision counters since start.
    pub async fn stats(&self) -> AdmissionStats {
        self.inner.lock().await.stats
    }

    /// Run `f` against the surface under the lock.
    pub async fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard.surface)
    }

    /// Publish the guarded count and render it. Must be called with the lock held.
    fn commit(&self, guard: &mut Guarded<S>, screen: Screen) -> Snapshot {
        self.occupancy.store(guard.occupancy, Ordering::Release);
        let snapshot = self.snapshot_of(guard.occupancy);
        guard.surface.present(snapshot, screen);
        snapshot
    }

    fn snapshot_of(&self, occupancy: u8) -> Snapshot {
        Snapshot::clamped(occupancy, self.capacity)
    }
}
