//! Interrupt-deferred reset.
//!
//! The falling-edge handler only raises a [`ResetSignal`]; the reset itself
//! (which takes the controller lock, renders and waits) runs in
//! [`ResetHandler`] on a normal task. The signal holds at most one pending
//! request, so edges arriving while a reset is pending coalesce into it.
//!
//! ```text
//!   Idle ──edge──► SignalPending ──handler wakes──► PerformingReset
//!    ▲                                                    │
//!    └────────────── notice held, status restored ────────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use labcontrol_core::FeedbackEvent;
use labcontrol_hardware::EdgeHandler;
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::info;

use crate::admission::AdmissionController;
use crate::audio::AudioDispatcher;
use crate::panel::Surface;

/// Where the reset path currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPhase {
    Idle,
    SignalPending,
    PerformingReset,
}

#[derive(Debug, Default)]
struct Shared {
    notify: Notify,
    pending: AtomicBool,
    performing: AtomicBool,
}

/// Single-slot, coalescing reset request.
///
/// Cheap to clone; raising it is safe from any thread, including the
/// interrupt callback.
#[derive(Debug, Clone, Default)]
pub struct ResetSignal {
    shared: Arc<Shared>,
}

impl ResetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a reset.
    ///
    /// Returns `false` when a request was already pending and this one was
    /// merged into it.
    pub fn raise(&self) -> bool {
        if self.shared.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.shared.notify.notify_one();
        true
    }

    /// Wait for a request and consume it.
    pub async fn wait(&self) {
        loop {
            if self.shared.pending.swap(false, Ordering::AcqRel) {
                return;
            }
            self.shared.notify.notified().await;
        }
    }

    /// Handler to install on the reset button's falling edge.
    pub fn edge_handler(&self) -> EdgeHandler {
        let signal = self.clone();
        Box::new(move || {
            signal.raise();
        })
    }

    /// Check whether a request is waiting to be handled.
    pub fn is_pending(&self) -> bool {
        self.shared.pending.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> ResetPhase {
        if self.shared.performing.load(Ordering::Acquire) {
            ResetPhase::PerformingReset
        } else if self.is_pending() {
            ResetPhase::SignalPending
        } else {
            ResetPhase::Idle
        }
    }

    fn set_performing(&self, performing: bool) {
        self.shared.performing.store(performing, Ordering::Release);
    }
}

/// Task performing resets requested through a [`ResetSignal`].
pub struct ResetHandler<S> {
    signal: ResetSignal,
    controller: Arc<AdmissionController<S>>,
    audio: AudioDispatcher,
    notice_hold: Duration,
}

impl<S: Surface> ResetHandler<S> {
    pub fn new(
        signal: ResetSignal,
        controller: Arc<AdmissionController<S>>,
        audio: AudioDispatcher,
        notice_hold: Duration,
    ) -> Self {
        Self {
            signal,
            controller,
            audio,
            notice_hold,
        }
    }

    /// Handle requests forever.
    pub async fn run(self) {
        loop {
            self.signal.wait().await;
            self.perform().await;
        }
    }

    /// Perform one reset: vacate, confirm, hold the notice, restore status.
    pub async fn perform(&self) -> u8 {
        self.signal.set_performing(true);

        let prior = self.controller.reset().await;
        self.audio.play(FeedbackEvent::double_beep());
        info!("Reset requested, {} occupant(s) released", prior);

        sleep(self.notice_hold).await;
        self.controller.refresh().await;

        self.signal.set_performing(false);
        prior
    }
}
