//! Debounced entry and exit button pollers.
//!
//! Each poller samples an active-low input every poll interval. When the
//! button reads pressed it performs its controller operation once and then
//! sleeps for the debounce window before sampling again. A button held past
//! the window therefore produces repeated operations; each one is arbitrated
//! independently by the token pool.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use labcontrol_core::{Admission, ExitOutcome, FeedbackEvent, LabConfig};
use labcontrol_hardware::InputPin;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::admission::AdmissionController;
use crate::audio::AudioDispatcher;
use crate::panel::Surface;
use crate::screen::Screen;

/// Which controller operation a button drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Entry,
    Exit,
}

impl fmt::Display for ButtonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Fixed delays used by a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    pub poll_interval: Duration,
    pub debounce: Duration,

    /// How long the full notice stays up after a refused entry.
    pub notice_hold: Duration,
}

impl From<&LabConfig> for PollTiming {
    fn from(config: &LabConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            debounce: config.debounce(),
            notice_hold: config.notice_hold(),
        }
    }
}

impl Default for PollTiming {
    fn default() -> Self {
        Self::from(&LabConfig::default())
    }
}

/// Result of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Button released (or unreadable).
    Idle,
    Entered(Admission),
    Exited(ExitOutcome),
}

/// Polling task for one button.
pub struct InputPoller<I, S> {
    role: ButtonRole,
    pin: I,
    controller: Arc<AdmissionController<S>>,
    audio: AudioDispatcher,
    timing: PollTiming,
}

impl<I: InputPin, S: Surface> InputPoller<I, S> {
    pub fn new(
        role: ButtonRole,
        pin: I,
        controller: Arc<AdmissionController<S>>,
        audio: AudioDispatcher,
        timing: PollTiming,
    ) -> Self {
        Self {
            role,
            pin,
            controller,
            audio,
            timing,
        }
    }

    pub fn role(&self) -> ButtonRole {
        self.role
    }

    /// Poll forever.
    pub async fn run(mut self) {
        debug!("Starting {} poller", self.role);
        loop {
            self.poll_once().await;
            sleep(self.timing.poll_interval).await;
        }
    }

    /// Sample the button once and act on a press.
    ///
    /// After a press this returns only once the debounce window (and, for a
    /// refused entry, the full notice) has elapsed.
    pub async fn poll_once(&mut self) -> PressOutcome {
        if !self.is_pressed() {
            return PressOutcome::Idle;
        }

        let outcome = match self.role {
            ButtonRole::Entry => PressOutcome::Entered(self.enter().await),
            ButtonRole::Exit => PressOutcome::Exited(self.controller.exit().await),
        };

        sleep(self.timing.debounce).await;
        outcome
    }

    fn is_pressed(&self) -> bool {
        match self.pin.level() {
            Ok(level) => level.is_low(),
            Err(e) => {
                warn!("Failed to read {} button: {}", self.role, e);
                false
            }
        }
    }

    async fn enter(&mut self) -> Admission {
        let admission = self.controller.try_enter().await;

        if let Admission::Rejected(reason) = admission {
            info!("Entry refused: {:?}", reason);
            self.audio.play(FeedbackEvent::single_beep());
            self.controller.show(Screen::FullNotice).await;
            sleep(self.timing.notice_hold).await;
            self.controller.refresh().await;
        }

        admission
    }
}
