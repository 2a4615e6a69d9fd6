//! Non-blocking audio feedback.
//!
//! Callers hand [`FeedbackEvent`]s to an [`AudioDispatcher`], which never
//! waits: events go into a bounded queue and are dropped when it is full.
//! A single [`AudioPlayer`] task owns the tone output and plays events in
//! FIFO order, so at most one tone sounds at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use labcontrol_core::constants::{
    DOUBLE_BEEP_GAP_MS, MAX_PWM_WRAP, MAX_TONE_HZ, MIN_PWM_WRAP, MIN_TONE_HZ, PWM_CLOCK_DIVIDER,
    PWM_SYSTEM_CLOCK_HZ, STARTUP_GAP_MS, STARTUP_SECOND_HZ,
};
use labcontrol_core::{FeedbackEvent, ToneKind};
use labcontrol_hardware::{DutyCycle, ToneOutput};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Clamp a requested pitch to the range the output stage supports.
pub fn clamp_frequency(frequency_hz: u32) -> u32 {
    frequency_hz.clamp(MIN_TONE_HZ, MAX_TONE_HZ)
}

/// PWM counter top producing `frequency_hz` after the clock divider.
///
/// ```
/// use labcontrol_controller::audio::pwm_wrap;
///
/// assert_eq!(pwm_wrap(800), 1249);
/// assert_eq!(pwm_wrap(10_000), 100);
/// ```
pub fn pwm_wrap(frequency_hz: u32) -> u16 {
    let hz = clamp_frequency(frequency_hz);
    let ticks = PWM_SYSTEM_CLOCK_HZ / (hz * PWM_CLOCK_DIVIDER);
    let wrap = ticks.saturating_sub(1);

    u16::try_from(wrap)
        .unwrap_or(MAX_PWM_WRAP)
        .clamp(MIN_PWM_WRAP, MAX_PWM_WRAP)
}

/// One step of a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneStep {
    /// Drive the output at a pitch for a duration.
    Play {
        frequency_hz: u32,
        duration: Duration,
    },

    /// Stay silent.
    Rest(Duration),
}

/// Expand an event into the steps the player performs.
pub fn plan(event: &FeedbackEvent) -> Vec<ToneStep> {
    let note = |frequency_hz| ToneStep::Play {
        frequency_hz,
        duration: event.duration,
    };

    match event.tone {
        ToneKind::Single => vec![note(event.pitch_hz)],
        ToneKind::Double => vec![
            note(event.pitch_hz),
            ToneStep::Rest(Duration::from_millis(DOUBLE_BEEP_GAP_MS)),
            note(event.pitch_hz),
        ],
        ToneKind::Startup => vec![
            note(event.pitch_hz),
            ToneStep::Rest(Duration::from_millis(STARTUP_GAP_MS)),
            note(STARTUP_SECOND_HZ),
        ],
    }
}

/// Sending side of the audio queue.
#[derive(Debug, Clone)]
pub struct AudioDispatcher {
    tx: mpsc::Sender<FeedbackEvent>,
    dropped: Arc<AtomicU64>,
}

impl AudioDispatcher {
    /// Create a dispatcher and the player that drains it.
    ///
    /// A `depth` of zero is raised to one.
    pub fn new<T: ToneOutput>(output: T, depth: usize) -> (Self, AudioPlayer<T>) {
        let (tx, rx) = mpsc::channel(depth.max(1));
        let dispatcher = Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        };
        (dispatcher, AudioPlayer { output, rx })
    }

    /// Queue an event without waiting.
    ///
    /// Returns `false` when the event was dropped (queue full or player gone).
    pub fn play(&self, event: FeedbackEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => {
                debug!("Queued {} tone at {} Hz", event.tone, event.pitch_hz);
                true
            }
            Err(TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Audio queue full, dropping {} tone", event.tone);
                false
            }
            Err(TrySendError::Closed(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Audio player stopped, dropping {} tone", event.tone);
                false
            }
        }
    }

    /// Number of events dropped since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Task that owns the tone output.
#[derive(Debug)]
pub struct AudioPlayer<T> {
    output: T,
    rx: mpsc::Receiver<FeedbackEvent>,
}

impl<T: ToneOutput> AudioPlayer<T> {
    /// Play queued events until every dispatcher is dropped.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            self.perform(&event).await;
        }
        debug!("Audio player stopped");
    }

    async fn perform(&mut self, event: &FeedbackEvent) {
        for step in plan(event) {
            match step {
                ToneStep::Play {
                    frequency_hz,
                    duration,
                } => self.note(frequency_hz, duration).await,
                ToneStep::Rest(duration) => sleep(duration).await,
            }
        }
    }

    async fn note(&mut self, frequency_hz: u32, duration: Duration) {
        let hz = clamp_frequency(frequency_hz);
        let duty = DutyCycle::half(pwm_wrap(hz));

        if let Err(e) = self.output.set_tone(hz, duty) {
            warn!("Failed to start {} Hz tone: {}", hz, e);
            return;
        }
        sleep(duration).await;
        if let Err(e) = self.output.silence() {
            warn!("Failed to silence tone output: {}", e);
        }
    }
}
