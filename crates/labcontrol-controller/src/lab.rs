//! Controller bring-up and task supervision.
//!
//! [`Lab::start`] wires the peripherals of the board into the admission
//! controller and spawns every long-running task:
//!
//! - audio player
//! - reset handler
//! - entry poller
//! - exit poller
//! - one-shot display init (draws the status screen after a short delay)
//!
//! The startup chime is queued last. Everything runs until
//! [`LabHandle::shutdown`].

use std::sync::Arc;

use labcontrol_core::{FeedbackEvent, LabConfig, Snapshot};
use labcontrol_hardware::{Display, EdgeInterrupt, InputPin, OutputPin, ToneOutput};
use tokio::task::{JoinError, JoinSet};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::admission::{AdmissionController, AdmissionStats};
use crate::audio::AudioDispatcher;
use crate::error::Result;
use crate::indicator::RgbIndicator;
use crate::panel::{Panel, Surface};
use crate::poller::{ButtonRole, InputPoller, PollTiming};
use crate::reset::{ResetHandler, ResetPhase, ResetSignal};

/// Peripherals of the controller board.
#[derive(Debug)]
pub struct LabDevices<E, X, R, P, T, D> {
    /// Entry button (active low).
    pub entry: E,

    /// Exit button (active low).
    pub exit: X,

    /// Reset button with falling-edge interrupt.
    pub reset: R,

    pub red: P,
    pub green: P,
    pub blue: P,

    pub buzzer: T,
    pub display: D,
}

/// Entry point of the controller.
pub struct Lab;

impl Lab {
    /// Start the controller on `devices`.
    ///
    /// Must be called from within a Tokio runtime. The LED turns blue
    /// immediately; the display shows the status screen once the init delay
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the initial LED
    /// write fails or the reset interrupt cannot be installed. No task is
    /// left running in that case.
    pub fn start<E, X, R, P, T, D>(
        config: &LabConfig,
        devices: LabDevices<E, X, R, P, T, D>,
    ) -> Result<LabHandle<Panel<D, P>>>
    where
        E: InputPin + 'static,
        X: InputPin + 'static,
        R: EdgeInterrupt + 'static,
        P: OutputPin + 'static,
        T: ToneOutput + 'static,
        D: Display + 'static,
    {
        config.validate()?;

        let LabDevices {
            entry,
            exit,
            mut reset,
            red,
            green,
            blue,
            buzzer,
            display,
        } = devices;

        let panel = Panel::new(display, RgbIndicator::new(red, green, blue))?;
        let controller = Arc::new(AdmissionController::new(config.capacity, panel));

        let signal = ResetSignal::new();
        reset.on_falling_edge(signal.edge_handler())?;

        let (audio, player) = AudioDispatcher::new(buzzer, config.audio_queue_depth);
        let timing = PollTiming::from(config);
        let mut tasks = JoinSet::new();

        tasks.spawn(player.run());
        tasks.spawn(
            ResetHandler::new(
                signal.clone(),
                Arc::clone(&controller),
                audio.clone(),
                config.notice_hold(),
            )
            .run(),
        );
        tasks.spawn(
            InputPoller::new(
                ButtonRole::Entry,
                entry,
                Arc::clone(&controller),
                audio.clone(),
                timing,
            )
            .run(),
        );
        tasks.spawn(
            InputPoller::new(
                ButtonRole::Exit,
                exit,
                Arc::clone(&controller),
                audio.clone(),
                timing,
            )
            .run(),
        );

        let init_delay = config.display_init_delay();
        let init_controller = Arc::clone(&controller);
        tasks.spawn(async move {
            sleep(init_delay).await;
            init_controller.refresh().await;
            debug!("Display initialized");
        });

        audio.play(FeedbackEvent::startup_chime());
        info!("Lab controller started with capacity {}", config.capacity);

        Ok(LabHandle {
            controller,
            signal,
            audio,
            reset_line: Box::new(reset),
            tasks,
        })
    }
}

/// Handle to a running controller.
pub struct LabHandle<S> {
    controller: Arc<AdmissionController<S>>,
    signal: ResetSignal,
    audio: AudioDispatcher,

    /// Kept so the interrupt stays armed while the controller runs.
    reset_line: Box<dyn EdgeInterrupt>,

    tasks: JoinSet<()>,
}

impl<S: Surface> LabHandle<S> {
    pub fn controller(&self) -> &Arc<AdmissionController<S>> {
        &self.controller
    }

    /// Current occupancy against capacity.
    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    pub async fn stats(&self) -> AdmissionStats {
        self.controller.stats().await
    }

    pub fn reset_phase(&self) -> ResetPhase {
        self.signal.phase()
    }

    /// Request a reset as if the reset button had been pressed.
    pub fn request_reset(&self) -> bool {
        self.signal.raise()
    }

    /// Sounds dropped because the audio queue was full.
    pub fn audio_dropped(&self) -> u64 {
        self.audio.dropped()
    }

    /// Stop every task and wait for them to terminate.
    ///
    /// Returns the final statistics.
    pub async fn shutdown(mut self) -> AdmissionStats {
        self.tasks.abort_all();

        let mut panics = 0;
        while let Some(result) = self.tasks.join_next().await {
            if classify_task_result(result) == TaskTermination::Panic {
                panics += 1;
            }
        }
        if panics > 0 {
            warn!("{} controller task(s) panicked before shutdown", panics);
        }

        drop(self.reset_line);
        let stats = self.controller.stats().await;
        info!(
            "Lab controller stopped: {} admitted, {} rejected, {} resets",
            stats.admitted, stats.rejected, stats.resets
        );
        stats
    }
}

fn classify_task_result(result: std::result::Result<(), JoinError>) -> TaskTermination {
    match result {
        Ok(()) => TaskTermination::Finished,
        Err(e) if e.is_cancelled() => TaskTermination::Cancelled,
        Err(_) => TaskTermination::Panic,
    }
}

/// Task termination classification for shutdown handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskTermination {
    /// Task returned on its own (display init).
    Finished,
    /// Task was cancelled (expected during shutdown).
    Cancelled,
    /// Task panicked.
    Panic,
}
