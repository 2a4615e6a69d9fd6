//! Mock buzzer implementation for testing and development.
//!
//! Every `set_tone`/`silence` call is recorded with the (tokio) instant it
//! happened, so tests can check pitches, durations and gaps.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{Result, traits::ToneOutput, types::DutyCycle};

/// Command received by the mock buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCommand {
    /// Output started at the given frequency and duty.
    Tone { frequency_hz: u32, duty: DutyCycle },

    /// Output stopped.
    Silence,
}

/// A recorded command with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRecord {
    pub command: ToneCommand,
    pub at: Instant,
}

/// Mock PWM buzzer.
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::mock::{MockBuzzer, ToneCommand};
/// use labcontrol_hardware::traits::ToneOutput;
/// use labcontrol_hardware::types::DutyCycle;
///
/// #[tokio::main]
/// async fn main() {
///     let (mut buzzer, mut handle) = MockBuzzer::new();
///
///     buzzer.set_tone(800, DutyCycle::half(1249)).unwrap();
///     assert!(handle.is_sounding());
///     buzzer.silence().unwrap();
///
///     let commands: Vec<_> = handle.drain().into_iter().map(|r| r.command).collect();
///     assert_eq!(commands.len(), 2);
///     assert_eq!(commands[1], ToneCommand::Silence);
/// }
/// ```
#[derive(Debug)]
pub struct MockBuzzer {
    /// Channel sender for recorded commands
    record_tx: mpsc::UnboundedSender<ToneRecord>,

    /// Whether the output is currently driven
    sounding: Arc<AtomicBool>,
}

impl MockBuzzer {
    /// Create a new silent mock buzzer.
    pub fn new() -> (Self, MockBuzzerHandle) {
        let (record_tx, record_rx) = mpsc::unbounded_channel();
        let sounding = Arc::new(AtomicBool::new(false));

        let buzzer = Self {
            record_tx,
            sounding: Arc::clone(&sounding),
        };

        let handle = MockBuzzerHandle {
            record_rx,
            sounding,
        };

        (buzzer, handle)
    }

    fn record(&self, command: ToneCommand) {
        // A dropped handle only means nobody is listening
        let _ = self.record_tx.send(ToneRecord {
            command,
            at: Instant::now(),
        });
    }
}

impl ToneOutput for MockBuzzer {
    fn set_tone(&mut self, frequency_hz: u32, duty: DutyCycle) -> Result<()> {
        self.sounding.store(true, Ordering::SeqCst);
        self.record(ToneCommand::Tone { frequency_hz, duty });
        Ok(())
    }

    fn silence(&mut self) -> Result<()> {
        self.sounding.store(false, Ordering::SeqCst);
        self.record(ToneCommand::Silence);
        Ok(())
    }
}

/// Handle for inspecting a mock buzzer.
#[derive(Debug)]
pub struct MockBuzzerHandle {
    /// Channel receiver for recorded commands
    record_rx: mpsc::UnboundedReceiver<ToneRecord>,

    /// Whether the output is currently driven
    sounding: Arc<AtomicBool>,
}

impl MockBuzzerHandle {
    /// Check whether the buzzer is currently driven.
    pub fn is_sounding(&self) -> bool {
        self.sounding.load(Ordering::SeqCst)
    }

    /// Wait for the next recorded command.
    ///
    /// Returns `None` once the buzzer has been dropped and every record read.
    pub async fn recv(&mut self) -> Option<ToneRecord> {
        self.record_rx.recv().await
    }

    /// Take every command recorded so far.
    pub fn drain(&mut self) -> Vec<ToneRecord> {
        let mut records = Vec::new();
        while let Ok(record) = self.record_rx.try_recv() {
            records.push(record);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_records_tone_and_silence() {
        let (mut buzzer, mut handle) = MockBuzzer::new();
        assert!(!handle.is_sounding());

        buzzer.set_tone(1200, DutyCycle::half(832)).unwrap();
        assert!(handle.is_sounding());

        buzzer.silence().unwrap();
        assert!(!handle.is_sounding());

        let records = handle.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].command,
            ToneCommand::Tone {
                frequency_hz: 1200,
                duty: DutyCycle::half(832)
            }
        );
        assert_eq!(records[1].command, ToneCommand::Silence);
    }

    #[tokio::test(start_paused = true)]
    async fn test_records_timestamps() {
        let (mut buzzer, mut handle) = MockBuzzer::new();

        buzzer.set_tone(800, DutyCycle::half(1249)).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        buzzer.silence().unwrap();

        let start = handle.recv().await.unwrap();
        let stop = handle.recv().await.unwrap();
        assert_eq!(stop.at - start.at, Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_recv_ends_after_drop() {
        let (buzzer, mut handle) = MockBuzzer::new();
        drop(buzzer);
        assert!(handle.recv().await.is_none());
    }
}
