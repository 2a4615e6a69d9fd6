//! Common test utilities for integration tests.
//!
//! [`Rig`] starts a full controller on mock peripherals and keeps the handles
//! needed to press buttons, fire the reset interrupt and read back the LED,
//! the display and the buzzer.
//!
//! Most tests run with paused time (`#[tokio::test(start_paused = true)]`),
//! so the fixed poll, debounce and hold delays elapse instantly.

#![allow(dead_code)]

use std::time::Duration;

use labcontrol_controller::{Lab, LabDevices, LabHandle, LedState, Panel};
use labcontrol_core::{Capacity, LabConfig};
use labcontrol_hardware::mock::{
    MockButton, MockButtonHandle, MockBuzzer, MockBuzzerHandle, MockDisplay, MockDisplayHandle,
    MockInterruptPin, MockInterruptPinHandle, MockOutputPin, MockOutputPinHandle, ToneCommand,
};

/// How long a simulated tap holds the button (longer than one poll period).
pub const TAP_HOLD: Duration = Duration::from_millis(150);

/// Wait after a tap so the poller has finished its debounce window.
pub const TAP_SETTLE: Duration = Duration::from_millis(450);

/// Longer than the notice hold plus the debounce window.
pub const NOTICE_SETTLE: Duration = Duration::from_millis(2000);

pub type TestHandle = LabHandle<Panel<MockDisplay, MockOutputPin>>;

/// A running controller on mock peripherals.
pub struct Rig {
    pub lab: TestHandle,
    pub entry: MockButtonHandle,
    pub exit: MockButtonHandle,
    pub reset: MockInterruptPinHandle,
    pub leds: [MockOutputPinHandle; 3],
    pub buzzer: MockBuzzerHandle,
    pub display: MockDisplayHandle,
}

impl Rig {
    /// Start a controller with the default configuration.
    pub fn start() -> Self {
        Self::with_config(LabConfig::default())
    }

    /// Start a controller with the given capacity.
    pub fn with_capacity(capacity: u8) -> Self {
        Self::with_config(LabConfig {
            capacity: Capacity::new(capacity).unwrap(),
            ..LabConfig::default()
        })
    }

    pub fn with_config(config: LabConfig) -> Self {
        let (entry, entry_handle) = MockButton::with_name("Entry".to_string());
        let (exit, exit_handle) = MockButton::with_name("Exit".to_string());
        let (reset, reset_handle) = MockInterruptPin::new();
        let (red, red_handle) = MockOutputPin::new();
        let (green, green_handle) = MockOutputPin::new();
        let (blue, blue_handle) = MockOutputPin::new();
        let (buzzer, buzzer_handle) = MockBuzzer::new();
        let (display, display_handle) = MockDisplay::new();

        let lab = Lab::start(
            &config,
            LabDevices {
                entry,
                exit,
                reset,
                red,
                green,
                blue,
                buzzer,
                display,
            },
        )
        .expect("Failed to start lab controller");

        Self {
            lab,
            entry: entry_handle,
            exit: exit_handle,
            reset: reset_handle,
            leds: [red_handle, green_handle, blue_handle],
            buzzer: buzzer_handle,
            display: display_handle,
        }
    }

    /// Color currently shown by the LED pins.
    pub fn led(&self) -> Option<LedState> {
        let [red, green, blue] = &self.leds;
        LedState::from_channels(red.is_high(), green.is_high(), blue.is_high())
    }

    /// Text currently on the display.
    pub fn screen(&self) -> Vec<String> {
        self.display
            .latest()
            .lines()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Tap the entry button and wait for the poller to settle.
    pub async fn tap_entry(&self) {
        self.entry.tap(TAP_HOLD).await;
        tokio::time::sleep(TAP_SETTLE).await;
    }

    /// Tap the exit button and wait for the poller to settle.
    pub async fn tap_exit(&self) {
        self.exit.tap(TAP_HOLD).await;
        tokio::time::sleep(TAP_SETTLE).await;
    }

    /// Pitches started on the buzzer since the last call.
    pub fn tones(&mut self) -> Vec<u32> {
        self.buzzer
            .drain()
            .into_iter()
            .filter_map(|record| match record.command {
                ToneCommand::Tone { frequency_hz, .. } => Some(frequency_hz),
                ToneCommand::Silence => None,
            })
            .collect()
    }
}

/// Expected status screen text.
pub fn status_screen(occupancy: u8, capacity: u8) -> Vec<String> {
    let status = if occupancy == 0 {
        "Status: Vazio".to_string()
    } else if occupancy == capacity {
        "Status: CHEIO".to_string()
    } else {
        format!("Vagas: {}", capacity - occupancy)
    };
    vec![
        "CONTROLE DO LAB".to_string(),
        format!("Usuarios: {}/{}", occupancy, capacity),
        status,
    ]
}

/// Let spawned tasks run without advancing time meaningfully.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
