//! End-to-end tests of the controller on mock peripherals.
//!
//! Each test starts the full task set (pollers, reset handler, audio player,
//! display init) and drives it only through the mock buttons and the reset
//! interrupt, as a user at the door would.

mod common;

use std::time::Duration;

use common::{NOTICE_SETTLE, Rig, settle, status_screen};
use labcontrol_controller::{LedState, ResetPhase};
use labcontrol_core::{Capacity, LabConfig};
use tokio::time::sleep;

const RESET_SCREEN: [&str; 3] = ["SISTEMA", "RESETADO", "Lab Liberado"];
const FULL_SCREEN: [&str; 2] = ["SISTEMA CHEIO!", "Aguarde saida"];

#[tokio::test(start_paused = true)]
async fn test_startup_sequence() {
    let mut rig = Rig::start();

    // LED is blue right away, display waits for the init delay
    assert_eq!(rig.led(), Some(LedState::Blue));
    assert!(rig.display.latest().is_blank());

    sleep(Duration::from_millis(150)).await;
    assert_eq!(rig.screen(), status_screen(0, 10));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(rig.tones(), vec![1000, 1500]);
    assert!(!rig.buzzer.is_sounding());
}

#[tokio::test(start_paused = true)]
async fn test_enter_exit_reset_scenario() {
    let mut rig = Rig::start();
    sleep(Duration::from_secs(1)).await;
    rig.tones();

    for _ in 0..3 {
        rig.tap_entry().await;
    }
    assert_eq!(rig.lab.snapshot().occupancy(), 3);
    assert_eq!(rig.screen(), status_screen(3, 10));
    assert!(rig.screen().contains(&"Vagas: 7".to_string()));
    assert_eq!(rig.led(), Some(LedState::Green));

    rig.tap_exit().await;
    assert_eq!(rig.lab.snapshot().occupancy(), 2);
    assert_eq!(rig.screen(), status_screen(2, 10));
    assert!(rig.screen().contains(&"Vagas: 8".to_string()));

    assert!(rig.reset.trigger());
    settle().await;
    assert_eq!(rig.screen(), RESET_SCREEN);
    assert_eq!(rig.led(), Some(LedState::Blue));
    assert_eq!(rig.lab.snapshot().occupancy(), 0);
    assert_eq!(rig.lab.controller().tokens_available(), 10);

    sleep(NOTICE_SETTLE).await;
    assert_eq!(rig.screen(), status_screen(0, 10));
    assert_eq!(rig.led(), Some(LedState::Blue));
    assert_eq!(rig.tones(), vec![1200, 1200]);

    let stats = rig.lab.shutdown().await;
    assert_eq!(stats.admitted, 3);
    assert_eq!(stats.exited, 1);
    assert_eq!(stats.resets, 1);
}

#[tokio::test(start_paused = true)]
async fn test_led_follows_occupancy() {
    let rig = Rig::with_capacity(3);
    sleep(Duration::from_millis(150)).await;

    rig.tap_entry().await;
    assert_eq!(rig.led(), Some(LedState::Green));
    rig.tap_entry().await;
    assert_eq!(rig.led(), Some(LedState::Yellow));
    rig.tap_entry().await;
    assert_eq!(rig.led(), Some(LedState::Red));
    assert_eq!(rig.screen(), status_screen(3, 3));

    rig.tap_exit().await;
    assert_eq!(rig.led(), Some(LedState::Yellow));
}

#[tokio::test(start_paused = true)]
async fn test_full_lab_refuses_entry() {
    let mut rig = Rig::with_capacity(2);
    sleep(Duration::from_secs(1)).await;
    rig.tones();

    rig.tap_entry().await;
    rig.tap_entry().await;
    assert_eq!(rig.led(), Some(LedState::Red));

    rig.entry.tap(common::TAP_HOLD).await;
    sleep(Duration::from_millis(150)).await;
    assert_eq!(rig.screen(), FULL_SCREEN);
    assert_eq!(rig.led(), Some(LedState::Red));
    assert_eq!(rig.lab.snapshot().occupancy(), 2);

    sleep(NOTICE_SETTLE).await;
    assert_eq!(rig.screen(), status_screen(2, 2));
    assert_eq!(rig.tones(), vec![800]);

    let stats = rig.lab.stats().await;
    assert_eq!(stats.admitted, 2);
    assert_eq!(stats.rejected, 1);
    assert_eq!(rig.lab.controller().tokens_available(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_eleventh_entry_is_refused() {
    let rig = Rig::start();
    sleep(Duration::from_millis(150)).await;

    for _ in 0..10 {
        rig.tap_entry().await;
    }
    assert_eq!(rig.screen(), status_screen(10, 10));

    rig.tap_entry().await;
    sleep(NOTICE_SETTLE).await;

    assert_eq!(rig.lab.snapshot().occupancy(), 10);
    assert_eq!(rig.lab.controller().tokens_available(), 0);
    assert_eq!(rig.lab.stats().await.rejected, 1);
}

#[tokio::test(start_paused = true)]
async fn test_exit_on_empty_lab_is_ignored() {
    let mut rig = Rig::start();
    sleep(Duration::from_millis(150)).await;
    rig.display.drain();

    rig.tap_exit().await;

    assert_eq!(rig.lab.snapshot().occupancy(), 0);
    assert_eq!(rig.lab.controller().tokens_available(), 10);
    assert!(rig.display.drain().is_empty(), "ignored exit must not render");
    assert_eq!(rig.lab.stats().await.ignored_exits, 1);
}

#[tokio::test(start_paused = true)]
async fn test_held_entry_button_repeats_admission() {
    let rig = Rig::start();

    rig.entry.press();
    // Samples at 0, 400 and 800 ms
    sleep(Duration::from_millis(1000)).await;
    rig.entry.release();

    assert_eq!(rig.lab.snapshot().occupancy(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_reset_edges_coalesce() {
    let rig = Rig::start();
    sleep(Duration::from_millis(150)).await;
    rig.tap_entry().await;

    rig.reset.trigger();
    rig.reset.trigger();
    rig.reset.trigger();
    assert_eq!(rig.lab.reset_phase(), ResetPhase::SignalPending);

    sleep(NOTICE_SETTLE).await;
    assert_eq!(rig.lab.stats().await.resets, 1);
    assert_eq!(rig.lab.reset_phase(), ResetPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_notice_is_deferred_not_lost() {
    let rig = Rig::start();
    sleep(Duration::from_millis(150)).await;

    rig.reset.trigger();
    settle().await;
    assert_eq!(rig.lab.reset_phase(), ResetPhase::PerformingReset);

    rig.reset.trigger();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(rig.lab.stats().await.resets, 1);

    sleep(Duration::from_secs(4)).await;
    assert_eq!(rig.lab.stats().await.resets, 2);
    assert_eq!(rig.screen(), status_screen(0, 10));
}

#[tokio::test(start_paused = true)]
async fn test_entries_after_reset_use_restored_tokens() {
    let rig = Rig::with_capacity(2);
    sleep(Duration::from_millis(150)).await;

    rig.tap_entry().await;
    rig.tap_entry().await;
    rig.reset.trigger();
    sleep(NOTICE_SETTLE).await;

    rig.tap_entry().await;
    rig.tap_entry().await;
    assert_eq!(rig.lab.snapshot().occupancy(), 2);
    assert_eq!(rig.lab.stats().await.rejected, 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_sound_does_not_affect_decisions() {
    let config = LabConfig {
        capacity: Capacity::new(1).unwrap(),
        audio_queue_depth: 1,
        ..LabConfig::default()
    };
    let rig = Rig::with_config(config);

    // Admitted at 0 ms, refused at 400 ms while the chime still plays
    rig.entry.press();
    sleep(Duration::from_millis(450)).await;
    rig.entry.release();

    // Reset beep finds the queue full
    rig.reset.trigger();
    settle().await;

    assert_eq!(rig.lab.audio_dropped(), 1);
    assert_eq!(rig.lab.snapshot().occupancy(), 0);
    assert_eq!(rig.lab.controller().tokens_available(), 1);
    assert_eq!(rig.lab.stats().await.resets, 1);
}

#[tokio::test(start_paused = true)]
async fn test_request_reset_from_handle() {
    let rig = Rig::start();
    sleep(Duration::from_millis(150)).await;
    rig.tap_entry().await;

    assert!(rig.lab.request_reset());
    settle().await;

    assert_eq!(rig.lab.snapshot().occupancy(), 0);
    assert_eq!(rig.screen(), RESET_SCREEN);
}

#[tokio::test(start_paused = true)]
async fn test_display_failure_keeps_counting() {
    let rig = Rig::start();
    sleep(Duration::from_millis(150)).await;

    rig.display.set_failing(true);
    rig.tap_entry().await;
    rig.tap_entry().await;

    assert_eq!(rig.lab.snapshot().occupancy(), 2);
    assert_eq!(rig.led(), Some(LedState::Green));
    assert_eq!(rig.screen(), status_screen(0, 10));

    rig.display.set_failing(false);
    rig.tap_entry().await;
    assert_eq!(rig.screen(), status_screen(3, 10));
}

#[tokio::test]
async fn test_invalid_config_fails_to_start() {
    use labcontrol_controller::{Lab, LabDevices, LabError};
    use labcontrol_hardware::mock::{
        MockButton, MockBuzzer, MockDisplay, MockInterruptPin, MockOutputPin,
    };

    let config = LabConfig {
        poll_interval_ms: 0,
        ..LabConfig::default()
    };
    let (entry, _) = MockButton::new();
    let (exit, _) = MockButton::new();
    let (reset, reset_handle) = MockInterruptPin::new();
    let (red, _) = MockOutputPin::new();
    let (green, _) = MockOutputPin::new();
    let (blue, _) = MockOutputPin::new();
    let (buzzer, _) = MockBuzzer::new();
    let (display, _) = MockDisplay::new();

    let result = Lab::start(
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
    );

    assert!(matches!(result, Err(LabError::Config(_))));
    assert!(!reset_handle.is_armed());
}
