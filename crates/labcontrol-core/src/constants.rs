//! Core constants for the laboratory occupancy controller.
//!
//! This module centralizes every fixed value the controller relies on: the
//! capacity of the reference deployment, the timing of the input pollers and
//! overlays, the tone parameters of the buzzer and the PWM limits used to
//! derive a safe timer period from a frequency.
//!
//! # Usage
//!
//! ```
//! use labcontrol_core::constants::*;
//! use std::time::Duration;
//!
//! assert_eq!(DEFAULT_CAPACITY, 10);
//!
//! let debounce = Duration::from_millis(DEBOUNCE_MS);
//! assert!(debounce > Duration::from_millis(POLL_INTERVAL_MS));
//! ```
//!
//! # Hardware Compliance
//!
//! Timing and tone values match the reference board (RP2040 at 125 MHz with a
//! passive buzzer on a PWM slice). Changing them changes observable behavior.

// ============================================================================
// Capacity
// ============================================================================

/// Maximum simultaneous occupants in the reference deployment.
///
/// # Examples
///
/// ```
/// use labcontrol_core::constants::DEFAULT_CAPACITY;
///
/// let tokens = DEFAULT_CAPACITY as usize;
/// assert_eq!(tokens, 10);
/// ```
pub const DEFAULT_CAPACITY: u8 = 10;

/// Smallest capacity accepted by configuration validation.
pub const MIN_CAPACITY: u8 = 1;

// ============================================================================
// Input Timing
// ============================================================================

/// Sampling period of the entry and exit buttons, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Hold time after a detected press before sampling resumes, in milliseconds.
///
/// A button still held when the window ends counts as a new press.
pub const DEBOUNCE_MS: u64 = 300;

/// How long the "full" and "reset" overlays stay on screen, in milliseconds.
pub const NOTICE_HOLD_MS: u64 = 1500;

/// Delay before the first status render after boot, in milliseconds.
pub const DISPLAY_INIT_DELAY_MS: u64 = 100;

// ============================================================================
// Audio Feedback
// ============================================================================

/// Pitch of the single "system full" beep.
pub const SINGLE_BEEP_HZ: u32 = 800;

/// Duration of the single beep, in milliseconds.
pub const SINGLE_BEEP_MS: u64 = 200;

/// Pitch of each half of the "reset" double beep.
pub const DOUBLE_BEEP_HZ: u32 = 1200;

/// Duration of each half of the double beep, in milliseconds.
pub const DOUBLE_BEEP_MS: u64 = 100;

/// Silence between the two halves of a double beep, in milliseconds.
pub const DOUBLE_BEEP_GAP_MS: u64 = 100;

/// First note of the startup chime.
pub const STARTUP_FIRST_HZ: u32 = 1000;

/// Second note of the startup chime.
pub const STARTUP_SECOND_HZ: u32 = 1500;

/// Duration of each startup note, in milliseconds.
pub const STARTUP_NOTE_MS: u64 = 200;

/// Rest between the two startup notes, in milliseconds.
pub const STARTUP_GAP_MS: u64 = 300;

/// Number of sounds the audio queue holds before new requests are dropped.
pub const AUDIO_QUEUE_DEPTH: usize = 4;

// ============================================================================
// PWM Limits
// ============================================================================

/// Lowest frequency the buzzer is driven at.
pub const MIN_TONE_HZ: u32 = 100;

/// Highest frequency the buzzer is driven at.
pub const MAX_TONE_HZ: u32 = 10_000;

/// System clock feeding the PWM slice.
pub const PWM_SYSTEM_CLOCK_HZ: u32 = 125_000_000;

/// Fixed clock divider applied to the PWM slice.
pub const PWM_CLOCK_DIVIDER: u32 = 125;

/// Smallest counter wrap value allowed.
pub const MIN_PWM_WRAP: u16 = 100;

/// Largest counter wrap value allowed.
pub const MAX_PWM_WRAP: u16 = 65_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_exceeds_poll_interval() {
        assert!(DEBOUNCE_MS > POLL_INTERVAL_MS);
    }

    #[test]
    fn test_tone_range_is_ordered() {
        assert!(MIN_TONE_HZ < MAX_TONE_HZ);
        assert!(MIN_PWM_WRAP < MAX_PWM_WRAP);
    }

    #[test]
    fn test_beep_pitches_within_range() {
        for hz in [
            SINGLE_BEEP_HZ,
            DOUBLE_BEEP_HZ,
            STARTUP_FIRST_HZ,
            STARTUP_SECOND_HZ,
        ] {
            assert!((MIN_TONE_HZ..=MAX_TONE_HZ).contains(&hz));
        }
    }
}
