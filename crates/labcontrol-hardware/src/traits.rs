//! Hardware device trait definitions.
//!
//! This module defines the contract between the occupancy controller and the
//! thin hardware wrappers around it: button inputs, the reset interrupt line,
//! the three LED outputs, the buzzer and the display.
//!
//! The traits are synchronous. GPIO reads and writes, PWM register updates
//! and display buffer transfers are short blocking calls on the target
//! hardware, and keeping them synchronous lets the controller invoke them
//! while holding its lock without requiring `Send` futures from every
//! implementation.

use crate::error::Result;
use crate::types::{DutyCycle, Level};

/// Callback invoked on a falling edge.
///
/// Runs in interrupt context on real hardware: it must not block, allocate or
/// touch any other peripheral.
pub type EdgeHandler = Box<dyn Fn() + Send + Sync + 'static>;

/// Digital input pin (a button with pull-up).
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::traits::InputPin;
/// use labcontrol_hardware::error::Result;
///
/// fn is_pressed<P: InputPin>(pin: &P) -> Result<bool> {
///     Ok(pin.level()?.is_low())
/// }
/// ```
pub trait InputPin: Send {
    /// Sample the current level of the pin.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be read.
    fn level(&self) -> Result<Level>;
}

/// Input pin able to raise an interrupt on a falling edge.
pub trait EdgeInterrupt: Send {
    /// Install the handler called on every falling edge.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A handler is already installed
    /// - The interrupt cannot be enabled
    fn on_falling_edge(&mut self, handler: EdgeHandler) -> Result<()>;
}

/// Digital output pin (one LED channel).
pub trait OutputPin: Send {
    /// Drive the pin to the given level.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be written.
    fn set_level(&mut self, level: Level) -> Result<()>;

    /// Drive the pin high.
    fn set_high(&mut self) -> Result<()> {
        self.set_level(Level::High)
    }

    /// Drive the pin low.
    fn set_low(&mut self) -> Result<()> {
        self.set_level(Level::Low)
    }
}

/// Variable-frequency tone output (a PWM-driven buzzer).
///
/// The caller clamps `frequency_hz` to a safe range and derives the counter
/// top before calling [`set_tone`](ToneOutput::set_tone).
pub trait ToneOutput: Send {
    /// Start driving the tone.
    ///
    /// # Errors
    ///
    /// Returns an error if the PWM peripheral rejects the settings.
    fn set_tone(&mut self, frequency_hz: u32, duty: DutyCycle) -> Result<()>;

    /// Stop driving the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the PWM peripheral cannot be written.
    fn silence(&mut self) -> Result<()>;
}

/// Text display.
///
/// Drawing happens in an off-screen buffer; nothing is visible until
/// [`flush`](Display::flush) is called.
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::traits::Display;
/// use labcontrol_hardware::error::Result;
///
/// fn show_banner<D: Display>(display: &mut D) -> Result<()> {
///     display.clear()?;
///     display.draw_text("CONTROLE DO LAB", 5, 5)?;
///     display.flush()
/// }
/// ```
pub trait Display: Send {
    /// Blank the off-screen buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be cleared.
    fn clear(&mut self) -> Result<()>;

    /// Draw ASCII text with its top-left corner at `(x, y)` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be drawn.
    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<()>;

    /// Transfer the off-screen buffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    fn flush(&mut self) -> Result<()>;
}
