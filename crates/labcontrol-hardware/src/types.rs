//! Common types shared across hardware device implementations.
//!
//! This module defines the electrical level of a digital pin, the duty cycle
//! handed to the tone output and the positioned text item the display
//! collaborator draws.

use serde::{Deserialize, Serialize};

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Pin pulled or driven low.
    Low,

    /// Pin pulled or driven high.
    High,
}

impl Level {
    /// Check if this is the low level (the active level of a pulled-up button).
    pub fn is_low(&self) -> bool {
        matches!(self, Self::Low)
    }

    /// Check if this is the high level.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// PWM duty cycle expressed as a compare level against the counter top.
///
/// The tone output drives the pin high while the counter is below `level`
/// and wraps at `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DutyCycle {
    /// Compare level.
    pub level: u16,

    /// Counter wrap value (timer period).
    pub top: u16,
}

impl DutyCycle {
    /// Create a duty cycle, clamping `level` to `top`.
    pub fn new(level: u16, top: u16) -> Self {
        Self {
            level: level.min(top),
            top,
        }
    }

    /// 50% duty for the given counter top.
    pub fn half(top: u16) -> Self {
        Self::new(top / 2, top)
    }

    /// Duty as a fraction in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f32 {
        if self.top == 0 {
            return 0.0;
        }
        f32::from(self.level) / f32::from(self.top)
    }
}

/// A piece of text placed at a pixel position on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// ASCII text.
    pub text: String,

    /// Column in pixels.
    pub x: u8,

    /// Row in pixels.
    pub y: u8,
}

impl TextItem {
    /// Create a new text item.
    pub fn new(text: impl Into<String>, x: u8, y: u8) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}
