//! Error types for hardware operations.
//!
//! Peripherals of the controller board fail in few ways: a bus write to the
//! display or the PWM block is refused, a GPIO cannot be read or driven, or
//! the reset interrupt cannot be armed.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during hardware device operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device is not connected or stopped answering.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// A bus transfer (I2C frame, PWM register write) failed.
    #[error("{device} bus error: {message}")]
    Bus { device: String, message: String },

    /// A GPIO line could not be read or driven.
    #[error("Pin {pin} error: {message}")]
    Pin { pin: String, message: String },

    /// The edge interrupt could not be installed.
    #[error("Interrupt setup failed: {message}")]
    Interrupt { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    pub fn bus(device: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bus {
            device: device.into(),
            message: message.into(),
        }
    }

    pub fn pin(pin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pin {
            pin: pin.into(),
            message: message.into(),
        }
    }

    pub fn interrupt(message: impl Into<String>) -> Self {
        Self::Interrupt {
            message: message.into(),
        }
    }
}
