//! Error types for bringing the controller up.
//!
//! Once running, the controller has no fatal errors: refused entries and
//! spurious exits are ordinary outcomes, and hardware write failures are
//! logged where they happen.

use labcontrol_hardware::HardwareError;

/// Result type alias for controller setup.
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors that can occur while starting the controller.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] labcontrol_core::Error),

    /// A peripheral could not be initialized.
    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),
}
