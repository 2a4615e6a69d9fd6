//! Hardware device abstraction layer for the laboratory occupancy controller.
//!
//! This crate provides trait-based abstractions for the peripherals of the
//! controller board: two entry/exit buttons, a reset button wired to a
//! falling-edge interrupt, an RGB LED made of three digital outputs, a PWM
//! buzzer and a small text display. The traits let the controller run
//! against mock implementations (for development and testing) or real
//! drivers without change.
//!
//! # Design Philosophy
//!
//! - **Thin**: the traits expose exactly what the controller needs (read a
//!   level, drive a level, start/stop a tone, draw text) and nothing about
//!   pin muxing, font rendering or register programming.
//! - **Synchronous**: every call is a short blocking hardware access.
//! - **Thread-safe**: all traits require `Send` so devices can be moved into
//!   Tokio tasks.
//! - **Error-aware**: all operations return [`Result<T>`] with a
//!   [`HardwareError`].
//!
//! # Device Traits
//!
//! ## Buttons
//!
//! The [`InputPin`] trait is sampled by the entry and exit pollers:
//!
//! ```
//! use labcontrol_hardware::mock::MockButton;
//! use labcontrol_hardware::traits::InputPin;
//!
//! let (entry, handle) = MockButton::new();
//! handle.press();
//! assert!(entry.level().unwrap().is_low());
//! ```
//!
//! ## Reset Interrupt
//!
//! The [`EdgeInterrupt`] trait installs a handler that runs on every falling
//! edge. The handler must do the minimum possible work.
//!
//! ## Outputs
//!
//! [`OutputPin`] drives one LED channel, [`ToneOutput`] the buzzer and
//! [`Display`] the text panel.
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides a controllable double for every trait, each
//! paired with a handle that drives or observes it from tests.
//!
//! [`InputPin`]: traits::InputPin
//! [`EdgeInterrupt`]: traits::EdgeInterrupt
//! [`OutputPin`]: traits::OutputPin
//! [`ToneOutput`]: traits::ToneOutput
//! [`Display`]: traits::Display

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{Display, EdgeHandler, EdgeInterrupt, InputPin, OutputPin, ToneOutput};
pub use types::{DutyCycle, Level, TextItem};
