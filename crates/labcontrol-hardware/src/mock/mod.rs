//! Mock device implementations for testing and development.
//!
//! This module provides simulated peripherals that can be controlled and
//! inspected programmatically without requiring the physical board. Each
//! constructor returns the device together with a cloneable handle.

pub mod button;
pub mod buzzer;
pub mod display;
pub mod interrupt;
pub mod output;

// Re-export commonly used types
pub use button::{MockButton, MockButtonHandle};
pub use buzzer::{MockBuzzer, MockBuzzerHandle, ToneCommand, ToneRecord};
pub use display::{Frame, MockDisplay, MockDisplayHandle};
pub use interrupt::{MockInterruptPin, MockInterruptPinHandle};
pub use output::{MockOutputPin, MockOutputPinHandle};
