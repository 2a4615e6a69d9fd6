//! Mock digital output pin (one LED channel).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Result, traits::OutputPin, types::Level};

/// Mock output pin whose level can be observed through its handle.
///
/// Starts driven low.
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::mock::MockOutputPin;
/// use labcontrol_hardware::traits::OutputPin;
///
/// let (mut pin, handle) = MockOutputPin::new();
/// assert!(!handle.is_high());
///
/// pin.set_high().unwrap();
/// assert!(handle.is_high());
/// ```
#[derive(Debug)]
pub struct MockOutputPin {
    /// Shared level, `true` when high
    high: Arc<AtomicBool>,
}

impl MockOutputPin {
    /// Create a new mock output pin driven low.
    pub fn new() -> (Self, MockOutputPinHandle) {
        let high = Arc::new(AtomicBool::new(false));

        let pin = Self {
            high: Arc::clone(&high),
        };

        (pin, MockOutputPinHandle { high })
    }
}

impl OutputPin for MockOutputPin {
    fn set_level(&mut self, level: Level) -> Result<()> {
        self.high.store(level.is_high(), Ordering::SeqCst);
        Ok(())
    }
}

/// Handle for observing a mock output pin.
#[derive(Debug, Clone)]
pub struct MockOutputPinHandle {
    /// Shared level, `true` when high
    high: Arc<AtomicBool>,
}

impl MockOutputPinHandle {
    /// Current level of the pin.
    pub fn level(&self) -> Level {
        Level::from(self.is_high())
    }

    /// Check whether the pin is driven high.
    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::SeqCst)
    }
}
