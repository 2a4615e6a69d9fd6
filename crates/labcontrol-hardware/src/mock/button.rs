//! Mock push button for testing and development.
//!
//! This module provides a simulated active-low button with pull-up: the pin
//! reads high while released and low while pressed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::{Result, traits::InputPin, types::Level};

/// Mock button wired active-low.
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::mock::MockButton;
/// use labcontrol_hardware::traits::InputPin;
/// use labcontrol_hardware::types::Level;
///
/// let (button, handle) = MockButton::new();
/// assert_eq!(button.level().unwrap(), Level::High);
///
/// handle.press();
/// assert_eq!(button.level().unwrap(), Level::Low);
/// ```
#[derive(Debug)]
pub struct MockButton {
    /// Shared pressed flag
    pressed: Arc<AtomicBool>,

    /// Device name
    name: String,
}

impl MockButton {
    /// Create a new mock button with the default name.
    pub fn new() -> (Self, MockButtonHandle) {
        Self::with_name("Mock Button".to_string())
    }

    /// Create a new mock button with a custom name.
    pub fn with_name(name: String) -> (Self, MockButtonHandle) {
        let pressed = Arc::new(AtomicBool::new(false));

        let button = Self {
            pressed: Arc::clone(&pressed),
            name: name.clone(),
        };

        let handle = MockButtonHandle { pressed, name };

        (button, handle)
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl InputPin for MockButton {
    fn level(&self) -> Result<Level> {
        Ok(Level::from(!self.pressed.load(Ordering::SeqCst)))
    }
}

/// Handle for pressing and releasing a mock button.
///
/// It can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockButtonHandle {
    /// Shared pressed flag
    pressed: Arc<AtomicBool>,

    /// Device name
    name: String,
}

impl MockButtonHandle {
    /// Hold the button down.
    pub fn press(&self) {
        self.pressed.store(true, Ordering::SeqCst);
    }

    /// Let the button go.
    pub fn release(&self) {
        self.pressed.store(false, Ordering::SeqCst);
    }

    /// Check whether the button is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }

    /// Press, hold for `hold`, then release.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use labcontrol_hardware::mock::MockButton;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let (_button, handle) = MockButton::new();
    ///     handle.tap(Duration::from_millis(10)).await;
    ///     assert!(!handle.is_pressed());
    /// }
    /// ```
    pub async fn tap(&self, hold: Duration) {
        self.press();
        tokio::time::sleep(hold).await;
        self.release();
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
