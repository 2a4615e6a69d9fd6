//! Mock interrupt-capable input pin.
//!
//! The handle's [`trigger`](MockInterruptPinHandle::trigger) simulates a
//! falling edge by calling the installed handler synchronously, the way an
//! interrupt would preempt whatever task is running.

use std::sync::{Arc, OnceLock};

use crate::{
    HardwareError, Result,
    traits::{EdgeHandler, EdgeInterrupt},
};

/// Mock reset line with a falling-edge interrupt.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use labcontrol_hardware::mock::MockInterruptPin;
/// use labcontrol_hardware::traits::EdgeInterrupt;
///
/// let (mut pin, handle) = MockInterruptPin::new();
/// let edges = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&edges);
///
/// pin.on_falling_edge(Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }))
/// .unwrap();
///
/// assert!(handle.trigger());
/// assert_eq!(edges.load(Ordering::SeqCst), 1);
/// ```
pub struct MockInterruptPin {
    /// Installed handler, shared with the handle
    handler: Arc<OnceLock<EdgeHandler>>,
}

impl MockInterruptPin {
    /// Create a new mock interrupt pin with no handler installed.
    pub fn new() -> (Self, MockInterruptPinHandle) {
        let handler = Arc::new(OnceLock::new());

        let pin = Self {
            handler: Arc::clone(&handler),
        };

        (pin, MockInterruptPinHandle { handler })
    }
}

impl std::fmt::Debug for MockInterruptPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockInterruptPin")
            .field("armed", &self.handler.get().is_some())
            .finish()
    }
}

impl EdgeInterrupt for MockInterruptPin {
    fn on_falling_edge(&mut self, handler: EdgeHandler) -> Result<()> {
        self.handler
            .set(handler)
            .map_err(|_| HardwareError::interrupt("Falling-edge handler already installed"))
    }
}

/// Handle for firing edges on a mock interrupt pin.
#[derive(Clone)]
pub struct MockInterruptPinHandle {
    /// Installed handler, shared with the pin
    handler: Arc<OnceLock<EdgeHandler>>,
}

impl MockInterruptPinHandle {
    /// Simulate a falling edge.
    ///
    /// Returns `false` if no handler was installed yet, in which case the edge
    /// is lost as it would be with the interrupt disabled.
    pub fn trigger(&self) -> bool {
        match self.handler.get() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Check whether a handler has been installed.
    pub fn is_armed(&self) -> bool {
        self.handler.get().is_some()
    }
}

impl std::fmt::Debug for MockInterruptPinHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockInterruptPinHandle")
            .field("armed", &self.is_armed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_trigger_without_handler_is_lost() {
        let (_pin, handle) = MockInterruptPin::new();
        assert!(!handle.is_armed());
        assert!(!handle.trigger());
    }

    #[test]
    fn test_trigger_calls_handler_each_edge() {
        let (mut pin, handle) = MockInterruptPin::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        pin.on_falling_edge(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        assert!(handle.is_armed());
        handle.trigger();
        handle.trigger();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_second_handler_rejected() {
        let (mut pin, _handle) = MockInterruptPin::new();
        pin.on_falling_edge(Box::new(|| {})).unwrap();

        let result = pin.on_falling_edge(Box::new(|| {}));
        assert!(matches!(
            result,
            Err(HardwareError::Interrupt { .. })
        ));
    }
}
