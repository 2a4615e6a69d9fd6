//! RGB occupancy indicator.
//!
//! [`LedState::for_snapshot`] is the pure occupancy → color mapping;
//! [`RgbIndicator`] drives the three LED channels accordingly.
//!
//! | Occupancy | State |
//! |-----------|-------|
//! | 0 | Blue |
//! | 1 ..= capacity - 2 | Green |
//! | capacity - 1 | Yellow (red + green) |
//! | capacity | Red |

use std::fmt;

use labcontrol_core::Snapshot;
use labcontrol_hardware::{Level, OutputPin, Result};

/// Color shown by the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedState {
    /// Nobody inside.
    Blue,

    /// Places available.
    Green,

    /// One place left.
    Yellow,

    /// Full.
    Red,
}

impl LedState {
    /// Map an occupancy snapshot to a color.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcontrol_controller::indicator::LedState;
    /// use labcontrol_core::{Capacity, Snapshot};
    ///
    /// let capacity = Capacity::new(10).unwrap();
    /// let state = LedState::for_snapshot(&Snapshot::new(9, capacity).unwrap());
    /// assert_eq!(state, LedState::Yellow);
    /// ```
    pub fn for_snapshot(snapshot: &Snapshot) -> Self {
        let occupancy = snapshot.occupancy();
        let capacity = snapshot.capacity();

        if occupancy == 0 {
            Self::Blue
        } else if occupancy < capacity.saturating_sub(1) {
            Self::Green
        } else if occupancy == capacity - 1 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Channel levels as `(red, green, blue)`.
    pub fn channels(&self) -> (bool, bool, bool) {
        match self {
            Self::Blue => (false, false, true),
            Self::Green => (false, true, false),
            Self::Yellow => (true, true, false),
            Self::Red => (true, false, false),
        }
    }

    /// Recover the state from channel levels, if they form one.
    pub fn from_channels(red: bool, green: bool, blue: bool) -> Option<Self> {
        match (red, green, blue) {
            (false, false, true) => Some(Self::Blue),
            (false, true, false) => Some(Self::Green),
            (true, true, false) => Some(Self::Yellow),
            (true, false, false) => Some(Self::Red),
            _ => None,
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blue => write!(f, "blue"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// Three digital outputs forming one RGB LED.
#[derive(Debug)]
pub struct RgbIndicator<P> {
    red: P,
    green: P,
    blue: P,
    current: Option<LedState>,
}

impl<P: OutputPin> RgbIndicator<P> {
    /// Wrap the three channel pins. Nothing is written until [`show`](Self::show).
    pub fn new(red: P, green: P, blue: P) -> Self {
        Self {
            red,
            green,
            blue,
            current: None,
        }
    }

    /// Drive the channels for `state`.
    ///
    /// # Errors
    ///
    /// Returns the first pin write error. `current()` is only updated when all
    /// three writes succeed.
    pub fn show(&mut self, state: LedState) -> Result<()> {
        let (red, green, blue) = state.channels();
        self.red.set_level(Level::from(red))?;
        self.green.set_level(Level::from(green))?;
        self.blue.set_level(Level::from(blue))?;
        self.current = Some(state);
        Ok(())
    }

    /// Last state successfully written.
    pub fn current(&self) -> Option<LedState> {
        self.current
    }
}
