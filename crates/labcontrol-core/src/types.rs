use crate::{
    Result,
    constants::{
        DEFAULT_CAPACITY, DOUBLE_BEEP_HZ, DOUBLE_BEEP_MS, MIN_CAPACITY, SINGLE_BEEP_HZ, SINGLE_BEEP_MS,
        STARTUP_FIRST_HZ, STARTUP_NOTE_MS,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Maximum number of simultaneous occupants (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Capacity(u8);

impl Capacity {
    /// Capacity of the reference deployment.
    pub const DEFAULT: Capacity = Capacity(DEFAULT_CAPACITY);

    /// Create a new capacity with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` if the value is below `MIN_CAPACITY`.
    pub fn new(value: u8) -> Result<Self> {
        if value < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(value));
        }
        Ok(Capacity(value))
    }

    /// Get the raw capacity as u8.
    #[must_use]
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Capacity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Capacity::new(value)
    }
}

impl From<Capacity> for u8 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time view of occupancy against capacity.
///
/// Derived on demand for rendering and LED updates; never stored as state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    occupancy: u8,
    capacity: Capacity,
}

impl Snapshot {
    /// Create a snapshot, checking that occupancy fits the capacity.
    ///
    /// # Errors
    /// Returns `Error::InvalidOccupancy` if `occupancy > capacity`.
    pub fn new(occupancy: u8, capacity: Capacity) -> Result<Self> {
        if occupancy > capacity.get() {
            return Err(Error::InvalidOccupancy {
                occupancy,
                capacity: capacity.get(),
            });
        }
        Ok(Snapshot {
            occupancy,
            capacity,
        })
    }

    /// Create a snapshot, capping occupancy at the capacity.
    #[must_use]
    pub fn clamped(occupancy: u8, capacity: Capacity) -> Self {
        Snapshot {
            occupancy: occupancy.min(capacity.get()),
            capacity,
        }
    }

    /// An empty resource.
    #[must_use]
    pub fn empty(capacity: Capacity) -> Self {
        Snapshot {
            occupancy: 0,
            capacity,
        }
    }

    #[must_use]
    pub fn occupancy(&self) -> u8 {
        self.occupancy
    }

    #[must_use]
    pub fn capacity(&self) -> u8 {
        self.capacity.get()
    }

    /// Free places left.
    #[must_use]
    pub fn vacancies(&self) -> u8 {
        self.capacity.get() - self.occupancy
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupancy == self.capacity.get()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.occupancy, self.capacity)
    }
}

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// A token was taken and the occupant counted.
    Admitted { occupancy: u8 },
    /// No token was available; nothing changed.
    Rejected(Rejection),
}

impl Admission {
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

/// Why an admission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Every token is in use.
    Full,
}

/// Outcome of an exit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitOutcome {
    /// A token was returned and the occupant removed.
    Exited { occupancy: u8 },
    /// Nobody was present; the event was ignored.
    NoOp,
}

/// Shape of a requested sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneKind {
    /// One note.
    Single,
    /// The same note twice, separated by a short gap.
    Double,
    /// Two rising notes played at boot.
    Startup,
}

impl fmt::Display for ToneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
            Self::Startup => write!(f, "startup"),
        }
    }
}

/// A request for audio output.
///
/// Created by whichever task wants feedback and handed to the audio
/// dispatcher, which consumes and discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub tone: ToneKind,
    pub pitch_hz: u32,
    pub duration: Duration,
}

impl FeedbackEvent {
    /// Arbitrary single note.
    #[must_use]
    pub fn tone(pitch_hz: u32, duration: Duration) -> Self {
        Self {
            tone: ToneKind::Single,
            pitch_hz,
            duration,
        }
    }

    /// Short low beep used when the resource is full.
    #[must_use]
    pub fn single_beep() -> Self {
        Self::tone(SINGLE_BEEP_HZ, Duration::from_millis(SINGLE_BEEP_MS))
    }

    /// Two high beeps used to confirm a reset.
    #[must_use]
    pub fn double_beep() -> Self {
        Self {
            tone: ToneKind::Double,
            pitch_hz: DOUBLE_BEEP_HZ,
            duration: Duration::from_millis(DOUBLE_BEEP_MS),
        }
    }

    /// Boot chime. `pitch_hz` is the first note.
    #[must_use]
    pub fn startup_chime() -> Self {
        Self {
            tone: ToneKind::Startup,
            pitch_hz: STARTUP_FIRST_HZ,
            duration: Duration::from_millis(STARTUP_NOTE_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn capacity(value: u8) -> Capacity {
        Capacity::new(value).unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(255)]
    fn test_capacity_valid(#[case] value: u8) {
        assert_eq!(Capacity::new(value).unwrap().get(), value);
    }

    #[test]
    fn test_capacity_zero_rejected() {
        assert!(matches!(Capacity::new(0), Err(Error::InvalidCapacity(0))));
    }

    #[test]
    fn test_capacity_serde_validates() {
        let ok: Capacity = serde_json::from_str("12").unwrap();
        assert_eq!(ok.get(), 12);
        assert!(serde_json::from_str::<Capacity>("0").is_err());
    }

    #[rstest]
    #[case(0, 10, true, false)]
    #[case(5, 10, false, false)]
    #[case(10, 10, false, true)]
    fn test_snapshot_flags(
        #[case] occupancy: u8,
        #[case] cap: u8,
        #[case] empty: bool,
        #[case] full: bool,
    ) {
        let snapshot = Snapshot::new(occupancy, capacity(cap)).unwrap();
        assert_eq!(snapshot.is_empty(), empty);
        assert_eq!(snapshot.is_full(), full);
        assert_eq!(snapshot.vacancies(), cap - occupancy);
    }

    #[test]
    fn test_snapshot_rejects_overflow() {
        let result = Snapshot::new(11, capacity(10));
        assert!(matches!(
            result,
            Err(Error::InvalidOccupancy {
                occupancy: 11,
                capacity: 10
            })
        ));
    }

    #[test]
    fn test_snapshot_clamped() {
        assert_eq!(Snapshot::clamped(12, capacity(10)).occupancy(), 10);
        assert_eq!(Snapshot::clamped(4, capacity(10)).occupancy(), 4);
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = Snapshot::new(3, capacity(10)).unwrap();
        assert_eq!(snapshot.to_string(), "3/10");
    }

    #[test]
    fn test_feedback_presets() {
        let single = FeedbackEvent::single_beep();
        assert_eq!(single.tone, ToneKind::Single);
        assert_eq!(single.pitch_hz, 800);
        assert_eq!(single.duration, Duration::from_millis(200));

        let double = FeedbackEvent::double_beep();
        assert_eq!(double.tone, ToneKind::Double);
        assert_eq!(double.pitch_hz, 1200);
        assert_eq!(double.duration, Duration::from_millis(100));

        let chime = FeedbackEvent::startup_chime();
        assert_eq!(chime.tone, ToneKind::Startup);
    }

    #[test]
    fn test_admission_helpers() {
        assert!(Admission::Admitted { occupancy: 1 }.is_admitted());
        assert!(!Admission::Rejected(Rejection::Full).is_admitted());
    }
}
