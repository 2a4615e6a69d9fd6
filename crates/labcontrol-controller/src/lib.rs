//! Lab occupancy controller.
//!
//! This crate contains the admission logic and the tasks that drive it: a
//! capacity-bounded occupancy counter, debounced entry and exit pollers, an
//! interrupt-deferred reset, the RGB indicator mapping, the display screens
//! and a non-blocking audio dispatcher.
//!
//! Peripherals are abstracted by the traits of `labcontrol-hardware`; the
//! `mock` implementations from that crate are enough to run the whole
//! controller in tests or on a desktop.

pub mod admission;
pub mod audio;
pub mod error;
pub mod indicator;
pub mod lab;
pub mod panel;
pub mod poller;
pub mod reset;
pub mod screen;

pub use admission::{AdmissionController, AdmissionStats};
pub use audio::{AudioDispatcher, AudioPlayer};
pub use error::{LabError, Result};
pub use indicator::{LedState, RgbIndicator};
pub use lab::{Lab, LabDevices, LabHandle};
pub use panel::{Panel, Surface};
pub use poller::{ButtonRole, InputPoller, PollTiming, PressOutcome};
pub use reset::{ResetHandler, ResetPhase, ResetSignal};
pub use screen::Screen;
