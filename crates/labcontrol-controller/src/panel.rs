//! The user-facing surface: display plus RGB indicator.
//!
//! The admission controller calls [`Surface::present`] while holding its
//! lock, so whatever a surface shows always matches the occupancy it was
//! given.

use labcontrol_core::Snapshot;
use labcontrol_hardware::{Display, OutputPin, Result};
use tracing::{trace, warn};

use crate::indicator::{LedState, RgbIndicator};
use crate::screen::Screen;

/// Something that renders occupancy.
///
/// Implementations must not block beyond a bounded hardware write and must
/// not fail: errors are handled (logged) internally, because the decision
/// that triggered the render is already committed.
pub trait Surface: Send {
    /// Show `screen` and the indicator color for `snapshot`.
    fn present(&mut self, snapshot: Snapshot, screen: Screen);
}

/// Display and LED of the controller board.
#[derive(Debug)]
pub struct Panel<D, P> {
    display: D,
    indicator: RgbIndicator<P>,
    screen: Option<Screen>,
}

impl<D: Display, P: OutputPin> Panel<D, P> {
    /// Build the panel and light the indicator for an empty resource.
    ///
    /// The display stays blank until the first [`present`](Surface::present).
    ///
    /// # Errors
    ///
    /// Returns an error if the initial LED write fails.
    pub fn new(display: D, mut indicator: RgbIndicator<P>) -> Result<Self> {
        indicator.show(LedState::Blue)?;
        Ok(Self {
            display,
            indicator,
            screen: None,
        })
    }

    /// Screen most recently drawn, if any.
    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    /// Color most recently written to the LED.
    pub fn led(&self) -> Option<LedState> {
        self.indicator.current()
    }

    fn draw(&mut self, snapshot: &Snapshot, screen: Screen) -> Result<()> {
        self.display.clear()?;
        for item in screen.compose(snapshot) {
            self.display.draw_text(&item.text, item.x, item.y)?;
        }
        self.display.flush()
    }
}

impl<D: Display, P: OutputPin> Surface for Panel<D, P> {
    fn present(&mut self, snapshot: Snapshot, screen: Screen) {
        let state = LedState::for_snapshot(&snapshot);
        if let Err(e) = self.indicator.show(state) {
            warn!("LED update to {} failed: {}", state, e);
        }

        match self.draw(&snapshot, screen) {
            Ok(()) => {
                trace!("Rendered {:?} for {}", screen, snapshot);
                self.screen = Some(screen);
            }
            Err(e) => warn!("Display update failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labcontrol_core::Capacity;
    use labcontrol_hardware::mock::{
        MockDisplay, MockDisplayHandle, MockOutputPin, MockOutputPinHandle,
    };

    struct Fixture {
        panel: Panel<MockDisplay, MockOutputPin>,
        display: MockDisplayHandle,
        pins: [MockOutputPinHandle; 3],
    }

    impl Fixture {
        fn led(&self) -> Option<LedState> {
            let [r, g, b] = &self.pins;
            LedState::from_channels(r.is_high(), g.is_high(), b.is_high())
        }
    }

    fn fixture() -> Fixture {
        let (display, display_handle) = MockDisplay::new();
        let (red, r) = MockOutputPin::new();
        let (green, g) = MockOutputPin::new();
        let (blue, b) = MockOutputPin::new();
        let panel = Panel::new(display, RgbIndicator::new(red, green, blue)).unwrap();
        Fixture {
            panel,
            display: display_handle,
            pins: [r, g, b],
        }
    }

    fn snapshot(occupancy: u8) -> Snapshot {
        Snapshot::new(occupancy, Capacity::new(10).unwrap()).unwrap()
    }

    #[test]
    fn test_new_lights_blue_and_leaves_display_blank() {
        let fixture = fixture();
        assert_eq!(fixture.led(), Some(LedState::Blue));
        assert_eq!(fixture.panel.led(), Some(LedState::Blue));
        assert!(fixture.display.latest().is_blank());
        assert_eq!(fixture.panel.screen(), None);
    }

    #[test]
    fn test_present_status() {
        let mut fixture = fixture();
        fixture.panel.present(snapshot(3), Screen::Status);

        assert_eq!(fixture.led(), Some(LedState::Green));
        assert_eq!(
            fixture.display.latest().lines(),
            vec!["CONTROLE DO LAB", "Usuarios: 3/10", "Vagas: 7"]
        );
        assert_eq!(fixture.panel.screen(), Some(Screen::Status));
    }

    #[test]
    fn test_present_notice_still_updates_led() {
        let mut fixture = fixture();
        fixture.panel.present(snapshot(10), Screen::FullNotice);

        assert_eq!(fixture.led(), Some(LedState::Red));
        assert!(fixture.display.latest().contains("SISTEMA CHEIO!"));
    }

    #[test]
    fn test_display_failure_does_not_block_led() {
        let mut fixture = fixture();
        fixture.display.set_failing(true);

        fixture.panel.present(snapshot(9), Screen::Status);

        assert_eq!(fixture.led(), Some(LedState::Yellow));
        assert!(fixture.display.latest().is_blank());
        assert_eq!(fixture.panel.screen(), None);
    }
}
