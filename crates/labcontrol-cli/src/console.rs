//! Terminal stand-ins for the board peripherals.
//!
//! The display prints each flushed frame to stdout; the LED channels and the
//! buzzer report through `tracing`.

use labcontrol_hardware::{Display, DutyCycle, Level, OutputPin, Result, TextItem, ToneOutput};
use tracing::{debug, info};

/// Panel width in columns of the printed frame.
const FRAME_WIDTH: usize = 24;

/// Display that prints frames to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    buffer: Vec<TextItem>,
}

impl Display for ConsoleDisplay {
    fn clear(&mut self) -> Result<()> {
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<()> {
        self.buffer.push(TextItem::new(text, x, y));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut items = self.buffer.clone();
        items.sort_by_key(|item| (item.y, item.x));

        let border = "-".repeat(FRAME_WIDTH);
        println!("+{}+", border);
        for item in &items {
            println!("|{:<width$}|", item.text, width = FRAME_WIDTH);
        }
        println!("+{}+", border);
        Ok(())
    }
}

/// One LED channel.
#[derive(Debug)]
pub struct ConsoleLed {
    color: &'static str,
    level: Level,
}

impl ConsoleLed {
    pub fn new(color: &'static str) -> Self {
        Self {
            color,
            level: Level::Low,
        }
    }
}

impl OutputPin for ConsoleLed {
    fn set_level(&mut self, level: Level) -> Result<()> {
        if level != self.level {
            debug!("LED {} {}", self.color, if level.is_high() { "on" } else { "off" });
            self.level = level;
        }
        Ok(())
    }
}

/// Buzzer that logs the tones it would play.
#[derive(Debug, Default)]
pub struct ConsoleBuzzer;

impl ToneOutput for ConsoleBuzzer {
    fn set_tone(&mut self, frequency_hz: u32, duty: DutyCycle) -> Result<()> {
        info!(
            "Beep {} Hz (wrap {}, duty {:.0}%)",
            frequency_hz,
            duty.top,
            duty.ratio() * 100.0
        );
        Ok(())
    }

    fn silence(&mut self) -> Result<()> {
        debug!("Buzzer silent");
        Ok(())
    }
}
