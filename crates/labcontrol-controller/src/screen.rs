//! Text composition for the occupancy display.
//!
//! This module turns a [`Snapshot`] into the positioned strings shown on the
//! 128×64 panel. It owns no decision logic: which screen is shown is decided
//! by the caller.
//!
//! # Character Encoding
//!
//! Every string is plain ASCII. The panel font has no accented glyphs, which
//! is why "Usuarios" and "saida" are written without accents.
//!
//! # Examples
//!
//! ```
//! use labcontrol_controller::screen::Screen;
//! use labcontrol_core::{Capacity, Snapshot};
//!
//! let snapshot = Snapshot::new(3, Capacity::new(10).unwrap()).unwrap();
//! let lines: Vec<String> = Screen::Status
//!     .compose(&snapshot)
//!     .into_iter()
//!     .map(|item| item.text)
//!     .collect();
//!
//! assert_eq!(lines, vec!["CONTROLE DO LAB", "Usuarios: 3/10", "Vagas: 7"]);
//! ```

use labcontrol_core::Snapshot;
use labcontrol_hardware::TextItem;

/// Title line of the status screen.
pub const TITLE: &str = "CONTROLE DO LAB";

/// Status line when nobody is inside.
pub const STATUS_EMPTY: &str = "Status: Vazio";

/// Status line when every place is taken.
pub const STATUS_FULL: &str = "Status: CHEIO";

/// Lines of the overlay shown when an entry is refused.
pub const FULL_NOTICE: [&str; 2] = ["SISTEMA CHEIO!", "Aguarde saida"];

/// Lines of the overlay shown after a reset.
pub const RESET_NOTICE: [&str; 3] = ["SISTEMA", "RESETADO", "Lab Liberado"];

/// Left margin of the status screen.
const STATUS_X: u8 = 5;

/// Rows of the status screen lines.
const STATUS_ROWS: [u8; 3] = [5, 25, 45];

/// Positions of the full overlay lines.
const FULL_NOTICE_AT: [(u8, u8); 2] = [(10, 25), (10, 35)];

/// Positions of the reset overlay lines (roughly centered).
const RESET_NOTICE_AT: [(u8, u8); 3] = [(38, 15), (35, 25), (19, 45)];

/// What the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Title, occupancy and vacancy summary.
    Status,

    /// Entry refused because the resource is full.
    FullNotice,

    /// Occupancy forcibly cleared.
    ResetNotice,
}

impl Screen {
    /// Check whether this is one of the temporary overlays.
    pub fn is_notice(&self) -> bool {
        !matches!(self, Self::Status)
    }

    /// Positioned text for this screen.
    ///
    /// Only [`Screen::Status`] depends on the snapshot.
    pub fn compose(&self, snapshot: &Snapshot) -> Vec<TextItem> {
        match self {
            Self::Status => vec![
                TextItem::new(TITLE, STATUS_X, STATUS_ROWS[0]),
                TextItem::new(occupancy_line(snapshot), STATUS_X, STATUS_ROWS[1]),
                TextItem::new(status_line(snapshot), STATUS_X, STATUS_ROWS[2]),
            ],
            Self::FullNotice => place(&FULL_NOTICE, &FULL_NOTICE_AT),
            Self::ResetNotice => place(&RESET_NOTICE, &RESET_NOTICE_AT),
        }
    }
}

/// `Usuarios: {occupancy}/{capacity}`
pub fn occupancy_line(snapshot: &Snapshot) -> String {
    format!("Usuarios: {}/{}", snapshot.occupancy(), snapshot.capacity())
}

/// Third line of the status screen.
pub fn status_line(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        STATUS_EMPTY.to_string()
    } else if snapshot.is_full() {
        STATUS_FULL.to_string()
    } else {
        format!("Vagas: {}", snapshot.vacancies())
    }
}

fn place(lines: &[&str], positions: &[(u8, u8)]) -> Vec<TextItem> {
    lines
        .iter()
        .zip(positions)
        .map(|(text, &(x, y))| TextItem::new(*text, x, y))
        .collect()
}
