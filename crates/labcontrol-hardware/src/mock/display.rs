//! Mock text display for testing and development.
//!
//! Drawing goes to an off-screen buffer like the real panel. Each `flush`
//! publishes a [`Frame`]: the handle can read the latest one or drain the
//! full history in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};

use crate::{HardwareError, Result, traits::Display, types::TextItem};

/// Content of the panel after a flush.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Text items in drawing order.
    pub items: Vec<TextItem>,
}

impl Frame {
    /// The drawn strings in drawing order.
    pub fn lines(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Check whether any drawn string equals `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text == text)
    }

    /// Check whether nothing was drawn.
    pub fn is_blank(&self) -> bool {
        self.items.is_empty()
    }
}

/// Mock display.
///
/// # Examples
///
/// ```
/// use labcontrol_hardware::mock::MockDisplay;
/// use labcontrol_hardware::traits::Display;
///
/// let (mut display, handle) = MockDisplay::new();
///
/// display.clear().unwrap();
/// display.draw_text("SISTEMA", 38, 15).unwrap();
/// assert!(handle.latest().is_blank());
///
/// display.flush().unwrap();
/// assert_eq!(handle.latest().lines(), vec!["SISTEMA"]);
/// ```
#[derive(Debug)]
pub struct MockDisplay {
    /// Off-screen buffer
    buffer: Vec<TextItem>,

    /// Latest flushed frame
    latest_tx: watch::Sender<Frame>,

    /// Every flushed frame, in order
    history_tx: mpsc::UnboundedSender<Frame>,

    /// Fail every operation while set
    failing: Arc<AtomicBool>,
}

impl MockDisplay {
    /// Create a new blank mock display.
    pub fn new() -> (Self, MockDisplayHandle) {
        let (latest_tx, latest_rx) = watch::channel(Frame::default());
        let (history_tx, history_rx) = mpsc::unbounded_channel();
        let failing = Arc::new(AtomicBool::new(false));

        let display = Self {
            buffer: Vec::new(),
            latest_tx,
            history_tx,
            failing: Arc::clone(&failing),
        };

        let handle = MockDisplayHandle {
            latest_rx,
            history_rx,
            failing,
        };

        (display, handle)
    }

    fn check_connected(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HardwareError::bus("Mock display", "write failed"));
        }
        Ok(())
    }
}

impl Display for MockDisplay {
    fn clear(&mut self) -> Result<()> {
        self.check_connected()?;
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<()> {
        self.check_connected()?;
        self.buffer.push(TextItem::new(text, x, y));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.check_connected()?;
        let frame = Frame {
            items: self.buffer.clone(),
        };
        self.latest_tx.send_replace(frame.clone());
        // A dropped handle only means nobody is listening
        let _ = self.history_tx.send(frame);
        Ok(())
    }
}

/// Handle for inspecting a mock display.
#[derive(Debug)]
pub struct MockDisplayHandle {
    /// Latest flushed frame
    latest_rx: watch::Receiver<Frame>,

    /// Every flushed frame, in order
    history_rx: mpsc::UnboundedReceiver<Frame>,

    /// Fail every operation while set
    failing: Arc<AtomicBool>,
}

impl MockDisplayHandle {
    /// The frame currently on the panel.
    pub fn latest(&self) -> Frame {
        self.latest_rx.borrow().clone()
    }

    /// Wait for the next flushed frame.
    pub async fn next_frame(&mut self) -> Option<Frame> {
        self.history_rx.recv().await
    }

    /// Take every frame flushed since the last call.
    pub fn drain(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.history_rx.try_recv() {
            frames.push(frame);
        }
        frames
    }

    /// Make every display operation fail (simulates a disconnected panel).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}
