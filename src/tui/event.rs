//! TUI messages — everything that can drive an update.
//!
//! Keyboard input arrives from a blocking crossterm poll; load results
//! arrive from spawned fetch tasks over an mpsc channel. Both flow into
//! `TuiApp::update` on the single loop task.

use crossterm::event::KeyEvent;

use crate::catalog::error::LoadError;
use crate::catalog::Catalog;
use crate::controller::LoadTicket;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// A fetch batch finished (possibly superseded by now).
    Loaded {
        ticket: LoadTicket,
        result: Result<Catalog, LoadError>,
    },
    /// Quit the TUI.
    Quit,
}
