//! TuiApp — the TEA model.
//!
//! Wraps the selection controller plus the bits of state that are purely
//! presentational (focus, highlighted rows). Update receives TuiMessages,
//! mutates state. View reads state to produce ratatui widgets.

use tracing::warn;

use crate::controller::view::ChooserView;
use crate::controller::{LoadOutcome, SelectionController};

use super::event::TuiMessage;

/// Which chooser has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Lob,
    App,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Lob => Focus::App,
            Focus::App => Focus::Lob,
        }
    }
}

/// The main TUI application state (TEA model).
pub struct TuiApp {
    /// The cascade itself.
    pub controller: SelectionController,
    /// Which chooser has focus.
    pub focus: Focus,
    /// Highlighted row in the LOB chooser (0 = placeholder).
    pub lob_cursor: usize,
    /// Highlighted row in the app chooser (0 = placeholder).
    pub app_cursor: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Reload pending (set by input, consumed by runner).
    pub reload_requested: bool,
}

impl TuiApp {
    pub fn new(controller: SelectionController) -> Self {
        let mut app = Self {
            controller,
            focus: Focus::Lob,
            lob_cursor: 0,
            app_cursor: 0,
            should_quit: false,
            reload_requested: false,
        };
        app.sync_cursors();
        app
    }

    /// Handle a TUI message (TEA update).
    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            TuiMessage::Loaded { ticket, result } => {
                // Errors are already on the status line.
                if let Ok(LoadOutcome::Loaded { .. }) = self.controller.finish_load(ticket, result) {
                    self.controller.restore_selection();
                }
                self.sync_cursors();
                if !self.focused_chooser().enabled {
                    self.focus = Focus::Lob;
                }
            }
            TuiMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// The chooser that currently has focus.
    pub fn focused_chooser(&self) -> &ChooserView {
        let view = self.controller.view();
        match self.focus {
            Focus::Lob => &view.lob_chooser,
            Focus::App => &view.app_chooser,
        }
    }

    /// Move highlight up in the focused chooser.
    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        if cursor > 0 {
            self.move_to(cursor - 1);
        }
    }

    /// Move highlight down in the focused chooser.
    pub fn move_down(&mut self) {
        self.move_to(self.cursor() + 1);
    }

    /// Highlight `row`, clamped to the focused chooser. No-op when disabled.
    pub fn move_to(&mut self, row: usize) {
        let chooser = self.focused_chooser();
        if !chooser.enabled {
            return;
        }
        let row = row.min(chooser.row_count() - 1);
        match self.focus {
            Focus::Lob => self.lob_cursor = row,
            Focus::App => self.app_cursor = row,
        }
    }

    /// Select the highlighted row of the focused chooser.
    pub fn commit(&mut self) {
        let chooser = self.focused_chooser();
        if !chooser.enabled {
            return;
        }
        let Some(value) = chooser.value_at(self.cursor()).map(str::to_string) else {
            return;
        };

        let result = match self.focus {
            Focus::Lob => self.controller.select_lob(&value),
            Focus::App => self.controller.select_app(&value),
        };
        if let Err(e) = result {
            warn!(error = %e, "selection rejected");
        }

        self.sync_cursors();
        if self.focus == Focus::Lob && self.controller.view().app_chooser.enabled {
            self.focus = Focus::App;
        }
    }

    /// Clear the selection and return focus to the LOB chooser.
    pub fn clear(&mut self) {
        self.controller.clear();
        self.focus = Focus::Lob;
        self.sync_cursors();
    }

    /// Point both cursors at the controller's current selections.
    pub fn sync_cursors(&mut self) {
        let view = self.controller.view();
        self.lob_cursor = view.lob_chooser.selected_row();
        self.app_cursor = view.app_chooser.selected_row();
    }

    fn cursor(&self) -> usize {
        match self.focus {
            Focus::Lob => self.lob_cursor,
            Focus::App => self.app_cursor,
        }
    }
}
