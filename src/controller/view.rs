//! Derived display state — what a frontend renders.
//!
//! Plain data, no behaviour beyond constructors. The controller rebuilds
//! the relevant pieces on every transition; frontends only read it.

use std::fmt;

/// Shown for any unset summary field.
pub const PLACEHOLDER: &str = "\u{2014}";

pub const SELECT_LOB: &str = "Select LOB";
pub const NO_LOBS: &str = "No LOBs found";
pub const SELECT_APP: &str = "Select App";
pub const NO_APPS: &str = "No apps found";

/// A drop-down style chooser: placeholder row plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserView {
    pub placeholder: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub enabled: bool,
}

impl ChooserView {
    /// Empty and disabled.
    pub fn disabled(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            options: Vec::new(),
            selected: None,
            enabled: false,
        }
    }

    /// Populated from `options`; disabled with `empty_placeholder` when there are none.
    pub fn populated(options: Vec<String>, placeholder: &str, empty_placeholder: &str) -> Self {
        if options.is_empty() {
            return Self::disabled(empty_placeholder);
        }
        Self {
            placeholder: placeholder.to_string(),
            options,
            selected: None,
            enabled: true,
        }
    }

    /// Row index of the selection, counting the placeholder as row 0.
    pub fn selected_row(&self) -> usize {
        self.selected
            .as_ref()
            .and_then(|s| self.options.iter().position(|o| o == s))
            .map_or(0, |i| i + 1)
    }

    /// Option value for a row; row 0 (placeholder) is the empty string.
    pub fn value_at(&self, row: usize) -> Option<&str> {
        match row {
            0 => Some(""),
            n => self.options.get(n - 1).map(String::as_str),
        }
    }

    /// Placeholder row plus options.
    pub fn row_count(&self) -> usize {
        self.options.len() + 1
    }
}

/// Read-only summary pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub lob: String,
    pub app: String,
    pub package: String,
    pub description: String,
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            lob: PLACEHOLDER.into(),
            app: PLACEHOLDER.into(),
            package: PLACEHOLDER.into(),
            description: PLACEHOLDER.into(),
        }
    }

    pub fn lob_only(lob: &str) -> Self {
        Self {
            lob: or_placeholder(lob),
            ..Self::empty()
        }
    }

    pub fn full(lob: &str, app: &str, package: Option<&str>, description: Option<&str>) -> Self {
        Self {
            lob: or_placeholder(lob),
            app: or_placeholder(app),
            package: or_placeholder(package.unwrap_or_default()),
            description: or_placeholder(description.unwrap_or_default()),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<13}{}", "LOB:", self.lob)?;
        writeln!(f, "{:<13}{}", "App:", self.app)?;
        writeln!(f, "{:<13}{}", "Package:", self.package)?;
        write!(f, "{:<13}{}", "Description:", self.description)
    }
}

fn or_placeholder(s: &str) -> String {
    if s.is_empty() {
        PLACEHOLDER.into()
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Status line: load progress or error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Everything a frontend needs to draw the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub lob_chooser: ChooserView,
    pub app_chooser: ChooserView,
    pub summary: Summary,
    pub status: StatusLine,
}

impl DisplayState {
    /// Both choosers empty and disabled, with the given status.
    pub fn blank(status: StatusLine) -> Self {
        Self {
            lob_chooser: ChooserView::disabled(SELECT_LOB),
            app_chooser: ChooserView::disabled(SELECT_APP),
            summary: Summary::empty(),
            status,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::blank(StatusLine::info(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_empty_is_disabled() {
        let view = ChooserView::populated(Vec::new(), SELECT_APP, NO_APPS);
        assert!(!view.enabled);
        assert_eq!(view.placeholder, NO_APPS);
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn selected_row_counts_placeholder() {
        let mut view = ChooserView::populated(vec!["a".into(), "b".into()], SELECT_APP, NO_APPS);
        assert_eq!(view.selected_row(), 0);
        view.selected = Some("b".into());
        assert_eq!(view.selected_row(), 2);
        assert_eq!(view.value_at(0), Some(""));
        assert_eq!(view.value_at(2), Some("b"));
        assert_eq!(view.value_at(3), None);
    }

    #[test]
    fn summary_defaults_to_placeholder() {
        let summary = Summary::full("Cards", "a", None, Some(""));
        assert_eq!(summary.lob, "Cards");
        assert_eq!(summary.package, PLACEHOLDER);
        assert_eq!(summary.description, PLACEHOLDER);
        assert_eq!(Summary::lob_only(""), Summary::empty());
    }

    #[test]
    fn summary_display_aligns_labels() {
        let text = Summary::full("Cards", "auth", Some("PKG-1"), None).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "LOB:         Cards");
        assert_eq!(lines[2], "Package:     PKG-1");
        assert_eq!(lines[3], "Description: \u{2014}");
    }
}
