//! Picker layout.
//!
//! ```text
//! ┌ Line of business ──────┐┌ Application ───────────┐
//! │ Select LOB             ││ Select App             │
//! │▶Cards                  ││  auth                  │
//! │ Retail                 ││  disputes              │
//! └────────────────────────┘└────────────────────────┘
//! ┌ Selection ─────────────────────────────────────────┐
//! │ LOB:          Cards                                │
//! │ App:          auth                                 │
//! │ Package:      PKG-AUTH-01                          │
//! │ Description:  Card authorization                   │
//! └────────────────────────────────────────────────────┘
//!  Loaded 2 LOBs.
//!  Tab:Focus  ↑↓:Move  Enter:Select  c:Clear  r:Reload  q:Quit
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::view::{ChooserView, StatusKind, Summary};

use super::app::{Focus, TuiApp};

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // choosers
            Constraint::Length(6), // summary
            Constraint::Length(1), // status line
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    let choosers = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[0]);

    let view = app.controller.view();
    draw_chooser(
        f,
        " Line of business ",
        &view.lob_chooser,
        app.lob_cursor,
        app.focus == Focus::Lob,
        choosers[0],
    );
    draw_chooser(
        f,
        " Application ",
        &view.app_chooser,
        app.app_cursor,
        app.focus == Focus::App,
        choosers[1],
    );
    draw_summary(f, &view.summary, outer[1]);

    let status_style = match view.status.kind {
        StatusKind::Info => Style::default().fg(Color::DarkGray),
        StatusKind::Error => Style::default().fg(Color::Red),
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", view.status.text), status_style)),
        outer[2],
    );

    let hints = " Tab:Focus  \u{2191}\u{2193}:Move  Enter:Select  c:Clear  r:Reload  q:Quit";
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        outer[3],
    );
}

fn draw_chooser(
    f: &mut Frame,
    title: &str,
    chooser: &ChooserView,
    cursor: usize,
    focused: bool,
    area: Rect,
) {
    let border = if focused && chooser.enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border);

    let placeholder = ListItem::new(Span::styled(
        chooser.placeholder.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    let items: Vec<ListItem> = std::iter::once(placeholder)
        .chain(chooser.options.iter().map(|opt| {
            let style = if chooser.selected.as_deref() == Some(opt.as_str()) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if chooser.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Span::styled(opt.clone(), style))
        }))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("\u{25b6}")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused && chooser.enabled {
        state.select(Some(cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_summary(f: &mut Frame, summary: &Summary, area: Rect) {
    let label = Style::default().fg(Color::Cyan);
    let row = |name: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name:<13}"), label),
            Span::raw(value.to_string()),
        ])
    };
    let lines = vec![
        row("LOB:", &summary.lob),
        row("App:", &summary.app),
        row("Package:", &summary.package),
        row("Description:", &summary.description),
    ];

    let block = Block::default()
        .title(" Selection ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SelectionController;
    use crate::source::MemorySource;
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::sync::Arc;

    fn screen_text(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn renders_choosers_summary_and_status() {
        let source = MemorySource::new()
            .with_json("data/lobToApps.json", json!({ "Cards": ["auth"] }))
            .with_json("data/appToPackage.json", json!({ "auth": "PKG-AUTH-01" }))
            .with_json("data/appToDescription.json", json!({}));
        let mut controller =
            SelectionController::new(Arc::new(source), Box::new(MemoryStore::new()));
        controller.load().await.unwrap();
        controller.select_lob("Cards").unwrap();
        controller.select_app("auth").unwrap();
        let app = TuiApp::new(controller);

        let text = screen_text(&app);
        assert!(text.contains("Line of business"));
        assert!(text.contains("Select LOB"));
        assert!(text.contains("Cards"));
        assert!(text.contains("PKG-AUTH-01"));
        assert!(text.contains("Loaded 1 LOBs."));
        assert!(text.contains("Description:"));
    }

    #[test]
    fn renders_blank_state() {
        let controller = SelectionController::new(
            Arc::new(MemorySource::new()),
            Box::new(MemoryStore::new()),
        );
        let app = TuiApp::new(controller);
        let text = screen_text(&app);
        assert!(text.contains("Select App"));
        assert!(text.contains("q:Quit"));
    }
}
