//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, starts the first load, runs main TEA loop. Fetch
//! batches run on spawned tasks and key events are read on one dedicated
//! thread; both come back as messages on a single channel so the
//! controller is only ever touched from this loop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::warn;

use crate::controller::SelectionController;

use super::app::TuiApp;
use super::event::TuiMessage;
use super::layout;

/// Start a load batch for `app` and deliver its result on `tx`.
///
/// The controller enters the loading state immediately; the fetch runs on
/// its own task.
pub fn spawn_load(app: &mut TuiApp, tx: &mpsc::UnboundedSender<TuiMessage>) {
    let job = app.controller.begin_load();
    app.sync_cursors();
    let tx = tx.clone();
    tokio::spawn(async move {
        let (ticket, result) = job.run().await;
        // Receiver gone means the TUI already quit.
        let _ = tx.send(TuiMessage::Loaded { ticket, result });
    });
}

/// Forward key events from `events` until the source errors or the
/// receiver is gone. Non-key events are skipped.
pub fn forward_keys<I>(events: I, tx: &mpsc::UnboundedSender<TuiMessage>)
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    for event in events {
        match event {
            Ok(Event::Key(key)) => {
                if tx.send(TuiMessage::Input(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "terminal input failed, stopping key reader");
                break;
            }
        }
    }
}

/// Start the single blocking reader for terminal input.
///
/// Lives for the rest of the process; `event::read` has no cancellation.
fn spawn_input_reader(tx: mpsc::UnboundedSender<TuiMessage>) -> io::Result<()> {
    std::thread::Builder::new()
        .name("lobpick-input".into())
        .spawn(move || forward_keys(std::iter::repeat_with(event::read), &tx))?;
    Ok(())
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(controller: SelectionController) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, TuiApp::new(controller)).await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: TuiApp,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone())?;
    spawn_load(&mut app, &tx);

    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        tokio::select! {
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, &app))?;
            }
            Some(msg) = rx.recv() => {
                app.update(msg);
            }
        }

        if app.reload_requested {
            app.reload_requested = false;
            spawn_load(&mut app, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
