//! diffpad: compare two texts side by side in the terminal.

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use diffpad_core::clipboard::clipboard_from_settings;
use diffpad_core::config::Settings;
use diffpad_core::debounce::Ticket;
use diffpad_core::telemetry::TelemetryBuilder;
use diffpad_core::ComparisonController;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{error, info};

mod app;
mod events;
mod ui;

use app::App;
use events::AppEvent;
use ui::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;
    let _guard = TelemetryBuilder::new("diffpad", settings.telemetry.log_dir())
        .with_log_level(settings.telemetry.log_level.clone())
        .init()?;

    let mut controller =
        ComparisonController::new(&settings).context("Invalid language configuration")?;
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    controller.attach_debouncer(tick_tx);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let clipboard = clipboard_from_settings(&settings.clipboard);
    let app = App::new(controller, &settings, clipboard, event_tx);
    info!("diffpad started");

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, &mut tick_rx, &mut event_rx);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "event loop failed");
    }
    info!("diffpad stopped");
    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    ticks: &mut mpsc::UnboundedReceiver<Ticket>,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui(f, &mut app))?;

        // Poll with a short timeout so the channels below are drained at ~60fps
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key, Instant::now()),
                Event::Paste(text) => app.handle_paste(&text),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        while let Ok(ticket) = ticks.try_recv() {
            app.controller.handle_tick(ticket);
        }
        while let Ok(event) = events.try_recv() {
            app.handle_event(event, Instant::now());
        }
    }
    Ok(())
}
