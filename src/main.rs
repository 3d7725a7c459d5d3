//! Career Finder - Terminal Recommendation Client
//!
//! Asks five short questions, sends the answers to the scoring service and
//! shows the recommended faculty with its runner-up.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use career_finder::application::{ViewSnapshot, ViewStateMachine};
use career_finder::infrastructure::{init_logging, AppConfig, HttpScoringClient};
use career_finder::presentation::{render_ui, Command, FormCursor, InputHandler};

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point for the career finder client.
///
/// Loads configuration and logging before touching the terminal, so a bad
/// setting is reported on a normal screen.
///
/// # Errors
///
/// Returns an error if configuration, logging or terminal setup fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.log)?;

    let client = HttpScoringClient::new(&config.scoring)?;
    info!(endpoint = client.endpoint(), "starting career finder");

    let probe = client.clone();
    tokio::spawn(async move {
        match probe.check_connection().await {
            Ok(status) => info!(status = %status.status, message = %status.message, "scoring service reachable"),
            Err(error) => warn!(%error, "scoring service connection check failed"),
        }
    });

    let mut machine = ViewStateMachine::new(Arc::new(client));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut machine).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Redraws from the published snapshot after every key press and hands
/// submissions to [`run_submission`]. Runs until the user quits.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, machine: &mut ViewStateMachine) -> io::Result<()> {
    let view = machine.subscribe();
    let mut events = EventStream::new();
    let mut cursor = FormCursor::default();

    loop {
        terminal.draw(|f| render_ui(f, &view.borrow(), &cursor, 0))?;

        let Some(event) = events.next().await else {
            return Ok(());
        };
        let Event::Key(key) = event? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match InputHandler::handle_key_event(machine, &mut cursor, key.code, key.modifiers) {
            Command::Quit => return Ok(()),
            Command::Submit => run_submission(terminal, machine, &view, &mut events, &cursor).await?,
            Command::None => {}
        }
    }
}

/// Drives one submission to completion while keeping the spinner moving.
///
/// The submission is polled first so `Analyzing` is published before the
/// first frame; keys pressed in the meantime are discarded.
async fn run_submission<B: Backend>(
    terminal: &mut Terminal<B>,
    machine: &mut ViewStateMachine,
    view: &watch::Receiver<ViewSnapshot>,
    events: &mut EventStream,
    cursor: &FormCursor,
) -> io::Result<()> {
    let submission = machine.submit();
    tokio::pin!(submission);
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);
    let mut tick = 0usize;

    loop {
        tokio::select! {
            biased;
            outcome = &mut submission => {
                if let Err(error) = outcome {
                    warn!(%error, "submission rejected");
                }
                return Ok(());
            }
            _ = spinner.tick() => {
                terminal.draw(|f| render_ui(f, &view.borrow(), cursor, tick))?;
                tick = tick.wrapping_add(1);
            }
            Some(event) = events.next() => {
                event?;
            }
        }
    }
}
