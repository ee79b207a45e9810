//! cinegrid - terminal browser for a movie and series catalog
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinegrid
//!
//! # CLI mode (for automation)
//! cinegrid trending --limit 5
//! cinegrid search "blade runner" --json
//! ```

use std::fs::{File, OpenOptions};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinegrid::action::Action;
use cinegrid::app::App;
use cinegrid::cli::Cli;
use cinegrid::commands;
use cinegrid::event::Event;
use cinegrid::tui::{self, EventHandler};
use cinegrid::ui;
use cinegrid::worker::Worker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        init_logging(false);
        let exit_code = commands::run(cli).await;
        return Ok(exit_code.into());
    }

    // TUI mode: logs must not touch the alternate screen
    init_logging(true);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run_tui(cli).await;

    // Always restore terminal, even on error
    tui::restore()?;

    result.map(|_| std::process::ExitCode::SUCCESS)
}

// =============================================================================
// Logging
// =============================================================================

fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("cinegrid").join("cinegrid.log"))
}

fn open_log_file() -> Option<File> {
    let path = log_file_path()?;
    std::fs::create_dir_all(path.parent()?).ok()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// `RUST_LOG` filter, default `warn`. TUI logs go to a file, CLI logs to stderr.
fn init_logging(tui_mode: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if tui_mode {
        let file_layer = open_log_file()
            .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));
        registry.with(file_layer).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

async fn run_tui(cli: Cli) -> Result<()> {
    let config = cli.load_config();
    let client = commands::build_client(&cli, &config);
    tracing::info!(base_url = client.base_url(), "starting tui");

    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut worker = Worker::new(client, action_tx, config.search_debounce());

    let mut app = App::new(&config);
    app.set_viewport(terminal.size()?.width);
    worker.run(app.init());

    let tick_rate = Duration::from_millis(100);
    let render_rate = Duration::from_millis(33);
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_force_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        if let Some(task) = app.handle_event(event) {
                            worker.run(task);
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                if let Some(task) = app.update(action) {
                    worker.run(task);
                }
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
