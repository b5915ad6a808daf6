mod cli;
mod core;
mod error;
mod tui;

use crate::cli::Cli;
use crate::core::{HostedModelProvider, Pipeline, SourceLoader};
use crate::error::{Error, Result};
use crate::tui::{App, EventHandler, init as tui_init, restore as tui_restore, ui};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    tracing::info!(model = %cli.model, api_base = %cli.api_base, "starting clipsum");

    let loader = SourceLoader::new(cli.language_list())?;
    let provider = HostedModelProvider::new(cli.api_base.clone(), cli.model.clone());

    run_tui(Pipeline::new(loader, provider)).await
}

// The form owns the terminal, so log lines go to a file.
fn init_logging(cli: &Cli) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)?;

    let filter = EnvFilter::try_new(&cli.log_level)
        .map_err(|e| Error::custom(format!("Invalid --log-level '{}': {e}", cli.log_level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

async fn run_tui(pipeline: Pipeline<SourceLoader, HostedModelProvider>) -> Result<()> {
    let mut terminal = tui_init()?;

    let mut app = App::new(pipeline);
    let event_handler = EventHandler::new();

    let result = loop {
        // Polling blocks for up to one interval; give it its own thread so the
        // background summarization task keeps running.
        let event = match tokio::task::block_in_place(|| event_handler.next_event()) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        if let Err(e) = app.handle_event(event) {
            break Err(e);
        }

        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(Error::from(e));
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui_restore()?;
    tracing::info!("shutting down");
    result
}
