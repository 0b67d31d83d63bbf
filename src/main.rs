//! Basecamp CLI entry point.

use std::process::ExitCode;

use basecamp::cli::{Cli, RunCommand};
use basecamp::config::Settings;
use basecamp::environment::{EnvironmentSnapshot, PersistedPath, UserLocations};
use basecamp::shell::SystemRunner;
use basecamp::ui::create_ui;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries the run output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("basecamp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("basecamp=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("basecamp starting with args: {:?}", cli);

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut ui = create_ui(settings.interactive, settings.output_mode, settings.no_color);

    let locations = match UserLocations::resolve() {
        Ok(locations) => locations,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let runner = SystemRunner::new().with_passthrough_stdout(settings.passthrough_stdout());
    let path_source = PersistedPath;
    let command = RunCommand::new(
        settings,
        &runner,
        &path_source,
        EnvironmentSnapshot::capture(),
        locations,
    );

    match command.execute(ui.as_mut()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
