//! evfield CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use evfield::cli::{Cli, CommandDispatcher};
use evfield::config::resolve_config;
use evfield::ui::{create_ui, should_use_colors, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("evfield=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("evfield=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("evfield starting with args: {:?}", cli);

    let colors = !cli.no_color && should_use_colors();
    let project_root = std::env::current_dir().unwrap_or_default();

    let config = match resolve_config(&project_root, cli.config.as_deref(), &cli.flag_overrides())
    {
        Ok(config) => config,
        Err(e) => {
            let mut ui = create_ui(cli.output_mode().unwrap_or(OutputMode::Normal), colors);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let mut ui = create_ui(config.output_mode(), colors);
    let dispatcher = CommandDispatcher::new(config);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
