//! pkgscope - filter release commits down to one monorepo package

mod cli;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            cli::output::error(&format!("{err:#}"));
            ExitCode::from(exit_codes::for_error(&err) as u8)
        }
    }
}

/// Console logs go to stderr, filtered by `RUST_LOG` or the verbosity flag.
/// When a log directory is available every debug event is also written as
/// JSON to a daily file; the returned guard flushes it on drop.
fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(verbose)));
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (file, guard) = match log_directory() {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE));
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

const LOG_FILE: &str = "pkgscope.log";

fn console_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// `~/.pkgscope/logs`, created on demand
fn log_directory() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".pkgscope").join("logs");
    std::fs::create_dir_all(&dir).ok().map(|()| dir)
}
