//! Pipe a sample stream through the debug operator.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use futures_util::stream::{self, StreamExt};
use stream_debug::config::{apply_settings, load_settings, DebugSettings, SettingsWatcher, SinkKind};
use stream_debug::{debug, DebugContext, DebugOptions};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stream-debug-demo")]
#[command(about = "Pipe a sample stream through the debug operator", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Operator label.
    #[arg(short, long)]
    label: Option<String>,

    /// Global label prefix (overrides the settings file).
    #[arg(long)]
    prefix: Option<String>,

    /// Suppress all debug output.
    #[arg(long)]
    ignore: bool,

    /// Logger backend: console or tracing.
    #[arg(long)]
    sink: Option<SinkKind>,

    /// Number of values emitted per round.
    #[arg(short = 'n', long, default_value_t = 5)]
    count: u64,

    /// Emit an error instead of the value at this index, then stop.
    #[arg(long)]
    fail_at: Option<u64>,

    /// How many times the pipeline is rebuilt and run.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Delay between values in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Reload the settings file when it changes.
    #[arg(long)]
    watch: bool,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("injected failure at item {0}")]
    Injected(u64),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stream_debug=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let context = DebugContext::global();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => DebugSettings::default(),
    }
    .with_env_overrides();
    if let Some(prefix) = &cli.prefix {
        settings.prefix = Some(prefix.clone());
    }
    if cli.ignore {
        settings.should_ignore = true;
    }
    if let Some(sink) = cli.sink {
        settings.sink = sink;
    }
    apply_settings(context, settings);

    // Keep the watcher alive for the whole run.
    let _watcher = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, _apply_task) = SettingsWatcher::spawn(path, context)?;
            Some(watcher)
        }
        (None, true) => {
            tracing::warn!("--watch has no effect without --config");
            None
        }
        _ => None,
    };

    for round in 0..cli.rounds {
        let options = match &cli.label {
            Some(label) => DebugOptions::Label(label.clone()),
            None => DebugOptions::Defaults,
        };
        let operator = debug::<u64, DemoError>(options);

        let count = cli.count;
        let fail_at = cli.fail_at;
        let delay = Duration::from_millis(cli.delay_ms);
        let source = stream::unfold((0u64, false), move |(index, failed)| async move {
            if failed || index >= count {
                return None;
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if fail_at == Some(index) {
                Some((Err(DemoError::Injected(index)), (index + 1, true)))
            } else {
                Some((Ok(index), (index + 1, false)))
            }
        });

        let items: Vec<Result<u64, DemoError>> =
            operator.apply_try(source).collect().await;
        let errors = items.iter().filter(|item| item.is_err()).count();

        println!(
            "round {}: {} values, {} errors observed downstream",
            round + 1,
            items.len() - errors,
            errors
        );
    }

    Ok(())
}
