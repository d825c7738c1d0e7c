//! pokecache - inspection shell
//!
//! Runs a cache for the lifetime of the process and lets the user add and
//! look up entries from stdin while the sweep task expires them.

use std::io::BufRead;
use std::thread;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::shell::{self, Command, Outcome};
use pokecache::{Config, TtlCache};

/// Main entry point for the inspection shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (to stderr)
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its sweep task
/// 4. Read commands from stdin until `exit`, EOF, Ctrl+C or SIGTERM
/// 5. Shut the cache down and wait for the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!("Configuration loaded: ttl={}ms", config.ttl_ms);

    let cache = TtlCache::from_config(&config);

    tokio::select! {
        result = run_shell(&cache) => result?,
        _ = shutdown_signal() => {}
    }

    cache.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

/// Forwards stdin lines from a plain thread.
///
/// Runs outside the Tokio blocking pool so a pending read cannot delay
/// runtime shutdown. The channel closes on EOF.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });

    rx
}

/// Reads and executes commands until `exit` or end of input.
async fn run_shell(cache: &TtlCache) -> anyhow::Result<()> {
    let mut lines = spawn_stdin_reader();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"pokecache > ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.recv().await {
        let line = line.context("failed to read stdin")?;
        let output = match Command::parse(&line) {
            Ok(Some(command)) => match shell::execute(cache, command) {
                Outcome::Print(text) => Some(text),
                Outcome::Exit => return Ok(()),
            },
            Ok(None) => None,
            Err(err) => Some(err.to_string()),
        };

        if let Some(text) = output {
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"pokecache > ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
