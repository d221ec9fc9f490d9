//! Battle client binary.
//!
//! Main entry point: loads configuration and content, starts the runtime,
//! prints the battle log and feeds player turns from stdin (or the autopilot).
//!
//! # Examples
//!
//! ```bash
//! # Play the demo battle
//! cargo run -p battle-client
//!
//! # Watch the autopilot play content from ./data without delays
//! BATTLE_AUTOPLAY=1 BATTLE_DELAY_MS=0 BATTLE_DATA_DIR=./data cargo run -p battle-client
//! ```

use anyhow::Result;
use tokio::sync::broadcast::{self, error::RecvError};

use battle_client::{ClientConfig, StdinProvider, content, logging, render};
use runtime::{AutopilotProvider, Event, Runtime, Topic, drive_players};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let session_id = logging::session_id(config.session_id.as_deref());
    let session_dir = logging::log_dir().join(&session_id);
    let _guard = logging::setup_logging(&session_dir)?;

    tracing::info!("Starting battle client: session={}", session_id);
    tracing::info!("Autoplay: {}", config.autoplay);

    let (roster, battle_config) = content::load(&config)?;

    let mut builder = Runtime::builder()
        .battle_config(battle_config.clone())
        .roster(roster);
    if config.journal {
        builder = builder.journal(session_dir.join("journal.jsonl"));
    }
    let runtime = builder.build().await?;
    let handle = runtime.handle();

    let printer = tokio::spawn(print_log(handle.subscribe(Topic::Log)));
    handle.start().await?;

    let outcome = if config.autoplay {
        drive_players(&handle, &AutopilotProvider::new(battle_config)).await?
    } else {
        drive_players(&handle, &StdinProvider::stdin()).await?
    };
    let snapshot = handle.snapshot().await?;

    drop(handle);
    runtime.shutdown().await?;
    printer.await?;

    println!();
    println!("{}", render::outcome_line(&outcome));
    for line in render::roster_lines(&snapshot) {
        println!("  {line}");
    }

    tracing::info!("Battle finished: {:?}", outcome);
    Ok(())
}

/// Prints log lines until the event bus closes.
async fn print_log(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Log(line)) => println!("{}", render::log_line(&line.entry)),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Log printer skipped {} lines", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
