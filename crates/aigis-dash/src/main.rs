//! Terminal dashboard binary.
//!
//! Wires the client, store, poller, and submission controller together and
//! drives them from a stdin command loop. All hard logic lives in the
//! library crates; this binary only renders and forwards user input.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aigis_client::ApiClient;
use aigis_models::JobKind;
use aigis_sync::{JobStore, Poller, PollerConfig, SubmissionController, SubmitOutcome};

mod render;

const HELP: &str = "commands: clip <url> | gen <topic> | ls | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting aigis-dash");

    let client = Arc::new(ApiClient::from_env().context("failed to build API client")?);
    info!("API base: {}", client.base_url());

    let store = Arc::new(JobStore::new());
    let poller = Poller::new(
        Arc::clone(&client),
        Arc::clone(&store),
        PollerConfig::from_env(),
    )
    .spawn();
    let controller = SubmissionController::new(Arc::clone(&client), poller.refresher());

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_command(line.trim(), &store, &client, &controller).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("stdin error: {e}");
                    break;
                }
            }
        }
    }

    poller.shutdown().await;
    info!("Dashboard shutdown complete");
    Ok(())
}

/// Initialize tracing with colored output for dev, JSON for production.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("aigis=info".parse().expect("valid filter directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Dispatch one command line. Returns `false` when the loop should exit.
async fn handle_command(
    line: &str,
    store: &JobStore,
    client: &ApiClient,
    controller: &SubmissionController,
) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "ls" => render::print_jobs(&store.merged(), client),
        "clip" => submit(controller, JobKind::Clip, rest).await,
        "gen" => submit(controller, JobKind::Generate, rest).await,
        "quit" | "exit" => return false,
        _ => println!("{HELP}"),
    }
    true
}

async fn submit(controller: &SubmissionController, kind: JobKind, value: &str) {
    controller.set_input(value);
    match controller.submit(kind).await {
        SubmitOutcome::Accepted => println!("{kind} job submitted, refreshing"),
        SubmitOutcome::Ignored => println!("nothing to submit"),
        SubmitOutcome::Busy => println!("a submission is already in flight"),
        SubmitOutcome::Rejected(message) => println!("submission failed: {message}"),
    }
}
