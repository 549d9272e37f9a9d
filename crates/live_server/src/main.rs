//! Live mirror-match viewer
//!
//! Runs the match loop on a blocking background task and streams each
//! position to browser subscribers over WebSocket. The serving side owns
//! only the broadcast channel; it never touches the board, which stays
//! exclusively with the driver task.

mod broadcast;

use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::bail;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::{channel, Receiver, Sender};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use broadcast::{BroadcastSink, EVENT_BUFFER};
use match_core::SnapshotEvent;
use match_runner::{run_match, ConsoleSink, EngineConfig, MatchConfig, MatchOutcome, Publisher};
use uci_session::UciEngineSession;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
struct AppState {
    events: Sender<SnapshotEvent>,
}

#[derive(Debug)]
struct CliOptions {
    config: MatchConfig,
    addr: SocketAddr,
}

fn print_usage() {
    println!("Live mirror-match viewer");
    println!();
    println!("Usage:");
    println!("  live_server <engine-binary> [--addr HOST:PORT] [--think-ms N] [--delay-ms N]");
    println!();
    println!("Options:");
    println!("  --addr HOST:PORT   listen address (default 0.0.0.0:5000)");
    println!("  --think-ms N       thinking time per move in milliseconds (default 300)");
    println!("  --delay-ms N       pacing delay between moves in milliseconds (default 100)");
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> anyhow::Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => bail!("missing value for {flag}"),
    }
}

fn parse_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        config: MatchConfig::default(),
        addr: "0.0.0.0:5000".parse()?,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--addr" => {
                options.addr = flag_value(args, &mut i)?.parse()?;
            }
            "--think-ms" => {
                options.config.think_time =
                    Duration::from_millis(flag_value(args, &mut i)?.parse()?);
            }
            "--delay-ms" => {
                options.config.move_delay =
                    Duration::from_millis(flag_value(args, &mut i)?.parse()?);
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("live_server=info".parse()?)
                .add_directive("match_runner=info".parse()?),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "help" || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let mut options = parse_options(&args[2..])?;

    let engine = EngineConfig::new(&args[1])?;
    if let Some(stem) = engine.binary.file_stem().and_then(|s| s.to_str()) {
        options.config.white_name = format!("{stem} (white)");
        options.config.black_name = format!("{stem} (black)");
    }

    let (tx, _) = channel(EVENT_BUFFER);
    let state = AppState { events: tx.clone() };

    // One background task drives the whole match; the driver blocks on
    // engine i/o, so it lives on the blocking pool.
    let binary = engine.binary.clone();
    let config = options.config;
    tokio::task::spawn_blocking(move || {
        match run_live_match(&binary, &config, tx) {
            Ok(outcome) => info!(result = %outcome.result, "match complete"),
            Err(e) => error!(error = %e, "match aborted"),
        }
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_upgrade))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(options.addr).await?;
    info!(addr = %options.addr, "serving live viewer");
    axum::serve(listener, app).await?;
    Ok(())
}

fn run_live_match(
    binary: &Path,
    config: &MatchConfig,
    tx: Sender<SnapshotEvent>,
) -> anyhow::Result<MatchOutcome> {
    let mut white = UciEngineSession::spawn("white", binary)?;
    let mut black = UciEngineSession::spawn("black", binary)?;

    let mut publisher = Publisher::new();
    publisher.attach(Box::new(ConsoleSink));
    publisher.attach(Box::new(BroadcastSink::new(tx)));

    Ok(run_match(&mut white, &mut black, config, &mut publisher)?)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| subscriber_loop(socket, events))
}

/// Forwards events to one subscriber until it disconnects or the stream
/// closes. A subscriber joining mid-match sees only events from this
/// point on.
async fn subscriber_loop(mut socket: WebSocket, mut events: Receiver<SnapshotEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!(error = %e, "failed to encode snapshot");
                        continue;
                    }
                };
                if socket.send(Message::Text(payload)).await.is_err() {
                    // Subscriber went away; the match continues without it.
                    debug!("live subscriber disconnected");
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "slow subscriber skipped snapshots");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
