use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing::info;

use takeshot::config::{TakeShotConfig, VisibilityMode};
use takeshot::output::terminal::{self, SimulationSummary};
use takeshot::protocol::classifier::classify;
use takeshot::protocol::message::ChannelMessage;
use takeshot::session::memory::{
    remote_prompts, RecordingConference, RecordingExternalApi, RecordingNotifier,
};
use takeshot::session::traits::{Conference, SharedConference};
use takeshot::take_shot::{Collaborators, TakeShot};

/// Takeshot: debounced "take a shot" prompts for video calls.
///
/// Runs the prompt coordinator against in-memory collaborators so the
/// debounce behavior can be observed without a real call.
#[derive(Parser)]
#[command(name = "takeshot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a call: local prompt bursts and inbound prompts from others
    Simulate {
        /// Number of local "take a shot" presses (default: 3)
        #[arg(long, default_value = "3")]
        prompts: u32,

        /// Our display name on outbound prompts
        #[arg(long, default_value = "Me")]
        display_name: String,

        /// Comma-separated remote senders
        #[arg(long, value_delimiter = ',', default_value = "Alice,Bob")]
        senders: Vec<String>,

        /// Number of inbound prompts, taking turns through --senders
        /// (default: one per sender)
        #[arg(long)]
        inbound: Option<usize>,

        /// Milliseconds between consecutive events in a burst (default: 100)
        #[arg(long, default_value = "100")]
        gap_ms: u64,

        /// Never establish a conference (broadcasts are dropped)
        #[arg(long)]
        no_session: bool,

        /// Join the conference this many milliseconds after the first prompt
        #[arg(long)]
        session_after_ms: Option<u64>,

        /// Participants in the call, ourselves included (default: 3)
        #[arg(long, default_value = "3")]
        participants: usize,

        /// Use auto-hide instead of toggle for the overlay flag
        #[arg(long)]
        auto_hide: bool,
    },

    /// Classify a raw channel message body (JSON)
    Classify {
        /// The `json` body of the message, e.g. '{"type":"take-shot-prompt-result","from":"Alice"}'
        json: String,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("takeshot=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            prompts,
            display_name,
            senders,
            inbound,
            gap_ms,
            no_session,
            session_after_ms,
            participants,
            auto_hide,
        } => {
            let mut config = TakeShotConfig::load()?;
            if auto_hide && config.visibility == VisibilityMode::Toggle {
                config = config.with_visibility(VisibilityMode::AutoHide(Duration::from_millis(
                    takeshot::config::DEFAULT_AUTO_HIDE_MS,
                )));
            }

            let conference = Arc::new(RecordingConference::new());
            let shared = Arc::new(SharedConference::new());
            let external = Arc::new(RecordingExternalApi::new());
            let notifier = Arc::new(RecordingNotifier::new());

            if !no_session && session_after_ms.is_none() {
                shared.set(conference.clone());
            }

            let session = Arc::new(TakeShot::new(
                config.clone(),
                Collaborators {
                    conference: shared.clone(),
                    external: external.clone(),
                    notifier: notifier.clone(),
                },
            ));
            session.set_participant_count(participants);

            if let (false, Some(delay)) = (no_session, session_after_ms) {
                let shared = Arc::clone(&shared);
                let conference: Arc<dyn Conference> = conference.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    info!("Conference joined");
                    shared.set(conference);
                });
            }

            let gap = Duration::from_millis(gap_ms);
            info!(prompts, "Pressing take-a-shot");
            for _ in 0..prompts {
                session.dispatch_prompt(
                    json!({ "action": "take_shot" }),
                    Some("local".to_string()),
                    &display_name,
                )?;
                tokio::time::sleep(gap).await;
            }

            if inbound.is_some_and(|n| n > 0) && senders.is_empty() {
                anyhow::bail!("--inbound needs at least one name in --senders");
            }

            // Remote participants fire at roughly the same time
            let messages = remote_prompts(&senders, inbound);
            info!(inbound = messages.len(), "Receiving remote prompts");
            let remote = messages.into_iter().enumerate().map(|(i, message)| {
                let session = Arc::clone(&session);
                async move {
                    tokio::time::sleep(gap * i as u32).await;
                    session.receive(message);
                }
            });
            futures::future::join_all(remote).await;

            let settle = match config.visibility {
                VisibilityMode::AutoHide(d) => d,
                VisibilityMode::Toggle => Duration::ZERO,
            };
            let wait = config.outbound_delay().max(config.inbound_delay())
                + settle
                + session_after_ms.map(Duration::from_millis).unwrap_or_default()
                + Duration::from_millis(100);
            println!("{}", format!("Waiting {wait:?} for debounce windows...").dimmed());
            tokio::time::sleep(wait).await;

            terminal::display_simulation(&SimulationSummary {
                sent: conference.sent(),
                events: external.events(),
                shown: notifier.shown(),
                state: session.state(),
                outbound: session.outbound_stats(),
                inbound: session.inbound_stats(),
            });
        }

        Commands::Classify { json } => {
            let body: serde_json::Value =
                serde_json::from_str(&json).context("message body is not valid JSON")?;
            let message = ChannelMessage::new(None, body);
            terminal::display_classification(&classify(&message));
        }

        Commands::Config => {
            let config = TakeShotConfig::load()?;
            terminal::display_config(&config);
        }
    }

    Ok(())
}
