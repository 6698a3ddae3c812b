//! flexcheck - replay recorded landmark streams through the pose coach
//!
//! Reads JSON-lines frames, scores them for the selected pose, runs the
//! hold-to-capture timer and prints the session statistics as JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flexcheck_lib::core::coach::PoseCoach;
use flexcheck_lib::core::config::Config;
use flexcheck_lib::models::pose::PoseIdentifier;
use flexcheck_lib::platform::feedback::LoggingFeedback;
use flexcheck_lib::platform::pose::{JsonLinesSource, LandmarkSource};

/// Command-line arguments for flexcheck
#[derive(Parser, Debug)]
#[command(name = "flexcheck")]
#[command(about = "Score recorded bodybuilding poses and simulate hold-to-capture")]
#[command(version)]
struct Args {
    /// JSON-lines file with one frame of landmarks per line
    #[arg(short, long)]
    input: PathBuf,

    /// Pose to start with (display name or id); defaults to the configured pose
    #[arg(short, long)]
    pose: Option<String>,

    /// Settings file; defaults to ~/.flexcheck/config/settings.json
    #[arg(short, long, env = "FLEXCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Only print the final statistics
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flexcheck=info,flexcheck_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let pose = args
        .pose
        .as_deref()
        .map(str::parse::<PoseIdentifier>)
        .transpose()
        .context("Invalid --pose")?;

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let mut source = JsonLinesSource::new(BufReader::new(file), args.input.display().to_string());
    info!("Replaying {}", source.describe());

    let coach = PoseCoach::new(config, Arc::new(LoggingFeedback));
    coach.start_session(pose).await?;

    let base = Instant::now();
    while let Some(frame) = source.next_frame()? {
        if let Some(name) = frame.pose.as_deref() {
            if let Err(e) = coach.switch_pose_by_name(name).await {
                warn!("Ignoring pose change: {}", e);
            }
        }

        let outcome = coach
            .process_frame(frame.landmarks.as_deref(), base + frame.offset)
            .await?;

        if !args.quiet {
            if let Some(event) = &outcome.event {
                println!(
                    "{}",
                    serde_json::json!({
                        "t_ms": frame.offset.as_millis() as u64,
                        "pose": outcome.pose,
                        "score": outcome.result.score,
                        "feedback": outcome.result.feedback,
                        "event": event,
                    })
                );
            }
        }
    }

    let stats = coach.stop_session().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
