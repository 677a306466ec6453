//! FormCoach - exercise session analytics
//!
//! Replays a recorded landmark stream through a session and prints the
//! session summary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use formcoach::exercises::ExerciseKind;
use formcoach::pose::{CameraFrame, PoseLandmarker, ReplayLandmarker};
use formcoach::session::{frame_feed, SessionPipeline};
use formcoach::storage::config::{load_config, load_config_from, AppConfig};
use formcoach::sync::{wait_for_submission, SyncError, WorkoutSubmission, WorkoutUploader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "formcoach", version, about = "Replay a recorded pose stream through an exercise session")]
struct Args {
    /// Recorded landmark stream (JSON lines)
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Exercise to track, overriding the configuration
    #[arg(long, short)]
    exercise: Option<ExerciseKind>,

    /// Configuration file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pace frames by their timestamps and drop stale ones
    #[arg(long)]
    realtime: bool,

    /// Print every frame report as a JSON line
    #[arg(long)]
    reports: bool,

    /// Submit the finished workout to the API
    #[arg(long)]
    submit: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FormCoach v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let exercise = args.exercise.unwrap_or(config.exercise);

    let mut landmarker = ReplayLandmarker::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let start = Instant::now();
    let frames = landmarker.frames(start);
    let end = frames.last().map(|f| f.timestamp).unwrap_or(start);

    let mut pipeline = SessionPipeline::with_exercise(exercise, &config, start);
    let print_reports = args.reports;
    let on_report = |report: &formcoach::session::FrameReport| {
        if print_reports {
            match serde_json::to_string(report) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to serialize frame report: {}", e),
            }
        }
    };

    let processed = if args.realtime {
        let (tx, feed) = frame_feed();
        let producer = std::thread::spawn(move || pace_frames(frames, tx));
        let processed = pipeline.run(&mut landmarker, feed, on_report)?;
        if producer.join().is_err() {
            tracing::warn!("Frame producer panicked");
        }
        processed
    } else {
        pipeline.run(&mut landmarker, frames, on_report)?
    };
    landmarker.shutdown();

    tracing::info!("Processed {} frames", processed);

    let session_end = pipeline.finish(end)?;
    println!("{}", serde_json::to_string_pretty(&session_end.summary)?);

    if args.submit {
        match session_end.submission {
            Some(submission) => submit(&config, submission)?,
            None => tracing::info!("Nothing to submit"),
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> anyhow::Result<AppConfig> {
    let config = match &args.config {
        Some(path) => {
            let mut config = load_config_from(path)?;
            config.apply_env_overrides();
            config.validate()?;
            config
        }
        None => load_config()?,
    };
    Ok(config)
}

/// Send frames at their recorded times, as a live camera would.
fn pace_frames(frames: Vec<CameraFrame>, tx: crossbeam::channel::Sender<CameraFrame>) {
    for frame in frames {
        let wait = frame.timestamp.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        if tx.send(frame).is_err() {
            break;
        }
    }
}

fn submit(config: &AppConfig, submission: WorkoutSubmission) -> anyhow::Result<()> {
    let uploader = match WorkoutUploader::from_config(&config.api) {
        Ok(uploader) => uploader,
        Err(SyncError::NotConfigured(reason)) => {
            tracing::info!("Workout not submitted: {}", reason);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        if let Some(handle) = uploader.submit_detached(submission) {
            wait_for_submission(handle).await;
        }
    });
    Ok(())
}
