use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use quiz_runner::{DEFAULT_FEEDBACK_DELAY_MS, QUESTION_TIME_LIMIT, Quiz, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (built-in questions if omitted)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Seconds allowed per question
    #[arg(short, long, default_value_t = QUESTION_TIME_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    time_limit: u32,

    /// Milliseconds to show answer feedback before moving on
    #[arg(long, default_value_t = DEFAULT_FEEDBACK_DELAY_MS)]
    feedback_ms: u64,

    /// Keep questions and options in file order
    #[arg(long)]
    no_shuffle: bool,

    /// Seed for shuffling, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (controlled by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let config = SessionConfig {
        time_limit: args.time_limit,
        feedback_delay: Duration::from_millis(args.feedback_ms),
        shuffle: !args.no_shuffle,
        seed: args.seed,
    };

    let quiz = match &args.questions {
        Some(path) => match Quiz::from_json(path, config) {
            Ok(quiz) => quiz,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => Quiz::builtin(config),
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiz_runner=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
