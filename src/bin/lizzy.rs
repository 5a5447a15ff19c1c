use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lizzy_review::logging::init_tracing;
use lizzy_review::report::render_text;
use lizzy_review::*;

/// AI-powered interview analysis: submit a recording, review the fraud report.
#[derive(Debug, Parser)]
#[command(name = "lizzy", version)]
struct Cli {
    /// Session directory holding the current result
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    /// Analysis service endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Use the built-in fixture instead of the remote service
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload an interview recording for analysis, then show the results
    Submit {
        /// Audio recording (MP3, WAV, M4A)
        #[arg(long)]
        audio: Option<PathBuf>,
        #[arg(long, default_value = "")]
        candidate: String,
        #[arg(long, default_value = "")]
        role: String,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored analysis result
    Results {
        #[arg(long)]
        json: bool,
    },
    /// Discard the stored result
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn");
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.session_dir {
        config.session_dir = dir;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if cli.mock {
        config.mock = true;
    }
    config.validate().context("Configuration validation failed")?;

    let store = SessionStore::new(&config.session_dir);
    match cli.command {
        Command::Submit { audio, candidate, role, json } => {
            let form = SubmissionForm {
                audio_file: audio,
                candidate_name: candidate,
                role,
            };
            submit(&config, store, &form, json).await
        }
        Command::Results { json } => show_results(&store, json),
        Command::Clear => {
            if store.clear()? {
                println!("Stored result cleared.");
            } else {
                println!("No stored result.");
            }
            Ok(())
        }
    }
}

async fn submit(config: &Config, store: SessionStore, form: &SubmissionForm, json: bool) -> Result<()> {
    let service: Arc<dyn AnalysisService> = if config.mock {
        Arc::new(MockAnalysisService::new(Duration::from_millis(config.mock_delay_ms)))
    } else {
        Arc::new(HttpAnalysisClient::new(config)?)
    };
    let submitter = Submitter::new(service, store).with_rotation(
        Duration::from_millis(config.rotate_interval_ms),
        Duration::from_millis(config.fade_ms),
    );

    let outcome = submitter.submit(form, draw_status).await;
    clear_status();
    match outcome {
        Ok(_) => show_results(submitter.store(), json),
        Err(e) if e.is_recoverable() => {
            eprintln!("{}", e);
            eprintln!("Nothing was stored; fix the problem and submit again.");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

fn show_results(store: &SessionStore, json: bool) -> Result<()> {
    let Some(view) = ResultsView::load(store) else {
        eprintln!("No analysis result available. Run `lizzy submit` to analyze an interview.");
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(())
}

const STATUS_WIDTH: usize = 60;

fn draw_status(frame: RotatorFrame) {
    let text = if frame.visible { frame.message } else { "" };
    let mut err = std::io::stderr();
    let _ = write!(err, "\r{:<width$}", text, width = STATUS_WIDTH);
    let _ = err.flush();
}

fn clear_status() {
    let mut err = std::io::stderr();
    let _ = write!(err, "\r{:<width$}\r", "", width = STATUS_WIDTH);
    let _ = err.flush();
}
