#![warn(missing_docs)]
//! # email-coach binary
//!
//! Terminal shell over the email practice backend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use email_coach_app::{AppController, AppError, ClientConfig, app_version, init_tracing};
use email_coach_ui::{EvaluationForm, QuestionForm, ResultPanel};

#[derive(Parser, Debug)]
#[command(name = "email-coach", version = app_version(), about = "Practice questions and email feedback")]
struct Cli {
    /// Backend origin, overriding EMAIL_COACH_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List selectable source documents.
    Files,
    /// Generate practice questions from one document.
    Generate(GenerateArgs),
    /// Submit an email for evaluation.
    Evaluate(EvaluateArgs),
    /// Check that the backend is serving.
    Health,
    /// Show the most recent stored interactions.
    Logs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Document name as listed by `files`.
    #[arg(long)]
    file: String,
    #[arg(long)]
    scenario: String,
    #[arg(long)]
    cefr_level: String,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[arg(long)]
    scenario: String,
    /// The question the email answers.
    #[arg(long)]
    question: String,
    #[arg(long)]
    cefr_level: String,
    /// Email body text.
    #[arg(long, conflicts_with = "email_file", required_unless_present = "email_file")]
    email: Option<String>,
    /// Read the email body from a file.
    #[arg(long)]
    email_file: Option<PathBuf>,
}

/// CLI entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("email-coach: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    init_tracing(&config.log_level);
    tracing::debug!(base_url = %config.base_url, version = app_version(), "starting");

    let mut controller = AppController::from_config(&config)?;

    match cli.command {
        Command::Files => {
            let selector = controller.load_files().await;
            for option in selector.options() {
                if option.value.is_empty() {
                    println!("{}", option.text);
                } else {
                    println!("  {}", option.text);
                }
            }
            Ok(if selector.is_load_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Generate(args) => {
            let form = QuestionForm {
                file_name: args.file,
                scenario: args.scenario,
                cefr_level: args.cefr_level,
            };
            Ok(print_panel(controller.submit_questions(&form).await))
        }
        Command::Evaluate(args) => {
            let email_content = match (args.email, args.email_file) {
                (Some(email), _) => email,
                (None, Some(path)) => {
                    std::fs::read_to_string(&path).map_err(|source| AppError::Input {
                        path: path.display().to_string(),
                        source,
                    })?
                }
                (None, None) => String::new(),
            };
            let form = EvaluationForm {
                scenario: args.scenario,
                scenario_question: args.question,
                cefr_level: args.cefr_level,
                email_content,
            };
            Ok(print_panel(controller.submit_evaluation(&form).await))
        }
        Command::Health => {
            let healthy = controller.check_health().await?;
            println!("{}", if healthy { "ok" } else { "unhealthy" });
            Ok(if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Logs => {
            println!("{}", controller.recent_interactions().await?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_panel(panel: &ResultPanel) -> ExitCode {
    println!("{}", panel.text());
    if panel.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
