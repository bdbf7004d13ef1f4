//! CLI Adapter.

mod roadmap;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::app::ApiResponse;
use crate::app::api::{self, PreviewInput};
use crate::domain::configuration::load_config;
use crate::domain::{AppConfig, AppError, PhaseQuery, TemplateId};

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(version)]
#[command(
    about = "Generate career roadmaps, learning content, quizzes, and interview questions",
    long_about = None
)]
struct Cli {
    /// Path to learnpath.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and browse roadmaps
    #[clap(visible_alias = "r")]
    Roadmap {
        #[command(subcommand)]
        command: roadmap::RoadmapCommands,
    },
    /// Generate learning content for a roadmap phase
    #[clap(visible_alias = "l")]
    Learn(PhaseArgs),
    /// Generate a quiz for a roadmap phase
    #[clap(visible_alias = "q")]
    Quiz(PhaseArgs),
    /// Generate interview questions for a phase
    #[clap(visible_alias = "i")]
    Interview(InterviewArgs),
    /// Render a prompt without calling the model
    Prompt {
        /// roadmap, learning_content, quiz, or interview_questions
        #[arg(value_parser = parse_template)]
        template: TemplateId,
        /// Roadmap form JSON file, or '-' for stdin
        #[arg(long)]
        form: Option<String>,
        #[arg(long)]
        phase_id: Option<String>,
        #[arg(long)]
        phase_name: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Args)]
struct PhaseArgs {
    #[arg(long)]
    phase_id: Option<String>,
    /// Matched as a substring of the roadmap's phase names
    #[arg(long)]
    phase_name: Option<String>,
    #[arg(long)]
    user_id: Option<String>,
}

#[derive(Args)]
struct InterviewArgs {
    #[arg(long)]
    phase_name: Option<String>,
    #[arg(long)]
    user_id: Option<String>,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let response = match current_config(cli.config.as_deref()) {
        Ok(config) => dispatch(&config, cli.command),
        Err(err) => ApiResponse::from_error(&err),
    };

    let body = serde_json::to_string_pretty(&response.body)
        .unwrap_or_else(|_| response.body.to_string());
    println!("{}", body);

    if !response.is_success() {
        std::process::exit(1);
    }
}

fn current_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    load_config(explicit, &std::env::current_dir()?)
}

fn dispatch(config: &AppConfig, command: Commands) -> ApiResponse {
    match command {
        Commands::Roadmap { command } => roadmap::run(config, command),
        Commands::Learn(args) => api::generate_learning_content(
            config,
            args.phase_id.as_deref(),
            args.phase_name.as_deref(),
            args.user_id.as_deref(),
        ),
        Commands::Quiz(args) => api::generate_quiz(
            config,
            args.phase_id.as_deref(),
            args.phase_name.as_deref(),
            args.user_id.as_deref(),
        ),
        Commands::Interview(args) => api::generate_interview_questions(
            config,
            args.phase_name.as_deref(),
            args.user_id.as_deref(),
        ),
        Commands::Prompt { template, form, phase_id, phase_name, user_id } => {
            let input = match preview_input(template, form, phase_id, phase_name, user_id) {
                Ok(input) => input,
                Err(err) => return ApiResponse::from_error(&err),
            };
            api::preview_prompt(config, template, input)
        }
    }
}

fn parse_template(name: &str) -> Result<TemplateId, String> {
    TemplateId::from_name(name).ok_or_else(|| {
        format!("expected one of: {}", TemplateId::ALL.map(|id| id.as_str()).join(", "))
    })
}

fn preview_input(
    template: TemplateId,
    form: Option<String>,
    phase_id: Option<String>,
    phase_name: Option<String>,
    user_id: Option<String>,
) -> Result<PreviewInput, AppError> {
    match (template, form) {
        (TemplateId::Roadmap, Some(source)) => read_form(&source).map(PreviewInput::Form),
        (TemplateId::Roadmap, None) => {
            Err(AppError::invalid_input("--form is required for the roadmap prompt"))
        }
        (_, Some(_)) => Err(AppError::invalid_input(format!(
            "--form only applies to the roadmap prompt, not {}",
            template
        ))),
        (TemplateId::InterviewQuestions, None) => {
            Ok(PreviewInput::Interview { phase_name, user_id })
        }
        (TemplateId::LearningContent | TemplateId::Quiz, None) => {
            PhaseQuery::parse(phase_id.as_deref(), phase_name.as_deref(), user_id.as_deref())
                .map(PreviewInput::Phase)
        }
    }
}

/// Read a roadmap form from a file, or stdin when `source` is `-`.
pub(crate) fn read_form(source: &str) -> Result<Value, AppError> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source).map_err(|err| {
            AppError::invalid_input(format!("Failed to read form {}: {}", source, err))
        })?
    };

    serde_json::from_str(&content)
        .map_err(|err| AppError::invalid_input(format!("Roadmap form is not valid JSON: {}", err)))
}
