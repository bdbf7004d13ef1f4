use clap::Subcommand;

use crate::app::ApiResponse;
use crate::app::api;
use crate::domain::{AppConfig, ProgressUpdate};

#[derive(Subcommand)]
pub enum RoadmapCommands {
    /// Generate a roadmap from a profile form
    #[clap(visible_alias = "g")]
    Generate {
        /// Form JSON file, or '-' for stdin
        #[arg(long)]
        form: String,
    },
    /// List all roadmaps of a user
    #[clap(visible_alias = "ls")]
    List {
        user_id: String,
        /// Print summary cards instead of full documents
        #[arg(long)]
        summary: bool,
    },
    /// Show the three most recent roadmaps of a user
    Recent { user_id: String },
    /// Show a roadmap by id
    Show { id: String },
    /// Record progress for one phase
    Progress {
        id: String,
        /// Zero-based phase index
        #[arg(long)]
        phase: usize,
        /// Completed step indices, comma separated
        #[arg(long, value_delimiter = ',')]
        steps: Option<Vec<usize>>,
        #[arg(long)]
        quiz_completed: Option<bool>,
    },
}

pub fn run(config: &AppConfig, command: RoadmapCommands) -> ApiResponse {
    match command {
        RoadmapCommands::Generate { form } => match super::read_form(&form) {
            Ok(form) => api::generate_roadmap(config, form),
            Err(err) => ApiResponse::from_error(&err),
        },
        RoadmapCommands::List { user_id, summary: false } => api::roadmaps_for_user(config, &user_id),
        RoadmapCommands::List { user_id, summary: true } => api::roadmap_summaries(config, &user_id),
        RoadmapCommands::Recent { user_id } => api::recent_roadmaps(config, &user_id),
        RoadmapCommands::Show { id } => api::roadmap_by_id(config, &id),
        RoadmapCommands::Progress { id, phase, steps, quiz_completed } => {
            let update = ProgressUpdate { phase_index: phase, completed_steps: steps, quiz_completed };
            api::update_progress(config, &id, &update)
        }
    }
}
