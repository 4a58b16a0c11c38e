// src/config.rs
use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::error::AppError;
use crate::types::ApiKey;
use crate::workflows::{aggregate::AggregateOptions, cleanup::CleanupOptions};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect project mentions from daily entries into one digest page
    Aggregate {
        /// Database of daily journal entries
        #[arg(long, default_value = "Daily SCRUM")]
        daily_database: String,

        /// Database of tracked project pages
        #[arg(long, default_value = "Projects")]
        projects_database: String,

        /// Page the digest page is created under
        #[arg(long, default_value = "Home")]
        destination_page: String,

        /// Title of the created digest page
        #[arg(long, default_value = "Project Thought Aggregate")]
        output_title: String,

        /// Creation-time property the daily database is sorted by
        #[arg(long, default_value = "Created")]
        created_property: String,

        /// Time zone attached to synthesized date mentions
        #[arg(long, default_value = "America/Los_Angeles")]
        time_zone: String,
    },
    /// Delete daily entries never edited after creation (excluding today's)
    Cleanup {
        /// Database of daily journal entries
        #[arg(long, default_value = "Daily SCRUM")]
        daily_database: String,
    },
}

impl Command {
    /// Translates the parsed subcommand into workflow options.
    pub fn to_run(&self) -> WorkflowRun {
        match self {
            Command::Aggregate {
                daily_database,
                projects_database,
                destination_page,
                output_title,
                created_property,
                time_zone,
            } => WorkflowRun::Aggregate(AggregateOptions {
                daily_database: daily_database.clone(),
                projects_database: projects_database.clone(),
                destination_page: destination_page.clone(),
                output_title: output_title.clone(),
                created_property: created_property.clone(),
                time_zone: time_zone.clone(),
            }),
            Command::Cleanup { daily_database } => WorkflowRun::Cleanup(CleanupOptions {
                daily_database: daily_database.clone(),
            }),
        }
    }
}

/// Which workflow to run, with its resolved options.
#[derive(Debug, Clone)]
pub enum WorkflowRun {
    Aggregate(AggregateOptions),
    Cleanup(CleanupOptions),
}

/// Resolved client configuration — credentials from the environment plus
/// transport settings from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub timeout: Duration,
}

impl Settings {
    /// Resolves settings from CLI input and the environment. Fails fast when
    /// the integration token is absent.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let token = std::env::var("NOTION_INTEGRATION_SECRET").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_INTEGRATION_SECRET environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(token)?;

        Ok(Settings {
            api_key,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
