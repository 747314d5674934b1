//! CLI command definitions and dispatch.

pub mod category;
pub mod folder;
pub mod migrate;
pub mod serve;
pub mod slug;

use clap::{Parser, Subcommand};

use contenthub_core::config::AppConfig;
use contenthub_core::error::AppError;
use contenthub_database::Stores;

use crate::output::OutputFormat;

/// ContentHub: categories, tags, and the media library
#[derive(Debug, Parser)]
#[command(name = "contenthub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the ContentHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Category tree inspection
    Category(category::CategoryArgs),
    /// Media folder inspection
    Folder(folder::FolderArgs),
    /// Slug utilities
    Slug(slug::SlugArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Category(args) => category::execute(args, &self.config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &self.config, self.format).await,
            Commands::Slug(args) => slug::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: open the configured store backend
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    Stores::connect(&config.database).await
}
