//! Slug preview command.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use contenthub_core::error::AppError;
use contenthub_service::hierarchy::{derive_slug, slugify};

use crate::output::{self, OutputFormat};

/// Arguments for slug commands
#[derive(Debug, Args)]
pub struct SlugArgs {
    /// Slug subcommand
    #[command(subcommand)]
    pub command: SlugCommand,
}

/// Which slug namespace to check against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlugScope {
    /// Category slugs
    Category,
    /// Tag slugs
    Tag,
}

/// Slug subcommands
#[derive(Debug, Subcommand)]
pub enum SlugCommand {
    /// Show the slug a new record with this name would receive
    Preview {
        /// Display name
        name: String,
        /// Namespace to check for collisions
        #[arg(short, long, value_enum, default_value = "category")]
        scope: SlugScope,
    },
}

#[derive(Debug, Serialize)]
struct SlugPreview {
    base: String,
    slug: String,
}

/// Execute slug commands
pub async fn execute(
    args: &SlugArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        SlugCommand::Preview { name, scope } => {
            let base = slugify(name);
            let config = super::load_config(config_path)?;
            let stores = super::open_stores(&config).await?;
            let existing = match scope {
                SlugScope::Category => stores.categories.find_slugs_like(&base).await?,
                SlugScope::Tag => stores.tags.find_slugs_like(&base).await?,
            };
            stores.close().await;

            let preview = SlugPreview {
                slug: derive_slug(name, &existing, None),
                base,
            };
            match format {
                OutputFormat::Table => {
                    output::print_kv("Base", &preview.base);
                    output::print_kv("Slug", &preview.slug);
                }
                OutputFormat::Json => output::print_item(&preview, format),
            }
        }
    }
    Ok(())
}
