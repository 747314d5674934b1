//! Category tree CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_service::CategoryService;

use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Print the whole category tree in display order
    Tree,
    /// Show one category with its path and breadcrumbs
    Show {
        /// Category ID
        id: Uuid,
    },
}

/// Category tree display row
#[derive(Debug, Serialize, Tabled)]
struct CategoryTreeRow {
    /// Name, indented by depth
    name: String,
    /// Slug
    slug: String,
    /// Sibling order
    order: i32,
    /// Published
    active: bool,
    /// Category ID
    id: String,
}

/// Execute category commands
pub async fn execute(
    args: &CategoryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let stores = super::open_stores(&config).await?;
    let service = CategoryService::new(
        Arc::clone(&stores.categories),
        Arc::clone(&stores.media),
    );

    match &args.command {
        CategoryCommand::Tree => {
            let rows: Vec<CategoryTreeRow> = service
                .tree()
                .await?
                .into_iter()
                .map(|(c, depth)| CategoryTreeRow {
                    name: output::indent(&c.name, depth),
                    slug: c.slug,
                    order: c.sort_order,
                    active: c.is_active,
                    id: c.id.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        CategoryCommand::Show { id } => {
            let detail = service.get_detail(*id).await?;
            output::print_item(&detail, format);
        }
    }

    stores.close().await;
    Ok(())
}
