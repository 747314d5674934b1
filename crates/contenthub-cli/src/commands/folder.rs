//! Media folder CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use contenthub_core::error::AppError;
use contenthub_entity::folder::FolderNode;
use contenthub_service::FolderTreeService;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the media folder tree
    Tree {
        /// Max depth to print
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Name, indented by depth
    name: String,
    /// Stored path
    path: String,
    /// Media directly inside
    media: u64,
    /// Folder ID
    id: String,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let stores = super::open_stores(&config).await?;
    let service = FolderTreeService::new(Arc::clone(&stores.folders), Arc::clone(&stores.media));

    match &args.command {
        FolderCommand::Tree { depth } => {
            let tree = service.get_tree().await?;
            let mut rows = Vec::new();
            for root in &tree.roots {
                flatten(root, *depth, &mut rows);
            }
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                output::print_kv("Total folders", &tree.total_folders.to_string());
            }
        }
    }

    stores.close().await;
    Ok(())
}

fn flatten(node: &FolderNode, max_depth: Option<usize>, rows: &mut Vec<FolderRow>) {
    if max_depth.is_some_and(|max| node.depth > max) {
        return;
    }
    rows.push(FolderRow {
        name: output::indent(&node.name, node.depth),
        path: node.path.clone(),
        media: node.media_count,
        id: node.id.to_string(),
    });
    for child in &node.children {
        flatten(child, max_depth, rows);
    }
}
