use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use wcs_client_core::{
    copy_dialog_branch, get_and_backup_workspace, load_csv_as_entity_data, ConversationClient,
    CopyOptions, InsertAs,
};

mod config;

use crate::config::{load_config, AppConfig, CredentialsConfig};

#[derive(Parser)]
#[command(name = "wcs-deploy")]
#[command(version, about = "Deployment utilities for Watson Conversation workspaces", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a branch of dialog from a source workspace to a target workspace
    CopyDialog {
        /// ID or title of the branch root node in the source workspace
        #[arg(long)]
        root_node: String,

        /// ID or title of the anchor node in the target workspace, or
        /// 'root' for the dialog root
        #[arg(long, default_value = "root")]
        target_node: String,

        /// Where the branch lands relative to the anchor: 'sibling' or 'child'
        #[arg(long, default_value = "sibling")]
        insert_as: String,

        /// Workspace ID of the source instance
        #[arg(long)]
        source_workspace: String,

        /// Workspace ID of the target instance
        #[arg(long)]
        target_workspace: String,

        /// Username for the source instance (overrides config)
        #[arg(long)]
        source_username: Option<String>,

        /// Password for the source instance (overrides config)
        #[arg(long)]
        source_password: Option<String>,

        /// Username for the target instance (overrides config)
        #[arg(long)]
        target_username: Option<String>,

        /// Password for the target instance (overrides config)
        #[arg(long)]
        target_password: Option<String>,
    },

    /// Load entity synonym data from a CSV file into a workspace
    LoadEntities {
        /// CSV file with rows of the shape action,entity,value,synonym
        #[arg(long)]
        csv_file: PathBuf,

        /// Workspace ID to load into
        #[arg(long)]
        workspace: String,

        /// Replace existing synonyms for each targeted value instead of merging
        #[arg(long)]
        clear_existing: bool,

        /// Backup file path; defaults to a timestamped file in the
        /// current directory
        #[arg(long)]
        backup_file: Option<PathBuf>,

        /// Username for the instance (overrides config)
        #[arg(long)]
        username: Option<String>,

        /// Password for the instance (overrides config)
        #[arg(long)]
        password: Option<String>,
    },

    /// Export a workspace to a local JSON file
    Backup {
        /// Workspace ID to export
        #[arg(long)]
        workspace: String,

        /// Output path; defaults to a timestamped file in the current
        /// directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Username for the instance (overrides config)
        #[arg(long)]
        username: Option<String>,

        /// Password for the instance (overrides config)
        #[arg(long)]
        password: Option<String>,
    },
}

/// Timestamped default path for workspace backups, computed at call time
/// so repeated runs never collide.
fn default_backup_path() -> PathBuf {
    PathBuf::from(format!("workspace_backup_{}.json", Utc::now().timestamp()))
}

fn build_client(
    config: &AppConfig,
    configured: &CredentialsConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<ConversationClient> {
    let client_config = config.client_config(configured, username, password);
    ConversationClient::new(client_config).context("Failed to set up service client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("wcs_client_core", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = load_config()?;

    match cli.command {
        Commands::CopyDialog {
            root_node,
            target_node,
            insert_as,
            source_workspace,
            target_workspace,
            source_username,
            source_password,
            target_username,
            target_password,
        } => {
            let source = build_client(
                &config,
                &config.source,
                source_username.as_deref(),
                source_password.as_deref(),
            )?;
            let target = build_client(
                &config,
                &config.target,
                target_username.as_deref(),
                target_password.as_deref(),
            )?;

            let options = CopyOptions::new(&root_node)
                .with_target_node(&target_node)
                .with_insert_as(insert_as.parse::<InsertAs>()?);

            let summary = copy_dialog_branch(
                &source,
                &target,
                &source_workspace,
                &target_workspace,
                &options,
            )
            .await?;

            println!(
                "{} copied {} nodes rooted at '{}' into workspace {}",
                "✓".green(),
                summary.nodes_copied,
                summary.root_id,
                target_workspace
            );
        }

        Commands::LoadEntities {
            csv_file,
            workspace,
            clear_existing,
            backup_file,
            username,
            password,
        } => {
            let client = build_client(
                &config,
                &config.target,
                username.as_deref(),
                password.as_deref(),
            )?;

            let backup_path = backup_file.unwrap_or_else(default_backup_path);
            let summary = load_csv_as_entity_data(
                &client,
                &workspace,
                &csv_file,
                clear_existing,
                &backup_path,
            )
            .await
            .with_context(|| format!("Failed to load '{}'", csv_file.display()))?;

            println!("backed up workspace to {}", backup_path.display());
            println!(
                "{} load_entities for '{}' complete: {} synonyms removed, {} values updated",
                "✓".green(),
                csv_file.display(),
                summary.removed,
                summary.values_updated
            );
        }

        Commands::Backup {
            workspace,
            output,
            username,
            password,
        } => {
            let client = build_client(
                &config,
                &config.target,
                username.as_deref(),
                password.as_deref(),
            )?;

            let output = output.unwrap_or_else(default_backup_path);
            let export = get_and_backup_workspace(&client, &workspace, &output).await?;

            println!(
                "{} exported workspace '{}' ({} dialog nodes) to {}",
                "✓".green(),
                export.name.as_deref().unwrap_or(&workspace),
                export.dialog_nodes.len(),
                output.display()
            );
        }
    }

    Ok(())
}
