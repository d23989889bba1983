///
/// This module implements the CLI interface for notion-clipper: command parsing,
/// argument validation and the async entrypoint shared by `main` and the integration tests.
///
/// All conversion and save logic lives in the [`notion-clipper-core`] crate.
/// This module is strictly CLI glue: it loads inputs, picks the store and publisher,
/// and prints results.
///
/// [`notion-clipper-core`]: ../../notion-clipper-core/
use crate::article::{load_article, ArticleOverrides};
use crate::load_config::{load_config, resolve_credentials, CliConfig};
use crate::publish::NotionClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notion_clipper_core::contract::{ConfigStore, NotionConfig};
use notion_clipper_core::markdown_to_blocks;
use notion_clipper_core::save::{save_to_notion, SaveResult, MISSING_CONFIG_MESSAGE};
use notion_clipper_core::store::FileConfigStore;
use std::path::PathBuf;

/// CLI for notion-clipper: save markdown articles into a Notion database.
#[derive(Parser)]
#[clap(
    name = "notion-clipper",
    version,
    about = "Convert markdown articles to Notion blocks and save them to a database"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Notion block JSON for a markdown file
    Convert {
        /// Markdown file to convert
        input: PathBuf,
        /// Pretty-print the JSON output
        #[clap(long)]
        pretty: bool,
    },
    /// Save an article (markdown, or extracted-content JSON) as a new database page
    Save {
        /// Article file: `.json` extracted content, or markdown
        input: PathBuf,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        url: Option<String>,
        #[clap(long)]
        author: Option<String>,
        #[clap(long)]
        site_name: Option<String>,
        /// Path to the YAML settings file
        #[clap(long)]
        settings: Option<PathBuf>,
        /// Credential store file (overrides the settings file)
        #[clap(long)]
        store: Option<PathBuf>,
    },
    /// Manage the stored Notion credential
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
        /// Path to the YAML settings file; its `store_path` picks the store
        #[clap(long, global = true)]
        settings: Option<PathBuf>,
        /// Credential store file (overrides the settings file)
        #[clap(long, global = true)]
        store: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Store the integration token and target database id
    Set {
        #[clap(long)]
        token: String,
        #[clap(long)]
        database_id: String,
    },
    /// Show the stored credential with the token masked
    Show,
    /// Remove the stored credential
    Clear,
}

fn open_store(store: Option<PathBuf>, settings: &CliConfig) -> FileConfigStore {
    FileConfigStore::new(store.unwrap_or_else(|| settings.store_path.clone()))
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Convert { input, pretty } => {
            tracing::info!(command = "convert", input = %input.display(), "Converting markdown");
            let markdown = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let blocks = markdown_to_blocks(&markdown);
            let json = if pretty {
                serde_json::to_string_pretty(&blocks)?
            } else {
                serde_json::to_string(&blocks)?
            };
            println!("{json}");
            tracing::info!(command = "convert", blocks = blocks.len(), "Conversion complete");
            Ok(())
        }
        Commands::Save {
            input,
            title,
            url,
            author,
            site_name,
            settings,
            store,
        } => {
            let settings = load_config(settings)?;
            let store = open_store(store, &settings);
            let overrides = ArticleOverrides {
                title,
                url,
                author,
                site_name,
            };
            let content = load_article(&input, overrides)?;

            let result = match resolve_credentials(&store)? {
                Some(config) => {
                    let client =
                        NotionClient::new(&settings.api.base_url, &settings.api.notion_version);
                    save_to_notion(&content, &config, &client).await
                }
                None => SaveResult::Failed {
                    error: MISSING_CONFIG_MESSAGE.to_string(),
                },
            };

            println!("{}", serde_json::to_string(&result)?);
            match result {
                SaveResult::Saved { page_id } => {
                    tracing::info!(command = "save", %page_id, "Article saved");
                    Ok(())
                }
                SaveResult::Failed { error } => {
                    tracing::error!(command = "save", error = %error, "Save failed");
                    Err(anyhow::Error::msg(error))
                }
            }
        }
        Commands::Config {
            action,
            settings,
            store,
        } => {
            let settings = load_config(settings)?;
            let store = open_store(store, &settings);
            match action {
                ConfigAction::Set { token, database_id } => {
                    store.set(&NotionConfig { token, database_id })?;
                    println!("Saved Notion config to {}", store.path().display());
                }
                ConfigAction::Show => match store.get()? {
                    Some(config) => {
                        println!("database_id: {}", config.database_id);
                        println!("token: {}", config.masked_token());
                    }
                    None => println!("No Notion config stored"),
                },
                ConfigAction::Clear => {
                    store.clear()?;
                    println!("Cleared Notion config");
                }
            }
            Ok(())
        }
    }
}
