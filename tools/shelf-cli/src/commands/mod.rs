//! CLI command implementations.

pub mod config;
pub mod filters;
pub mod list;
pub mod session;
pub mod show;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use shelf_model::ProductId;
use shelf_store::LoadOutcome;

use crate::context::{Context, Store};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Filter label to apply (e.g. "Verfügbar", "Vorgemerkt").
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Mark a product as favorite before listing. Repeatable.
    #[arg(long = "favorite", value_name = "ID")]
    pub favorites: Vec<ProductId>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: ProductId,

    /// Mark the product as favorite first.
    #[arg(long)]
    pub favorite: bool,
}

/// Arguments for the filters command.
#[derive(Args)]
pub struct FiltersArgs {}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Skip the initial load.
    #[arg(long)]
    pub no_load: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Build a store and load it once behind a spinner. A failed load is an
/// error for one-shot commands.
pub async fn load_store(ctx: &Context) -> Result<Store> {
    let store = ctx.build_store();

    let spinner = ctx.output.spinner("Loading products...");
    let outcome = store.load().await;
    spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Loaded { products } => {
            ctx.output.debug(&format!("Loaded {} products", products));
            Ok(store)
        }
        LoadOutcome::Failed(e) => bail!(e),
        LoadOutcome::Skipped => bail!("A load was already in progress"),
    }
}
