//! Shoecart CLI - a terminal host for the storefront cart.
//!
//! Commands:
//! - `shoecart list` - Show the cart
//! - `shoecart add <id>` - Add one unit of a product
//! - `shoecart remove <id>` - Remove a product from the cart
//! - `shoecart update <id> <amount>` - Set the amount of a product
//! - `shoecart clear` - Empty the cart
//! - `shoecart products` - List the catalog

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shoecart_core::CartError;

use commands::{ProductArgs, UpdateArgs};
use context::Overrides;

/// Shoecart - manage a storefront cart from the terminal
#[derive(Parser)]
#[command(name = "shoecart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storefront API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the saved cart
    #[arg(long, global = true)]
    storage_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    List,

    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the amount of a product already in the cart
    Update(UpdateArgs),

    /// Remove every product from the cart
    Clear,

    /// List the catalog
    Products,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let overrides = Overrides {
        api_url: cli.api_url,
        storage_dir: cli.storage_dir,
    };
    let ctx = context::Context::load(cli.config.as_deref(), overrides, output)?;

    logging::init(&ctx.config.log, cli.verbose)?;

    let result = match cli.command {
        Commands::List => commands::cart::list(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Products => commands::products::run(&ctx).await,
    };

    if let Err(e) = result {
        // Rejected cart operations were already reported by the notifier.
        if e.downcast_ref::<CartError>().is_none() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
