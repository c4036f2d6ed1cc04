//! AURAlos CLI - catalog, cart, and AI finder tools.
//!
//! # Usage
//!
//! ```bash
//! # Resolve product references the way the AI finder's are resolved
//! auralos resolve "Tinsla (Bordo)" "Gilded gold"
//!
//! # Reconcile a saved agent reply
//! auralos finder reply.txt
//!
//! # Work with the persisted cart
//! auralos cart add 16 --size 8 --quantity 2
//! auralos cart show
//!
//! # Browse and search the catalog
//! auralos browse --collection womens-boots --sort price-high
//! auralos search boot
//! ```
//!
//! # Commands
//!
//! - `resolve` - Resolve free-text product references
//! - `finder` - Reconcile an AI finder response with the catalog
//! - `cart` - Add, update, remove, clear, or show the cart
//! - `browse` - List a collection
//! - `search` - Quick search by name, type, or category
//! - `catalog check` - Validate the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use auralos_core::ProductId;
use auralos_core::catalog::{Collection, SortOrder};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::cart::CartAction;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "auralos")]
#[command(author, version, about = "AURAlos commerce tools")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve free-text product references against the catalog
    Resolve {
        /// References such as "Tinsla (Bordo)"
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// Reconcile an AI finder response with the catalog
    Finder {
        /// File containing the agent reply, or `-` for stdin
        source: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// List a collection
    Browse {
        /// Collection slug (`all`, `womens`, `mens`, `boots`, `heels`, `bags`,
        /// `new-arrivals`, `womens-boots`, `mens-boots`)
        #[arg(short, long, default_value = "all")]
        collection: Collection,

        /// Sort order (`featured`, `price-low`, `price-high`, `newest`)
        #[arg(short, long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Quick search by name, type, or category
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Catalog maintenance
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Add a product to the cart
    Add {
        product_id: ProductId,

        #[arg(short, long)]
        size: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line item
    Remove {
        product_id: ProductId,

        #[arg(short, long)]
        size: String,
    },
    /// Set a line item's quantity (values below 1 become 1)
    Update {
        product_id: ProductId,

        #[arg(short, long)]
        size: String,

        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart and its totals
    Show,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Validate the catalog and check every product is reachable by reference
    Check,
}

impl From<CartCommand> for CartAction {
    fn from(command: CartCommand) -> Self {
        match command {
            CartCommand::Add {
                product_id,
                size,
                quantity,
            } => Self::Add {
                product_id,
                size,
                quantity,
            },
            CartCommand::Remove { product_id, size } => Self::Remove { product_id, size },
            CartCommand::Update {
                product_id,
                size,
                quantity,
            } => Self::Update {
                product_id,
                size,
                quantity,
            },
            CartCommand::Clear => Self::Clear,
            CartCommand::Show => Self::Show,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "auralos_cli=info,auralos_core=info".into());

    let is_json = matches!(format, LogFormat::Json);
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Resolve { references } => commands::resolve::run(&config, &references).await?,
        Commands::Finder { source, json } => commands::finder::run(&config, &source, json).await?,
        Commands::Cart { action } => commands::cart::run(&config, action.into()).await?,
        Commands::Browse { collection, sort } => {
            commands::browse::run(&config, collection, sort).await?;
        }
        Commands::Search { query, limit } => {
            commands::browse::search(&config, &query, limit).await?;
        }
        Commands::Catalog { action } => match action {
            CatalogCommand::Check => commands::catalog::check(&config).await?,
        },
    }
    Ok(())
}
