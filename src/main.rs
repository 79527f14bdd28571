//! CineRank - Entry Point
//!
//! Command-line front end: list, search, rank, remove and move items in the
//! saved ranking. Ranking runs an interactive battle on stdin/stdout.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cinerank::catalog::{CatalogProvider, JsonCatalog};
use cinerank::core::config::AppConfig;
use cinerank::core::error::{CineError, Result};
use cinerank::core::types::ItemId;
use cinerank::ranking::{Ranker, Tier};
use cinerank::storage::{JsonFileStore, RankingStore};
use cinerank::ui::{format_details, format_rankings, format_search_results, run_battle};

#[derive(Parser, Debug)]
#[command(name = "cinerank")]
#[command(about = "Rank movies by picking the better of two, one battle at a time")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "cinerank.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current rankings
    List,
    /// Search the catalog by title
    Search { query: Vec<String> },
    /// Show a catalog item's details and where it is ranked
    Show { id: u64 },
    /// Rank a catalog item by comparing it against the list
    Rank {
        /// Catalog id of the item
        id: u64,
        /// masterpiece, matinee or flop (high, mid, low also accepted)
        #[arg(long, short = 't')]
        tier: Tier,
    },
    /// Remove an item from the rankings
    Remove { id: u64 },
    /// Move the item at one position to another (1-based)
    Move { from: usize, to: usize },
}

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}", e);
            eprintln!("Using default config");
            AppConfig::default()
        }
    };

    // Initialize tracing for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli.command, &config) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.storage_dir);
    let key = config.storage_key.as_str();

    match command {
        Command::List => {
            print!("{}", format_rankings(&store.load(key)));
        }
        Command::Search { query } => {
            let catalog = JsonCatalog::load(&config.catalog_path);
            print!("{}", format_search_results(&catalog.search(&query.join(" "))));
        }
        Command::Show { id } => {
            let catalog = JsonCatalog::load(&config.catalog_path);
            let item = catalog
                .find(ItemId(id))
                .ok_or(CineError::ItemNotFound(ItemId(id)))?;
            let list = store.load(key);
            let ranked = list
                .position_of(item.id)
                .and_then(|index| list.get(index).map(|entry| (index, entry)));
            print!("{}", format_details(&item, ranked));
        }
        Command::Rank { id, tier } => {
            let catalog = JsonCatalog::load(&config.catalog_path);
            let item = catalog
                .find(ItemId(id))
                .ok_or(CineError::ItemNotFound(ItemId(id)))?;

            let mut ranker = Ranker::new(store.load(key));
            let stdin = io::stdin();
            let placed = run_battle(
                &mut ranker,
                item.to_candidate(),
                tier,
                &mut stdin.lock(),
                &mut io::stdout(),
            )?;

            if placed.is_some() {
                store.save(key, ranker.list())?;
            }
        }
        Command::Remove { id } => {
            let mut ranker = Ranker::new(store.load(key));
            match ranker.remove(ItemId(id))? {
                Some(item) => {
                    store.save(key, ranker.list())?;
                    println!("Removed {}", item.title);
                }
                None => println!("{} is not in your rankings", id),
            }
        }
        Command::Move { from, to } => {
            let mut ranker = Ranker::new(store.load(key));
            let from = ranker.list().index_from_rank(from)?;
            let to = ranker.list().index_from_rank(to)?;
            ranker.move_item(from, to)?;
            store.save(key, ranker.list())?;
            print!("{}", format_rankings(ranker.list()));
        }
    }

    Ok(())
}
