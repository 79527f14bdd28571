//! Headless Battle Simulator
//!
//! Builds a ranking by inserting shuffled items one at a time, answering
//! every comparison from a hidden true order, and reports how many
//! comparisons each placement took against the binary-search bound.

use cinerank::core::types::{Candidate, ItemId};
use cinerank::ranking::{Choice, RankedList, Ranker, Tier};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// Headless Battle Simulator - measure comparisons per placement
#[derive(Parser, Debug)]
#[command(name = "battle_sim")]
#[command(about = "Simulate ranking sessions against a hidden true order")]
struct Args {
    /// Number of items to rank
    #[arg(long, default_value_t = 100)]
    items: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct SimResult {
    items: u64,
    seed: u64,
    total_comparisons: usize,
    max_comparisons: usize,
    bound_violations: usize,
    order_matches_truth: bool,
    top_score: f64,
    bottom_score: f64,
}

/// ceil(log2(n + 1)): worst-case comparisons to place into a list of n
fn comparison_bound(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

fn tier_for(true_rank: u64, items: u64) -> Tier {
    // Widened so a huge --items cannot overflow the product
    match u128::from(true_rank) * 3 / u128::from(items.max(1)) {
        0 => Tier::High,
        1 => Tier::Mid,
        _ => Tier::Low,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinerank=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    // Item id doubles as its true rank: lower id is better
    let mut order: Vec<u64> = (0..args.items).collect();
    order.shuffle(&mut rng);

    let mut ranker = Ranker::new(RankedList::new());
    let mut total_comparisons = 0;
    let mut max_comparisons = 0;
    let mut bound_violations = 0;

    for id in order {
        let len_before = ranker.list().len();
        let candidate = Candidate::new(id, format!("Movie {}", id));
        let tier = tier_for(id, args.items);

        let placement = match ranker.place_by(candidate, tier, |candidate, opponent| {
            if candidate.id < opponent.id {
                Choice::Candidate
            } else {
                Choice::Opponent
            }
        }) {
            Ok(Some(placement)) => placement,
            Ok(None) => {
                eprintln!("Item {} was not placed", id);
                continue;
            }
            Err(e) => {
                eprintln!("Error placing item {}: {}", id, e);
                std::process::exit(1);
            }
        };

        total_comparisons += placement.comparisons;
        max_comparisons = max_comparisons.max(placement.comparisons);
        if placement.comparisons > comparison_bound(len_before) {
            bound_violations += 1;
        }
    }

    let list = ranker.list();
    let order_matches_truth = list
        .ids()
        .iter()
        .zip(0..)
        .all(|(id, rank)| *id == ItemId(rank));

    let result = SimResult {
        items: args.items,
        seed,
        total_comparisons,
        max_comparisons,
        bound_violations,
        order_matches_truth,
        top_score: list.get(0).map(|i| i.score).unwrap_or(0.0),
        bottom_score: list.items().last().map(|i| i.score).unwrap_or(0.0),
    };

    let json = || serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string());

    match args.format.as_str() {
        "json" => println!("{}", json()),
        "text" => {
            println!("Battle Simulation");
            println!("=================");
            println!("Items: {}", result.items);
            println!("Comparisons: {} total, {} max", result.total_comparisons, result.max_comparisons);
            println!("Bound violations: {}", result.bound_violations);
            println!("Order matches truth: {}", result.order_matches_truth);
            println!("Scores: top {:.1}, bottom {:.1}", result.top_score, result.bottom_score);
            println!("Seed: {}", result.seed);
        }
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            println!("{}", json());
        }
    }
}
