//! Quiz bank generator.
//!
//! Usage:
//!   cargo run --release --bin seed_quiz -- [COUNT] [OPTIONS]
//!
//! Options:
//!   --seed <N>           Random seed (optional)
//!   --trials <N>         Trials per scenario (default: config)
//!   --config <FILE>      Configuration JSON file (optional)
//!   --output <FILE>      Write entries here instead of stdout
//!
//! Deals COUNT (default 10) random preflop scenarios, solves each, and
//! emits them as a JSON array.

use std::env;
use std::fs;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use holdem_advisor::advisor::Advice;
use holdem_advisor::quiz::QuizEntry;
use holdem_advisor::{AdvisorConfig, Solver};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 10;
    let mut seed: Option<u64> = None;
    let mut trials: Option<u64> = None;
    let mut config_file: Option<String> = None;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--trials" | "-n" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().ok();
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            arg => match arg.parse() {
                Ok(n) => count = n,
                Err(_) => {
                    eprintln!("Unknown argument: {}", arg);
                    print_help();
                    process::exit(1);
                }
            },
        }
        i += 1;
    }

    let mut config = match &config_file {
        Some(path) => match AdvisorConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => AdvisorConfig::default(),
    };
    if let Some(n) = trials {
        config.equity = config.equity.with_trials(n);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let mut rng = match seed.or(config.equity.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let solver = Solver::new(config);

    log::info!("generating {} quiz entries", count);
    let start = Instant::now();

    let progress = ProgressBar::new(count as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut entries = Vec::with_capacity(count);
    let mut histogram: FxHashMap<Advice, usize> = FxHashMap::default();
    for _ in 0..count {
        match QuizEntry::random(&solver, &mut rng) {
            Ok(entry) => {
                *histogram.entry(entry.advice).or_insert(0) += 1;
                progress.set_message(format!(
                    "{}{} -> {}",
                    entry.request.hero_cards[0], entry.request.hero_cards[1], entry.advice
                ));
                entries.push(entry);
            }
            Err(e) => {
                progress.abandon();
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let json = match serde_json::to_string_pretty(&entries) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error encoding entries: {}", e);
            process::exit(1);
        }
    };

    match &output_file {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Error writing {}: {}", path, e);
                process::exit(1);
            }
            println!("Saved {} entries to {}", entries.len(), path);
        }
        None => println!("{}", json),
    }

    // Keep stdout pure JSON when no output file is given
    eprintln!();
    eprintln!("=== Advice Distribution ({:.2}s) ===", start.elapsed().as_secs_f64());
    for advice in Advice::ALL {
        let n = histogram.get(&advice).copied().unwrap_or(0);
        let share = if count > 0 { n as f64 / count as f64 * 100.0 } else { 0.0 };
        eprintln!("  {:<6} {:>5} ({:>5.1}%)", advice.as_str(), n, share);
    }
}

fn print_help() {
    println!("Usage: seed_quiz [COUNT] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --seed, -s <N>        Random seed");
    println!("  --trials, -n <N>      Trials per scenario");
    println!("  --config, -c <FILE>   Configuration JSON file");
    println!("  --output, -o <FILE>   Output file (default: stdout)");
    println!("  --help, -h            Show this help");
}
