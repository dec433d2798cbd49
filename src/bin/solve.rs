//! Advice for a single spot.
//!
//! Usage:
//!   cargo run --release --bin solve -- [OPTIONS] [REQUEST_JSON]
//!
//! Options:
//!   --config <FILE>      Configuration JSON file (optional)
//!   --seed <N>           Random seed (optional)
//!   --trials <N>         Trials per request, heads-up and multiway
//!   --threads <N>        Number of threads (default: auto)
//!
//! The request is read from REQUEST_JSON or, when omitted, from stdin. The
//! response JSON is printed to stdout.

use std::env;
use std::io::{self, Read};
use std::process;
use std::time::Instant;

use holdem_advisor::{AdvisorConfig, AdvisorError, SolveRequest, Solver};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut trials: Option<u64> = None;
    let mut threads: Option<usize> = None;
    let mut request_json: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
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
            "--threads" | "-t" => {
                i += 1;
                if i < args.len() {
                    threads = args[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                process::exit(1);
            }
            _ => request_json = Some(args[i].clone()),
        }
        i += 1;
    }

    let mut config = match &config_file {
        Some(path) => {
            log::info!("loading configuration from {}", path);
            match AdvisorConfig::from_json_file(path) {
                Ok(config) => config,
                Err(e) => fail(e),
            }
        }
        None => AdvisorConfig::default(),
    };
    if let Some(s) = seed {
        config.equity = config.equity.with_seed(s);
    }
    if let Some(n) = trials {
        config.equity = config.equity.with_trials(n);
    }
    if let Some(t) = threads {
        config.equity = config.equity.with_threads(t);
    }
    if let Err(e) = config.validate() {
        fail(e);
    }

    let input = match request_json {
        Some(json) => json,
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let request: SolveRequest = match serde_json::from_str(&input) {
        Ok(request) => request,
        Err(e) => fail(AdvisorError::InvalidRequest(e.to_string())),
    };

    let start = Instant::now();
    let solver = Solver::new(config);
    let response = match solver.solve(&request) {
        Ok(response) => response,
        Err(e) => fail(e),
    };
    log::info!(
        "solved {:?} vs {} in {:.3}s",
        request.hero_cards,
        request.num_villains,
        start.elapsed().as_secs_f64()
    );

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding response: {}", e);
            process::exit(1);
        }
    }
}

fn fail(error: AdvisorError) -> ! {
    eprintln!("Error: {}", error);
    process::exit(1);
}

fn print_help() {
    println!("Usage: solve [OPTIONS] [REQUEST_JSON]");
    println!();
    println!("Options:");
    println!("  --config, -c <FILE>   Configuration JSON file");
    println!("  --seed, -s <N>        Random seed");
    println!("  --trials, -n <N>      Trials per request");
    println!("  --threads, -t <N>     Number of threads (default: auto)");
    println!("  --help, -h            Show this help");
    println!();
    println!("Example:");
    println!(r#"  solve '{{"hero_cards":["Ah","Kh"],"pot_size":40,"facing_bet":20}}'"#);
}
