//! `prosim-cli` – offline driver for the adaptation core.
//!
//! ```text
//! prosim score <trial.json>   score a recorded trial, one JSON record per cycle
//! prosim order [n]            seeded random order of the configured conditions
//! prosim schema               print the JSON Schema of the trial format
//! prosim init                 write a default ~/.prosim/config.toml
//! prosim help                 show this message
//! ```

mod config;
mod trial;

use colored::Colorize;
use rand::Rng;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use prosim_core::{UpperBodyCompensationManager, shuffled_order};
use prosim_types::ScoreRecord;

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG selects the filter (default "info"); PROSIM_LOG_FORMAT=json
    // switches to newline-delimited JSON.  Logs go to stderr so that score
    // records on stdout stay machine-readable.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("PROSIM_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("score") => match args.get(1) {
            Some(path) => cmd_score(Path::new(path)),
            None => Err("usage: prosim score <trial.json>".to_string()),
        },
        Some("order") => cmd_order(args.get(1).map(String::as_str)),
        Some("schema") => cmd_schema(),
        Some("init") => cmd_init(),
        Some("help") | Some("--help") | Some("-h") | None => {
            print_help();
            Ok(())
        }
        Some(other) => Err(format!("unknown command '{other}' (try `prosim help`)")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<config::Config, String> {
    let cfg = config::load_or_default_from(path)?;
    info!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Score the trial at `trial_path` with the weights configured at `config_path`.
fn run_score(config_path: &Path, trial_path: &Path) -> Result<Vec<ScoreRecord>, String> {
    let cfg = load_config(config_path)?;
    let mut manager =
        UpperBodyCompensationManager::with_weights(cfg.shoulder_weight, cfg.trunk_weight)
            .map_err(|e| format!("invalid objective weights: {e}"))?;

    let trial = trial::load_trial(trial_path)?;
    trial::score_trial(&mut manager, &trial).map_err(|e| e.to_string())
}

fn cmd_score(path: &Path) -> Result<(), String> {
    let records = run_score(&config::config_path(), path)?;
    for record in &records {
        let line = serde_json::to_string(record).map_err(|e| e.to_string())?;
        println!("{line}");
    }
    Ok(())
}

fn cmd_order(count: Option<&str>) -> Result<(), String> {
    let cfg = config::load_or_default()?;
    let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

    let labels: Vec<String> = match count {
        Some(n) => {
            let n: usize = n.parse().map_err(|_| format!("'{n}' is not a count"))?;
            (0..n).map(|i| i.to_string()).collect()
        }
        None if cfg.conditions.is_empty() => {
            return Err("no conditions configured; pass a count or add `conditions` to the config"
                .to_string());
        }
        None => cfg.conditions.clone(),
    };

    println!("{} {}", "seed".dimmed(), seed);
    for (position, index) in shuffled_order(labels.len(), seed).into_iter().enumerate() {
        println!("  {:>3}. {}", position + 1, labels[index].bold());
    }
    Ok(())
}

fn cmd_schema() -> Result<(), String> {
    let schema = serde_json::to_string_pretty(&trial::trial_schema()).map_err(|e| e.to_string())?;
    println!("{schema}");
    Ok(())
}

fn cmd_init() -> Result<(), String> {
    let path = config::config_path();
    if path.exists() {
        return Err(format!("{} already exists", path.display()));
    }
    config::save(&config::Config::default())?;
    println!("  {} {}", "✓ wrote".green(), path.display().to_string().bold());
    Ok(())
}

fn print_help() {
    println!("{}", "prosim – upper-body compensation scoring".bold());
    println!();
    println!("  {}  score a recorded trial", "score <trial.json>".cyan());
    println!("  {}            randomised condition order", "order [n]".cyan());
    println!("  {}               trial file JSON Schema", "schema".cyan());
    println!("  {}                 write a default config", "init".cyan());
    println!("  {}                 show this message", "help".cyan());
}
