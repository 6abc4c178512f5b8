// Move selector entry point
//
// Usage:
//   move-selector [--config <path>] [--strategy bfs|crowded] [--window sliding|tiled]
//                 [--radius <n>] < snapshot.txt
//
// Reads one snapshot from stdin and prints a single direction code
// (0 = up, 1 = right, 2 = down, 3 = left) on stdout. Diagnostics go to stderr.

use log::{error, info};
use std::env;
use std::io::{self, Read};
use std::process;

use snake_move_selector::config::Config;
use snake_move_selector::crowd::CrowdWindow;
use snake_move_selector::debug_logger::DecisionLogger;
use snake_move_selector::search::SearchStrategy;
use snake_move_selector::selector::MoveSelector;

fn print_usage() {
    eprintln!("Snake Move Selector");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  move-selector [OPTIONS] < snapshot");
    eprintln!();
    eprintln!("INPUT:");
    eprintln!("  height width own_body_code own_head_code, then height*width cell codes");
    eprintln!();
    eprintln!("OUTPUT:");
    eprintln!("  0 = up, 1 = right, 2 = down, 3 = left");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>         Path to Selector.toml (default: Selector.toml)");
    eprintln!("  --strategy <name>       Override search strategy: bfs | crowded");
    eprintln!("  --window <shape>        Override crowdedness window: sliding | tiled");
    eprintln!("  --radius <n>            Override crowdedness window radius (tile side when tiled)");
    eprintln!("  --help                  Show this help message");
}

/// Command-line overrides applied on top of the loaded configuration
#[derive(Default)]
struct Overrides {
    config_path: Option<String>,
    strategy: Option<SearchStrategy>,
    window: Option<CrowdWindow>,
    radius: Option<usize>,
}

fn option_value(args: &[String], i: usize) -> Result<&String, String> {
    args.get(i + 1)
        .ok_or_else(|| format!("{} requires an argument", args[i]))
}

fn parse_args(args: &[String]) -> Result<Overrides, String> {
    let mut overrides = Overrides::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                overrides.config_path = Some(option_value(args, i)?.clone());
                i += 1;
            }
            "--strategy" => {
                overrides.strategy = Some(SearchStrategy::parse(option_value(args, i)?)?);
                i += 1;
            }
            "--window" => {
                overrides.window = Some(CrowdWindow::parse(option_value(args, i)?)?);
                i += 1;
            }
            "--radius" => {
                let raw = option_value(args, i)?;
                let radius = raw
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid radius '{}': {}", raw, e))?;
                overrides.radius = Some(radius);
                i += 1;
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(overrides)
}

fn load_config(overrides: &Overrides) -> Config {
    let mut config = match &overrides.config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            log::warn!("Could not load config from '{}': {}", path, e);
            Config::default_hardcoded()
        }),
        None => Config::load_or_default(),
    };

    if let Some(strategy) = overrides.strategy {
        config.search.strategy = strategy;
    }
    if let Some(window) = overrides.window {
        config.search.crowd_window = window;
    }
    if let Some(radius) = overrides.radius {
        config.search.crowd_radius = radius;
    }
    config
}

fn main() {
    // stdout carries only the direction code, so default to warnings on stderr.
    // RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(0);
    }

    let overrides = match parse_args(&args) {
        Ok(overrides) => overrides,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = load_config(&overrides);
    info!(
        "Strategy {}, crowd window {} size {}, crowd weight {}",
        config.search.strategy,
        config.search.crowd_window,
        config.search.crowd_radius,
        config.search.crowd_weight
    );

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        error!("Failed to read stdin: {}", e);
    }

    let mut logger = DecisionLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let selector = MoveSelector::new(config);

    let (snapshot, decision) = selector.select_from_input(&input);
    if let Some(snapshot) = &snapshot {
        logger.log_decision(selector.strategy(), snapshot, &decision);
    }

    println!("{}", decision.code());
}
