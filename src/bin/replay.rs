// Standalone replay tool for decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all entries
//   --validate             Check recorded moves against expected ones
//   --verbose              Show detailed output for each entry
//   --config <path>        Path to Selector.toml (default: Selector.toml)

use std::env;
use std::process;

use snake_move_selector::config::Config;
use snake_move_selector::replay::ReplayEngine;
use snake_move_selector::types::Direction;

fn print_usage() {
    eprintln!("Move Selector Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all entries in the log");
    eprintln!("  --validate <I:M,...>    Validate recorded moves (format: index:move,...)");
    eprintln!("  --verbose               Show detailed output for each entry");
    eprintln!("  --config <path>         Path to Selector.toml (default: Selector.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all entries");
    eprintln!("  replay move_selector_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Validate recorded moves (several acceptable moves separated by '|')");
    eprintln!("  replay move_selector_debug.jsonl --validate 0:up,3:left|down");
}

fn parse_expected_moves(s: &str) -> Result<Vec<(usize, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'index:move'", pair));
            }

            let index = parts[0]
                .parse::<usize>()
                .map_err(|e| format!("Invalid entry index '{}': {}", parts[0], e))?;

            let moves: Result<Vec<Direction>, String> =
                parts[1].split('|').map(Direction::parse).collect();

            Ok((index, moves?))
        })
        .collect()
}

enum Mode {
    All,
    Validate(String),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Selector.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--validate" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --validate requires an argument");
                    process::exit(1);
                }
                mode = Some(Mode::Validate(args[i + 1].clone()));
                i += 1;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
                config_path = args[i + 1].clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mode = match mode {
        Some(mode) => mode,
        None => {
            eprintln!("Error: Must specify --all or --validate");
            print_usage();
            process::exit(1);
        }
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} entries...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Validate(moves_arg) => {
            let expected = match parse_expected_moves(&moves_arg) {
                Ok(expected) => expected,
                Err(e) => {
                    eprintln!("Error parsing expected moves: {}", e);
                    process::exit(1);
                }
            };

            match engine.validate_expected_moves(&entries, &expected) {
                Ok(()) => {
                    println!("✓ All {} expected moves validated", expected.len());
                }
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
