use clap::{Arg, ArgAction, Command};
use pcalc::runner::{self, SessionOptions};
use pcalc::SymbolTable;
use std::fs;
use std::path::Path;

fn main() {
    let matches = Command::new("pcalc")
        .about("An infix calculator with persistent variables, evaluated through postfix")
        .arg(
            Arg::new("file")
                .help("Script file with one expression per line")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the REPL, after running FILE or EXPR if given")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .help("Evaluate a single expression")
                .value_name("EXPR")
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the tokens of each expression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("postfix")
                .long("postfix")
                .help("Print the postfix form of each expression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log pipeline details (overridden by RUST_LOG)")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let options = SessionOptions {
        show_tokens: matches.get_flag("tokens"),
        show_postfix: matches.get_flag("postfix"),
    };

    let mut symbols = SymbolTable::new();
    let interactive = matches.get_flag("interactive");

    let failures = if let Some(expr) = matches.get_one::<String>("expr") {
        Some(runner::run(expr, Some("<expr>"), &options, &mut symbols))
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        Some(run_file(file_path, &options, &mut symbols))
    } else {
        None
    };

    match failures {
        // Bindings made by the script stay visible in the REPL.
        _ if interactive => pcalc::start_repl(&options, &mut symbols),
        None => pcalc::start_repl(&options, &mut symbols),
        Some(0) => {}
        Some(_) => std::process::exit(1),
    }
}

/// Runs a script file and returns the number of failed lines.
fn run_file(path: &str, options: &SessionOptions, symbols: &mut SymbolTable) -> usize {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let name = path.display().to_string();
            let failures = runner::run(&source, Some(&name), options, symbols);
            if failures > 0 {
                log::warn!("{} line(s) failed in {}", failures, name);
            }
            failures
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
