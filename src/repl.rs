use crate::evaluator::SymbolTable;
use crate::runner::{run_line, SessionOptions};
use std::io::{self, Write};

const PROMPT: &str = ">>> ";

/// Interactive loop over the caller's symbol table, so assignments carry over
/// from one line to the next and from any script run before the session.
pub fn start(options: &SessionOptions, symbols: &mut SymbolTable) {
    println!("pcalc v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    loop {
        print!("{}", PROMPT);
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim_end_matches(['\n', '\r']);
                if line == "exit" || line == "quit" {
                    break;
                }

                run_line(line, symbols, options, None);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }

    log::debug!("session ended with {} variable(s)", symbols.len());
}
