use crate::error::CalcError;
use crate::evaluator::{evaluate, SymbolTable};
use crate::lexer::lex;
use crate::postfix::convert_lexemes;
use crate::tokenizer::{Tokenizer, DEFAULT_WHITESPACE};
use crate::value::format_number;

/// Display switches shared by the REPL and the script runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub show_tokens: bool,
    pub show_postfix: bool,
}

/// What a single input line turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Lines starting with `#` are echoed and never evaluated.
    Comment(String),
    Blank,
    Value(f64),
}

/// Result of one line plus the debug views requested by `SessionOptions`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    pub views: Vec<String>,
    pub outcome: Result<Outcome, CalcError>,
}

pub fn process_line(line: &str, symbols: &mut SymbolTable) -> Result<Outcome, CalcError> {
    examine_line(line, symbols, &SessionOptions::default()).outcome
}

/// Runs one line through the pipeline, collecting the token and postfix
/// views along the way. Comments and blank lines produce no views.
pub fn examine_line(
    line: &str,
    symbols: &mut SymbolTable,
    options: &SessionOptions,
) -> LineReport {
    let mut views = Vec::new();

    if line.starts_with('#') {
        return LineReport {
            views,
            outcome: Ok(Outcome::Comment(line.to_string())),
        };
    }
    if line.chars().all(|c| DEFAULT_WHITESPACE.contains(c)) {
        return LineReport {
            views,
            outcome: Ok(Outcome::Blank),
        };
    }

    let lexemes = lex(&Tokenizer::default().tokenize(line));
    if options.show_tokens {
        let shown: Vec<String> = lexemes.iter().map(|l| l.to_string()).collect();
        views.push(format!("tokens: {}", shown.join(" ")));
    }

    let outcome = convert_lexemes(lexemes).and_then(|postfix| {
        if options.show_postfix {
            views.push(format!("postfix: {}", postfix));
        }
        evaluate(&postfix, symbols).map(Outcome::Value)
    });

    LineReport { views, outcome }
}

/// Processes one line and prints its result, or reports its error.
/// Returns `false` when the line failed.
pub fn run_line(
    line: &str,
    symbols: &mut SymbolTable,
    options: &SessionOptions,
    filename: Option<&str>,
) -> bool {
    let report = examine_line(line, symbols, options);
    for view in &report.views {
        println!("{}", view);
    }

    match report.outcome {
        Ok(Outcome::Comment(text)) => {
            println!("{}", text);
            true
        }
        Ok(Outcome::Blank) => true,
        Ok(Outcome::Value(value)) => {
            println!("{}", format_number(value));
            true
        }
        Err(error) => {
            error.report(line, filename);
            false
        }
    }
}

/// Runs every line of a script against `symbols` and returns the number of
/// lines that failed. Evaluation continues past failures.
pub fn run(
    source: &str,
    filename: Option<&str>,
    options: &SessionOptions,
    symbols: &mut SymbolTable,
) -> usize {
    let name = filename.unwrap_or("<input>");
    let mut failures = 0;

    for (index, line) in source.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        let location = format!("{}:{}", name, index + 1);
        if !run_line(line, symbols, options, Some(&location)) {
            failures += 1;
        }
    }

    log::debug!(
        "{}: {} failed line(s), {} variable(s) bound",
        name,
        failures,
        symbols.len()
    );
    failures
}
