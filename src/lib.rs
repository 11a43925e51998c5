// pcalc: infix calculator library
//
// Expressions go through a small pipeline: a character-level tokenizer, a
// lexical classifier, a shunting-yard conversion to postfix, and a stack
// evaluator that reads and writes a session-owned symbol table.

// Public modules
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod postfix;
pub mod repl;
pub mod runner;
pub mod stack;
pub mod tokenizer;
pub mod value;

// Re-export commonly used items
pub use error::{CalcError, ConversionError, ErrorKind, EvaluationError, Span};
pub use evaluator::{evaluate, SymbolTable};
pub use lexer::{classify, lex, Lexeme, LexemeKind, Operator};
pub use postfix::{convert_lexemes, convert_to_postfix, Postfix};
pub use stack::{EmptyStackError, Stack};
pub use tokenizer::{Token, Tokenizer};
pub use value::{format_number, Operand};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{examine_line, process_line, run, LineReport, Outcome, SessionOptions};
