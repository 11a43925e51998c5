use crate::error::Span;

pub const DEFAULT_SPECIALS: &str = "+-*/=()";
pub const DEFAULT_WHITESPACE: &str = " \t";

/// Raw slice of the input line; classification happens in the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(text: String, span: Span) -> Self {
        Self { text, span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Operand,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Special,
    Other,
}

/// Character-level state machine splitting a line into tokens.
///
/// Special characters always form single-character tokens, whitespace
/// characters separate tokens and are dropped, and every other character is
/// accumulated into an operand token. Both character sets are supplied by the
/// caller so the same machine serves other single-character grammars.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    specials: Vec<char>,
    whitespace: Vec<char>,
}

impl Tokenizer {
    pub fn new(specials: &str, whitespace: &str) -> Self {
        Self {
            specials: specials.chars().collect(),
            whitespace: whitespace.chars().collect(),
        }
    }

    fn class_of(&self, c: char) -> CharClass {
        if self.whitespace.contains(&c) {
            CharClass::Whitespace
        } else if self.specials.contains(&c) {
            CharClass::Special
        } else {
            CharClass::Other
        }
    }

    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut state = State::Idle;
        let mut operand = String::new();
        let mut operand_start = 0;
        let mut length = 0;

        for (i, c) in line.chars().enumerate() {
            length = i + 1;
            state = match (state, self.class_of(c)) {
                (State::Operand, CharClass::Other) => {
                    operand.push(c);
                    State::Operand
                }
                (State::Operand, CharClass::Whitespace) => {
                    let text = std::mem::take(&mut operand);
                    tokens.push(Token::new(text, Span::new(operand_start, i)));
                    State::Whitespace
                }
                (State::Operand, CharClass::Special) => {
                    let text = std::mem::take(&mut operand);
                    tokens.push(Token::new(text, Span::new(operand_start, i)));
                    tokens.push(Token::new(c.to_string(), Span::single(i)));
                    State::Idle
                }
                (_, CharClass::Whitespace) => State::Whitespace,
                (_, CharClass::Special) => {
                    tokens.push(Token::new(c.to_string(), Span::single(i)));
                    State::Idle
                }
                (_, CharClass::Other) => {
                    operand.push(c);
                    operand_start = i;
                    State::Operand
                }
            };
        }

        if state == State::Operand {
            tokens.push(Token::new(operand, Span::new(operand_start, length)));
        }

        log::trace!("tokenized {:?} into {} tokens", line, tokens.len());
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIALS, DEFAULT_WHITESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(line: &str) -> Vec<String> {
        Tokenizer::default()
            .tokenize(line)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn splits_on_whitespace_and_specials() {
        assert_eq!(texts("3 + 4"), vec!["3", "+", "4"]);
        assert_eq!(texts("x=10"), vec!["x", "=", "10"]);
        assert_eq!(texts("(a+b)*\tc"), vec!["(", "a", "+", "b", ")", "*", "c"]);
    }

    #[test]
    fn empty_and_blank_lines_yield_nothing() {
        assert!(texts("").is_empty());
        assert!(texts("  \t ").is_empty());
    }

    #[test]
    fn operand_characters_accumulate() {
        assert_eq!(texts("  foo_1  2.5e3 $x"), vec!["foo_1", "2.5e3", "$x"]);
    }

    #[test]
    fn spans_are_character_offsets() {
        let tokens = Tokenizer::default().tokenize("ab + (cd)");
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2),
                Span::new(3, 4),
                Span::new(5, 6),
                Span::new(6, 8),
                Span::new(8, 9),
            ]
        );
    }

    #[test]
    fn custom_character_sets() {
        let tokenizer = Tokenizer::new(",;", " ");
        let tokens: Vec<String> = tokenizer
            .tokenize("a,b ;c+d")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["a", ",", "b", ";", "c+d"]);
    }
}
