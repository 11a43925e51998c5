use crate::error::Span;
use crate::tokenizer::Token;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    LeftParen,
    RightParen,
}

impl Operator {
    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Operator::Plus),
            "-" => Some(Operator::Minus),
            "*" => Some(Operator::Star),
            "/" => Some(Operator::Slash),
            "=" => Some(Operator::Equal),
            "(" => Some(Operator::LeftParen),
            ")" => Some(Operator::RightParen),
            _ => None,
        }
    }

    /// Binding strength used by the postfix converter. Assignment and the
    /// parentheses share the lowest level.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Star | Operator::Slash => 2,
            Operator::Plus | Operator::Minus => 1,
            Operator::Equal | Operator::LeftParen | Operator::RightParen => 0,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Star => '*',
            Operator::Slash => '/',
            Operator::Equal => '=',
            Operator::LeftParen => '(',
            Operator::RightParen => ')',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexemeKind {
    Operator(Operator),
    Number(f64),
    Variable,
    Unknown,
}

impl LexemeKind {
    pub fn category(&self) -> &'static str {
        match self {
            LexemeKind::Operator(_) => "operator",
            LexemeKind::Number(_) => "number",
            LexemeKind::Variable => "variable",
            LexemeKind::Unknown => "unknown",
        }
    }
}

/// A token together with its lexical category.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: String,
    pub kind: LexemeKind,
    pub span: Span,
}

impl Lexeme {
    pub fn new(token: String, kind: LexemeKind, span: Span) -> Self {
        Self { token, kind, span }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            LexemeKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.token, self.kind.category())
    }
}

/// Classifies one token. The checks run in a fixed order: operator, number,
/// variable, and finally unknown.
pub fn classify(token: &str) -> LexemeKind {
    if let Some(op) = Operator::from_token(token) {
        LexemeKind::Operator(op)
    } else if let Ok(n) = token.parse::<f64>() {
        LexemeKind::Number(n)
    } else if is_identifier(token) {
        LexemeKind::Variable
    } else {
        LexemeKind::Unknown
    }
}

pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn lex(tokens: &[Token]) -> Vec<Lexeme> {
    tokens
        .iter()
        .map(|token| Lexeme::new(token.text.clone(), classify(&token.text), token.span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    #[test]
    fn operators_win_over_everything() {
        for text in ["+", "-", "*", "/", "=", "(", ")"] {
            assert!(matches!(classify(text), LexemeKind::Operator(_)), "{}", text);
        }
    }

    #[test]
    fn numbers_parse_as_floats() {
        assert_eq!(classify("42"), LexemeKind::Number(42.0));
        assert_eq!(classify("3.5"), LexemeKind::Number(3.5));
        assert_eq!(classify("1e3"), LexemeKind::Number(1000.0));
        assert_eq!(classify(".5"), LexemeKind::Number(0.5));
    }

    #[test]
    fn identifiers_follow_conventional_rule() {
        assert_eq!(classify("x"), LexemeKind::Variable);
        assert_eq!(classify("_tmp"), LexemeKind::Variable);
        assert_eq!(classify("rate2"), LexemeKind::Variable);
        assert_eq!(classify("Total_Sum"), LexemeKind::Variable);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(classify("9lives"), LexemeKind::Unknown);
        assert_eq!(classify("a$b"), LexemeKind::Unknown);
        assert_eq!(classify("1.2.3"), LexemeKind::Unknown);
        assert_eq!(classify("héllo"), LexemeKind::Unknown);
    }

    #[test]
    fn lex_preserves_order_and_spans() {
        let tokens = Tokenizer::default().tokenize("x = 2 * y");
        let lexemes = lex(&tokens);
        let categories: Vec<&str> = lexemes.iter().map(|l| l.kind.category()).collect();
        assert_eq!(
            categories,
            vec!["variable", "operator", "number", "operator", "variable"]
        );
        assert_eq!(lexemes[4].span, Span::new(8, 9));
    }
}
