use crate::error::{CalcError, ConversionError};
use crate::lexer::{lex, Lexeme, Operator};
use crate::stack::Stack;
use crate::tokenizer::Tokenizer;
use std::fmt;

/// An expression rearranged into postfix order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postfix {
    lexemes: Vec<Lexeme>,
}

impl Postfix {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self { lexemes }
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.lexemes.iter().map(|l| l.token.as_str()).collect()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// Tokenizes, lexes and converts an infix line to postfix.
pub fn convert_to_postfix(expression: &str) -> Result<Postfix, ConversionError> {
    let tokens = Tokenizer::default().tokenize(expression);
    let lexemes = lex(&tokens);
    let postfix = convert_lexemes(lexemes)?;
    log::debug!("postfix of {:?}: {}", expression, postfix);
    Ok(postfix)
}

/// Shunting-yard over already classified lexemes.
///
/// Assignment never pops and is never popped by an incoming operator, so
/// `a = b = 5` becomes `a b 5 = =` and the rightmost assignment runs first.
/// A surplus `(` is left in the output for the evaluator to reject.
pub fn convert_lexemes(lexemes: Vec<Lexeme>) -> Result<Postfix, ConversionError> {
    let mut operators: Stack<Lexeme> = Stack::new();
    let mut output = Vec::with_capacity(lexemes.len());

    for lexeme in lexemes {
        let op = match lexeme.operator() {
            Some(op) => op,
            None => {
                output.push(lexeme);
                continue;
            }
        };

        match op {
            Operator::LeftParen => operators.push(lexeme),
            Operator::RightParen => loop {
                let top = operators.pop().map_err(|_| {
                    CalcError::unmatched_paren(
                        lexeme.span,
                        "Unmatched ')' without a preceding '('".to_string(),
                    )
                })?;
                if top.operator() == Some(Operator::LeftParen) {
                    break;
                }
                output.push(top);
            },
            _ => {
                while should_pop(&operators, op) {
                    let top = operators.pop().map_err(|e| {
                        CalcError::empty_stack(lexeme.span, e.to_string())
                    })?;
                    log::trace!("'{}' pops '{}'", op, top.token);
                    output.push(top);
                }
                operators.push(lexeme);
            }
        }
    }

    while let Ok(top) = operators.pop() {
        output.push(top);
    }

    Ok(Postfix::new(output))
}

fn should_pop(operators: &Stack<Lexeme>, incoming: Operator) -> bool {
    if incoming == Operator::Equal {
        return false;
    }
    match operators.top().ok().and_then(Lexeme::operator) {
        None | Some(Operator::LeftParen) | Some(Operator::Equal) => false,
        Some(top) => top.precedence() >= incoming.precedence(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn postfix_of(expression: &str) -> String {
        match convert_to_postfix(expression) {
            Ok(postfix) => postfix.to_string(),
            Err(e) => panic!("conversion of {:?} failed: {}", expression, e),
        }
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(postfix_of("3 + 4 * 2"), "3 4 2 * +");
        assert_eq!(postfix_of("3 * 4 + 2"), "3 4 * 2 +");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(postfix_of("(3 + 4) * 2"), "3 4 + 2 *");
        assert_eq!(postfix_of("2 * ((1 + 2) - 3)"), "2 1 2 + 3 - *");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix_of("8 - 3 - 2"), "8 3 - 2 -");
        assert_eq!(postfix_of("8 / 4 * 2"), "8 4 / 2 *");
    }

    #[test]
    fn assignment_chains_right_to_left() {
        assert_eq!(postfix_of("a = b = 5"), "a b 5 = =");
        assert_eq!(postfix_of("x = 1 + 2 * y"), "x 1 2 y * + =");
    }

    #[test]
    fn operands_pass_through_whatever_their_category() {
        assert_eq!(postfix_of("a$ + 1"), "a$ 1 +");
        assert_eq!(postfix_of(""), "");
    }

    #[test]
    fn stray_closing_paren_fails() {
        let err = convert_to_postfix("1 + 2)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnmatchedParen);
        assert_eq!(err.span.start, 5);
    }

    #[test]
    fn surplus_opening_paren_survives_conversion() {
        assert_eq!(postfix_of("(1 + 2"), "1 2 + (");
    }
}
