use crate::error::{CalcError, EvaluationError, Span};
use crate::lexer::{Lexeme, LexemeKind, Operator};
use crate::postfix::Postfix;
use crate::stack::Stack;
use crate::value::Operand;
use std::collections::HashMap;

/// Variable bindings for a session. Names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    values: HashMap<String, f64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Creates the binding if it doesn't exist, otherwise overwrites it.
    pub fn assign(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings sorted by name.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Runs a postfix sequence against `symbols` and returns its value.
///
/// Assignments are committed as soon as their `=` is reached, so a failure
/// later in the same sequence does not roll them back.
pub fn evaluate(postfix: &Postfix, symbols: &mut SymbolTable) -> Result<f64, EvaluationError> {
    let mut operands: Stack<Operand> = Stack::new();

    for lexeme in postfix.lexemes() {
        match &lexeme.kind {
            LexemeKind::Number(n) => operands.push(Operand::Number(*n)),
            LexemeKind::Variable => operands.push(Operand::Variable {
                name: lexeme.token.clone(),
                span: lexeme.span,
            }),
            LexemeKind::Unknown => operands.push(Operand::Unknown {
                text: lexeme.token.clone(),
                span: lexeme.span,
            }),
            LexemeKind::Operator(op) => {
                let result = apply_operator(*op, lexeme, &mut operands, symbols)?;
                log::trace!("{} -> {}", lexeme.token, result);
                operands.push(Operand::Number(result));
            }
        }
    }

    let end = postfix
        .lexemes()
        .last()
        .map(|l| Span::single(l.span.end))
        .unwrap_or_default();

    if operands.len() != 1 {
        return Err(CalcError::malformed_expression(
            end,
            format!(
                "Expected a single value after evaluation, found {}",
                operands.len()
            ),
        ));
    }

    let last = operands
        .pop()
        .map_err(|e| CalcError::empty_stack(end, e.to_string()))?;
    log::trace!("final operand {}", last);
    let value = resolve(&last, symbols)?;
    log::debug!("{} => {}", postfix, value);
    Ok(value)
}

fn apply_operator(
    op: Operator,
    lexeme: &Lexeme,
    operands: &mut Stack<Operand>,
    symbols: &mut SymbolTable,
) -> Result<f64, EvaluationError> {
    match op {
        Operator::LeftParen | Operator::RightParen => Err(CalcError::unmatched_paren(
            lexeme.span,
            format!("Unmatched '{}'", op),
        )),
        Operator::Equal => {
            let right = pop_operand(operands, lexeme)?;
            let left = pop_operand(operands, lexeme)?;
            assign(left, &right, lexeme, symbols)
        }
        Operator::Plus => binary_operands(operands, lexeme, symbols).map(|(l, r)| l + r),
        Operator::Minus => binary_operands(operands, lexeme, symbols).map(|(l, r)| l - r),
        Operator::Star => binary_operands(operands, lexeme, symbols).map(|(l, r)| l * r),
        Operator::Slash => {
            let (l, r) = binary_operands(operands, lexeme, symbols)?;
            if r == 0.0 {
                Err(CalcError::division_by_zero(lexeme.span))
            } else {
                Ok(l / r)
            }
        }
    }
}

/// Pops the right operand, then the left one, and resolves both.
fn binary_operands(
    operands: &mut Stack<Operand>,
    lexeme: &Lexeme,
    symbols: &SymbolTable,
) -> Result<(f64, f64), EvaluationError> {
    let right = pop_operand(operands, lexeme)?;
    let left = pop_operand(operands, lexeme)?;
    let r = resolve(&right, symbols)?;
    let l = resolve(&left, symbols)?;
    Ok((l, r))
}

fn assign(
    target: Operand,
    value: &Operand,
    lexeme: &Lexeme,
    symbols: &mut SymbolTable,
) -> Result<f64, EvaluationError> {
    let value = resolve(value, symbols)?;
    match target {
        Operand::Variable { name, .. } => {
            log::trace!("assign {} = {}", name, value);
            symbols.assign(&name, value);
            Ok(value)
        }
        Operand::Number(n) => Err(CalcError::invalid_assignment_target(
            lexeme.span,
            format!("Cannot assign to the number {}", n),
        )),
        Operand::Unknown { text, span } => Err(CalcError::unknown_token(span, &text)),
    }
}

fn pop_operand(operands: &mut Stack<Operand>, lexeme: &Lexeme) -> Result<Operand, EvaluationError> {
    operands.pop().map_err(|_| {
        CalcError::empty_stack(
            lexeme.span,
            format!("Operator '{}' is missing an operand", lexeme.token),
        )
    })
}

fn resolve(operand: &Operand, symbols: &SymbolTable) -> Result<f64, EvaluationError> {
    match operand {
        Operand::Number(n) => Ok(*n),
        Operand::Variable { name, span } => symbols
            .get(name)
            .ok_or_else(|| CalcError::undefined_variable(*span, name)),
        Operand::Unknown { text, span } => Err(CalcError::unknown_token(*span, text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_table_overwrites_and_sorts() {
        let mut symbols = SymbolTable::new();
        assert!(symbols.is_empty());
        symbols.assign("b", 1.0);
        symbols.assign("a", 2.0);
        symbols.assign("b", 3.0);
        assert_eq!(symbols.len(), 2);
        assert!(symbols.contains("a"));
        assert!(!symbols.contains("A"));
        assert_eq!(symbols.get("b"), Some(3.0));
        assert_eq!(symbols.entries(), vec![("a", 2.0), ("b", 3.0)]);
    }
}
