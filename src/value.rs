use crate::error::Span;
use std::fmt;

/// Entry on the evaluator's operand stack.
///
/// Variables stay unresolved until an operator (or the final result) needs
/// their value, which is what lets `=` use its left operand as a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Variable { name: String, span: Span },
    Unknown { text: String, span: Span },
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", format_number(*n)),
            Operand::Variable { name, .. } => write!(f, "{}", name),
            Operand::Unknown { text, .. } => write!(f, "{}", text),
        }
    }
}

pub fn format_number(n: f64) -> String {
    // Always show at least one decimal place for integral values
    if n.is_finite() && n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_display_as_written() {
        let span = Span::new(0, 1);
        assert_eq!(Operand::Number(3.0).to_string(), "3.0");
        assert_eq!(
            Operand::Variable { name: "rate".to_string(), span }.to_string(),
            "rate"
        );
        assert_eq!(
            Operand::Unknown { text: "a$".to_string(), span }.to_string(),
            "a$"
        );
    }

    #[test]
    fn integral_values_keep_a_decimal_place() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(-2.0), "-2.0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }
}
