use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

/// Character range `[start, end)` within a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("stack underflow")]
    EmptyStack,
    #[error("unmatched parenthesis")]
    UnmatchedParen,
    #[error("undefined variable")]
    UndefinedVariable,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("division by zero")]
    DivisionByZero,
    #[error("malformed expression")]
    MalformedExpression,
    #[error("unknown token")]
    UnknownToken,
}

impl ErrorKind {
    /// Structural problems found while reshaping the expression, as opposed
    /// to failures that only show up once values are computed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyStack | ErrorKind::UnmatchedParen | ErrorKind::MalformedExpression
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

/// Failure of `convert_to_postfix`.
pub type ConversionError = CalcError;
/// Failure of `evaluate`.
pub type EvaluationError = CalcError;

impl CalcError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn empty_stack(span: Span, message: String) -> Self {
        Self::new_with_help(
            ErrorKind::EmptyStack,
            span,
            message,
            "Every operator needs an operand on each side, e.g. `1 + 2`.".to_string(),
        )
    }

    pub fn unmatched_paren(span: Span, message: String) -> Self {
        Self::new(ErrorKind::UnmatchedParen, span, message)
    }

    pub fn undefined_variable(span: Span, name: &str) -> Self {
        Self::new_with_help(
            ErrorKind::UndefinedVariable,
            span,
            format!("Undefined variable '{}'", name),
            format!("Assign it first, e.g. `{} = 0`.", name),
        )
    }

    pub fn invalid_assignment_target(span: Span, message: String) -> Self {
        Self::new_with_help(
            ErrorKind::InvalidAssignmentTarget,
            span,
            message,
            "Only a variable name may appear on the left of '='.".to_string(),
        )
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::new(ErrorKind::DivisionByZero, span, "Division by zero".to_string())
    }

    pub fn malformed_expression(span: Span, message: String) -> Self {
        Self::new(ErrorKind::MalformedExpression, span, message)
    }

    pub fn unknown_token(span: Span, token: &str) -> Self {
        Self::new_with_help(
            ErrorKind::UnknownToken,
            span,
            format!("Unknown token '{}'", token),
            "Operands are numbers or names made of letters, digits and '_' not starting with a digit."
                .to_string(),
        )
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = if self.kind.is_structural() {
            Color::Yellow
        } else {
            Color::Magenta
        };

        let kind_str = if self.kind.is_structural() {
            "Syntax Error"
        } else {
            "Evaluation Error"
        };

        // An error at end of input points one past the last character.
        let end = self.span.end.min(source.chars().count().max(1));
        let start = self.span.start.min(end.saturating_sub(1));

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(self.kind.to_string())
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(e) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            log::error!("failed to render diagnostic: {}", e);
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CalcError {}
