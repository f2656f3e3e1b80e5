use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-side caps applied by the demo surfaces before invoking a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_numbers: usize,
    pub max_matrix_dim: usize,
    pub max_even_count: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_numbers: 10_000,
            max_matrix_dim: 10,
            max_even_count: 1000,
        }
    }
}

/// Coarse classification of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    InvalidInput,
    Range,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Parse => "parse",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Range => "range",
        };
        f.write_str(label)
    }
}

/// Common error type for every calculator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("could not parse '{token}' as {expected}")]
    Parse {
        token: String,
        expected: &'static str,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("k exceeds collection size (k = {k}, size = {len})")]
    OutOfRange { k: usize, len: usize },
    #[error(
        "dimension mismatch: left matrix has {left_cols} columns but right matrix has {right_rows} rows"
    )]
    DimensionMismatch { left_cols: usize, right_rows: usize },
}

impl CalcError {
    pub fn parse(token: impl Into<String>, expected: &'static str) -> Self {
        CalcError::Parse {
            token: token.into(),
            expected,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Parse { .. } => ErrorKind::Parse,
            CalcError::InvalidInput(_) => ErrorKind::InvalidInput,
            CalcError::OutOfRange { .. } | CalcError::DimensionMismatch { .. } => {
                ErrorKind::Range
            }
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_group_range_failures() {
        assert_eq!(CalcError::OutOfRange { k: 2, len: 1 }.kind(), ErrorKind::Range);
        assert_eq!(
            CalcError::DimensionMismatch {
                left_cols: 3,
                right_rows: 2
            }
            .kind(),
            ErrorKind::Range
        );
        assert_eq!(CalcError::parse("x", "an integer").kind(), ErrorKind::Parse);
    }

    #[test]
    fn parse_error_names_the_token() {
        let err = CalcError::parse("4x", "an integer");
        assert_eq!(err.to_string(), "could not parse '4x' as an integer");
    }

    #[test]
    fn limits_default_to_form_bounds() {
        let limits = Limits::default();
        assert_eq!(limits.max_matrix_dim, 10);
        assert_eq!(limits.max_even_count, 1000);
    }
}
