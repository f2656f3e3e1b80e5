use crate::math::{MatrixHelper, NthLargest};
use crate::prelude::{CalcError, CalcResult, ErrorKind};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::text::{parse_number_list, parse_rank};

/// Numbers accepted either as form-style text or as a JSON array.
///
/// Array cells stay untyped until [`NumberInput::resolve`] so a bad cell is
/// reported with its token instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Text(String),
    List(Vec<Value>),
}

impl NumberInput {
    pub fn resolve(&self) -> CalcResult<Vec<i64>> {
        match self {
            NumberInput::Text(text) => parse_number_list(text),
            NumberInput::List(values) => values.iter().map(integer_cell).collect(),
        }
    }
}

fn cell_token(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

fn integer_cell(value: &Value) -> CalcResult<i64> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CalcError::parse(cell_token(value), "an integer"))
}

fn float_cell(value: &Value) -> CalcResult<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CalcError::parse(cell_token(value), "a number"))
}

fn float_matrix(rows: &[Vec<Value>]) -> CalcResult<Array2<f64>> {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(float_cell).collect::<CalcResult<Vec<f64>>>())
        .collect::<CalcResult<Vec<_>>>()?;
    MatrixHelper::from_rows(&rows)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NthLargestRequest {
    pub numbers: NumberInput,
    pub k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NthLargestResponse {
    pub k: usize,
    pub result: i64,
    pub sorted_descending: Vec<i64>,
}

impl From<NthLargest> for NthLargestResponse {
    fn from(found: NthLargest) -> Self {
        Self {
            k: found.rank,
            result: found.value,
            sorted_descending: found.sorted_descending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRequest {
    pub a: Vec<Vec<Value>>,
    pub b: Vec<Vec<Value>>,
}

impl MatrixRequest {
    /// Both operands as float matrices, left first.
    pub fn operands(&self) -> CalcResult<(Array2<f64>, Array2<f64>)> {
        Ok((float_matrix(&self.a)?, float_matrix(&self.b)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub rows: usize,
    pub cols: usize,
    pub product: Vec<Vec<f64>>,
}

/// Query of `/api/evens`; `n` is kept as text so a bad value keeps its token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvenRequest {
    pub n: Option<String>,
}

impl EvenRequest {
    pub fn count(&self) -> CalcResult<usize> {
        match &self.n {
            Some(text) => parse_rank(text),
            None => Err(CalcError::InvalidInput("missing query parameter n".into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvenResponse {
    pub n: usize,
    pub numbers: Vec<u64>,
}

/// JSON body returned alongside a 4xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&CalcError> for ErrorResponse {
    fn from(err: &CalcError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_text_or_array() {
        let text: NthLargestRequest =
            serde_json::from_str(r#"{"numbers": "3, 1, 2", "k": 1}"#).unwrap();
        assert_eq!(text.numbers.resolve().unwrap(), vec![3, 1, 2]);

        let list: NthLargestRequest =
            serde_json::from_str(r#"{"numbers": [3, 1], "k": 2}"#).unwrap();
        assert_eq!(list.numbers.resolve().unwrap(), vec![3, 1]);
    }

    #[test]
    fn array_cells_report_their_token() {
        let request: NthLargestRequest =
            serde_json::from_str(r#"{"numbers": [1, 2.5], "k": 1}"#).unwrap();
        assert_eq!(
            request.numbers.resolve().unwrap_err(),
            CalcError::parse("2.5", "an integer")
        );

        let request: MatrixRequest =
            serde_json::from_str(r#"{"a": [[1, "x"]], "b": [[1], [2]]}"#).unwrap();
        assert_eq!(
            request.operands().unwrap_err(),
            CalcError::parse("x", "a number")
        );
    }

    #[test]
    fn matrix_cells_accept_numeric_strings() {
        let request: MatrixRequest =
            serde_json::from_str(r#"{"a": [[1, " 2.5 "]], "b": [[2], [2]]}"#).unwrap();
        let (lhs, rhs) = request.operands().unwrap();
        assert_eq!(lhs[[0, 1]], 2.5);
        assert_eq!(rhs.dim(), (2, 1));
    }

    #[test]
    fn even_count_keeps_bad_token() {
        let bad = EvenRequest {
            n: Some("abc".into()),
        };
        assert_eq!(
            bad.count().unwrap_err(),
            CalcError::parse("abc", "a positive integer")
        );
        assert!(matches!(
            EvenRequest::default().count().unwrap_err(),
            CalcError::InvalidInput(_)
        ));
    }

    #[test]
    fn error_response_carries_kind() {
        let body = ErrorResponse::from(&CalcError::OutOfRange { k: 4, len: 2 });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "range");
        assert!(json["message"].as_str().unwrap().contains("k exceeds collection size"));
    }
}
