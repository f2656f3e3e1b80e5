use crate::math::MatrixHelper;
use crate::prelude::{CalcError, CalcResult};
use ndarray::{Array2, ArrayView2};
use std::fmt::Display;
use std::str::FromStr;

/// Parses comma-separated integers, skipping blank entries.
pub fn parse_number_list(text: &str) -> CalcResult<Vec<i64>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| CalcError::parse(token, "an integer"))
        })
        .collect()
}

/// Parses the rank field of the nth-largest form.
pub fn parse_rank(text: &str) -> CalcResult<usize> {
    let token = text.trim();
    token
        .parse::<usize>()
        .map_err(|_| CalcError::parse(token, "a positive integer"))
}

/// Parses one matrix row per line, cells separated by whitespace.
pub fn parse_matrix<A: FromStr + Clone>(text: &str) -> CalcResult<Array2<A>> {
    let rows = text
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split_whitespace()
                .map(|token| {
                    token
                        .parse::<A>()
                        .map_err(|_| CalcError::parse(token, "a number"))
                })
                .collect::<CalcResult<Vec<A>>>()
        })
        .collect::<CalcResult<Vec<Vec<A>>>>()?;
    MatrixHelper::from_rows(&rows)
}

/// Renders floats with a fixed number of decimals, one row per line.
pub fn format_matrix_fixed(matrix: ArrayView2<f64>, precision: usize) -> String {
    join_rows(matrix, |value| format!("{:.*}", precision, value))
}

pub fn format_matrix<A: Display>(matrix: ArrayView2<A>) -> String {
    join_rows(matrix, |value| value.to_string())
}

fn join_rows<A, F>(matrix: ArrayView2<A>, render: F) -> String
where
    F: Fn(&A) -> String,
{
    matrix
        .outer_iter()
        .map(|row| row.iter().map(&render).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
