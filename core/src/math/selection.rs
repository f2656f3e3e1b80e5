use crate::interface::parse_number_list;
use crate::prelude::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Outcome of an nth-largest lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NthLargest {
    pub rank: usize,
    pub value: i64,
    /// The whole input sorted largest first, kept for display.
    pub sorted_descending: Vec<i64>,
}

/// Returns the k-th largest value (1-indexed) of `values`.
///
/// The selected value comes from an O(n) partial selection; the fully sorted
/// copy is produced afterwards for callers that render it.
pub fn find_nth_largest(values: &[i64], k: usize) -> CalcResult<NthLargest> {
    if values.is_empty() {
        return Err(CalcError::InvalidInput("no numbers provided".into()));
    }
    if k == 0 {
        return Err(CalcError::InvalidInput("k must be a positive integer".into()));
    }
    if k > values.len() {
        return Err(CalcError::OutOfRange {
            k,
            len: values.len(),
        });
    }

    let mut scratch = values.to_vec();
    let (_, &mut value, _) = scratch.select_nth_unstable_by_key(k - 1, |&v| Reverse(v));

    let mut sorted_descending = values.to_vec();
    sorted_descending.sort_unstable_by_key(|&v| Reverse(v));
    debug_assert_eq!(sorted_descending[k - 1], value);

    Ok(NthLargest {
        rank: k,
        value,
        sorted_descending,
    })
}

/// Parses a comma-separated list and runs [`find_nth_largest`] on it.
pub fn find_nth_largest_in_text(text: &str, k: usize) -> CalcResult<NthLargest> {
    let values = parse_number_list(text)?;
    find_nth_largest(&values, k)
}
