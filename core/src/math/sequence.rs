use crate::prelude::{CalcError, CalcResult};

/// Returns the first `n` positive even numbers, `2, 4, ..., 2n`.
pub fn first_even_numbers(n: usize, max: usize) -> CalcResult<Vec<u64>> {
    if n == 0 || n > max {
        return Err(CalcError::InvalidInput(format!(
            "please enter a number between 1 and {}",
            max
        )));
    }
    Ok((1..=n as u64).map(|i| 2 * i).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_five_evens() {
        assert_eq!(first_even_numbers(5, 1000).unwrap(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(first_even_numbers(1000, 1000).unwrap().last(), Some(&2000));
        assert!(first_even_numbers(0, 1000).is_err());
        assert!(first_even_numbers(1001, 1000).is_err());
    }
}
