use crate::workflow::config::ServerConfig;
use calccore::interface::{parse_matrix, parse_number_list};
use calccore::math::{first_even_numbers, find_nth_largest, MatrixHelper, NthLargest};
use calccore::prelude::{CalcError, CalcResult, Limits};
use calccore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use ndarray::{Array2, ArrayView2, LinalgScalar};
use std::sync::Arc;

/// Applies the configured limits, then dispatches to the pure calculators.
#[derive(Clone)]
pub struct Runner {
    config: ServerConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn limits(&self) -> Limits {
        self.config.limits
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn nth_largest(&self, values: &[i64], k: usize) -> CalcResult<NthLargest> {
        let logger = LogManager::new("nth-largest");
        let outcome = self
            .check_list_len(values.len())
            .and_then(|_| find_nth_largest(values, k));
        if let Ok(found) = &outcome {
            logger.record(&format!(
                "rank {} of {} values -> {}",
                k,
                values.len(),
                found.value
            ));
        }
        self.track(&logger, outcome)
    }

    pub fn nth_largest_text(&self, text: &str, k: usize) -> CalcResult<NthLargest> {
        match parse_number_list(text) {
            Ok(values) => self.nth_largest(&values, k),
            Err(err) => self.reject("nth-largest", err),
        }
    }

    pub fn multiply<A: LinalgScalar>(
        &self,
        lhs: ArrayView2<A>,
        rhs: ArrayView2<A>,
    ) -> CalcResult<Array2<A>> {
        let logger = LogManager::new("matrix");
        let outcome = self
            .check_matrix_dim(&lhs)
            .and_then(|_| self.check_matrix_dim(&rhs))
            .and_then(|_| MatrixHelper::multiply(lhs, rhs));
        if let Ok(product) = &outcome {
            logger.record(&format!(
                "{}x{} * {}x{} -> {}x{}",
                lhs.nrows(),
                lhs.ncols(),
                rhs.nrows(),
                rhs.ncols(),
                product.nrows(),
                product.ncols()
            ));
        }
        self.track(&logger, outcome)
    }

    /// Parses both operands as float matrices and multiplies them.
    pub fn multiply_text(&self, left: &str, right: &str) -> CalcResult<Array2<f64>> {
        match parse_matrix::<f64>(left).and_then(|l| parse_matrix::<f64>(right).map(|r| (l, r))) {
            Ok((lhs, rhs)) => self.multiply(lhs.view(), rhs.view()),
            Err(err) => self.reject("matrix", err),
        }
    }

    pub fn evens(&self, n: usize) -> CalcResult<Vec<u64>> {
        let logger = LogManager::new("evens");
        let outcome = first_even_numbers(n, self.config.limits.max_even_count);
        if outcome.is_ok() {
            logger.record(&format!("first {} even numbers", n));
        }
        self.track(&logger, outcome)
    }

    /// Records a failure that happened before a calculator could run.
    pub fn reject<T>(&self, component: &'static str, err: CalcError) -> CalcResult<T> {
        self.track(&LogManager::new(component), Err(err))
    }

    fn track<T>(&self, logger: &LogManager, outcome: CalcResult<T>) -> CalcResult<T> {
        self.metrics.observe(&outcome);
        if let Err(err) = &outcome {
            logger.record_failure(err);
        }
        outcome
    }

    fn check_list_len(&self, len: usize) -> CalcResult<()> {
        let max = self.config.limits.max_numbers;
        if len > max {
            return Err(CalcError::InvalidInput(format!(
                "at most {} numbers are accepted, got {}",
                max, len
            )));
        }
        Ok(())
    }

    fn check_matrix_dim<A>(&self, matrix: &ArrayView2<A>) -> CalcResult<()> {
        let max = self.config.limits.max_matrix_dim;
        if matrix.nrows() > max || matrix.ncols() > max {
            return Err(CalcError::InvalidInput(format!(
                "matrices are limited to {}x{}, got {}x{}",
                max,
                max,
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn runner() -> Runner {
        Runner::new(ServerConfig::default())
    }

    #[test]
    fn runner_counts_successes_and_failures() {
        let runner = runner();
        let found = runner.nth_largest(&[45, 23, 78, 12, 89, 34, 67], 3).unwrap();
        assert_eq!(found.value, 78);
        assert!(runner.nth_largest(&[5], 2).is_err());
        assert!(runner.nth_largest_text("1, x", 1).is_err());
        let snapshot = runner.metrics();
        assert_eq!(snapshot.processed, 1);
        assert_eq!(snapshot.errors, 2);
    }

    #[test]
    fn clones_share_metrics() {
        let runner = runner();
        let clone = runner.clone();
        clone.evens(3).unwrap();
        assert_eq!(runner.metrics().processed, 1);
    }

    #[test]
    fn multiply_text_parses_floats() {
        let product = runner().multiply_text("1 2\n3 4", "5 6\n7 8").unwrap();
        assert_eq!(product, array![[19.0, 22.0], [43.0, 50.0]]);
    }

    #[test]
    fn configured_limits_are_enforced() {
        let mut config = ServerConfig::default();
        config.limits.max_matrix_dim = 2;
        config.limits.max_numbers = 3;
        config.limits.max_even_count = 5;
        let runner = Runner::new(config);

        let big = MatrixHelper::identity::<i64>(3);
        let err = runner.multiply(big.view(), big.view()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
        assert!(runner.nth_largest(&[1, 2, 3, 4], 1).is_err());
        assert!(runner.evens(6).is_err());
        assert_eq!(runner.evens(5).unwrap(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn dimension_mismatch_passes_through() {
        let a = array![[1i64, 2, 3], [4, 5, 6]];
        let err = runner().multiply(a.view(), a.view()).unwrap_err();
        assert_eq!(
            err,
            CalcError::DimensionMismatch {
                left_cols: 3,
                right_rows: 2
            }
        );
    }
}
