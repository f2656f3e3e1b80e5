use crate::prelude::{CalcError, CalcResult};
use ndarray::{Array2, ArrayView2, LinalgScalar};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two 2D arrays; the left column count must match the right row count.
    pub fn multiply<A: LinalgScalar>(
        lhs: ArrayView2<A>,
        rhs: ArrayView2<A>,
    ) -> CalcResult<Array2<A>> {
        Self::ensure_non_empty(&lhs, "left")?;
        Self::ensure_non_empty(&rhs, "right")?;
        let (left_cols, right_rows) = (lhs.ncols(), rhs.nrows());
        if left_cols != right_rows {
            return Err(CalcError::DimensionMismatch {
                left_cols,
                right_rows,
            });
        }
        Ok(lhs.dot(&rhs))
    }

    pub fn identity<A: LinalgScalar>(n: usize) -> Array2<A> {
        Array2::eye(n)
    }

    /// Packs row vectors into a matrix, rejecting empty or ragged input.
    pub fn from_rows<A: Clone>(rows: &[Vec<A>]) -> CalcResult<Array2<A>> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(CalcError::InvalidInput("matrix has no cells".into()));
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(CalcError::InvalidInput(format!(
                "row {} has {} columns, expected {}",
                idx + 1,
                row.len(),
                width
            )));
        }
        let flat: Vec<A> = rows.iter().flatten().cloned().collect();
        Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|err| CalcError::InvalidInput(err.to_string()))
    }

    pub fn to_rows<A: Clone>(matrix: ArrayView2<A>) -> Vec<Vec<A>> {
        matrix.outer_iter().map(|row| row.to_vec()).collect()
    }

    fn ensure_non_empty<A>(matrix: &ArrayView2<A>, side: &str) -> CalcResult<()> {
        if matrix.is_empty() {
            return Err(CalcError::InvalidInput(format!("{} matrix has no cells", side)));
        }
        Ok(())
    }
}

/// Row-vector front end to [`MatrixHelper::multiply`].
pub fn multiply_matrices<A: LinalgScalar>(
    a: &[Vec<A>],
    b: &[Vec<A>],
) -> CalcResult<Vec<Vec<A>>> {
    let lhs = MatrixHelper::from_rows(a)?;
    let rhs = MatrixHelper::from_rows(b)?;
    let product = MatrixHelper::multiply(lhs.view(), rhs.view())?;
    Ok(MatrixHelper::to_rows(product.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn multiplies_two_by_two() {
        let product =
            multiply_matrices(&[vec![1, 2], vec![3, 4]], &[vec![5, 6], vec![7, 8]]).unwrap();
        assert_eq!(product, vec![vec![19, 22], vec![43, 50]]);
    }

    #[test]
    fn multiplies_rectangular_shapes() {
        let product = multiply_matrices(
            &[vec![1, 2, 3], vec![4, 5, 6]],
            &[vec![7, 8], vec![9, 10], vec![11, 12]],
        )
        .unwrap();
        assert_eq!(product, vec![vec![58, 64], vec![139, 154]]);
    }

    #[test]
    fn rejects_mismatched_inner_dimension() {
        let err = multiply_matrices(&[vec![1, 2, 3]], &[vec![1, 2], vec![3, 4]]).unwrap_err();
        assert_eq!(
            err,
            CalcError::DimensionMismatch {
                left_cols: 3,
                right_rows: 2
            }
        );
    }

    #[test]
    fn rejects_ragged_and_empty_rows() {
        let err = multiply_matrices(&[vec![1, 2], vec![3]], &[vec![1], vec![2]]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
        let err = multiply_matrices::<i64>(&[], &[vec![1]]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn identity_leaves_matrix_unchanged() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..=10 {
            let m = Array2::from_shape_fn((n, n), |_| rng.gen_range(-9i64..=9));
            let eye = MatrixHelper::identity::<i64>(n);
            assert_eq!(MatrixHelper::multiply(m.view(), eye.view()).unwrap(), m);
            assert_eq!(MatrixHelper::multiply(eye.view(), m.view()).unwrap(), m);
        }
    }

    #[test]
    fn cells_match_explicit_dot_products() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 6;
        let a = Array2::from_shape_fn((n, n), |_| rng.gen_range(-20i64..20));
        let b = Array2::from_shape_fn((n, n), |_| rng.gen_range(-20i64..20));
        let product = MatrixHelper::multiply(a.view(), b.view()).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected: i64 = (0..n).map(|p| a[[i, p]] * b[[p, j]]).sum();
                assert_eq!(product[[i, j]], expected);
            }
        }
    }

    #[test]
    fn float_matrices_use_native_precision() {
        let a = array![[0.5_f64, 1.5], [2.0, -1.0]];
        let b = array![[2.0_f64, 0.0], [0.0, 2.0]];
        let product = MatrixHelper::multiply(a.view(), b.view()).unwrap();
        assert_eq!(product, array![[1.0, 3.0], [4.0, -2.0]]);
    }
}
