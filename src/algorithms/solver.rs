use crate::error::{EstimateError, Result};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

/// Solves `(YᵀY) x = b` against a Cholesky factorization computed once per model.
#[derive(Debug, Clone)]
pub struct GramSolver {
    features: usize,
    cholesky: Cholesky<f64, Dyn>,
}

impl GramSolver {
    /// Builds `YᵀY` from every item vector and factors it.
    pub fn from_item_vectors<'a, I>(features: usize, vectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [f32]>,
    {
        let mut yty = DMatrix::<f64>::zeros(features, features);

        for vector in vectors {
            if vector.len() != features {
                return Err(EstimateError::DimensionMismatch {
                    expected: features,
                    actual: vector.len(),
                });
            }
            let y = DVector::from_iterator(features, vector.iter().map(|v| f64::from(*v)));
            yty.ger(1.0, &y, &y, 1.0);
        }

        Self::from_gram_matrix(yty)
    }

    pub fn from_gram_matrix(matrix: DMatrix<f64>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(EstimateError::DimensionMismatch {
                expected: matrix.nrows(),
                actual: matrix.ncols(),
            });
        }

        let features = matrix.nrows();
        let cholesky = matrix.cholesky().ok_or(EstimateError::SingularMatrix)?;

        Ok(Self { features, cholesky })
    }

    pub fn identity(features: usize) -> Result<Self> {
        Self::from_gram_matrix(DMatrix::identity(features, features))
    }

    pub fn features(&self) -> usize {
        self.features
    }

    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        if b.len() != self.features {
            return Err(EstimateError::DimensionMismatch {
                expected: self.features,
                actual: b.len(),
            });
        }

        let rhs = DVector::from_column_slice(b);
        let x = self.cholesky.solve(&rhs);
        Ok(x.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.5, 0.0],
            vec![0.0, 1.0, -0.5],
            vec![0.3, 0.0, 1.0],
            vec![0.2, 0.2, 0.2],
        ]
    }

    #[test]
    fn test_solve_inverts_gram_matrix() {
        let items = items();
        let solver = GramSolver::from_item_vectors(3, items.iter().map(|v| v.as_slice())).unwrap();

        let b = vec![1.0, -2.0, 0.5];
        let x = solver.solve(&b).unwrap();

        // (YᵀY) x should reproduce b
        for row in 0..3 {
            let mut value = 0.0;
            for col in 0..3 {
                let yty: f64 = items
                    .iter()
                    .map(|y| f64::from(y[row]) * f64::from(y[col]))
                    .sum();
                value += yty * x[col];
            }
            assert!((value - b[row]).abs() < 1e-9, "row {} was {}", row, value);
        }
    }

    #[test]
    fn test_zero_maps_to_zero() {
        let items = items();
        let solver = GramSolver::from_item_vectors(3, items.iter().map(|v| v.as_slice())).unwrap();
        assert_eq!(solver.solve(&[0.0; 3]).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn test_identity() {
        let solver = GramSolver::identity(2).unwrap();
        assert_eq!(solver.features(), 2);
        assert_eq!(solver.solve(&[3.0, -1.0]).unwrap(), vec![3.0, -1.0]);
    }

    #[test]
    fn test_singular_matrix() {
        let items = vec![vec![1.0f32, 0.0], vec![2.0, 0.0]];
        let result = GramSolver::from_item_vectors(2, items.iter().map(|v| v.as_slice()));
        assert!(matches!(result, Err(EstimateError::SingularMatrix)));
    }

    #[test]
    fn test_no_items_is_singular() {
        let result = GramSolver::from_item_vectors(2, std::iter::empty());
        assert!(matches!(result, Err(EstimateError::SingularMatrix)));
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let solver = GramSolver::identity(3).unwrap();
        assert!(matches!(
            solver.solve(&[1.0, 2.0]),
            Err(EstimateError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
