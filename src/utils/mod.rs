use crate::error::{EstimateError, Result};

pub mod validation;

/// Dot product of the anonymous user vector with an item factor vector.
pub fn dot(user: &[f64], item: &[f32]) -> Result<f64> {
    if user.len() != item.len() {
        tracing::error!(
            "Dimension mismatch scoring user vector ({}) against item vector ({})",
            user.len(),
            item.len()
        );
        return Err(EstimateError::DimensionMismatch {
            expected: user.len(),
            actual: item.len(),
        });
    }

    Ok(user
        .iter()
        .zip(item.iter())
        .map(|(u, i)| u * f64::from(*i))
        .sum())
}

/// `acc += weight * vector`, widening the vector to f64.
pub fn add_scaled(acc: &mut [f64], weight: f64, vector: &[f32]) {
    for (a, v) in acc.iter_mut().zip(vector.iter()) {
        *a += weight * f64::from(*v);
    }
}

pub fn norm(vector: &[f64]) -> f64 {
    vector.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let user = vec![1.0, 2.0, 3.0];
        let item = vec![0.5f32, 0.0, -1.0];
        assert!((dot(&user, &item).unwrap() - (-2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let user = vec![1.0, 2.0];
        let item = vec![1.0f32, 2.0, 3.0];
        assert!(matches!(
            dot(&user, &item),
            Err(EstimateError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_add_scaled() {
        let mut acc = vec![1.0, 1.0];
        add_scaled(&mut acc, 2.0, &[0.5, -1.0]);
        assert_eq!(acc, vec![2.0, -1.0]);
    }

    #[test]
    fn test_norm() {
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(norm(&[]), 0.0);
    }
}
