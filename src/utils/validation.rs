use crate::error::{EstimateError, Result};

pub fn validate_features(features: usize) -> Result<()> {
    if features == 0 {
        return Err(EstimateError::InvalidModel(
            "Feature count must be greater than 0".to_string(),
        ));
    }

    if features > 2048 {
        return Err(EstimateError::InvalidModel(format!(
            "Feature count too large: {} (max 2048)",
            features
        )));
    }

    Ok(())
}

pub fn validate_item_vector(item_id: &str, vector: &[f32], expected_dim: usize) -> Result<()> {
    if vector.len() != expected_dim {
        return Err(EstimateError::InvalidModel(format!(
            "Item {} has dimension {}, expected {}",
            item_id,
            vector.len(),
            expected_dim
        )));
    }

    // NaN or Infinity would poison YᵀY
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(EstimateError::InvalidModel(format!(
            "Item {} vector contains invalid values (NaN or Infinity)",
            item_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_features() {
        assert!(validate_features(10).is_ok());
        assert!(validate_features(0).is_err());
        assert!(validate_features(4096).is_err());
    }

    #[test]
    fn test_validate_item_vector() {
        assert!(validate_item_vector("a", &[0.1, 0.2, 0.3], 3).is_ok());
        assert!(validate_item_vector("a", &[0.1, 0.2], 3).is_err());
        assert!(validate_item_vector("a", &[f32::NAN, 0.2, 0.3], 3).is_err());
    }
}
