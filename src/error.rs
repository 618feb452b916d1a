use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EstimateError>;

#[derive(Debug, Error)]
pub enum EstimateError {
    /// The requested target item has no vector in the model.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// An observation's weight suffix is not a finite number.
    #[error("Malformed observation: {token}")]
    MalformedObservation { token: String },

    /// The request path named a target but no observed items.
    #[error("No item observations in request")]
    MissingObservations,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Gram matrix is singular or not positive definite")]
    SingularMatrix,

    #[error("No model is loaded")]
    ModelNotLoaded,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl EstimateError {
    /// True for errors caused by the request rather than the model or server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EstimateError::NotFound(_)
                | EstimateError::MalformedObservation { .. }
                | EstimateError::MissingObservations
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EstimateError::NotFound(_) => StatusCode::NOT_FOUND,
            EstimateError::MalformedObservation { .. } | EstimateError::MissingObservations => {
                StatusCode::BAD_REQUEST
            }
            EstimateError::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            EstimateError::DimensionMismatch { .. }
            | EstimateError::SingularMatrix
            | EstimateError::InvalidModel(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let malformed = EstimateError::MalformedObservation {
            token: "a=x".to_string(),
        };
        assert_eq!(EstimateError::NotFound("a".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(EstimateError::MissingObservations.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(EstimateError::ModelNotLoaded.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            EstimateError::SingularMatrix.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_are_the_4xx_ones() {
        let errors = [
            EstimateError::NotFound("a".into()),
            EstimateError::MalformedObservation { token: "a=x".into() },
            EstimateError::MissingObservations,
            EstimateError::ModelNotLoaded,
            EstimateError::DimensionMismatch { expected: 2, actual: 3 },
            EstimateError::SingularMatrix,
            EstimateError::InvalidModel("bad".into()),
        ];
        for err in errors {
            assert_eq!(err.is_client_error(), err.status_code().is_client_error(), "{}", err);
        }
    }
}
