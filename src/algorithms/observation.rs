use crate::error::{EstimateError, Result};
use crate::models::Observation;

/// Weight given to an observation that names an item without `=value`.
pub const DEFAULT_OBSERVATION_VALUE: f64 = 1.0;

/// Parses a single `itemID` or `itemID=value` token.
///
/// The token is split at the first `=`. Everything after it must parse as a
/// finite float; surrounding whitespace around the number is tolerated.
pub fn parse_observation(token: &str) -> Result<Observation> {
    match token.split_once('=') {
        None => Ok(Observation::new(token, DEFAULT_OBSERVATION_VALUE)),
        Some((item_id, raw_value)) => {
            let malformed = || EstimateError::MalformedObservation {
                token: token.to_string(),
            };
            let value = raw_value.trim().parse::<f64>().map_err(|_| malformed())?;
            if !value.is_finite() {
                return Err(malformed());
            }
            Ok(Observation::new(item_id, value))
        }
    }
}

/// Parses every token in order. The first malformed token fails the whole batch.
pub fn parse_observations<I, S>(tokens: I) -> Result<Vec<Observation>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| parse_observation(token.as_ref()))
        .collect()
}
