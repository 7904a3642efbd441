//! Request-level error taxonomy.

use thiserror::Error;

/// Failure of a single calculation request.
///
/// `MissingInput`, `LocationNotFound` and `InvalidLocationData` are
/// descriptive, recoverable failures. `Internal` covers faults such as the
/// bundled dataset being unreadable; callers should report it generically
/// and log the cause.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// A required request field is absent, non-finite or not positive.
    #[error("{0}")]
    MissingInput(String),

    /// Neither the primary store nor the bundled dataset knows the city.
    #[error("Sorry, data for '{0}' is not available yet.")]
    LocationNotFound(String),

    /// The record exists but a field needed for the calculation is unusable.
    #[error("Location data for '{city}' is invalid: {reason}")]
    InvalidLocationData { city: String, reason: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HarvestError {
    pub fn invalid_data(city: &str, reason: impl Into<String>) -> Self {
        HarvestError::InvalidLocationData {
            city: city.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_city() {
        let err = HarvestError::LocationNotFound("Atlantis".to_string());
        assert_eq!(
            err.to_string(),
            "Sorry, data for 'Atlantis' is not available yet."
        );
    }

    #[test]
    fn internal_is_transparent() {
        let err: HarvestError = anyhow::anyhow!("dataset unreadable").into();
        assert!(matches!(err, HarvestError::Internal(_)));
        assert_eq!(err.to_string(), "dataset unreadable");
    }
}
