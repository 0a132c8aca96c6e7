//! Error handling for the location resolver
//!
//! Three failure kinds reach callers: a malformed pincode, a pincode the postal
//! service does not know, and transport or payload failures from either
//! external service. None of them is fatal; the form stays usable.

use thiserror::Error;

/// Result alias used by every fallible resolver operation.
pub type Result<T> = std::result::Result<T, LocationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Input rejected before any network call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The postal service answered but had no data for the pincode.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure, non-success HTTP status or unusable response body.
    #[error("Network error: {0}")]
    Network(String),
}

impl LocationError {
    /// Short message suitable for an inline form hint.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please enter a valid 6-digit pincode.",
            Self::NotFound(_) => "Invalid pincode or data not found.",
            Self::Network(_) => "Error fetching data. Please try manually.",
        }
    }
}

impl From<reqwest::Error> for LocationError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_per_kind() {
        assert_eq!(
            LocationError::Validation("len 5".into()).user_message(),
            "Please enter a valid 6-digit pincode."
        );
        assert_eq!(
            LocationError::NotFound("110000".into()).user_message(),
            "Invalid pincode or data not found."
        );
        assert!(LocationError::Network("timeout".into())
            .to_string()
            .starts_with("Network error"));
    }
}
