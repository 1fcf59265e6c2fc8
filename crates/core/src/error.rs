//! Error types for GeoDissolve

use thiserror::Error;

/// Main error type for GeoDissolve operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidParameter`]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for GeoDissolve operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::invalid_parameter("operator", "Median", "unknown aggregation operator");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: operator = Median (unknown aggregation operator)"
        );
    }
}
