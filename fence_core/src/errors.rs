//! # Error Types
//!
//! Structured error types for fence_core. Every user action (load prices,
//! calculate, save results) reports failures through [`CalcError`], so a
//! front end can show the message and leave its prior state untouched.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length_m.to_string(),
//!             "Value must not be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fence_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for pricing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A form field holds text that is not an acceptable number
    #[error("Invalid input for '{field}': '{value}' - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No price row matches the selected configuration
    #[error("No prices found for {metal_type}, profile {profile_height} mm, thickness {thickness} mm")]
    ConfigNotFound {
        metal_type: String,
        profile_height: f64,
        thickness: f64,
    },

    /// A price needed for a requested line item is absent from the matching row
    #[error("Missing required price field: {field}")]
    MissingField { field: String },

    /// A required column is absent from the price table header
    #[error("Price table '{path}' has no '{column}' column")]
    MissingColumn { column: String, path: String },

    /// A cell in the price table could not be interpreted
    #[error("Price table '{path}', row {row}, column '{column}': {reason}")]
    InvalidData {
        path: String,
        row: usize,
        column: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Calculation requested before any price table was loaded
    #[error("No price table loaded - load prices first")]
    NoPriceTable,

    /// Export requested before any calculation was run
    #[error("Nothing to save - run a calculation first")]
    NoResult,

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file or environment could not be read
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigNotFound error
    pub fn config_not_found(metal_type: impl Into<String>, profile_height: f64, thickness: f64) -> Self {
        CalcError::ConfigNotFound {
            metal_type: metal_type.into(),
            profile_height,
            thickness,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(column: impl Into<String>, path: impl Into<String>) -> Self {
        CalcError::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create an InvalidData error (`row` is the 1-based spreadsheet row)
    pub fn invalid_data(
        path: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidData {
            path: path.into(),
            row,
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the price table contents rather than the form
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CalcError::MissingColumn { .. } | CalcError::InvalidData { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MissingColumn { .. } => "MISSING_COLUMN",
            CalcError::InvalidData { .. } => "INVALID_DATA",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::NoPriceTable => "NO_PRICE_TABLE",
            CalcError::NoResult => "NO_RESULT",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::config_not_found("steel", 20.0, 0.45);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"ConfigNotFound\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("gate_price").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::NoResult.error_code(), "NO_RESULT");
        assert_eq!(
            CalcError::invalid_input("length", "abc", "Not a number").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_data_error_classification() {
        assert!(CalcError::missing_column("base_price", "prices.csv").is_data_error());
        assert!(CalcError::invalid_data("prices.csv", 3, "thickness", "empty").is_data_error());
        assert!(!CalcError::NoPriceTable.is_data_error());
    }

    #[test]
    fn test_config_not_found_message() {
        let error = CalcError::config_not_found("Zinc", 20.0, 0.5);
        assert_eq!(
            error.to_string(),
            "No prices found for Zinc, profile 20 mm, thickness 0.5 mm"
        );
    }
}
