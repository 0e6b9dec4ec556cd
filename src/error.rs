//! Error types for datelish operations.

use thiserror::Error;

use crate::format::Endian;

/// Error type for every fallible operation in the crate.
///
/// Lookups that can simply miss (month names, month lengths) return `None`
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// A year that must be four digits (1000-9999) was not.
    #[error("The {operation} method expects a four digit year, got {year}")]
    FourDigitYear {
        operation: &'static str,
        year: String,
    },

    /// `prepend0` was handed a fractional or non-numeric value.
    #[error("The prepend0 method expects a whole number, got {0:?}")]
    NotWholeNumber(String),

    /// An endian date string had fewer than three digit groups.
    #[error("The {format} format needs three numeric groups, found {found}")]
    MissingComponent { format: Endian, found: usize },

    /// Text that should hold a date and time could not be read.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// The computed date falls outside what the host calendar can represent.
    #[error("The {operation} method produced a date outside the supported range")]
    OutOfRange { operation: &'static str },
}

pub type Result<T> = std::result::Result<T, DateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_digit_year_message() {
        let err = DateError::FourDigitYear {
            operation: "years",
            year: "999".to_owned(),
        };
        assert_eq!(err.to_string(), "The years method expects a four digit year, got 999");
    }

    #[test]
    fn test_not_whole_number_message() {
        let err = DateError::NotWholeNumber("5.5".to_owned());
        assert_eq!(err.to_string(), "The prepend0 method expects a whole number, got \"5.5\"");
    }

    #[test]
    fn test_missing_component_message() {
        let err = DateError::MissingComponent {
            format: Endian::Little,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "The little-endian format needs three numeric groups, found 2"
        );
    }

    #[test]
    fn test_invalid_format_message() {
        let err = DateError::InvalidFormat("yesterday-ish".to_owned());
        assert_eq!(err.to_string(), "Invalid date format: yesterday-ish");
    }

    #[test]
    fn test_error_is_send_sync_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<DateError>();
    }
}
