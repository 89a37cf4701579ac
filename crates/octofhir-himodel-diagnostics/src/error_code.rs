//! Value model error codes following a structured numbering system
//!
//! Error code ranges:
//! - HIM0001-HIM0099: Literal errors (a primitive literal does not match its grammar)
//! - HIM0100-HIM0199: Type model errors (unknown types, broken base chains)
//! - HIM0200-HIM0299: Construction errors (values that cannot be represented)
//! - HIM0400-HIM0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a literal error (0001-0099)
    pub const fn is_literal_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a type model error (0100-0199)
    pub const fn is_type_model_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a construction error (0200-0299)
    pub const fn is_construction_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HIM{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Literal errors (0001-0099)
    map.insert(1, ErrorInfo::new("Invalid date literal")
        .with_help("Expected YYYY, YYYY-MM or YYYY-MM-DD"));
    map.insert(2, ErrorInfo::new("Invalid date-time literal")
        .with_help("A time component requires seconds and a Z or +HH:MM offset"));
    map.insert(3, ErrorInfo::new("Invalid time literal")
        .with_help("Expected HH:MM:SS with an optional fraction"));
    map.insert(4, ErrorInfo::new("Invalid decimal literal"));
    map.insert(5, ErrorInfo::new("Invalid string literal"));
    map.insert(6, ErrorInfo::new("Invalid code literal"));
    map.insert(7, ErrorInfo::new("Invalid id literal")
        .with_help("Ids are 1 to 64 characters of A-Z, a-z, 0-9, '-' and '.'"));
    map.insert(8, ErrorInfo::new("Invalid markdown literal"));
    map.insert(9, ErrorInfo::new("Invalid uri literal")
        .with_help("URIs must not contain whitespace"));
    map.insert(10, ErrorInfo::new("Invalid quantity comparator"));

    // Type model errors (0100-0199)
    map.insert(100, ErrorInfo::new("Unknown type"));
    map.insert(101, ErrorInfo::new("Duplicate type definition"));
    map.insert(102, ErrorInfo::new("Unresolved base type")
        .with_help("Every base type must be built in or defined in the same model"));
    map.insert(103, ErrorInfo::new("Circular base type chain"));
    map.insert(104, ErrorInfo::new("Not a resource type")
        .with_help("Resource types must derive from Resource"));

    // Construction errors (0200-0299)
    map.insert(200, ErrorInfo::new("Value not representable"));
    map.insert(201, ErrorInfo::new("Field out of range"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(406, ErrorInfo::new("Invalid format"));

    map
});

// Literal errors
pub const HIM0001: ErrorCode = ErrorCode::new(1);
pub const HIM0002: ErrorCode = ErrorCode::new(2);
pub const HIM0003: ErrorCode = ErrorCode::new(3);
pub const HIM0004: ErrorCode = ErrorCode::new(4);
pub const HIM0005: ErrorCode = ErrorCode::new(5);
pub const HIM0006: ErrorCode = ErrorCode::new(6);
pub const HIM0007: ErrorCode = ErrorCode::new(7);
pub const HIM0008: ErrorCode = ErrorCode::new(8);
pub const HIM0009: ErrorCode = ErrorCode::new(9);
pub const HIM0010: ErrorCode = ErrorCode::new(10);

// Type model errors
pub const HIM0100: ErrorCode = ErrorCode::new(100);
pub const HIM0101: ErrorCode = ErrorCode::new(101);
pub const HIM0102: ErrorCode = ErrorCode::new(102);
pub const HIM0103: ErrorCode = ErrorCode::new(103);
pub const HIM0104: ErrorCode = ErrorCode::new(104);

// Construction errors
pub const HIM0200: ErrorCode = ErrorCode::new(200);
pub const HIM0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const HIM0400: ErrorCode = ErrorCode::new(400);
pub const HIM0401: ErrorCode = ErrorCode::new(401);
pub const HIM0402: ErrorCode = ErrorCode::new(402);
pub const HIM0406: ErrorCode = ErrorCode::new(406);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(HIM0001.to_string(), "HIM0001");
        assert_eq!(HIM0102.to_string(), "HIM0102");
    }

    #[test]
    fn test_error_categories() {
        assert!(HIM0002.is_literal_error());
        assert!(!HIM0002.is_type_model_error());

        assert!(HIM0100.is_type_model_error());
        assert!(!HIM0100.is_literal_error());

        assert!(HIM0200.is_construction_error());
        assert!(HIM0401.is_system_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(HIM0007.info().description, "Invalid id literal");
        assert!(HIM0007.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
