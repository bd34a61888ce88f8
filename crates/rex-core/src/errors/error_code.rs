//! RexErrorCode trait for boundary conversion.

/// Trait for mapping REX errors to stable error code strings.
/// Every error enum implements this so collaborators (CLI, service
/// wrappers) can branch on a code instead of parsing messages.
pub trait RexErrorCode {
    /// Returns the error code string (e.g., "OUT_OF_RANGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
pub const NON_FINITE: &str = "NON_FINITE";
pub const DUPLICATE_ID: &str = "DUPLICATE_ID";
