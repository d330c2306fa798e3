//! Utility modules.

/// Date/time serialization helpers shared by providers.
pub mod datetime;

/// Log sanitization and secret redaction.
pub mod log_sanitizer;
