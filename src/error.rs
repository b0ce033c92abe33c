//! Error types for AgriLog
//!
//! This module provides structured error types for field validation, record
//! storage, and configuration handling. Validation errors are user-facing and
//! non-fatal; storage and configuration errors carry enough context to be
//! reported in the status line without crashing the application.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::Path;

/// Top-level error type for AgriLog operations
#[derive(Debug)]
pub enum AppError {
    /// Field validation failures
    Validation(ValidationError),
    /// Record storage errors
    Storage(StorageError),
    /// Configuration errors
    Config(ConfigError),
}

/// Field validation failures
///
/// Every variant is handled locally by the field that produced it: the field
/// records the error, switches on its error indicator, and the form stays
/// usable. Nothing here propagates to a global error channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is empty at focus-out
    MissingValue,
    /// Text does not parse as a real calendar date
    InvalidDate { input: String },
    /// Text cannot be parsed as a decimal number
    InvalidNumber { input: String },
    /// Numeric value below the effective minimum
    BelowMinimum { min: f64 },
    /// Numeric value above the effective maximum
    AboveMaximum { max: f64 },
    /// Typed prefix matches no candidate (key-level only)
    NoMatchingChoice { input: String },
}

impl ValidationError {
    /// Message shown next to the field
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingValue => "A value is required".to_string(),
            ValidationError::InvalidDate { .. } => "Invalid date".to_string(),
            ValidationError::InvalidNumber { input } =>
                format!("Invalid number string: {input}"),
            ValidationError::BelowMinimum { min } =>
                format!("Value is too low (min {min})"),
            ValidationError::AboveMaximum { max } =>
                format!("Value is too high (max {max})"),
            ValidationError::NoMatchingChoice { input } =>
                format!("No matching choice for '{input}'"),
        }
    }
}

/// Record storage errors
#[derive(Debug)]
pub enum StorageError {
    /// Data directory could not be created
    CreateDirectory { path: String, error: String },
    /// Record file could not be opened for append
    OpenFile { path: String, error: String },
    /// Record row could not be written
    WriteRecord { path: String, error: String },
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// No user configuration directory on this platform
    NoConfigDirectory,
    /// Configuration file could not be read
    ReadFile { path: String, error: String },
    /// Configuration file does not parse
    ParseFile { path: String, error: String },
    /// Configuration file could not be written
    WriteFile { path: String, error: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "Validation error: {err}"),
            AppError::Storage(err) => write!(f, "Storage error: {err}"),
            AppError::Config(err) => write!(f, "Configuration error: {err}"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CreateDirectory { path, error } =>
                write!(f, "Cannot create data directory '{path}': {error}"),
            StorageError::OpenFile { path, error } =>
                write!(f, "Cannot open record file '{path}': {error}"),
            StorageError::WriteRecord { path, error } =>
                write!(f, "Cannot write record to '{path}': {error}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDirectory =>
                write!(f, "No user configuration directory available"),
            ConfigError::ReadFile { path, error } =>
                write!(f, "Cannot read configuration file '{path}': {error}"),
            ConfigError::ParseFile { path, error } =>
                write!(f, "Configuration file '{path}' does not parse: {error}"),
            ConfigError::WriteFile { path, error } =>
                write!(f, "Cannot write configuration file '{path}': {error}"),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Config(err) => Some(err),
        }
    }
}

impl StdError for ValidationError {}
impl StdError for StorageError {}
impl StdError for ConfigError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl StorageError {
    pub fn create_directory(path: &Path, err: io::Error) -> Self {
        StorageError::CreateDirectory {
            path: path.display().to_string(),
            error: err.to_string(),
        }
    }

    pub fn open_file(path: &Path, err: io::Error) -> Self {
        StorageError::OpenFile {
            path: path.display().to_string(),
            error: err.to_string(),
        }
    }

    pub fn write_record(path: &Path, err: io::Error) -> Self {
        StorageError::WriteRecord {
            path: path.display().to_string(),
            error: err.to_string(),
        }
    }
}

/// Result type alias for AgriLog operations
pub type AppResult<T> = Result<T, AppError>;

/// Specialized result types for different components
pub type StorageResult<T> = Result<T, StorageError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
