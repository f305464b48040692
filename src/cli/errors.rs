//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed and the process exits non-zero.

use std::io;

use thiserror::Error;

use crate::content::ContentError;
use crate::record_store::StoreError;
use crate::resource::ResourceError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Config file already exists
    AlreadyInitialized,
    /// Store or content could not be opened
    BootFailed,
    /// A one-shot command failed
    CommandFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "RESTSERVICE_CLI_CONFIG_ERROR",
            Self::IoError => "RESTSERVICE_CLI_IO_ERROR",
            Self::AlreadyInitialized => "RESTSERVICE_CLI_ALREADY_INITIALIZED",
            Self::BootFailed => "RESTSERVICE_CLI_BOOT_FAILED",
            Self::CommandFailed => "RESTSERVICE_CLI_COMMAND_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {message}", .code.code())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Config file already present
    pub fn already_initialized(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Config file already exists: {}", path.display()),
        )
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::boot_failed(format!("Record store: {}", e))
    }
}

impl From<ContentError> for CliError {
    fn from(e: ContentError) -> Self {
        Self::boot_failed(format!("Content repository: {}", e))
    }
}

impl From<ResourceError> for CliError {
    fn from(e: ResourceError) -> Self {
        Self::new(CliErrorCode::CommandFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
