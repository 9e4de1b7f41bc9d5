//! Error handling for the partbin CLI
//!
//! Errors keep their source chain and carry the exit code the process should
//! end with.

use std::error::Error;
use std::fmt;

use partbin::InventoryError;

use crate::exit_codes::{EXIT_ERROR, EXIT_FAILURE, EXIT_SUCCESS};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            let cause = err.to_string();
            if !result.contains(&cause) {
                result.push_str(&format!("\n  Caused by: {cause}"));
            }
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<InventoryError> for CliError {
    fn from(error: InventoryError) -> Self {
        let exit_code = if error.is_user_error() {
            EXIT_FAILURE
        } else {
            EXIT_ERROR
        };
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self {
            message: format!("{error:#}"),
            exit_code: EXIT_ERROR,
            source: None,
        }
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code, "command failed");
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}
