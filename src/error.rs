//! Fatal error classification
//!
//! Every variant ends the run with exit status 1. Config resolution
//! problems never reach this type; they fall through silently.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Ambient credential discovery failed
    #[error("Failed to initialize Azure credentials: {message}\nPlease ensure you are logged in with 'az login' or have appropriate credentials")]
    CredentialInit { message: String },

    /// Listing resource providers failed (auth, network, throttling)
    #[error("Error fetching resource types: {message}")]
    Enumeration { message: String },

    /// The output file could not be written
    #[error("Failed to save {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl GeneratorError {
    pub fn credential_init(error: &anyhow::Error) -> Self {
        GeneratorError::CredentialInit {
            message: format!("{error:#}"),
        }
    }

    pub fn enumeration(error: &anyhow::Error) -> Self {
        GeneratorError::Enumeration {
            message: crate::azure::http::format_azure_error(error),
        }
    }

    pub fn write(path: impl Into<PathBuf>, error: &anyhow::Error) -> Self {
        GeneratorError::Write {
            path: path.into(),
            message: format!("{error:#}"),
        }
    }
}
