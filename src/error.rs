//! Fatal install errors.

use std::path::PathBuf;

use thiserror::Error;

/// Download page shown when the Go toolchain is missing.
pub const GO_DOWNLOAD_URL: &str = "https://go.dev/dl/";

/// Every way the install step can fail. None of them are recovered from.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Go is required to build Viren. Please install Go from {GO_DOWNLOAD_URL}")]
    ToolchainUnavailable { program: String, reason: String },

    #[error("Failed to build Viren: {detail}")]
    BuildFailed { detail: String },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid build config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InstallError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
