use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Binary not found: {0}")]
    NotInstalled(String),

    #[error("Version command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to run version command: {0}")]
    Io(#[from] std::io::Error),

    #[error("No version found in output: {0:?}")]
    Unparseable(String),
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("No install command configured for {0}")]
    NotConfigured(String),

    #[error("Failed to start installer: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Installer timed out after {0:?}")]
    Timeout(Duration),

    #[error("Installer exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}
