//! Update executor: runs a tool's install/upgrade command

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::tool::error::InstallError;
use crate::tool::types::ToolSpec;

/// Number of trailing stderr bytes kept in failure reports
const STDERR_TAIL_BYTES: usize = 2048;

/// Trait for installing or upgrading a tool
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UpdateExecutor: Send + Sync {
    async fn update(&self, tool: &ToolSpec) -> Result<(), InstallError>;
}

/// Executor that runs the tool's configured install command
pub struct CommandExecutor {
    install_dir: Option<PathBuf>,
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(install_dir: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            install_dir,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl UpdateExecutor for CommandExecutor {
    async fn update(&self, tool: &ToolSpec) -> Result<(), InstallError> {
        let install = tool
            .install
            .as_ref()
            .ok_or_else(|| InstallError::NotConfigured(tool.name.clone()))?;

        info!(
            "Updating {}: {} {}",
            tool.name,
            install.program,
            install.args.join(" ")
        );

        let mut command = Command::new(&install.program);
        command
            .args(&install.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.install_dir {
            // `go install` drops binaries into GOBIN
            command.env("GOBIN", dir);
        }

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| InstallError::Timeout(self.timeout))??;

        debug!(
            "Installer for {} wrote {} bytes of output",
            tool.name,
            output.stdout.len()
        );

        if !output.status.success() {
            return Err(InstallError::Failed {
                code: output.status.code(),
                stderr: tail(&String::from_utf8_lossy(&output.stderr)),
            });
        }

        Ok(())
    }
}

fn tail(text: &str) -> String {
    let text = text.trim();
    let mut start = text.len().saturating_sub(STDERR_TAIL_BYTES);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}
