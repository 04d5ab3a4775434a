//! Local version probe: runs a tool's version command

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::tool::adapters::VersionExtractor;
use crate::tool::error::ProbeError;
use crate::tool::types::ToolSpec;

/// Trait for detecting the installed version of a tool
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LocalProbe: Send + Sync {
    /// Returns the raw installed version (e.g., "v3.1.0")
    async fn installed_version(&self, tool: &ToolSpec) -> Result<String, ProbeError>;
}

/// Probe that spawns the tool with its version arguments
pub struct CommandProbe {
    install_dir: Option<PathBuf>,
    timeout: Duration,
    extractor: VersionExtractor,
}

impl CommandProbe {
    pub fn new(install_dir: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            install_dir,
            timeout,
            extractor: VersionExtractor::new(),
        }
    }

    /// Resolve the executable: absolute paths as-is, then the install
    /// directory, then a bare name looked up on PATH
    pub fn resolve_binary(&self, binary: &str) -> PathBuf {
        resolve_binary_in(self.install_dir.as_deref(), binary)
    }
}

fn resolve_binary_in(install_dir: Option<&Path>, binary: &str) -> PathBuf {
    let path = Path::new(binary);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    install_dir
        .map(|dir| dir.join(binary))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

#[async_trait::async_trait]
impl LocalProbe for CommandProbe {
    async fn installed_version(&self, tool: &ToolSpec) -> Result<String, ProbeError> {
        let program = self.resolve_binary(&tool.binary);
        debug!("Probing {} with {:?} {:?}", tool.name, program, tool.version_args);

        let mut command = Command::new(&program);
        command
            .args(&tool.version_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ProbeError::NotInstalled(tool.binary.clone()),
                _ => ProbeError::Io(e),
            })?;

        if !output.status.success() {
            // Several tools exit non-zero after printing their version
            debug!("{} version command exited with {}", tool.name, output.status);
        }

        // Some tools print their version to stderr
        let combined = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        self.extractor
            .extract(tool.adapter, &combined)
            .ok_or_else(|| ProbeError::Unparseable(combined.trim().to_string()))
    }
}
