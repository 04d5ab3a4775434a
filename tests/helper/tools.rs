//! Tool specification test utilities
//!
//! Tools are backed by `sh -c` scripts so the real `CommandProbe` and
//! `CommandExecutor` can run without the actual security tools installed.

use toolsentry::tool::types::{InstallCommand, RemoteSource, ToolSpec, VersionAdapter};

/// A GitHub-released tool whose version command prints `output`
pub fn scripted_github_tool(name: &str, output: &str) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        binary: "sh".to_string(),
        version_args: vec!["-c".to_string(), format!("echo '{}'", output)],
        adapter: VersionAdapter::ProjectDiscovery,
        source: RemoteSource::Github(format!("projectdiscovery/{}", name)),
        install: None,
    }
}

/// A PyPI-released tool whose version command prints `output`
#[allow(dead_code)]
pub fn scripted_pypi_tool(name: &str, output: &str) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        binary: "sh".to_string(),
        version_args: vec!["-c".to_string(), format!("echo '{}'", output)],
        adapter: VersionAdapter::Sqlmap,
        source: RemoteSource::Pypi(name.to_string()),
        install: None,
    }
}

/// A tool whose binary does not exist
#[allow(dead_code)]
pub fn missing_tool(name: &str) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        binary: format!("toolsentry-missing-{}", name),
        version_args: vec!["-version".to_string()],
        adapter: VersionAdapter::ProjectDiscovery,
        source: RemoteSource::Github(format!("projectdiscovery/{}", name)),
        install: None,
    }
}

/// Attach an install command that runs a shell script
#[allow(dead_code)]
pub fn with_install_script(mut tool: ToolSpec, script: &str) -> ToolSpec {
    tool.install = Some(InstallCommand::new("sh", &["-c", script]));
    tool
}
