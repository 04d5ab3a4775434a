//! Common types describing a managed tool

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::version::types::RegistryType;

/// How to pull a version number out of a tool's version output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionAdapter {
    /// ProjectDiscovery tools (`[INF] Current Version: v2.6.3`)
    ProjectDiscovery,
    /// sqlmap (`1.8.3#stable`)
    Sqlmap,
    /// First dotted number in the output
    #[default]
    Generic,
}

/// Where the latest version of a tool is published
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteSource {
    /// GitHub repository, `owner/repo`
    Github(String),
    /// PyPI package name
    Pypi(String),
}

impl RemoteSource {
    pub fn registry_type(&self) -> RegistryType {
        match self {
            RemoteSource::Github(_) => RegistryType::GitHub,
            RemoteSource::Pypi(_) => RegistryType::PyPI,
        }
    }

    /// Registry-specific package identifier
    pub fn package(&self) -> &str {
        match self {
            RemoteSource::Github(repo) => repo,
            RemoteSource::Pypi(package) => package,
        }
    }
}

/// Command that installs or upgrades a tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstallCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl InstallCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// A managed command-line tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    /// Tool name, taken from the key in the tools map
    #[serde(skip)]
    pub name: String,
    /// Executable name or absolute path
    pub binary: String,
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,
    #[serde(default)]
    pub adapter: VersionAdapter,
    pub source: RemoteSource,
    #[serde(default)]
    pub install: Option<InstallCommand>,
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

impl ToolSpec {
    fn project_discovery(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            binary: name.to_string(),
            version_args: vec!["-version".to_string()],
            adapter: VersionAdapter::ProjectDiscovery,
            source: RemoteSource::Github(format!("projectdiscovery/{}", name)),
            install: Some(InstallCommand::new(
                "go",
                &["install", "-v", &format!("{}@latest", module)],
            )),
        }
    }
}

/// Tools managed when the configuration does not list any
pub fn default_tools() -> IndexMap<String, ToolSpec> {
    let sqlmap = ToolSpec {
        name: "sqlmap".to_string(),
        binary: "sqlmap".to_string(),
        version_args: default_version_args(),
        adapter: VersionAdapter::Sqlmap,
        source: RemoteSource::Pypi("sqlmap".to_string()),
        install: Some(InstallCommand::new(
            "python3",
            &["-m", "pip", "install", "--user", "--upgrade", "sqlmap"],
        )),
    };

    [
        ToolSpec::project_discovery("nuclei", "github.com/projectdiscovery/nuclei/v3/cmd/nuclei"),
        ToolSpec::project_discovery(
            "subfinder",
            "github.com/projectdiscovery/subfinder/v2/cmd/subfinder",
        ),
        ToolSpec::project_discovery("httpx", "github.com/projectdiscovery/httpx/cmd/httpx"),
        ToolSpec::project_discovery("katana", "github.com/projectdiscovery/katana/cmd/katana"),
        sqlmap,
    ]
    .into_iter()
    .map(|tool| (tool.name.clone(), tool))
    .collect()
}
