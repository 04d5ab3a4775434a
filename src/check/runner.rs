//! Check cycle: probe every tool, decide, and optionally update

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::check::report::{ToolReport, UpdateOutcome};
use crate::config::{Config, FETCH_STAGGER_DELAY_MS};
use crate::tool::error::ProbeError;
use crate::tool::installer::UpdateExecutor;
use crate::tool::probe::LocalProbe;
use crate::tool::types::ToolSpec;
use crate::version::error::RegistryError;
use crate::version::registries::{GitHubRegistry, PypiRegistry};
use crate::version::registry::Registry;
use crate::version::types::{ERROR, NOT_FOUND, NOT_INSTALLED, RegistryType};

pub type RegistryMap = HashMap<RegistryType, Arc<dyn Registry>>;

/// Build the registry clients described by the configuration
pub fn build_registries(config: &Config) -> Result<RegistryMap, RegistryError> {
    let timeout = config.timeouts.fetch();
    let github = GitHubRegistry::new(&config.registries.github.base_url, timeout)?
        .with_token(config.registries.github.token.clone());
    let pypi = PypiRegistry::new(&config.registries.pypi.base_url, timeout)?;

    let mut registries: RegistryMap = HashMap::new();
    registries.insert(RegistryType::GitHub, Arc::new(github));
    registries.insert(RegistryType::PyPI, Arc::new(pypi));
    Ok(registries)
}

/// Installed version, or a sentinel when it cannot be determined
async fn local_version<P: LocalProbe + ?Sized>(probe: &P, tool: &ToolSpec) -> String {
    match probe.installed_version(tool).await {
        Ok(version) => version,
        Err(ProbeError::NotInstalled(binary)) => {
            info!("{} is not installed ({} not found)", tool.name, binary);
            NOT_INSTALLED.to_string()
        }
        Err(e) => {
            warn!("Failed to probe installed version of {}: {}", tool.name, e);
            ERROR.to_string()
        }
    }
}

/// Latest published version, or a sentinel when it cannot be determined
async fn remote_version(registries: &RegistryMap, tool: &ToolSpec) -> String {
    let registry_type = tool.source.registry_type();
    let package_name = tool.source.package();

    let Some(registry) = registries.get(&registry_type) else {
        error!(
            "No registry configured for {} ({})",
            tool.name,
            registry_type.as_str()
        );
        return ERROR.to_string();
    };

    match registry.fetch_latest_version(package_name).await {
        Ok(version) => version,
        Err(RegistryError::NotFound(_)) => {
            warn!(
                "{}/{} not found in registry",
                registry_type.as_str(),
                package_name
            );
            NOT_FOUND.to_string()
        }
        Err(e) => {
            error!(
                "Failed to fetch latest version for {}/{}: {}",
                registry_type.as_str(),
                package_name,
                e
            );
            ERROR.to_string()
        }
    }
}

async fn check_tool<P: LocalProbe + ?Sized>(
    probe: &P,
    registries: &RegistryMap,
    tool: &ToolSpec,
) -> ToolReport {
    let (current, latest) = tokio::join!(
        local_version(probe, tool),
        remote_version(registries, tool)
    );

    let report = ToolReport::new(&tool.name, current, latest);
    info!(
        "{}: current={:?} latest={:?} update_needed={} ({})",
        report.tool, report.current, report.latest, report.update_needed, report.status
    );
    report
}

/// Check all tools and return one report per tool, in input order
///
/// Tools are checked in parallel with staggered start times to avoid rate limiting.
/// Probe and registry errors are logged and collapsed to sentinel versions.
pub async fn check_tools<P: LocalProbe + ?Sized>(
    probe: &P,
    registries: &RegistryMap,
    tools: &[ToolSpec],
) -> Vec<ToolReport> {
    let futures = tools.iter().enumerate().map(|(i, tool)| {
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        async move {
            sleep(delay).await;
            check_tool(probe, registries, tool).await
        }
    });

    join_all(futures).await
}

/// Run the installer for every tool that needs an update (all tools when forced)
///
/// Installers run one at a time; package managers do not tolerate concurrent runs.
pub async fn update_tools<E: UpdateExecutor + ?Sized>(
    executor: &E,
    tools: &[ToolSpec],
    reports: &[ToolReport],
    force: bool,
) -> Vec<UpdateOutcome> {
    let mut outcomes = Vec::with_capacity(reports.len());

    for report in reports {
        let Some(tool) = tools.iter().find(|t| t.name == report.tool) else {
            warn!("No tool definition for report {}", report.tool);
            continue;
        };

        if !force && !report.update_needed {
            outcomes.push(UpdateOutcome::skipped(&tool.name, report.status.as_str()));
            continue;
        }

        let outcome = match executor.update(tool).await {
            Ok(()) => {
                info!("Updated {} (was {})", tool.name, report.current);
                UpdateOutcome::updated(&tool.name)
            }
            Err(e) => {
                error!("Failed to update {}: {}", tool.name, e);
                UpdateOutcome::failed(&tool.name, e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

/// Everything needed to run a check cycle repeatedly
pub struct Checker {
    probe: Arc<dyn LocalProbe>,
    registries: RegistryMap,
    tools: Vec<ToolSpec>,
}

impl Checker {
    pub fn new(probe: Arc<dyn LocalProbe>, registries: RegistryMap, tools: Vec<ToolSpec>) -> Self {
        Self {
            probe,
            registries,
            tools,
        }
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub async fn run(&self) -> Vec<ToolReport> {
        check_tools(self.probe.as_ref(), &self.registries, &self.tools).await
    }
}
