//! Per-tool version extraction from command output
//!
//! Output formats handled:
//! - ProjectDiscovery: `[INF] Current Version: v2.6.3`, `[INF] Nuclei Engine Version: v3.1.0`
//! - sqlmap: `1.8.3#stable`
//! - Generic: first dotted number, e.g. `Nmap version 7.94 ( https://nmap.org )`

use regex::Regex;

use crate::tool::types::VersionAdapter;

/// Extracts version strings from raw version-command output
pub struct VersionExtractor {
    /// Match: `Current Version: v1.2.3` / `Engine Version: v1.2.3`
    project_discovery_re: Regex,
    /// Match: `1.8.3#stable` at the start of a line
    sqlmap_re: Regex,
    /// Match: first `1.2` / `v1.2.3` token
    generic_re: Regex,
}

impl VersionExtractor {
    pub fn new() -> Self {
        Self {
            project_discovery_re: Regex::new(
                r"(?i)(?:current|engine)\s+version:\s*(v?\d+(?:\.\d+)+)",
            )
            .unwrap(),
            sqlmap_re: Regex::new(r"(?m)^\s*(\d+(?:\.\d+)+)(?:#\S+)?\s*$").unwrap(),
            generic_re: Regex::new(r"\bv?(\d+(?:\.\d+)+)").unwrap(),
        }
    }

    /// Extract the version for the given adapter, or None if the output has none
    pub fn extract(&self, adapter: VersionAdapter, output: &str) -> Option<String> {
        match adapter {
            VersionAdapter::ProjectDiscovery => self.project_discovery(output),
            VersionAdapter::Sqlmap => self.sqlmap(output),
            VersionAdapter::Generic => self.generic(output),
        }
    }

    fn project_discovery(&self, output: &str) -> Option<String> {
        let caps = self.project_discovery_re.captures(output)?;
        Some(caps[1].to_string())
    }

    fn sqlmap(&self, output: &str) -> Option<String> {
        // Older releases print a banner before the version line
        let caps = self.sqlmap_re.captures(output)?;
        Some(caps[1].to_string())
    }

    fn generic(&self, output: &str) -> Option<String> {
        let caps = self.generic_re.captures(output)?;
        Some(caps[1].to_string())
    }
}

impl Default for VersionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
