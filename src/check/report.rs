//! Check results and their text rendering

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::version::oracle::{Decision, evaluate};
use crate::version::types::Sentinel;

/// Status shown for a tool after a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    UpToDate,
    UpdateAvailable,
    NotInstalled,
    /// The installed version could not be determined
    LocalError,
    /// The latest version could not be determined
    RemoteUnavailable,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::UpToDate => "up to date",
            ToolStatus::UpdateAvailable => "update available",
            ToolStatus::NotInstalled => "not installed",
            ToolStatus::LocalError => "local error",
            ToolStatus::RemoteUnavailable => "remote unavailable",
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Decision> for ToolStatus {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::UnresolvedLocalState(Sentinel::NotInstalled) => ToolStatus::NotInstalled,
            Decision::UnresolvedLocalState(_) => ToolStatus::LocalError,
            Decision::UnresolvedRemoteState(_) => ToolStatus::RemoteUnavailable,
            Decision::Outdated => ToolStatus::UpdateAvailable,
            Decision::Identical | Decision::UpToDate | Decision::Ahead => ToolStatus::UpToDate,
        }
    }
}

/// Result of checking one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReport {
    pub tool: String,
    /// Raw installed version or sentinel
    pub current: String,
    /// Raw latest version or sentinel
    pub latest: String,
    pub update_needed: bool,
    pub status: ToolStatus,
    pub checked_at: DateTime<Utc>,
}

impl ToolReport {
    pub fn new(tool: &str, current: String, latest: String) -> Self {
        let decision = evaluate(&current, &latest);
        Self {
            tool: tool.to_string(),
            update_needed: decision.update_needed(),
            status: ToolStatus::from(&decision),
            current,
            latest,
            checked_at: Utc::now(),
        }
    }
}

/// Result of an update attempt for one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub tool: String,
    /// Whether the installer was run
    pub attempted: bool,
    pub success: bool,
    pub message: String,
}

impl UpdateOutcome {
    pub fn skipped(tool: &str, reason: &str) -> Self {
        Self {
            tool: tool.to_string(),
            attempted: false,
            success: true,
            message: reason.to_string(),
        }
    }

    pub fn updated(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            attempted: true,
            success: true,
            message: "updated".to_string(),
        }
    }

    pub fn failed(tool: &str, message: String) -> Self {
        Self {
            tool: tool.to_string(),
            attempted: true,
            success: false,
            message,
        }
    }
}

/// Render reports as an aligned text table
pub fn render_reports(reports: &[ToolReport]) -> String {
    let headers = ["TOOL", "CURRENT", "LATEST", "STATUS"];
    let rows: Vec<[&str; 4]> = reports
        .iter()
        .map(|r| {
            [
                r.tool.as_str(),
                r.current.as_str(),
                r.latest.as_str(),
                r.status.as_str(),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

/// Render update outcomes as an aligned text table
pub fn render_outcomes(outcomes: &[UpdateOutcome]) -> String {
    let headers = ["TOOL", "RESULT", "DETAIL"];
    let rows: Vec<[&str; 3]> = outcomes
        .iter()
        .map(|o| {
            let result = match (o.attempted, o.success) {
                (false, _) => "skipped",
                (true, true) => "ok",
                (true, false) => "failed",
            };
            [o.tool.as_str(), result, o.message.as_str()]
        })
        .collect();
    render_table(&headers, &rows)
}

fn render_table<const N: usize>(headers: &[&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = headers.map(|h| h.len());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(headers)
        .chain(rows)
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
