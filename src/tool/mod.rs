//! Tool layer: what is managed and how it is probed and installed
//!
//! - [`types`]: Tool specifications (`ToolSpec`, `RemoteSource`, `VersionAdapter`)
//! - [`adapters`]: Per-tool version extraction from command output
//! - [`probe`]: Local version probe (`LocalProbe`, `CommandProbe`)
//! - [`installer`]: Update executor (`UpdateExecutor`, `CommandExecutor`)
//! - [`error`]: Error types for probing and installing

pub mod adapters;
pub mod error;
pub mod installer;
pub mod probe;
pub mod types;

pub use installer::{CommandExecutor, UpdateExecutor};
pub use probe::{CommandProbe, LocalProbe};
pub use types::{InstallCommand, RemoteSource, ToolSpec, VersionAdapter};
