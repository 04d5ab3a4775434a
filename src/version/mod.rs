//! Version layer: fetching latest versions and deciding whether to update
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ LocalProbe  │────▶│   Oracle    │◀────│  Registry   │
//! │ (installed) │     │ (decision)  │     │  (latest)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │ Registries  │
//!                                         │(github,pypi)│
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`oracle`]: Update decision policy and normalized version ordering
//! - [`registry`]: Registry trait for fetching the latest version
//! - [`registries`]: Concrete registry implementations (GitHub Releases, PyPI)
//! - [`error`]: Error types for registry and version parsing
//! - [`types`]: Sentinel versions and registry types

pub mod error;
pub mod oracle;
pub mod registries;
pub mod registry;
pub mod types;
