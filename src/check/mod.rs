//! Check layer: runs check cycles over the configured tools
//!
//! # Modules
//!
//! - [`runner`]: Parallel probing, update decisions and update execution
//! - [`report`]: Per-tool results (`ToolReport`, `UpdateOutcome`) and table rendering
//! - [`worker`]: Background refresh worker with stale-result discarding

pub mod report;
pub mod runner;
pub mod worker;
