//! Registry implementations for fetching the latest tool versions

pub mod github;
pub mod pypi;

pub use github::GitHubRegistry;
pub use pypi::PypiRegistry;
