pub mod app;
pub mod check;
pub mod cli;
pub mod config;
pub mod logging;
pub mod tool;
pub mod version;
