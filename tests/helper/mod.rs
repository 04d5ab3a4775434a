//! Shared test utilities

pub mod registry;
pub mod tools;

#[allow(unused_imports)]
pub use registry::*;
#[allow(unused_imports)]
pub use tools::*;
