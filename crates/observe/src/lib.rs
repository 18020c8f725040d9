//! Logging setup shared by the binaries and the tests of this workspace.

pub mod config;
pub mod tracing;

pub use config::Config;
