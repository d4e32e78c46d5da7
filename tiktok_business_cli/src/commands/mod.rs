//! CLI subcommand implementations.

pub mod auth;
pub mod report;
pub mod resources;
pub mod upload;
