/*
[INPUT]:  Public API exports for the digipay-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod commands;
pub mod config;

// Re-export main types for convenience
pub use cli::{Cli, Command, GlobalArgs};
pub use commands::execute;
pub use config::build_client;
