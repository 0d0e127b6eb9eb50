//! CLI command handlers, one per file.

mod config;
mod fetch;
mod resolve;

pub use config::run_config;
pub use fetch::run_fetch;
pub use resolve::run_resolve;
