//! CLI command implementations for routemap.
//!
//! - **scan**: detect routes in a file or project tree
//! - **frameworks**: list the built-in matchers
//! - **init**: write a default `.routemap.toml`

pub mod frameworks;
pub mod init;
pub mod scan;

pub use frameworks::list_frameworks;
pub use init::init_config;
pub use scan::{handle_scan, scan_project, ScanOptions};
