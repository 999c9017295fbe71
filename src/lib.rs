// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod detectors;
pub mod io;
pub mod observability;
pub mod parser;

// Re-export commonly used types
pub use crate::core::{
    normalize_route_path, Error, Framework, ParseFailure, Result, RouteRecord, ScanReport,
    SourceCitation, SourceLanguage,
};

pub use crate::detectors::{DetectorRegistry, RouteMatcher};

pub use crate::config::{load_config, load_config_from_path, RoutemapConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::commands::scan::scan_project;
