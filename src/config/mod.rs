mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_config, CONFIG_FILE_NAME,
};

use crate::core::{Framework, SourceLanguage};
use serde::{Deserialize, Serialize};

/// Default upper bound on the size of a scanned file (2 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// Root configuration structure for routemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RoutemapConfig {
    /// Which matchers run
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Which files are scanned
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionConfig {
    /// Enabled frameworks; registration order is kept whatever the order here
    #[serde(default = "default_frameworks")]
    pub frameworks: Vec<Framework>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            frameworks: default_frameworks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Glob patterns; matching paths are skipped
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default = "default_languages")]
    pub languages: Vec<SourceLanguage>,

    /// Files larger than this are skipped
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            languages: default_languages(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_frameworks() -> Vec<Framework> {
    Framework::ALL.to_vec()
}

fn default_languages() -> Vec<SourceLanguage> {
    SourceLanguage::ALL.to_vec()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl RoutemapConfig {
    /// Restrict detection to `frameworks` when the list is non-empty.
    pub fn with_frameworks(mut self, frameworks: &[Framework]) -> Self {
        if !frameworks.is_empty() {
            self.detection.frameworks = frameworks.to_vec();
        }
        self
    }
}
