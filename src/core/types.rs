use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::errors::Error;

/// Source languages the engine can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub const ALL: [SourceLanguage; 4] = [
        SourceLanguage::Python,
        SourceLanguage::JavaScript,
        SourceLanguage::TypeScript,
        SourceLanguage::Tsx,
    ];

    /// The JavaScript family shares one set of route idioms.
    pub const JS_FAMILY: &'static [SourceLanguage] = &[
        SourceLanguage::JavaScript,
        SourceLanguage::TypeScript,
        SourceLanguage::Tsx,
    ];

    /// Get file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceLanguage::Python => &["py", "pyw", "pyi"],
            SourceLanguage::JavaScript => &["js", "jsx", "mjs", "cjs"],
            SourceLanguage::TypeScript => &["ts", "mts", "cts"],
            SourceLanguage::Tsx => &["tsx"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Resolve the language from a file path's extension.
    ///
    /// Only the extension is inspected; the path is never opened.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::Tsx => "tsx",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(SourceLanguage::Python),
            "javascript" | "js" => Ok(SourceLanguage::JavaScript),
            "typescript" | "ts" => Ok(SourceLanguage::TypeScript),
            "tsx" => Ok(SourceLanguage::Tsx),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}

/// Web frameworks with a registered route matcher.
///
/// Declaration order is the registry's registration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Django,
    Flask,
    Express,
    Koa,
    Fastify,
    Nest,
}

impl Framework {
    pub const ALL: [Framework; 6] = [
        Framework::Django,
        Framework::Flask,
        Framework::Express,
        Framework::Koa,
        Framework::Fastify,
        Framework::Nest,
    ];

    /// Name written into `metadata.framework`
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Django => "django",
            Framework::Flask => "flask",
            Framework::Express => "express",
            Framework::Koa => "koa",
            Framework::Fastify => "fastify",
            Framework::Nest => "nest",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|framework| framework.as_str() == wanted)
            .ok_or_else(|| Error::UnknownFramework(s.trim().to_string()))
    }
}
