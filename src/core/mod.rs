pub mod errors;
pub mod types;

pub use errors::{Error, ParseFailure, RecordError, Result};
pub use types::{Framework, SourceLanguage};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key carrying the framework name on every record
pub const FRAMEWORK_KEY: &str = "framework";

/// Location of a matched construct in the analyzed file.
///
/// `file_path` is whatever the caller supplied; it is echoed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceCitation {
    /// Lines are 1-based; an end before the start collapses to the start line.
    pub fn new(file_path: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        let start_line = start_line.max(1);
        Self {
            file_path: file_path.into(),
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    /// Citation for a construct the parser cannot give a distinct end for
    pub fn single_line(file_path: impl Into<String>, line: usize) -> Self {
        Self::new(file_path, line, line)
    }
}

/// One detected HTTP route.
///
/// Built through [`RouteRecord::new`] or validated deserialization, so every
/// record has a non-empty lowercase method, a path starting with `/` and at
/// least one citation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRouteRecord")]
pub struct RouteRecord {
    method: String,
    path: String,
    citations: Vec<SourceCitation>,
    metadata: BTreeMap<String, String>,
}

impl RouteRecord {
    pub fn new(
        method: &str,
        raw_path: &str,
        citation: SourceCitation,
        framework: Framework,
    ) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(FRAMEWORK_KEY.to_string(), framework.as_str().to_string());

        Self {
            method: method.trim().to_lowercase(),
            path: normalize_route_path(raw_path),
            citations: vec![citation],
            metadata,
        }
    }

    /// Attach an extra metadata entry. The framework entry cannot be replaced.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if key != FRAMEWORK_KEY {
            self.metadata.insert(key, value.into());
        }
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn citations(&self) -> &[SourceCitation] {
        &self.citations
    }

    /// The first citation
    pub fn primary_citation(&self) -> Option<&SourceCitation> {
        self.citations.first()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn framework(&self) -> &str {
        self.metadata
            .get(FRAMEWORK_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Wire shape of [`RouteRecord`] before its invariants are checked
#[derive(Deserialize)]
struct RawRouteRecord {
    method: String,
    path: String,
    citations: Vec<SourceCitation>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl TryFrom<RawRouteRecord> for RouteRecord {
    type Error = RecordError;

    fn try_from(raw: RawRouteRecord) -> std::result::Result<Self, Self::Error> {
        let method = raw.method.trim().to_lowercase();
        if method.is_empty() {
            return Err(RecordError::EmptyMethod);
        }
        if raw.citations.is_empty() {
            return Err(RecordError::NoCitations);
        }

        let citations = raw
            .citations
            .into_iter()
            .map(|c| SourceCitation::new(c.file_path, c.start_line, c.end_line))
            .collect();

        Ok(Self {
            method,
            path: normalize_route_path(&raw.path),
            citations,
            metadata: raw.metadata,
        })
    }
}

/// Aggregated result of scanning a project tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub files_scanned: usize,
    pub files_with_routes: usize,
    /// Files whose source did not parse; they contribute no routes
    pub parse_failures: usize,
    /// Walk order, then engine order within each file
    pub routes: Vec<RouteRecord>,
}

impl ScanReport {
    /// Routes grouped by framework name, in first-seen order
    pub fn counts_by_framework(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for route in &self.routes {
            match counts.iter_mut().find(|(name, _)| name == route.framework()) {
                Some((_, count)) => *count += 1,
                None => counts.push((route.framework().to_string(), 1)),
            }
        }
        counts
    }
}

/// Strip every leading and trailing `/` from a raw path literal, then prefix
/// exactly one.
pub fn normalize_route_path(raw: &str) -> String {
    format!("/{}", raw.trim_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn citation() -> SourceCitation {
        SourceCitation::single_line("app/urls.py", 3)
    }

    #[test]
    fn test_normalize_route_path() {
        assert_eq!(normalize_route_path("users/"), "/users");
        assert_eq!(normalize_route_path("/users/"), "/users");
        assert_eq!(normalize_route_path("//api//v1//"), "/api//v1");
        assert_eq!(normalize_route_path(""), "/");
        assert_eq!(normalize_route_path("/"), "/");
        assert_eq!(normalize_route_path("<int:id>/edit"), "/<int:id>/edit");
    }

    #[test]
    fn test_route_record_normalizes_on_construction() {
        let record = RouteRecord::new("POST", "items/", citation(), Framework::Flask);
        assert_eq!(record.method(), "post");
        assert_eq!(record.path(), "/items");
        assert_eq!(record.framework(), "flask");
        assert_eq!(record.citations().len(), 1);
    }

    #[test]
    fn test_with_metadata_keeps_framework() {
        let record = RouteRecord::new("get", "/", citation(), Framework::Django)
            .with_metadata("framework", "other")
            .with_metadata("callee", "re_path");
        assert_eq!(record.framework(), "django");
        assert_eq!(record.metadata().get("callee").unwrap(), "re_path");
    }

    #[test]
    fn test_citation_end_never_precedes_start() {
        let c = SourceCitation::new("a.py", 5, 2);
        assert_eq!((c.start_line, c.end_line), (5, 5));
        let c = SourceCitation::new("a.py", 0, 0);
        assert_eq!((c.start_line, c.end_line), (1, 1));
    }

    #[test]
    fn test_counts_by_framework() {
        let report = ScanReport {
            routes: vec![
                RouteRecord::new("get", "/a", citation(), Framework::Flask),
                RouteRecord::new("get", "/b", citation(), Framework::Django),
                RouteRecord::new("post", "/a", citation(), Framework::Flask),
            ],
            ..Default::default()
        };
        assert_eq!(
            report.counts_by_framework(),
            vec![("flask".to_string(), 2), ("django".to_string(), 1)]
        );
    }

    #[test]
    fn test_deserialize_rejects_record_without_citations() {
        let json = r#"{"method":"get","path":"/x","citations":[],"metadata":{}}"#;
        let err = serde_json::from_str::<RouteRecord>(json).unwrap_err();
        assert!(err.to_string().contains("no citations"));

        let json = r#"{"method":"  ","path":"/x","citations":[{"filePath":"a.py","startLine":1,"endLine":1}]}"#;
        assert!(serde_json::from_str::<RouteRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_normalizes_like_new() {
        let json = r#"{
            "method": " POST ",
            "path": "items/",
            "citations": [{"filePath": "app.py", "startLine": 0, "endLine": 0}],
            "metadata": {"framework": "flask"}
        }"#;
        let record: RouteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record,
            RouteRecord::new(
                "post",
                "/items",
                SourceCitation::single_line("app.py", 1),
                Framework::Flask
            )
        );
        assert_eq!(record.primary_citation().unwrap().start_line, 1);
    }

    #[test]
    fn test_report_survives_json_round_trip() {
        let report = ScanReport {
            files_scanned: 1,
            files_with_routes: 1,
            parse_failures: 0,
            routes: vec![RouteRecord::new("get", "a/", citation(), Framework::Django)],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(serde_json::from_str::<ScanReport>(&json).unwrap(), report);
    }

    #[test]
    fn test_serialized_shape() {
        let record = RouteRecord::new(
            "get",
            "users/",
            SourceCitation::new("urls.py", 2, 4),
            Framework::Django,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "method": "get",
                "path": "/users",
                "citations": [{"filePath": "urls.py", "startLine": 2, "endLine": 4}],
                "metadata": {"framework": "django"}
            })
        );
    }
}
