// Test utility module for routemap integration tests
#![allow(dead_code)]

use routemap::RouteRecord;
use std::fs;
use std::path::Path;

/// (method, path, start line, end line, framework) per record
pub type RouteSummary = (String, String, usize, usize, String);

pub fn summarize(records: &[RouteRecord]) -> Vec<RouteSummary> {
    records
        .iter()
        .map(|r| {
            let c = r.primary_citation().unwrap();
            (
                r.method().to_string(),
                r.path().to_string(),
                c.start_line,
                c.end_line,
                r.framework().to_string(),
            )
        })
        .collect()
}

/// Method and path only
pub fn routes(records: &[RouteRecord]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.method().to_string(), r.path().to_string()))
        .collect()
}

pub fn route(method: &str, path: &str) -> (String, String) {
    (method.to_string(), path.to_string())
}

/// Write `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}
