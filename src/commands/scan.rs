use crate::config::{self, RoutemapConfig};
use crate::core::{Framework, Result, RouteRecord, ScanReport};
use crate::detectors::DetectorRegistry;
use crate::io::{self, FileWalker, OutputFormat};
use crate::parser;
use anyhow::Context;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info, trace, warn};

pub struct ScanOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub frameworks: Vec<Framework>,
    pub config_file: Option<PathBuf>,
    pub jobs: usize,
}

pub fn handle_scan(options: ScanOptions) -> anyhow::Result<()> {
    let settings = resolve_config(&options)?.with_frameworks(&options.frameworks);

    let report = scan_project(&options.path, &settings, options.jobs)
        .with_context(|| format!("Failed to scan {}", options.path.display()))?;

    info!(
        files = report.files_scanned,
        routes = report.routes.len(),
        "scan finished"
    );

    match &options.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            io::create_writer(options.format, std::io::BufWriter::new(file)).write_report(&report)
        }
        None => io::create_writer(options.format, std::io::stdout().lock()).write_report(&report),
    }
}

fn resolve_config(options: &ScanOptions) -> anyhow::Result<RoutemapConfig> {
    if let Some(path) = &options.config_file {
        return Ok(config::load_config_from_path(path)?);
    }

    let start = if options.path.is_file() {
        options.path.parent().unwrap_or(Path::new("."))
    } else {
        options.path.as_path()
    };
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    Ok(config::load_config(&start))
}

/// What happened to one file of the scan
#[derive(Debug)]
enum FileOutcome {
    Routes(Vec<RouteRecord>),
    ParseFailure,
    Skipped,
}

/// Detect every route under `root`.
///
/// `jobs` bounds the worker count; `0` uses the global rayon pool.
pub fn scan_project(root: &Path, config: &RoutemapConfig, jobs: usize) -> Result<ScanReport> {
    let files = FileWalker::new(root.to_path_buf())
        .with_languages(config.scan.languages.clone())
        .with_ignore_patterns(config.scan.ignore.clone())
        .walk()?;
    debug!(root = %root.display(), files = files.len(), "walked project");

    let registry = DetectorRegistry::with_frameworks(&config.detection.frameworks);
    let max_bytes = config.scan.max_file_bytes;

    let run = || -> Vec<FileOutcome> {
        files
            .par_iter()
            .map(|path| scan_file(&registry, root, path, max_bytes))
            .collect()
    };

    let outcomes = if jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run)
    } else {
        run()
    };

    Ok(aggregate(outcomes))
}

fn aggregate(outcomes: Vec<FileOutcome>) -> ScanReport {
    let mut report = ScanReport::default();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Routes(routes) => {
                report.files_scanned += 1;
                if !routes.is_empty() {
                    report.files_with_routes += 1;
                }
                report.routes.extend(routes);
            }
            FileOutcome::ParseFailure => {
                report.files_scanned += 1;
                report.parse_failures += 1;
            }
            FileOutcome::Skipped => {}
        }
    }
    report
}

fn scan_file(registry: &DetectorRegistry, root: &Path, path: &Path, max_bytes: u64) -> FileOutcome {
    let shown = display_path(root, path);
    let _span = debug_span!("scan_file", file = %shown).entered();

    let Some(language) = crate::core::SourceLanguage::from_path(path) else {
        return FileOutcome::Skipped;
    };
    if !registry.accepts(language) {
        trace!(%language, "no enabled matcher for language, skipping");
        return FileOutcome::Skipped;
    }

    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => {
            warn!(
                "Skipping {}: {} bytes exceeds the {} byte limit",
                shown,
                meta.len(),
                max_bytes
            );
            return FileOutcome::Skipped;
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Skipping {}: {}", shown, e);
            return FileOutcome::Skipped;
        }
    }

    let code = match fs::read_to_string(path) {
        Ok(code) => code,
        Err(e) => {
            warn!("Skipping {}: {}", shown, e);
            return FileOutcome::Skipped;
        }
    };

    match parser::parse(&code, language) {
        Ok(tree) => FileOutcome::Routes(registry.run_matchers(&shown, &tree)),
        Err(failure) => {
            debug!(%failure, "parse failed, no routes");
            FileOutcome::ParseFailure
        }
    }
}

/// `path` relative to `root` with `/` separators; the file name when `root`
/// is the file itself.
fn display_path(root: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => path.file_name().map(Path::new).unwrap_or(path),
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path(Path::new("/repo"), Path::new("/repo/app/urls.py")),
            "app/urls.py"
        );
        assert_eq!(
            display_path(Path::new("/repo/urls.py"), Path::new("/repo/urls.py")),
            "urls.py"
        );
    }

    #[test]
    fn test_aggregate_counts_outcomes() {
        let route = RouteRecord::new(
            "get",
            "/a",
            crate::core::SourceCitation::single_line("a.py", 1),
            Framework::Flask,
        );
        let report = aggregate(vec![
            FileOutcome::Routes(vec![route.clone(), route]),
            FileOutcome::Routes(Vec::new()),
            FileOutcome::ParseFailure,
            FileOutcome::Skipped,
        ]);
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_with_routes, 1);
        assert_eq!(report.parse_failures, 1);
        assert_eq!(report.routes.len(), 2);
    }
}
