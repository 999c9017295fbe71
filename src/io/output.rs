use crate::core::{RouteRecord, ScanReport};
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ScanReport) -> anyhow::Result<()>;
}

/// Build the writer for `format` over `writer`.
pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One colored line per route followed by a summary
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_route(&mut self, route: &RouteRecord) -> anyhow::Result<()> {
        let location = match route.primary_citation() {
            Some(c) if c.start_line == c.end_line => format!("{}:{}", c.file_path, c.start_line),
            Some(c) => format!("{}:{}-{}", c.file_path, c.start_line, c.end_line),
            None => "-".to_string(),
        };
        writeln!(
            self.writer,
            "{} {} {} {}",
            method_label(route.method()),
            route.path().bold(),
            location.dimmed(),
            format!("[{}]", route.framework()).cyan()
        )?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {} routes in {} of {} files",
            "Found".bold(),
            report.routes.len(),
            report.files_with_routes,
            report.files_scanned
        )?;

        for (framework, count) in report.counts_by_framework() {
            writeln!(self.writer, "  {framework:<8} {count}")?;
        }

        if report.parse_failures > 0 {
            writeln!(
                self.writer,
                "{}",
                format!("{} files could not be parsed", report.parse_failures).yellow()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ScanReport) -> anyhow::Result<()> {
        for route in &report.routes {
            self.write_route(route)?;
        }
        self.write_summary(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Upper-case method padded to a fixed column, colored by verb
fn method_label(method: &str) -> ColoredString {
    let label = format!("{:<8}", method.to_uppercase());
    match method {
        "get" | "head" | "options" => label.green(),
        "post" => label.blue(),
        "put" | "patch" => label.yellow(),
        "delete" => label.red(),
        _ => label.normal(),
    }
}
