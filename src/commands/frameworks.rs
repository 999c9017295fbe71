use crate::detectors::DetectorRegistry;
use std::io::Write;

/// List the built-in matchers in registration order with their languages.
pub fn list_frameworks<W: Write>(mut writer: W) -> anyhow::Result<()> {
    let registry = DetectorRegistry::new();
    for matcher in registry.matchers() {
        let languages: Vec<&str> = matcher.languages().iter().map(|l| l.as_str()).collect();
        writeln!(
            writer,
            "{:<8} {}",
            matcher.framework().as_str(),
            languages.join(", ")
        )?;
    }
    Ok(())
}
