use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# routemap configuration

[detection]
frameworks = ["django", "flask", "express", "koa", "fastify", "nest"]

[scan]
ignore = [
    "**/node_modules/**",
    "**/venv/**",
    "**/.venv/**",
    "**/dist/**",
    "**/*.min.js",
]
languages = ["python", "javascript", "typescript", "tsx"]
max_file_bytes = 2097152
"#;

/// Write a default `.routemap.toml` into `directory`.
pub fn init_config(directory: &Path, force: bool) -> Result<PathBuf> {
    let config_path = directory.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
