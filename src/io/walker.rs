use crate::core::{Result, SourceLanguage};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Enumerates the source files of a project, honoring `.gitignore`.
pub struct FileWalker {
    root: PathBuf,
    languages: Vec<SourceLanguage>,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            languages: SourceLanguage::ALL.to_vec(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_languages(mut self, languages: Vec<SourceLanguage>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Matching files in sorted path order.
    ///
    /// Fails on an invalid ignore pattern or an unreadable directory entry.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let patterns = self
            .ignore_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_some_and(|t| t.is_file())
                && self.should_process(path, &patterns)
            {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path, patterns: &[glob::Pattern]) -> bool {
        let Some(language) = SourceLanguage::from_path(path) else {
            return false;
        };
        if !self.languages.contains(&language) {
            return false;
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !patterns
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

/// Supported source files under `root` for the given languages
pub fn find_project_files(root: &Path, languages: Vec<SourceLanguage>) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_languages(languages)
        .walk()
}
