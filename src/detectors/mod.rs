//! Route detection engine.
//!
//! A [`DetectorRegistry`] holds one [`RouteMatcher`] per framework idiom.
//! For each file it parses the source once and runs every matcher that
//! accepts the tree's language, concatenating their records in registration
//! order. A file that fails to parse has no routes.
//!
//! Registration order of the built-in matchers is fixed:
//! Django, Flask, Express, Koa, Fastify, Nest.

pub mod django;
pub mod flask;
pub mod javascript;
pub mod normalize;

use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::parser::{self, SyntaxTree};
use tracing::{debug, trace};

pub use django::DjangoMatcher;
pub use flask::FlaskMatcher;
pub use javascript::{ExpressMatcher, FastifyMatcher, KoaMatcher, NestMatcher};

/// Recognizes one framework's route declarations in a syntax tree.
///
/// Implementations are stateless: the output depends only on the file path
/// and the tree, and a failed extraction at one site never stops the scan of
/// the rest of the tree.
pub trait RouteMatcher: Send + Sync {
    fn framework(&self) -> Framework;

    /// Languages whose trees this matcher understands
    fn languages(&self) -> &'static [SourceLanguage];

    /// Records in source order
    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord>;
}

fn builtin_matcher(framework: Framework) -> Box<dyn RouteMatcher> {
    match framework {
        Framework::Django => Box::new(DjangoMatcher),
        Framework::Flask => Box::new(FlaskMatcher),
        Framework::Express => Box::new(ExpressMatcher),
        Framework::Koa => Box::new(KoaMatcher),
        Framework::Fastify => Box::new(FastifyMatcher),
        Framework::Nest => Box::new(NestMatcher),
    }
}

/// Ordered set of route matchers.
pub struct DetectorRegistry {
    matchers: Vec<Box<dyn RouteMatcher>>,
}

impl DetectorRegistry {
    /// Create a registry with all built-in matchers.
    pub fn new() -> Self {
        Self::with_frameworks(&Framework::ALL)
    }

    /// A registry without any matcher
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Built-in matchers for the given frameworks only.
    ///
    /// Registration order is kept regardless of the order of `frameworks`.
    pub fn with_frameworks(frameworks: &[Framework]) -> Self {
        let matchers = Framework::ALL
            .into_iter()
            .filter(|framework| frameworks.contains(framework))
            .map(builtin_matcher)
            .collect();
        Self { matchers }
    }

    /// Append a matcher after the ones already registered.
    pub fn register(&mut self, matcher: Box<dyn RouteMatcher>) {
        self.matchers.push(matcher);
    }

    pub fn matchers(&self) -> impl Iterator<Item = &dyn RouteMatcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Detect routes in a Python source file.
    pub fn detect_all(&self, file_path: &str, code: &str) -> Vec<RouteRecord> {
        self.detect_source(file_path, code, SourceLanguage::Python)
    }

    /// Detect routes in a file, picking the grammar from its extension.
    ///
    /// Files with an unsupported extension have no routes.
    pub fn detect_file(&self, file_path: &str, code: &str) -> Vec<RouteRecord> {
        match SourceLanguage::from_path(file_path) {
            Some(language) => self.detect_source(file_path, code, language),
            None => {
                trace!(file = file_path, "unsupported extension, skipping");
                Vec::new()
            }
        }
    }

    /// Parse once as `language`, then run every matcher for that language.
    pub fn detect_source(
        &self,
        file_path: &str,
        code: &str,
        language: SourceLanguage,
    ) -> Vec<RouteRecord> {
        if !self.accepts(language) {
            return Vec::new();
        }

        let tree = match parser::parse(code, language) {
            Ok(tree) => tree,
            Err(failure) => {
                debug!(file = file_path, %failure, "parse failed, no routes");
                return Vec::new();
            }
        };

        self.run_matchers(file_path, &tree)
    }

    /// Run every matcher accepting the tree's language against an existing tree.
    pub fn run_matchers(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        let language = tree.language();
        let mut records = Vec::new();

        for matcher in self
            .matchers
            .iter()
            .filter(|m| m.languages().contains(&language))
        {
            let found = matcher.detect(file_path, tree);
            trace!(
                file = file_path,
                framework = %matcher.framework(),
                routes = found.len(),
                "matcher finished"
            );
            records.extend(found);
        }

        records
    }

    /// Whether any registered matcher understands `language`
    pub fn accepts(&self, language: SourceLanguage) -> bool {
        self.matchers
            .iter()
            .any(|m| m.languages().contains(&language))
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
