//! koa-router / @koa/router instances.
//!
//! ```js
//! const router = new Router();
//! router.get('/users', listUsers);
//! ```
//!
//! A `prefix` passed to the constructor is runtime URL composition and is not
//! applied.

use super::detect_verb_routes;
use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::detectors::RouteMatcher;
use crate::parser::SyntaxTree;

const FACTORIES: &[&str] = &["new Router", "new KoaRouter"];

#[derive(Debug, Clone, Copy, Default)]
pub struct KoaMatcher;

impl RouteMatcher for KoaMatcher {
    fn framework(&self) -> Framework {
        Framework::Koa
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        SourceLanguage::JS_FAMILY
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        detect_verb_routes(file_path, tree, FACTORIES, Framework::Koa)
    }
}
