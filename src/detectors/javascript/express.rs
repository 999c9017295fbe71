//! Express applications and routers.
//!
//! ```js
//! const app = express();
//! const router = express.Router();
//! router.post('/users', createUser);
//! ```

use super::detect_verb_routes;
use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::detectors::RouteMatcher;
use crate::parser::SyntaxTree;

const FACTORIES: &[&str] = &[
    "express",
    "express.Router",
    "Router",
    "require:express",
    "require:express.Router",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressMatcher;

impl RouteMatcher for ExpressMatcher {
    fn framework(&self) -> Framework {
        Framework::Express
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        SourceLanguage::JS_FAMILY
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        detect_verb_routes(file_path, tree, FACTORIES, Framework::Express)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn detect(source: &str, language: SourceLanguage) -> Vec<(String, String, usize, usize)> {
        let tree = parse(source, language).unwrap();
        ExpressMatcher
            .detect("server.js", &tree)
            .into_iter()
            .map(|r| {
                let c = r.primary_citation().unwrap();
                (r.method().to_string(), r.path().to_string(), c.start_line, c.end_line)
            })
            .collect()
    }

    #[test]
    fn test_app_and_router_routes() {
        let source = indoc! {r#"
            const express = require('express');
            const app = express();
            const router = express.Router();

            app.get('/health', (req, res) => res.send('ok'));
            router.post('/users/', createUser);
            router.delete(
              '/users/:id',
              removeUser,
            );
        "#};
        assert_eq!(
            detect(source, SourceLanguage::JavaScript),
            vec![
                ("get".into(), "/health".into(), 5, 5),
                ("post".into(), "/users".into(), 6, 6),
                ("delete".into(), "/users/:id".into(), 7, 10),
            ]
        );
    }

    #[test]
    fn test_unbound_receivers_are_ignored() {
        let source = indoc! {r#"
            const app = express();
            axios.get('/api/users');
            cache.get('key');
            app.get('/ok', handler);
            app.use('/static', serveStatic);
            app.get(`/template`, handler);
            app.get(pathVariable, handler);
        "#};
        assert_eq!(
            detect(source, SourceLanguage::JavaScript),
            vec![("get".into(), "/ok".into(), 4, 4)]
        );
    }

    #[test]
    fn test_typescript_router() {
        let source = indoc! {r#"
            import { Router } from 'express';
            const routes: Router = Router();
            routes.patch('/items/:id', async (req: Request, res: Response) => {
              res.json({});
            });
        "#};
        assert_eq!(
            detect(source, SourceLanguage::TypeScript),
            vec![("patch".into(), "/items/:id".into(), 3, 5)]
        );
    }

    #[test]
    fn test_no_receivers_no_routes() {
        let source = "fetch.get('/a');\nthing.post('/b', h);\n";
        assert!(detect(source, SourceLanguage::JavaScript).is_empty());
    }
}
