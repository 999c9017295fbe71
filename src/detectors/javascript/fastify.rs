//! Fastify instances: verb shorthands and the full `route` declaration.
//!
//! ```js
//! const fastify = Fastify({ logger: true });
//! fastify.get('/health', handler);
//! fastify.route({ method: ['GET', 'HEAD'], url: '/items', handler });
//! ```

use super::{collect_receivers, property_value, receiver_calls, verb_route, ReceiverCall};
use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::detectors::normalize::citation_for;
use crate::detectors::RouteMatcher;
use crate::parser::literals::js_string_value;
use crate::parser::{significant_children, unwrap_parens, SyntaxTree};
use tree_sitter::Node;

const FACTORIES: &[&str] = &["fastify", "Fastify", "require:fastify"];

const DEFAULT_METHOD: &str = "get";

#[derive(Debug, Clone, Copy, Default)]
pub struct FastifyMatcher;

impl RouteMatcher for FastifyMatcher {
    fn framework(&self) -> Framework {
        Framework::Fastify
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        SourceLanguage::JS_FAMILY
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        let receivers = collect_receivers(tree, FACTORIES);
        if receivers.is_empty() {
            return Vec::new();
        }

        let mut records = Vec::new();
        for call in receiver_calls(tree, &receivers) {
            if call.method == "route" {
                records.extend(route_declaration(file_path, &call, tree).unwrap_or_default());
            } else {
                records.extend(verb_route(file_path, &call, tree, Framework::Fastify));
            }
        }
        records
    }
}

/// `receiver.route({ method, url, ... })`: one record per method
fn route_declaration(
    file_path: &str,
    call: &ReceiverCall<'_>,
    tree: &SyntaxTree<'_>,
) -> Option<Vec<RouteRecord>> {
    let options = unwrap_parens(*call.arguments.first()?);
    if options.kind() != "object" {
        return None;
    }

    let url = property_value(&options, "url", tree)
        .and_then(|value| js_string_value(value, tree.source()))
        .filter(|url| !url.is_empty())?;
    let methods = property_value(&options, "method", tree)
        .map(|value| methods_of(value, tree))
        .filter(|methods| !methods.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_METHOD.to_string()]);

    let citation = citation_for(file_path, &call.call);
    Some(
        methods
            .iter()
            .map(|method| RouteRecord::new(method, &url, citation.clone(), Framework::Fastify))
            .collect(),
    )
}

/// A method string, or the string elements of a method array
fn methods_of(value: Node, tree: &SyntaxTree<'_>) -> Vec<String> {
    let value = unwrap_parens(value);
    match value.kind() {
        "array" => significant_children(&value)
            .into_iter()
            .filter_map(|element| js_string_value(element, tree.source()))
            .collect(),
        _ => js_string_value(value, tree.source()).into_iter().collect(),
    }
}
