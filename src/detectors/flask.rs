//! Flask-style `.route(...)` registration.
//!
//! Any call whose callee is an attribute named `route` counts, whatever the
//! receiver (`app`, a blueprint, an aliased import):
//!
//! ```python
//! @app.route('/a', methods=['GET', 'POST'])
//! def a(): ...
//! ```

use super::normalize::{citation_for, first_positional_argument, keyword_argument};
use super::RouteMatcher;
use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::parser::literals::python_string_value;
use crate::parser::{significant_children, unwrap_parens, SyntaxTree};
use tree_sitter::Node;

const DEFAULT_METHOD: &str = "get";

#[derive(Debug, Clone, Copy, Default)]
pub struct FlaskMatcher;

impl RouteMatcher for FlaskMatcher {
    fn framework(&self) -> Framework {
        Framework::Flask
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        &[SourceLanguage::Python]
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        tree.nodes_of_kind("call")
            .filter_map(|call| route_call(file_path, &call, tree))
            .flatten()
            .collect()
    }
}

/// One record per resolved verb, or `None` if the call is not a usable
/// `.route(...)` registration.
fn route_call(file_path: &str, call: &Node, tree: &SyntaxTree<'_>) -> Option<Vec<RouteRecord>> {
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "attribute" {
        return None;
    }
    let attribute = callee.child_by_field_name("attribute")?;
    if tree.text(&attribute) != "route" {
        return None;
    }

    let arguments = call.child_by_field_name("arguments")?;
    if arguments.kind() != "argument_list" {
        return None;
    }
    let path = python_string_value(first_positional_argument(&arguments)?, tree.source())?;
    if path.is_empty() {
        return None;
    }

    let citation = citation_for(file_path, call);
    let records = resolve_methods(&arguments, tree)
        .iter()
        .map(|method| RouteRecord::new(method, &path, citation.clone(), Framework::Flask))
        .collect();
    Some(records)
}

/// Verbs from a `methods=[...]` keyword; `["get"]` when it is absent,
/// not a list/tuple literal, or holds no string literal.
fn resolve_methods(arguments: &Node, tree: &SyntaxTree<'_>) -> Vec<String> {
    let methods: Vec<String> = keyword_argument(arguments, "methods", tree.source())
        .map(unwrap_parens)
        .filter(|value| matches!(value.kind(), "list" | "tuple"))
        .map(|value| {
            significant_children(&value)
                .into_iter()
                .filter_map(|element| python_string_value(element, tree.source()))
                .map(|method| method.to_lowercase())
                .collect()
        })
        .unwrap_or_default();

    if methods.is_empty() {
        vec![DEFAULT_METHOD.to_string()]
    } else {
        methods
    }
}
