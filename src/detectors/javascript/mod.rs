//! JavaScript/TypeScript method-call route registration.
//!
//! These idioms look like ordinary method calls (`app.get('/x', h)`), which
//! also describes plenty of client code (`axios.get('/x')`, `cache.get('k')`).
//! To stay precise every matcher runs two passes over the tree:
//!
//! 1. a binding pass collecting identifiers assigned from one of the
//!    framework's app/router factories (`const app = express()`),
//! 2. a match pass over call expressions whose receiver is one of those
//!    identifiers.
//!
//! Bindings are tracked by name across the whole file without scope
//! analysis.
//!
//! Nest controllers are the exception: they are declared with decorators on
//! classes, so [`NestMatcher`] reads class declarations instead.

mod express;
mod fastify;
mod koa;
mod nest;

pub use express::ExpressMatcher;
pub use fastify::FastifyMatcher;
pub use koa::KoaMatcher;
pub use nest::NestMatcher;

use super::normalize::{citation_for, js_call_arguments};
use crate::core::{Framework, RouteRecord};
use crate::parser::literals::js_string_value;
use crate::parser::{significant_children, unwrap_parens, SyntaxTree};
use std::collections::HashSet;
use tree_sitter::Node;

/// Verb methods registering a single route
pub const VERB_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "options", "head"];

/// Identifiers bound in the file to an app/router factory.
///
/// `factories` holds canonical callee names as produced by
/// [`factory_name`], e.g. `express`, `express.Router`, `new Router`,
/// `require:fastify`.
pub fn collect_receivers(tree: &SyntaxTree<'_>, factories: &[&str]) -> HashSet<String> {
    let mut receivers = HashSet::new();

    for node in tree.nodes() {
        let (target, value) = match node.kind() {
            "variable_declarator" => (
                node.child_by_field_name("name"),
                node.child_by_field_name("value"),
            ),
            "assignment_expression" => (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ),
            _ => continue,
        };
        let (Some(target), Some(value)) = (target, value) else {
            continue;
        };
        if target.kind() != "identifier" {
            continue;
        }
        if factory_name(value, tree).is_some_and(|name| factories.contains(&name.as_str())) {
            receivers.insert(tree.text(&target).to_string());
        }
    }

    receivers
}

/// Canonical name of the factory an expression invokes.
///
/// `express()` → `express`, `express.Router()` → `express.Router`,
/// `new Router()` → `new Router`, `require('fastify')()` → `require:fastify`.
pub fn factory_name(value: Node, tree: &SyntaxTree<'_>) -> Option<String> {
    let mut value = unwrap_parens(value);
    if value.kind() == "await_expression" {
        value = unwrap_parens(value.named_child(0)?);
    }

    match value.kind() {
        "call_expression" => dotted_name(value.child_by_field_name("function")?, tree),
        "new_expression" => {
            let constructor = dotted_name(value.child_by_field_name("constructor")?, tree)?;
            Some(format!("new {constructor}"))
        }
        _ => None,
    }
}

/// `a`, `a.b.c` or `require:<module>` prefixed chains
fn dotted_name(node: Node, tree: &SyntaxTree<'_>) -> Option<String> {
    let node = unwrap_parens(node);
    match node.kind() {
        "identifier" => Some(tree.text(&node).to_string()),
        "member_expression" => {
            let object = dotted_name(node.child_by_field_name("object")?, tree)?;
            let property = node.child_by_field_name("property")?;
            Some(format!("{object}.{}", tree.text(&property)))
        }
        "call_expression" => required_module(&node, tree).map(|module| format!("require:{module}")),
        _ => None,
    }
}

/// Module name of a `require('<module>')` call
fn required_module(call: &Node, tree: &SyntaxTree<'_>) -> Option<String> {
    let function = call.child_by_field_name("function")?;
    if function.kind() != "identifier" || tree.text(&function) != "require" {
        return None;
    }
    match js_call_arguments(call).as_slice() {
        [module] => js_string_value(*module, tree.source()),
        _ => None,
    }
}

/// A call on a bound receiver: `receiver.method(args...)`
pub struct ReceiverCall<'t> {
    pub call: Node<'t>,
    pub method: &'t str,
    pub arguments: Vec<Node<'t>>,
}

/// Calls whose callee is `<receiver>.<method>` for a bound receiver, in
/// source order.
pub fn receiver_calls<'t>(
    tree: &'t SyntaxTree<'_>,
    receivers: &'t HashSet<String>,
) -> impl Iterator<Item = ReceiverCall<'t>> + 't {
    tree.nodes_of_kind("call_expression").filter_map(move |call| {
        let callee = call.child_by_field_name("function")?;
        if callee.kind() != "member_expression" {
            return None;
        }
        let object = unwrap_parens(callee.child_by_field_name("object")?);
        if object.kind() != "identifier" || !receivers.contains(tree.text(&object)) {
            return None;
        }
        let property = callee.child_by_field_name("property")?;
        Some(ReceiverCall {
            call,
            method: tree.text(&property),
            arguments: js_call_arguments(&call),
        })
    })
}

/// `receiver.<verb>('/path', ...)` → one record, if the first argument is a
/// string literal.
pub fn verb_route(
    file_path: &str,
    call: &ReceiverCall<'_>,
    tree: &SyntaxTree<'_>,
    framework: Framework,
) -> Option<RouteRecord> {
    if !VERB_METHODS.contains(&call.method) {
        return None;
    }
    let path = js_string_value(*call.arguments.first()?, tree.source())?;
    Some(RouteRecord::new(
        call.method,
        &path,
        citation_for(file_path, &call.call),
        framework,
    ))
}

/// Value of `key: value` in an object literal; the last occurrence wins.
pub fn property_value<'t>(object: &Node<'t>, key: &str, tree: &SyntaxTree<'_>) -> Option<Node<'t>> {
    significant_children(object)
        .into_iter()
        .filter(|property| property.kind() == "pair")
        .filter(|pair| {
            pair.child_by_field_name("key")
                .and_then(|k| match k.kind() {
                    "property_identifier" => Some(tree.text(&k).to_string()),
                    "string" => js_string_value(k, tree.source()),
                    _ => None,
                })
                .is_some_and(|name| name == key)
        })
        .filter_map(|pair| pair.child_by_field_name("value"))
        .last()
}

/// Verb-shorthand routes on receivers built by one of `factories`
pub fn detect_verb_routes(
    file_path: &str,
    tree: &SyntaxTree<'_>,
    factories: &[&str],
    framework: Framework,
) -> Vec<RouteRecord> {
    let receivers = collect_receivers(tree, factories);
    if receivers.is_empty() {
        return Vec::new();
    }
    receiver_calls(tree, &receivers)
        .filter_map(|call| verb_route(file_path, &call, tree, framework))
        .collect()
}
