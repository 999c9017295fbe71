//! Nest controllers: handler decorators under a `@Controller` prefix.
//!
//! ```ts
//! @Controller('cats')
//! export class CatsController {
//!   @Get(':id')
//!   findOne(@Param('id') id: string) {}
//! }
//! ```
//!
//! The TypeScript grammar puts method decorators in the class body ahead of
//! the method; the JavaScript grammar nests them in the method itself. Both
//! layouts are read.

use super::property_value;
use crate::core::{Framework, RouteRecord, SourceCitation, SourceLanguage};
use crate::detectors::RouteMatcher;
use crate::parser::literals::js_string_value;
use crate::parser::{node_end_line, node_line, significant_children, unwrap_parens, SyntaxTree};
use tree_sitter::Node;

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

/// Handler decorators, named after the verb they register
const HANDLER_DECORATORS: &[&str] = &["Get", "Post", "Put", "Delete", "Patch", "Options", "Head"];

#[derive(Debug, Clone, Copy, Default)]
pub struct NestMatcher;

impl RouteMatcher for NestMatcher {
    fn framework(&self) -> Framework {
        Framework::Nest
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        SourceLanguage::JS_FAMILY
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        tree.nodes()
            .filter(|node| node.is_named() && CLASS_KINDS.contains(&node.kind()))
            .flat_map(|class| controller_routes(file_path, &class, tree))
            .collect()
    }
}

fn controller_routes(file_path: &str, class: &Node<'_>, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
    let Some(prefix) = controller_prefix(class, tree) else {
        return Vec::new();
    };
    let Some(body) = class.child_by_field_name("body") else {
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut pending = Vec::new();
    for member in significant_children(&body) {
        match member.kind() {
            "decorator" => pending.push(member),
            "method_definition" => {
                pending.extend(decorators(&member));
                for decorator in pending.drain(..) {
                    records.extend(handler_route(file_path, &decorator, &member, &prefix, tree));
                }
            }
            _ => pending.clear(),
        }
    }
    records
}

/// Path prefix from `@Controller`.
///
/// Empty when the class has no `@Controller(...)` or it has no argument;
/// `None` when the prefix is not a string literal.
fn controller_prefix(class: &Node<'_>, tree: &SyntaxTree<'_>) -> Option<String> {
    let mut candidates = decorators(class);
    if let Some(export) = class.parent().filter(|p| p.kind() == "export_statement") {
        candidates.extend(decorators(&export));
    }

    let Some((_, arguments)) = candidates
        .iter()
        .filter_map(|decorator| decorator_call(decorator, tree))
        .rfind(|(name, _)| *name == "Controller")
    else {
        return Some(String::new());
    };

    match arguments.first().map(|argument| unwrap_parens(*argument)) {
        None => Some(String::new()),
        Some(options) if options.kind() == "object" => match property_value(&options, "path", tree) {
            Some(path) => js_string_value(path, tree.source()),
            None => Some(String::new()),
        },
        Some(prefix) => js_string_value(prefix, tree.source()),
    }
}

/// `@Get('route')` on `method` → one record; a non-literal route is skipped.
fn handler_route(
    file_path: &str,
    decorator: &Node<'_>,
    method: &Node<'_>,
    prefix: &str,
    tree: &SyntaxTree<'_>,
) -> Option<RouteRecord> {
    let (name, arguments) = decorator_call(decorator, tree)?;
    let verb = HANDLER_DECORATORS.iter().find(|verb| **verb == name)?;
    let route = match arguments.first() {
        None => String::new(),
        Some(argument) => js_string_value(*argument, tree.source())?,
    };

    let citation = SourceCitation::new(file_path, node_line(decorator), node_end_line(method));
    Some(RouteRecord::new(
        &verb.to_lowercase(),
        &join_path(prefix, &route),
        citation,
        Framework::Nest,
    ))
}

fn decorators<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    significant_children(node)
        .into_iter()
        .filter(|child| child.kind() == "decorator")
        .collect()
}

/// `@Name(args)` as the callee name and its arguments
fn decorator_call<'t, 's>(
    decorator: &Node<'t>,
    tree: &SyntaxTree<'s>,
) -> Option<(&'s str, Vec<Node<'t>>)> {
    let call = significant_children(decorator)
        .into_iter()
        .find(|child| child.kind() == "call_expression")?;
    let callee = call
        .child_by_field_name("function")
        .filter(|function| function.kind() == "identifier")?;
    let arguments = call.child_by_field_name("arguments")?;
    Some((tree.text(&callee), significant_children(&arguments)))
}

/// `prefix/route` with runs of `/` collapsed
fn join_path(prefix: &str, route: &str) -> String {
    let joined = format!("{prefix}/{route}");
    let mut path = String::with_capacity(joined.len());
    for ch in joined.chars() {
        if ch != '/' || !path.ends_with('/') {
            path.push(ch);
        }
    }
    path
}
