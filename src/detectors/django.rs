//! Django `urlpatterns` route tables.
//!
//! ```python
//! urlpatterns = [
//!     path('users/', views.users),
//!     re_path(r'^old$', views.old),
//! ]
//! ```
//!
//! Every element is reported with method `get`: the table carries no verb
//! and the view is never inspected.

use super::normalize::{citation_for, first_positional_argument, strip_regex_anchors};
use super::RouteMatcher;
use crate::core::{Framework, RouteRecord, SourceLanguage};
use crate::parser::literals::python_string_value;
use crate::parser::{significant_children, unwrap_parens, SyntaxTree};
use tree_sitter::Node;

const TABLE_NAME: &str = "urlpatterns";

#[derive(Debug, Clone, Copy, Default)]
pub struct DjangoMatcher;

/// Route helper a table element calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteHelper {
    Path,
    RePath,
}

impl RouteHelper {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "path" => Some(RouteHelper::Path),
            "re_path" => Some(RouteHelper::RePath),
            _ => None,
        }
    }
}

impl RouteMatcher for DjangoMatcher {
    fn framework(&self) -> Framework {
        Framework::Django
    }

    fn languages(&self) -> &'static [SourceLanguage] {
        &[SourceLanguage::Python]
    }

    fn detect(&self, file_path: &str, tree: &SyntaxTree<'_>) -> Vec<RouteRecord> {
        tree.nodes()
            .filter_map(|node| route_table(&node, tree))
            .flat_map(|elements| elements.into_iter())
            .filter_map(|element| table_entry(file_path, element, tree))
            .collect()
    }
}

/// Elements of the sequence assigned to `urlpatterns`, if `node` is such an
/// assignment.
fn route_table<'t>(node: &Node<'t>, tree: &SyntaxTree<'_>) -> Option<Vec<Node<'t>>> {
    let value = match node.kind() {
        "assignment" if !is_chained_target(node) => chain_value_if_targets_table(node, tree)?,
        "augmented_assignment" => {
            let operator = node.child_by_field_name("operator")?;
            if tree.text(&operator) != "+=" || !targets_table(node, tree) {
                return None;
            }
            node.child_by_field_name("right")?
        }
        _ => return None,
    };

    let value = unwrap_parens(value);
    match value.kind() {
        "list" | "tuple" | "expression_list" => Some(significant_children(&value)),
        _ => None,
    }
}

/// `a = b = [...]` parses as nested assignments; only the outermost one is
/// treated as a table candidate.
fn is_chained_target(node: &Node) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == "assignment"
            && parent
                .child_by_field_name("right")
                .is_some_and(|right| right.id() == node.id())
    })
}

fn chain_value_if_targets_table<'t>(node: &Node<'t>, tree: &SyntaxTree<'_>) -> Option<Node<'t>> {
    let mut current = *node;
    let mut is_table = false;
    loop {
        is_table |= targets_table(&current, tree);
        let right = current.child_by_field_name("right")?;
        if right.kind() == "assignment" {
            current = right;
        } else {
            return is_table.then_some(right);
        }
    }
}

fn targets_table(assignment: &Node, tree: &SyntaxTree<'_>) -> bool {
    assignment
        .child_by_field_name("left")
        .is_some_and(|left| left.kind() == "identifier" && tree.text(&left) == TABLE_NAME)
}

/// One `path(...)`/`re_path(...)` element. Anything else is skipped.
fn table_entry(file_path: &str, element: Node, tree: &SyntaxTree<'_>) -> Option<RouteRecord> {
    let call = unwrap_parens(element);
    if call.kind() != "call" {
        return None;
    }

    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "identifier" {
        return None;
    }
    let helper = RouteHelper::from_name(tree.text(&callee))?;

    let arguments = call.child_by_field_name("arguments")?;
    if arguments.kind() != "argument_list" {
        return None;
    }
    let literal = python_string_value(first_positional_argument(&arguments)?, tree.source())?;

    let raw_path = match helper {
        RouteHelper::Path => literal.as_str(),
        RouteHelper::RePath => strip_regex_anchors(&literal),
    };

    Some(RouteRecord::new(
        "get",
        raw_path,
        citation_for(file_path, &call),
        Framework::Django,
    ))
}
