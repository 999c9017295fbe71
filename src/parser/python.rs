//! Python 3 rules the tree-sitter grammar does not enforce.
//!
//! tree-sitter-python still has productions for Python 2 statements, accepts
//! arguments in any order and lets the indentation scanner fall back to a
//! plain newline where CPython raises `IndentationError`. A tree that passes
//! the grammar is checked here before any matcher sees it.

use super::{node_line, significant_children, Preorder};
use tree_sitter::{Node, Tree};

/// Clauses that must line up with the statement that owns them
const CLAUSE_KINDS: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
];

/// Line and reason of the first construct CPython would refuse to compile
pub(super) fn first_violation(tree: &Tree) -> Option<(usize, &'static str)> {
    Preorder::new(tree.root_node()).find_map(|node| violation(&node))
}

fn violation(node: &Node) -> Option<(usize, &'static str)> {
    match node.kind() {
        "print_statement" => Some((node_line(node), "print statement")),
        "exec_statement" => Some((node_line(node), "exec statement")),
        "<>" if !node.is_named() => Some((node_line(node), "`<>` operator")),
        "argument_list" => argument_order(node),
        "module" => misaligned(node, Some(0)),
        "block" | "decorated_definition" => misaligned(node, None),
        kind if CLAUSE_KINDS.contains(&kind) => misaligned_clause(node),
        _ => None,
    }
}

/// Positional arguments may not follow keywords, and neither kind of
/// argument may follow `**mapping` except another keyword.
fn argument_order(list: &Node) -> Option<(usize, &'static str)> {
    let mut seen_keyword = false;
    let mut seen_mapping = false;

    for arg in significant_children(list) {
        let reason = match arg.kind() {
            "keyword_argument" => {
                seen_keyword = true;
                continue;
            }
            "dictionary_splat" => {
                seen_mapping = true;
                continue;
            }
            "list_splat" if seen_mapping => {
                "iterable argument unpacking follows keyword argument unpacking"
            }
            "list_splat" => continue,
            _ if seen_mapping => "positional argument follows keyword argument unpacking",
            _ if seen_keyword => "positional argument follows keyword argument",
            _ => continue,
        };
        return Some((node_line(&arg), reason));
    }
    None
}

/// Every statement that opens a line must start in the same column.
///
/// `expected` fixes that column; otherwise the first statement sets it.
/// Statements after a `;` share a line with their predecessor and are skipped.
fn misaligned(body: &Node, expected: Option<usize>) -> Option<(usize, &'static str)> {
    let mut expected = expected;
    let mut previous_end_row = None;

    for statement in significant_children(body) {
        let start = statement.start_position();
        let same_line = previous_end_row == Some(start.row);
        previous_end_row = Some(statement.end_position().row);
        if same_line {
            continue;
        }

        match expected {
            None => expected = Some(start.column),
            Some(column) if column != start.column => {
                return Some((start.row + 1, "unexpected indentation"));
            }
            Some(_) => {}
        }
    }
    None
}

fn misaligned_clause(clause: &Node) -> Option<(usize, &'static str)> {
    let header = clause.parent()?.start_position();
    let start = clause.start_position();
    (start.row != header.row && start.column != header.column)
        .then_some((start.row + 1, "unexpected indentation"))
}
