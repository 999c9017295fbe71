//! Tree-sitter parser integration
//!
//! Turns source text into a [`SyntaxTree`] using the Python, JavaScript and
//! TypeScript grammars. Parsing is total-file: a tree that contains any error
//! is reported as a [`ParseFailure`] instead of being partially recovered.
//! Python trees also go through the checks in [`python`].

pub mod literals;
mod python;

use crate::core::{ParseFailure, SourceLanguage};
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree, TreeCursor};

/// Get the tree-sitter language for a source language
fn grammar(language: SourceLanguage) -> TsLanguage {
    match language {
        SourceLanguage::Python => tree_sitter_python::LANGUAGE.into(),
        SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// A parsed file, scoped to one detection pass.
///
/// Borrows the source text it was parsed from and is never mutated.
pub struct SyntaxTree<'src> {
    tree: Tree,
    source: &'src str,
    language: SourceLanguage,
}

impl<'src> SyntaxTree<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Every node of the tree in pre-order, which is source order.
    pub fn nodes(&self) -> Preorder<'_> {
        Preorder::new(self.root())
    }

    /// Every node of the given kind, in source order
    pub fn nodes_of_kind<'t>(&'t self, kind: &'static str) -> impl Iterator<Item = Node<'t>> + 't {
        self.nodes().filter(move |node| node.kind() == kind)
    }

    pub fn text(&self, node: &Node) -> &'src str {
        node_text(node, self.source)
    }
}

/// Parse a complete source text.
///
/// A fresh parser is created for every call, so parsing keeps no state
/// between files and can run on any thread.
pub fn parse(code: &str, language: SourceLanguage) -> Result<SyntaxTree<'_>, ParseFailure> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(language))
        .map_err(|e| ParseFailure::Grammar {
            language,
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(code, None)
        .ok_or(ParseFailure::NoTree { language })?;

    if let Some(line) = first_error_line(&tree) {
        return Err(ParseFailure::Syntax { language, line });
    }

    if language == SourceLanguage::Python {
        if let Some((line, reason)) = python::first_violation(&tree) {
            return Err(ParseFailure::Rejected {
                language,
                line,
                reason,
            });
        }
    }

    Ok(SyntaxTree {
        tree,
        source: code,
        language,
    })
}

/// 1-based line of the first ERROR or MISSING node, if the tree has one
fn first_error_line(tree: &Tree) -> Option<usize> {
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }
    Preorder::new(root)
        .find(|node| node.is_error() || node.is_missing())
        .map(|node| node_line(&node))
        .or(Some(node_line(&root)))
}

/// Iterative pre-order walk over a subtree.
///
/// Uses a cursor instead of recursion so deeply nested sources cannot
/// exhaust the stack.
pub struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Preorder<'t> {
    pub fn new(root: Node<'t>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();

        if self.cursor.goto_first_child() || self.cursor.goto_next_sibling() {
            return Some(node);
        }
        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the last line a tree-sitter node touches (1-indexed)
pub fn node_end_line(node: &Node) -> usize {
    node.end_position().row + 1
}

/// Named children, minus comments.
pub fn significant_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra() && child.kind() != "comment")
        .collect()
}

/// Strip any number of redundant parentheses around an expression.
pub fn unwrap_parens<'t>(node: Node<'t>) -> Node<'t> {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        match significant_children(&current).as_slice() {
            [inner] => current = *inner,
            _ => break,
        }
    }
    current
}
