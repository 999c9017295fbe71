//! Citation and argument helpers shared by every matcher

use crate::core::SourceCitation;
use crate::parser::{node_end_line, node_line, significant_children};
use tree_sitter::Node;

/// Citation spanning a node's first and last line
pub fn citation_for(file_path: &str, node: &Node) -> SourceCitation {
    SourceCitation::new(file_path, node_line(node), node_end_line(node))
}

/// Drop one leading `^` and one trailing `$` from a regex route pattern.
pub fn strip_regex_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    pattern.strip_suffix('$').unwrap_or(pattern)
}

/// First positional argument of a Python `argument_list`.
///
/// Keyword arguments and `**kwargs` are not positional; a leading `*args`
/// is returned as-is and will fail literal extraction.
pub fn first_positional_argument<'t>(arguments: &Node<'t>) -> Option<Node<'t>> {
    significant_children(arguments)
        .into_iter()
        .find(|arg| !matches!(arg.kind(), "keyword_argument" | "dictionary_splat"))
}

/// Value of a Python keyword argument; the last occurrence wins.
pub fn keyword_argument<'t>(arguments: &Node<'t>, name: &str, source: &str) -> Option<Node<'t>> {
    significant_children(arguments)
        .into_iter()
        .filter(|arg| arg.kind() == "keyword_argument")
        .filter(|arg| {
            arg.child_by_field_name("name")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                == Some(name)
        })
        .filter_map(|arg| arg.child_by_field_name("value"))
        .last()
}

/// Arguments of a JavaScript call, in order
pub fn js_call_arguments<'t>(call: &Node<'t>) -> Vec<Node<'t>> {
    call.child_by_field_name("arguments")
        .filter(|args| args.kind() == "arguments")
        .map(|args| significant_children(&args))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLanguage;
    use crate::parser::parse;

    #[test]
    fn test_strip_regex_anchors() {
        assert_eq!(strip_regex_anchors("^old$"), "old");
        assert_eq!(strip_regex_anchors("^api/users/$"), "api/users/");
        assert_eq!(strip_regex_anchors("plain/"), "plain/");
        assert_eq!(strip_regex_anchors("^^x$$"), "^x$");
    }

    #[test]
    fn test_python_argument_helpers() {
        let source = "f(*rest, 'a', methods=['GET'], methods=('POST',), **kw)\ng(name='x')\n";
        let tree = parse(source, SourceLanguage::Python).unwrap();
        let calls: Vec<_> = tree.nodes_of_kind("call").collect();
        let args = calls[0].child_by_field_name("arguments").unwrap();

        assert_eq!(first_positional_argument(&args).unwrap().kind(), "list_splat");
        let methods = keyword_argument(&args, "methods", tree.source()).unwrap();
        assert_eq!(methods.kind(), "tuple");
        assert!(keyword_argument(&args, "missing", tree.source()).is_none());

        let args = calls[1].child_by_field_name("arguments").unwrap();
        assert!(first_positional_argument(&args).is_none());
    }

    #[test]
    fn test_citation_spans_node_lines() {
        let source = "call(\n    'x',\n)\n";
        let tree = parse(source, SourceLanguage::Python).unwrap();
        let call = tree.nodes_of_kind("call").next().unwrap();
        let citation = citation_for("views.py", &call);
        assert_eq!(citation, SourceCitation::new("views.py", 1, 3));
    }

    #[test]
    fn test_js_call_arguments_skip_comments() {
        let source = "app.get(/* path */ '/a', handler);\n";
        let tree = parse(source, SourceLanguage::JavaScript).unwrap();
        let call = tree.nodes_of_kind("call_expression").next().unwrap();
        let args = js_call_arguments(&call);
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].kind(), "string");
    }
}
