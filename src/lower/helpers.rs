// Tree navigation helpers for the tree builder
//
// Adapted from the extractor tree methods: the same child lookups, but every
// helper skips "extra" nodes (comments, line continuations) so callers only
// see syntax.

use crate::ast::Location;
use crate::error::{Error, Result};
use tree_sitter::{Node as TsNode, Point};

/// Python-style location of a tree-sitter node
///
/// The end is taken from the last token that is not an extra: a block keeps
/// trailing comments as children, but the statement ends at its last
/// statement.
pub(super) fn location(node: &TsNode<'_>) -> Location {
    let start = node.start_position();
    let end = syntax_end(node).unwrap_or_else(|| node.end_position());
    Location::new(start.row + 1, start.column, end.row + 1, end.column)
}

fn syntax_end(node: &TsNode<'_>) -> Option<Point> {
    if node.is_extra() {
        return None;
    }
    if node.child_count() == 0 {
        return Some(node.end_position());
    }
    let mut cursor = node.walk();
    let kids: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
    kids.iter().rev().find_map(syntax_end)
}

/// Location covering `first` through `last`
pub(super) fn span(first: &TsNode<'_>, last: &TsNode<'_>) -> Location {
    location(first).to(location(last))
}

/// Named children, extras excluded
pub(super) fn named_children<'t>(node: &TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// All children including anonymous tokens, extras excluded
pub(super) fn children<'t>(node: &TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

pub(super) fn field<'t>(node: &TsNode<'t>, name: &str) -> Option<TsNode<'t>> {
    node.child_by_field_name(name)
}

pub(super) fn required_field<'t>(node: &TsNode<'t>, name: &str) -> Result<TsNode<'t>> {
    field(node, name)
        .ok_or_else(|| syntax_error(node, format!("'{}' is missing its {}", node.kind(), name)))
}

/// Every child stored under a repeated field, in source order
pub(super) fn fields<'t>(node: &TsNode<'t>, name: &str) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    let found: Vec<TsNode<'t>> = node.children_by_field_name(name, &mut cursor).collect();
    found
}

/// Find first child by type
pub(super) fn find_child_by_type<'t>(node: &TsNode<'t>, child_type: &str) -> Option<TsNode<'t>> {
    children(node)
        .into_iter()
        .find(|child| child.kind() == child_type)
}

/// Find named children by type
pub(super) fn find_children_by_type<'t>(node: &TsNode<'t>, child_type: &str) -> Vec<TsNode<'t>> {
    named_children(node)
        .into_iter()
        .filter(|child| child.kind() == child_type)
        .collect()
}

/// Check for an anonymous keyword or punctuation child such as `async` or `=`
pub(super) fn has_token(node: &TsNode<'_>, token: &str) -> bool {
    children(node)
        .iter()
        .any(|child| !child.is_named() && child.kind() == token)
}

pub(super) fn syntax_error(node: &TsNode<'_>, message: impl Into<String>) -> Error {
    let start = node.start_position();
    Error::syntax(start.row + 1, start.column + 1, message)
}

/// First `ERROR` or `MISSING` node in document order
pub(super) fn first_error<'t>(node: TsNode<'t>) -> Option<TsNode<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let kids: Vec<TsNode<'t>> = node.children(&mut cursor).collect();
    kids.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;

    #[test]
    fn test_named_children_skip_comments() {
        let source = "x = [1,  # one\n     2]\n";
        let tree = language::parse(source).unwrap();
        let list = tree
            .root_node()
            .named_child(0)
            .and_then(|stmt| stmt.named_child(0))
            .and_then(|assign| assign.child_by_field_name("right"))
            .unwrap();

        assert_eq!(list.kind(), "list");
        let kinds: Vec<&str> = named_children(&list).iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["integer", "integer"]);
    }

    #[test]
    fn test_location_is_one_based_lines_zero_based_columns() {
        let tree = language::parse("\n  \nfoo\n").unwrap();
        let stmt = tree.root_node().named_child(0).unwrap();
        assert_eq!(location(&stmt), Location::new(3, 0, 3, 3));
    }

    #[test]
    fn test_location_ignores_trailing_comments() {
        let tree = language::parse("def f():\n    pass\n    # trailing\nx = 1\n").unwrap();
        let def = tree.root_node().named_child(0).unwrap();
        assert_eq!(def.kind(), "function_definition");
        assert_eq!(location(&def), Location::new(1, 0, 2, 8));
    }

    #[test]
    fn test_first_error_points_at_broken_token() {
        let tree = language::parse("x = (1,\n").unwrap();
        let error = first_error(tree.root_node()).unwrap();
        assert!(error.is_error() || error.is_missing());
    }
}
