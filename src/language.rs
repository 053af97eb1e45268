//! Language Support - tree-sitter configuration for the Python grammar
//!
//! The grammar is the parser collaborator: everything that turns source text
//! into a concrete syntax tree lives behind these two functions.

use crate::error::{Error, Result};
use tree_sitter::{Language, Parser, Tree};

/// Get the tree-sitter language for Python
pub fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Create a parser configured for Python
pub fn new_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&python_language())?;
    Ok(parser)
}

/// Parse Python source into a concrete syntax tree
///
/// tree-sitter recovers from syntax errors by inserting `ERROR` and `MISSING`
/// nodes; callers decide whether such a tree is acceptable.
pub fn parse(source: &str) -> Result<Tree> {
    let mut parser = new_parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::syntax(1, 1, "parser produced no tree"))?;

    tracing::debug!(
        "Parsed {} bytes of Python into {} top-level nodes",
        source.len(),
        tree.root_node().child_count()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_accepts_python() {
        let tree = parse("def foo():\n    return 1\n").unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), "module");
        assert!(!root.has_error());
        assert_eq!(root.named_child(0).unwrap().kind(), "function_definition");
    }

    #[test]
    fn test_parser_marks_broken_source() {
        let tree = parse("def foo(:\n").unwrap();
        assert!(tree.root_node().has_error());
    }
}
