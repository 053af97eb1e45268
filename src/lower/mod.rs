//! Tree builder: tree-sitter concrete syntax tree to the typed `ast::Node`
//!
//! The tree-sitter grammar is permissive and error-recovering, so the first
//! job here is to reject any tree carrying `ERROR` or `MISSING` nodes. What
//! remains is lowered kind by kind into the Python `ast` shapes, one
//! submodule per grammar area.

mod expressions;
mod helpers;
mod literals;
mod parameters;
mod patterns;
mod statements;
mod strings;
mod type_comments;

use crate::ast::{Location, Node, NodeKind};
use crate::error::Result;
use crate::language;
use helpers::{first_error, named_children, syntax_error};
use tree_sitter::Node as TsNode;

/// Options controlling how the tree is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Collect `# type:` comments into `Node::type_comment`
    pub type_comments: bool,
}

/// Parse `source` and build the typed syntax tree rooted at a `Module`
pub fn build_tree(source: &str, options: &BuildOptions) -> Result<Node> {
    let tree = language::parse(source)?;
    let root = tree.root_node();

    if let Some(bad) = first_error(root) {
        let message = if bad.is_missing() {
            format!("expected '{}'", bad.kind())
        } else {
            "invalid syntax".to_string()
        };
        return Err(syntax_error(&bad, message));
    }

    let builder = TreeBuilder { source, options };
    let module = builder.module(root)?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let statements = match &module.kind {
            NodeKind::Module { body } => body.len(),
            _ => 0,
        };
        tracing::debug!(
            "Built {} nodes from {} top-level statements",
            module.count(),
            statements
        );
    }
    Ok(module)
}

/// Lowering context shared by the grammar-area submodules
pub(crate) struct TreeBuilder<'a> {
    source: &'a str,
    options: &'a BuildOptions,
}

impl<'a> TreeBuilder<'a> {
    /// Source text of a node
    fn text(&self, node: &TsNode<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Source text between two byte offsets
    fn source_slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    fn module(&self, root: TsNode<'_>) -> Result<Node> {
        let body = named_children(&root)
            .into_iter()
            .map(|stmt| self.statement(stmt))
            .collect::<Result<Vec<_>>>()?;

        let end = root.end_position();
        let location = Location::new(1, 0, end.row + 1, end.column);
        Ok(Node::new(NodeKind::Module { body }, location))
    }
}
