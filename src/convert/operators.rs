// Leaf converter for the operator and context kinds that have one

use super::metadata::merge;
use crate::ast::Node;
use serde_json::{json, Value};

/// `{"type": <tag>}` plus position
pub(super) fn leaf(node: &Node) -> Value {
    merge(node, json!({ "type": node.tag() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprContext, Location, NodeKind, Operator};

    #[test]
    fn test_leaf_record() {
        let node = Node::new(NodeKind::Operator(Operator::BitOr), Location::new(1, 4, 1, 5));
        let record = leaf(&node);
        assert_eq!(record["type"], "BitOr");
        assert_eq!(record["col_offset"], 4);
        assert_eq!(record["end_col_offset"], 5);
    }

    #[test]
    fn test_context_leaf() {
        let node = Node::new(NodeKind::ExprContext(ExprContext::Load), Location::new(1, 0, 1, 1));
        assert_eq!(leaf(&node)["type"], "Load");
    }
}
