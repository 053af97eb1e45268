//! Typed Python syntax tree
//!
//! This is the input model of the converter: one `Node` per syntactic
//! construct, each with a `NodeKind` carrying its precisely typed fields and a
//! uniform `Location`. The tree builder in `crate::lower` produces it from a
//! tree-sitter parse.

mod children;
pub mod constant;
pub mod kind;
pub mod operators;

use std::fmt;

pub use constant::Constant;
pub use kind::NodeKind;
pub use operators::{BoolOperator, CmpOperator, ExprContext, Operator, UnaryOperator};

/// Source span of a node
///
/// Lines are 1-based, columns are 0-based UTF-8 byte offsets, matching the
/// `lineno`/`col_offset` convention of Python's `ast` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub lineno: usize,
    pub col_offset: usize,
    pub end_lineno: usize,
    pub end_col_offset: usize,
}

impl Location {
    pub fn new(lineno: usize, col_offset: usize, end_lineno: usize, end_col_offset: usize) -> Self {
        Self {
            lineno,
            col_offset,
            end_lineno,
            end_col_offset,
        }
    }

    /// Span from the start of `self` to the end of `other`
    pub fn to(self, other: Location) -> Location {
        Location {
            end_lineno: other.end_lineno,
            end_col_offset: other.end_col_offset,
            ..self
        }
    }
}

/// One node of the syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Location,
    /// Inline `# type:` annotation comment, when the tree builder collected one
    pub type_comment: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Self {
            kind,
            location,
            type_comment: None,
        }
    }

    pub fn boxed(kind: NodeKind, location: Location) -> Box<Self> {
        Box::new(Self::new(kind, location))
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn count(&self) -> usize {
        1 + self.children().into_iter().map(Node::count).sum::<usize>()
    }
}

/// Human-readable one-line dump used in diagnostics and fallback placeholders
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = &self.location;
        write!(
            f,
            "{}(lineno={}, col_offset={}, end_lineno={}, end_col_offset={})",
            self.tag(),
            loc.lineno,
            loc.col_offset,
            loc.end_lineno,
            loc.end_col_offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_names_kind_and_span() {
        let node = Node::new(
            NodeKind::While {
                test: Node::boxed(
                    NodeKind::Constant {
                        value: Constant::Bool(true),
                        kind: None,
                    },
                    Location::new(1, 6, 1, 10),
                ),
                body: vec![Node::new(NodeKind::Pass, Location::new(2, 4, 2, 8))],
                orelse: vec![],
            },
            Location::new(1, 0, 2, 8),
        );

        assert_eq!(
            node.to_string(),
            "While(lineno=1, col_offset=0, end_lineno=2, end_col_offset=8)"
        );
        assert_eq!(node.count(), 3);
    }

    #[test]
    fn test_async_forms_have_their_own_tags() {
        let args = Node::boxed(
            NodeKind::Arguments {
                posonlyargs: vec![],
                args: vec![],
                vararg: None,
                kwonlyargs: vec![],
                kw_defaults: vec![],
                kwarg: None,
                defaults: vec![],
            },
            Location::default(),
        );
        let kind = NodeKind::FunctionDef {
            is_async: true,
            name: "f".to_string(),
            args,
            body: vec![],
            decorator_list: vec![],
            returns: None,
            type_params: vec![],
        };
        assert_eq!(kind.tag(), "AsyncFunctionDef");
        assert_eq!(NodeKind::ExprContext(ExprContext::Store).tag(), "Store");
        assert_eq!(NodeKind::CmpOperator(CmpOperator::IsNot).tag(), "IsNot");
    }

    #[test]
    fn test_location_join() {
        let start = Location::new(1, 4, 1, 5);
        let end = Location::new(3, 0, 3, 9);
        assert_eq!(start.to(end), Location::new(1, 4, 3, 9));
    }
}
