//! Structural records: typed syntax tree to JSON
//!
//! The dispatcher maps each node kind to its converter. Kinds without one fall
//! through to the generic fallback, which still returns a positioned
//! placeholder, visits the node's children and records the kind in the
//! missing-kind set. Conversion never fails.

mod auxiliary;
mod expressions;
mod fallback;
pub mod metadata;
pub mod missing;
mod operators;
mod statements;

use crate::ast::{CmpOperator, ExprContext, Node, NodeKind, Operator, UnaryOperator};
use serde_json::Value;

pub use missing::MissingKinds;

/// Result of converting one tree
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The structural record of the root node
    pub record: Value,
    /// Kinds that went through the fallback converter
    pub missing: MissingKinds,
    /// One `Unimplemented Node: ...` line per fallback visit, in traversal order
    pub diagnostics: Vec<String>,
}

/// Convert a whole tree with a fresh converter
pub fn convert(root: &Node) -> Conversion {
    let mut converter = Converter::new();
    let record = converter.visit(root);
    converter.finish(record)
}

/// Conversion context: owns the missing-kind set and the diagnostics of one run
#[derive(Debug, Default)]
pub struct Converter {
    missing: MissingKinds,
    diagnostics: Vec<String>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher: one record per node, the fallback for anything unlisted
    pub fn visit(&mut self, node: &Node) -> Value {
        match &node.kind {
            NodeKind::Module { body } => statements::module(self, node, body),
            NodeKind::Expr { value } => statements::expr(self, node, value),
            NodeKind::Import { names } => statements::import(self, node, names),
            NodeKind::ImportFrom {
                module,
                names,
                level,
            } => statements::import_from(self, node, module.as_deref(), names, *level),
            NodeKind::ClassDef {
                name,
                bases,
                keywords,
                body,
                decorator_list,
                ..
            } => statements::class_def(self, node, name, bases, keywords, body, decorator_list),
            NodeKind::FunctionDef {
                is_async: false,
                name,
                args,
                body,
                decorator_list,
                returns,
                ..
            } => statements::function_def(
                self,
                node,
                name,
                args,
                body,
                decorator_list,
                returns.as_deref(),
            ),
            NodeKind::Return { value } => statements::return_(self, node, value.as_deref()),
            NodeKind::Assign { targets, value } => statements::assign(self, node, targets, value),
            NodeKind::With {
                is_async: false,
                items,
                body,
            } => statements::with(self, node, items, body),
            NodeKind::For {
                is_async: false,
                target,
                iter,
                body,
                orelse,
            } => statements::for_(self, node, target, iter, body, orelse),
            NodeKind::If { test, body, orelse } => statements::if_(self, node, test, body, orelse),

            NodeKind::Call {
                func,
                args,
                keywords,
            } => expressions::call(self, node, func, args, keywords),
            NodeKind::Name { id, ctx } => expressions::name(self, node, id, ctx),
            NodeKind::Constant { value, kind } => {
                expressions::constant(node, value, kind.as_deref())
            }
            NodeKind::Attribute { value, attr, ctx } => {
                expressions::attribute(self, node, value, attr, ctx)
            }
            NodeKind::Subscript { value, slice, ctx } => {
                expressions::subscript(self, node, value, slice, ctx)
            }
            NodeKind::BinOp { left, op, right } => expressions::bin_op(self, node, left, op, right),
            NodeKind::UnaryOp { op, operand } => expressions::unary_op(self, node, op, operand),
            NodeKind::Compare {
                ops, comparators, ..
            } => expressions::compare(self, node, ops, comparators),
            NodeKind::IfExp { test, body, orelse } => {
                expressions::if_exp(self, node, test, body, orelse)
            }
            NodeKind::Dict { keys, values } => expressions::dict(self, node, keys, values),
            NodeKind::ListComp { elt, generators } => {
                expressions::list_comp(self, node, elt, generators)
            }
            NodeKind::JoinedStr { values } => expressions::joined_str(self, node, values),
            NodeKind::FormattedValue {
                value,
                conversion,
                format_spec,
            } => expressions::formatted_value(self, node, value, *conversion, format_spec.as_deref()),
            NodeKind::Tuple { elts, ctx } => expressions::tuple(self, node, elts, ctx),

            NodeKind::Keyword { arg, value } => auxiliary::keyword(self, node, arg.as_deref(), value),
            NodeKind::Alias { name, asname } => auxiliary::alias(node, name, asname.as_deref()),
            NodeKind::Arguments {
                posonlyargs,
                args,
                vararg,
                kwonlyargs,
                kw_defaults,
                kwarg,
                defaults,
            } => auxiliary::arguments(
                self,
                node,
                auxiliary::ArgumentLists {
                    posonlyargs,
                    args,
                    vararg: vararg.as_deref(),
                    kwonlyargs,
                    kw_defaults,
                    kwarg: kwarg.as_deref(),
                    defaults,
                },
            ),
            NodeKind::Arg { arg, annotation } => auxiliary::arg(self, node, arg, annotation.as_deref()),
            NodeKind::Comprehension {
                target,
                iter,
                ifs,
                is_async,
            } => auxiliary::comprehension(self, node, target, iter, ifs, *is_async),
            NodeKind::WithItem {
                context_expr,
                optional_vars,
            } => auxiliary::with_item(self, node, context_expr, optional_vars.as_deref()),

            NodeKind::ExprContext(ExprContext::Load | ExprContext::Store)
            | NodeKind::Operator(Operator::Add | Operator::BitOr)
            | NodeKind::UnaryOperator(UnaryOperator::Not)
            | NodeKind::CmpOperator(CmpOperator::Eq | CmpOperator::IsNot) => operators::leaf(node),

            _ => fallback::generic_visit(self, node),
        }
    }

    /// Convert a list of nodes, keeping order
    pub(crate) fn visit_all(&mut self, nodes: &[Node]) -> Value {
        Value::Array(nodes.iter().map(|node| self.visit(node)).collect())
    }

    /// Convert an optional child; an absent child is JSON null
    pub(crate) fn visit_opt(&mut self, node: Option<&Node>) -> Value {
        node.map_or(Value::Null, |node| self.visit(node))
    }

    /// Convert a list with holes, keeping null placeholders in position
    pub(crate) fn visit_sparse(&mut self, nodes: &[Option<Node>]) -> Value {
        Value::Array(
            nodes
                .iter()
                .map(|node| self.visit_opt(node.as_ref()))
                .collect(),
        )
    }

    pub fn missing(&self) -> &MissingKinds {
        &self.missing
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn finish(self, record: Value) -> Conversion {
        tracing::debug!(
            "Conversion finished with {} fallback visits over {} missing kinds",
            self.diagnostics.len(),
            self.missing.len()
        );
        Conversion {
            record,
            missing: self.missing,
            diagnostics: self.diagnostics,
        }
    }
}
