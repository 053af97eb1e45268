// Generic child enumeration for Node
//
// Mirrors Python's `ast.iter_child_nodes`: every direct child node in field
// order, absent optional children skipped. Primitive fields are not nodes.

use super::{Node, NodeKind};

#[derive(Default)]
struct Children<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Children<'a> {
    fn one(mut self, node: &'a Node) -> Self {
        self.nodes.push(node);
        self
    }

    fn opt(mut self, node: &'a Option<Box<Node>>) -> Self {
        if let Some(node) = node {
            self.nodes.push(node);
        }
        self
    }

    fn all(mut self, nodes: &'a [Node]) -> Self {
        self.nodes.extend(nodes.iter());
        self
    }

    fn sparse(mut self, nodes: &'a [Option<Node>]) -> Self {
        self.nodes.extend(nodes.iter().flatten());
        self
    }
}

impl Node {
    /// Direct children of this node in grammar field order
    pub fn children(&self) -> Vec<&Node> {
        let c = Children::default();
        let c = match &self.kind {
            NodeKind::Module { body } => c.all(body),
            NodeKind::FunctionDef {
                args,
                body,
                decorator_list,
                returns,
                type_params,
                ..
            } => c
                .one(args)
                .all(body)
                .all(decorator_list)
                .opt(returns)
                .all(type_params),
            NodeKind::ClassDef {
                bases,
                keywords,
                body,
                decorator_list,
                type_params,
                ..
            } => c
                .all(bases)
                .all(keywords)
                .all(body)
                .all(decorator_list)
                .all(type_params),
            NodeKind::Return { value } => c.opt(value),
            NodeKind::Delete { targets } => c.all(targets),
            NodeKind::Assign { targets, value } => c.all(targets).one(value),
            NodeKind::TypeAlias {
                name,
                type_params,
                value,
            } => c.one(name).all(type_params).one(value),
            NodeKind::AugAssign { target, op, value } => c.one(target).one(op).one(value),
            NodeKind::AnnAssign {
                target,
                annotation,
                value,
                ..
            } => c.one(target).one(annotation).opt(value),
            NodeKind::For {
                target,
                iter,
                body,
                orelse,
                ..
            } => c.one(target).one(iter).all(body).all(orelse),
            NodeKind::While { test, body, orelse } | NodeKind::If { test, body, orelse } => {
                c.one(test).all(body).all(orelse)
            }
            NodeKind::With { items, body, .. } => c.all(items).all(body),
            NodeKind::Match { subject, cases } => c.one(subject).all(cases),
            NodeKind::Raise { exc, cause } => c.opt(exc).opt(cause),
            NodeKind::Try {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            } => c.all(body).all(handlers).all(orelse).all(finalbody),
            NodeKind::Assert { test, msg } => c.one(test).opt(msg),
            NodeKind::Import { names } | NodeKind::ImportFrom { names, .. } => c.all(names),
            NodeKind::Global { .. } | NodeKind::Nonlocal { .. } => c,
            NodeKind::Expr { value } => c.one(value),
            NodeKind::Pass | NodeKind::Break | NodeKind::Continue => c,
            NodeKind::BoolOp { op, values } => c.one(op).all(values),
            NodeKind::NamedExpr { target, value } => c.one(target).one(value),
            NodeKind::BinOp { left, op, right } => c.one(left).one(op).one(right),
            NodeKind::UnaryOp { op, operand } => c.one(op).one(operand),
            NodeKind::Lambda { args, body } => c.one(args).one(body),
            NodeKind::IfExp { test, body, orelse } => c.one(test).one(body).one(orelse),
            NodeKind::Dict { keys, values } => c.sparse(keys).all(values),
            NodeKind::Set { elts } => c.all(elts),
            NodeKind::ListComp { elt, generators }
            | NodeKind::SetComp { elt, generators }
            | NodeKind::GeneratorExp { elt, generators } => c.one(elt).all(generators),
            NodeKind::DictComp {
                key,
                value,
                generators,
            } => c.one(key).one(value).all(generators),
            NodeKind::Await { value } | NodeKind::YieldFrom { value } => c.one(value),
            NodeKind::Yield { value } => c.opt(value),
            NodeKind::Compare {
                left,
                ops,
                comparators,
            } => c.one(left).all(ops).all(comparators),
            NodeKind::Call {
                func,
                args,
                keywords,
            } => c.one(func).all(args).all(keywords),
            NodeKind::FormattedValue {
                value, format_spec, ..
            } => c.one(value).opt(format_spec),
            NodeKind::JoinedStr { values } => c.all(values),
            NodeKind::Constant { .. } => c,
            NodeKind::Attribute { value, ctx, .. } => c.one(value).one(ctx),
            NodeKind::Subscript { value, slice, ctx } => c.one(value).one(slice).one(ctx),
            NodeKind::Starred { value, ctx } => c.one(value).one(ctx),
            NodeKind::Name { ctx, .. } => c.one(ctx),
            NodeKind::List { elts, ctx } | NodeKind::Tuple { elts, ctx } => c.all(elts).one(ctx),
            NodeKind::Slice { lower, upper, step } => c.opt(lower).opt(upper).opt(step),
            NodeKind::ExprContext(_)
            | NodeKind::BoolOperator(_)
            | NodeKind::Operator(_)
            | NodeKind::UnaryOperator(_)
            | NodeKind::CmpOperator(_) => c,
            NodeKind::Comprehension {
                target, iter, ifs, ..
            } => c.one(target).one(iter).all(ifs),
            NodeKind::ExceptHandler { type_, body, .. } => c.opt(type_).all(body),
            NodeKind::Arguments {
                posonlyargs,
                args,
                vararg,
                kwonlyargs,
                kw_defaults,
                kwarg,
                defaults,
            } => c
                .all(posonlyargs)
                .all(args)
                .opt(vararg)
                .all(kwonlyargs)
                .sparse(kw_defaults)
                .opt(kwarg)
                .all(defaults),
            NodeKind::Arg { annotation, .. } => c.opt(annotation),
            NodeKind::Keyword { value, .. } => c.one(value),
            NodeKind::Alias { .. } => c,
            NodeKind::WithItem {
                context_expr,
                optional_vars,
            } => c.one(context_expr).opt(optional_vars),
            NodeKind::MatchCase {
                pattern,
                guard,
                body,
            } => c.one(pattern).opt(guard).all(body),
            NodeKind::MatchValue { value } => c.one(value),
            NodeKind::MatchSingleton { .. } => c,
            NodeKind::MatchSequence { patterns } | NodeKind::MatchOr { patterns } => {
                c.all(patterns)
            }
            NodeKind::MatchMapping { keys, patterns, .. } => c.all(keys).all(patterns),
            NodeKind::MatchClass {
                cls,
                patterns,
                kwd_patterns,
                ..
            } => c.one(cls).all(patterns).all(kwd_patterns),
            NodeKind::MatchStar { .. } => c,
            NodeKind::MatchAs { pattern, .. } => c.opt(pattern),
            NodeKind::TypeVar { bound, .. } => c.opt(bound),
            NodeKind::ParamSpec { .. } | NodeKind::TypeVarTuple { .. } => c,
        };
        c.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ExprContext, Location};
    use super::*;

    fn name(id: &str, col: usize) -> Node {
        let loc = Location::new(1, col, 1, col + id.len());
        Node::new(
            NodeKind::Name {
                id: id.to_string(),
                ctx: Node::boxed(NodeKind::ExprContext(ExprContext::Load), loc),
            },
            loc,
        )
    }

    #[test]
    fn test_children_follow_field_order_and_skip_absent() {
        let dict = Node::new(
            NodeKind::Dict {
                keys: vec![Some(name("a", 1)), None],
                values: vec![name("b", 4), name("c", 9)],
            },
            Location::new(1, 0, 1, 11),
        );

        let tags: Vec<String> = dict
            .children()
            .iter()
            .map(|child| match &child.kind {
                NodeKind::Name { id, .. } => id.clone(),
                other => other.tag().to_string(),
            })
            .collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_name_exposes_its_context() {
        let node = name("x", 0);
        let children = node.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag(), "Load");
    }
}
