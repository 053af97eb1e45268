// Expression lowering
//
// `expression_in` threads the expression context down to the nodes that carry
// one (names, attributes, subscripts, starred items and containers), so that
// assignment and deletion targets come out as `Store` and `Del`.

use super::helpers::{
    children, field, fields, find_child_by_type, has_token, location, named_children,
    required_field, span, syntax_error,
};
use super::literals::parse_number;
use super::TreeBuilder;
use crate::ast::{
    BoolOperator, CmpOperator, Constant, ExprContext, Location, Node, NodeKind, Operator,
    UnaryOperator,
};
use crate::error::Result;
use tree_sitter::Node as TsNode;

impl TreeBuilder<'_> {
    /// Lower an expression in `Load` context; a bare `a, b` list becomes a `Tuple`
    pub(super) fn expression(&self, node: TsNode<'_>) -> Result<Node> {
        self.expression_in(node, ExprContext::Load)
    }

    /// Lower an assignment, `for` or `del` target
    pub(super) fn target(&self, node: TsNode<'_>, ctx: ExprContext) -> Result<Node> {
        let target = self.expression_in(node, ctx)?;
        check_assignable(&target, &node)?;
        Ok(target)
    }

    pub(super) fn ctx(ctx: ExprContext, location: Location) -> Box<Node> {
        Node::boxed(NodeKind::ExprContext(ctx), location)
    }

    pub(super) fn tuple(&self, elts: Vec<Node>, location: Location, ctx: ExprContext) -> Node {
        Node::new(
            NodeKind::Tuple {
                elts,
                ctx: Self::ctx(ctx, location),
            },
            location,
        )
    }

    pub(super) fn expression_in(&self, node: TsNode<'_>, ctx: ExprContext) -> Result<Node> {
        let loc = location(&node);
        let kind = match node.kind() {
            "identifier" | "keyword_identifier" => NodeKind::Name {
                id: self.text(&node).to_string(),
                ctx: Self::ctx(ctx, loc),
            },
            "integer" | "float" => {
                let value = parse_number(self.text(&node)).ok_or_else(|| {
                    syntax_error(&node, format!("invalid number '{}'", self.text(&node)))
                })?;
                NodeKind::Constant { value, kind: None }
            }
            "true" => constant(Constant::Bool(true)),
            "false" => constant(Constant::Bool(false)),
            "none" => constant(Constant::None),
            "ellipsis" => constant(Constant::Ellipsis),
            "string" | "concatenated_string" => return self.string(node),
            "attribute" => NodeKind::Attribute {
                value: Box::new(self.expression(required_field(&node, "object")?)?),
                attr: self.text(&required_field(&node, "attribute")?).to_string(),
                ctx: Self::ctx(ctx, loc),
            },
            "subscript" => NodeKind::Subscript {
                value: Box::new(self.expression(required_field(&node, "value")?)?),
                slice: Box::new(self.subscript_slice(&node)?),
                ctx: Self::ctx(ctx, loc),
            },
            "slice" => self.slice(&node)?,
            "call" => self.call(&node)?,
            "binary_operator" => {
                let op_node = required_field(&node, "operator")?;
                let op = Operator::from_token(self.text(&op_node)).ok_or_else(|| {
                    syntax_error(&op_node, format!("unknown operator '{}'", self.text(&op_node)))
                })?;
                NodeKind::BinOp {
                    left: Box::new(self.expression(required_field(&node, "left")?)?),
                    op: Node::boxed(NodeKind::Operator(op), location(&op_node)),
                    right: Box::new(self.expression(required_field(&node, "right")?)?),
                }
            }
            "unary_operator" => {
                let op_node = required_field(&node, "operator")?;
                let op = UnaryOperator::from_token(self.text(&op_node)).ok_or_else(|| {
                    syntax_error(&op_node, format!("unknown operator '{}'", self.text(&op_node)))
                })?;
                NodeKind::UnaryOp {
                    op: Node::boxed(NodeKind::UnaryOperator(op), location(&op_node)),
                    operand: Box::new(self.expression(required_field(&node, "argument")?)?),
                }
            }
            "not_operator" => {
                let keyword = children(&node)
                    .first()
                    .map_or(loc, |token| location(token));
                NodeKind::UnaryOp {
                    op: Node::boxed(NodeKind::UnaryOperator(UnaryOperator::Not), keyword),
                    operand: Box::new(self.expression(required_field(&node, "argument")?)?),
                }
            }
            "boolean_operator" => self.boolean_operator(&node)?,
            "comparison_operator" => self.comparison(&node)?,
            "lambda" => {
                let args = match field(&node, "parameters") {
                    Some(params) => self.arguments(params)?,
                    None => self.empty_arguments(&node),
                };
                NodeKind::Lambda {
                    args: Box::new(args),
                    body: Box::new(self.expression(required_field(&node, "body")?)?),
                }
            }
            "conditional_expression" => {
                let parts = named_children(&node);
                let [body, test, orelse] = parts.as_slice() else {
                    return Err(syntax_error(&node, "malformed conditional expression"));
                };
                NodeKind::IfExp {
                    test: Box::new(self.expression(*test)?),
                    body: Box::new(self.expression(*body)?),
                    orelse: Box::new(self.expression(*orelse)?),
                }
            }
            "named_expression" => {
                let name = required_field(&node, "name")?;
                NodeKind::NamedExpr {
                    target: Box::new(self.target(name, ExprContext::Store)?),
                    value: Box::new(self.expression(required_field(&node, "value")?)?),
                }
            }
            "await" => NodeKind::Await {
                value: Box::new(self.expression(self.only_child(&node)?)?),
            },
            "yield" => {
                let value = named_children(&node).first().copied();
                if has_token(&node, "from") {
                    let value = value.ok_or_else(|| syntax_error(&node, "yield from needs a value"))?;
                    NodeKind::YieldFrom {
                        value: Box::new(self.expression(value)?),
                    }
                } else {
                    NodeKind::Yield {
                        value: value
                            .map(|v| self.expression(v))
                            .transpose()?
                            .map(Box::new),
                    }
                }
            }
            "list" | "list_pattern" => NodeKind::List {
                elts: self.elements(&node, ctx)?,
                ctx: Self::ctx(ctx, loc),
            },
            "tuple" | "tuple_pattern" | "expression_list" | "pattern_list" => NodeKind::Tuple {
                elts: self.elements(&node, ctx)?,
                ctx: Self::ctx(ctx, loc),
            },
            "set" => NodeKind::Set {
                elts: self.elements(&node, ExprContext::Load)?,
            },
            "dictionary" => self.dictionary(&node)?,
            "list_comprehension"
            | "set_comprehension"
            | "generator_expression"
            | "dictionary_comprehension" => self.comprehension(&node)?,
            "list_splat" | "list_splat_pattern" | "parenthesized_list_splat" => NodeKind::Starred {
                value: Box::new(self.expression_in(self.only_child(&node)?, ctx)?),
                ctx: Self::ctx(ctx, loc),
            },
            "parenthesized_expression" => return self.expression_in(self.only_child(&node)?, ctx),
            "type" | "generic_type" | "union_type" | "member_type" | "splat_type" => {
                return self.type_annotation(node)
            }
            other => {
                return Err(syntax_error(
                    &node,
                    format!("unexpected '{}' in expression", other),
                ))
            }
        };
        Ok(Node::new(kind, loc))
    }

    /// The single named child of a wrapper node such as `await x` or `(x)`
    fn only_child<'t>(&self, node: &TsNode<'t>) -> Result<TsNode<'t>> {
        named_children(node)
            .first()
            .copied()
            .ok_or_else(|| syntax_error(node, format!("empty '{}'", node.kind())))
    }

    fn elements(&self, node: &TsNode<'_>, ctx: ExprContext) -> Result<Vec<Node>> {
        named_children(node)
            .into_iter()
            .map(|element| self.expression_in(element, ctx))
            .collect()
    }

    fn subscript_slice(&self, node: &TsNode<'_>) -> Result<Node> {
        let subscripts = fields(node, "subscript");
        match subscripts.as_slice() {
            [single] => self.expression(*single),
            [first, .., last] => {
                let elts = subscripts
                    .iter()
                    .map(|sub| self.expression(*sub))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.tuple(elts, span(first, last), ExprContext::Load))
            }
            [] => Err(syntax_error(node, "subscript needs an index")),
        }
    }

    /// `lower:upper:step`, any part optional; colons decide which slot a part fills
    fn slice(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let mut parts: [Option<Box<Node>>; 3] = Default::default();
        let mut slot = 0;
        for child in children(node) {
            if child.kind() == ":" {
                slot += 1;
            } else if child.is_named() {
                parts[slot.min(2)] = Some(Box::new(self.expression(child)?));
            }
        }
        let [lower, upper, step] = parts;
        Ok(NodeKind::Slice { lower, upper, step })
    }

    fn call(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let func = self.expression(required_field(node, "function")?)?;
        let arguments = required_field(node, "arguments")?;
        let (args, keywords) = if arguments.kind() == "generator_expression" {
            (vec![self.expression(arguments)?], Vec::new())
        } else {
            self.call_arguments(&arguments)?
        };
        Ok(NodeKind::Call {
            func: Box::new(func),
            args,
            keywords,
        })
    }

    /// Positional arguments and keywords of an `argument_list`
    pub(super) fn call_arguments(&self, list: &TsNode<'_>) -> Result<(Vec<Node>, Vec<Node>)> {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        for argument in named_children(list) {
            match argument.kind() {
                "keyword_argument" => {
                    let kind = NodeKind::Keyword {
                        arg: Some(self.text(&required_field(&argument, "name")?).to_string()),
                        value: Box::new(self.expression(required_field(&argument, "value")?)?),
                    };
                    keywords.push(Node::new(kind, location(&argument)));
                }
                "dictionary_splat" => {
                    let kind = NodeKind::Keyword {
                        arg: None,
                        value: Box::new(self.expression(self.only_child(&argument)?)?),
                    };
                    keywords.push(Node::new(kind, location(&argument)));
                }
                _ => args.push(self.expression(argument)?),
            }
        }
        Ok((args, keywords))
    }

    /// `a and b and c` is one `BoolOp`; the grammar nests it to the left
    fn boolean_operator(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let op_node = required_field(node, "operator")?;
        let op = BoolOperator::from_token(self.text(&op_node)).ok_or_else(|| {
            syntax_error(&op_node, format!("unknown operator '{}'", self.text(&op_node)))
        })?;

        let mut values = Vec::new();
        self.bool_operands(required_field(node, "left")?, op, &mut values)?;
        values.push(self.expression(required_field(node, "right")?)?);

        Ok(NodeKind::BoolOp {
            op: Node::boxed(NodeKind::BoolOperator(op), location(&op_node)),
            values,
        })
    }

    fn bool_operands(&self, node: TsNode<'_>, op: BoolOperator, values: &mut Vec<Node>) -> Result<()> {
        let same_op = node.kind() == "boolean_operator"
            && field(&node, "operator")
                .and_then(|inner| BoolOperator::from_token(self.text(&inner)))
                == Some(op);
        if !same_op {
            values.push(self.expression(node)?);
            return Ok(());
        }
        self.bool_operands(required_field(&node, "left")?, op, values)?;
        values.push(self.expression(required_field(&node, "right")?)?);
        Ok(())
    }

    /// `a < b is not c`: named children are operands, the tokens between them operators
    fn comparison(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut pending: Option<(String, Location)> = None;

        for child in children(node) {
            if child.is_named() {
                if let Some((token, loc)) = pending.take() {
                    let op = CmpOperator::from_token(&token).ok_or_else(|| {
                        syntax_error(&child, format!("unknown comparison '{}'", token))
                    })?;
                    ops.push(Node::new(NodeKind::CmpOperator(op), loc));
                }
                operands.push(self.expression(child)?);
            } else {
                let text = self.text(&child);
                pending = Some(match pending {
                    Some((token, loc)) => (format!("{} {}", token, text), loc.to(location(&child))),
                    None => (text.to_string(), location(&child)),
                });
            }
        }

        let mut operands = operands.into_iter();
        let left = operands
            .next()
            .ok_or_else(|| syntax_error(node, "comparison needs operands"))?;
        Ok(NodeKind::Compare {
            left: Box::new(left),
            ops,
            comparators: operands.collect(),
        })
    }

    fn dictionary(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for entry in named_children(node) {
            match entry.kind() {
                "pair" => {
                    keys.push(Some(self.expression(required_field(&entry, "key")?)?));
                    values.push(self.expression(required_field(&entry, "value")?)?);
                }
                "dictionary_splat" => {
                    keys.push(None);
                    values.push(self.expression(self.only_child(&entry)?)?);
                }
                other => {
                    return Err(syntax_error(
                        &entry,
                        format!("unexpected '{}' in dictionary", other),
                    ))
                }
            }
        }
        Ok(NodeKind::Dict { keys, values })
    }

    fn comprehension(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let body = required_field(node, "body")?;
        let mut generators: Vec<Node> = Vec::new();

        for clause in named_children(node) {
            match clause.kind() {
                "for_in_clause" => generators.push(self.for_in_clause(&clause)?),
                "if_clause" => {
                    let test = self.expression(self.only_child(&clause)?)?;
                    let generator = generators
                        .last_mut()
                        .ok_or_else(|| syntax_error(&clause, "'if' before 'for' in comprehension"))?;
                    generator.location = generator.location.to(location(&clause));
                    if let NodeKind::Comprehension { ifs, .. } = &mut generator.kind {
                        ifs.push(test);
                    }
                }
                _ => {}
            }
        }

        Ok(match node.kind() {
            "dictionary_comprehension" => NodeKind::DictComp {
                key: Box::new(self.expression(required_field(&body, "key")?)?),
                value: Box::new(self.expression(required_field(&body, "value")?)?),
                generators,
            },
            "set_comprehension" => NodeKind::SetComp {
                elt: Box::new(self.expression(body)?),
                generators,
            },
            "generator_expression" => NodeKind::GeneratorExp {
                elt: Box::new(self.expression(body)?),
                generators,
            },
            _ => NodeKind::ListComp {
                elt: Box::new(self.expression(body)?),
                generators,
            },
        })
    }

    fn for_in_clause(&self, node: &TsNode<'_>) -> Result<Node> {
        let iters = fields(node, "right");
        let iter = match iters.as_slice() {
            [single] => self.expression(*single)?,
            [first, .., last] => {
                let elts = iters
                    .iter()
                    .map(|it| self.expression(*it))
                    .collect::<Result<Vec<_>>>()?;
                self.tuple(elts, span(first, last), ExprContext::Load)
            }
            [] => return Err(syntax_error(node, "comprehension needs an iterable")),
        };

        let kind = NodeKind::Comprehension {
            target: Box::new(self.target(required_field(node, "left")?, ExprContext::Store)?),
            iter: Box::new(iter),
            ifs: Vec::new(),
            is_async: has_token(node, "async"),
        };
        Ok(Node::new(kind, location(node)))
    }

    /// Lower an annotation or any other `type` position
    pub(super) fn type_annotation(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let kind = match node.kind() {
            "type" => return self.type_annotation(self.only_child(&node)?),
            "generic_type" => {
                let name = self.only_child(&node)?;
                let params = find_child_by_type(&node, "type_parameter")
                    .map(|p| named_children(&p))
                    .unwrap_or_default();
                let slice = match params.as_slice() {
                    [single] => self.type_annotation(*single)?,
                    [first, .., last] => {
                        let elts = params
                            .iter()
                            .map(|p| self.type_annotation(*p))
                            .collect::<Result<Vec<_>>>()?;
                        self.tuple(elts, span(first, last), ExprContext::Load)
                    }
                    [] => return Err(syntax_error(&node, "generic type needs parameters")),
                };
                NodeKind::Subscript {
                    value: Box::new(self.type_annotation(name)?),
                    slice: Box::new(slice),
                    ctx: Self::ctx(ExprContext::Load, loc),
                }
            }
            "union_type" => {
                let parts = named_children(&node);
                let [left, right] = parts.as_slice() else {
                    return Err(syntax_error(&node, "malformed union type"));
                };
                let bar = find_child_by_type(&node, "|").map_or(loc, |token| location(&token));
                NodeKind::BinOp {
                    left: Box::new(self.type_annotation(*left)?),
                    op: Node::boxed(NodeKind::Operator(Operator::BitOr), bar),
                    right: Box::new(self.type_annotation(*right)?),
                }
            }
            "member_type" => {
                let parts = named_children(&node);
                let [value, attr] = parts.as_slice() else {
                    return Err(syntax_error(&node, "malformed member type"));
                };
                NodeKind::Attribute {
                    value: Box::new(self.type_annotation(*value)?),
                    attr: self.text(attr).to_string(),
                    ctx: Self::ctx(ExprContext::Load, loc),
                }
            }
            "splat_type" => NodeKind::Starred {
                value: Box::new(self.type_annotation(self.only_child(&node)?)?),
                ctx: Self::ctx(ExprContext::Load, loc),
            },
            "constrained_type" => {
                return Err(syntax_error(&node, "bound only allowed in type parameters"))
            }
            _ => return self.expression(node),
        };
        Ok(Node::new(kind, loc))
    }
}

fn constant(value: Constant) -> NodeKind {
    NodeKind::Constant { value, kind: None }
}

/// Python rejects `f() = 1` and `a + b = 1`; only names, attributes,
/// subscripts and unpacking containers can be bound
fn check_assignable(node: &Node, at: &TsNode<'_>) -> Result<()> {
    match &node.kind {
        NodeKind::Name { .. } | NodeKind::Attribute { .. } | NodeKind::Subscript { .. } => Ok(()),
        NodeKind::Starred { value, .. } => check_assignable(value, at),
        NodeKind::List { elts, .. } | NodeKind::Tuple { elts, .. } => {
            elts.iter().try_for_each(|elt| check_assignable(elt, at))
        }
        other => Err(syntax_error(at, format!("cannot assign to {}", other.tag()))),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Constant, Node, NodeKind};
    use crate::error::Error;
    use crate::lower::{build_tree, BuildOptions};

    fn expr(source: &str) -> Node {
        let module = build_tree(source, &BuildOptions::default()).unwrap();
        let NodeKind::Module { mut body } = module.kind else {
            panic!("expected module");
        };
        match body.remove(0).kind {
            NodeKind::Expr { value } => *value,
            NodeKind::Assign { value, .. } => *value,
            other => panic!("expected expression statement, got {}", other.tag()),
        }
    }

    #[test]
    fn test_call_arguments_and_keywords() {
        let call = expr("print('hi', *rest, sep='', **extra)\n");
        let NodeKind::Call { args, keywords, .. } = call.kind else {
            panic!("expected Call");
        };
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].tag(), "Starred");
        assert_eq!(keywords.len(), 2);
        let NodeKind::Keyword { arg, .. } = &keywords[1].kind else {
            panic!("expected keyword");
        };
        assert_eq!(*arg, None);
    }

    #[test]
    fn test_comparison_chain() {
        let cmp = expr("a < b is not c\n");
        let NodeKind::Compare {
            left,
            ops,
            comparators,
        } = cmp.kind
        else {
            panic!("expected Compare");
        };
        assert_eq!(left.tag(), "Name");
        let tags: Vec<&str> = ops.iter().map(Node::tag).collect();
        assert_eq!(tags, vec!["Lt", "IsNot"]);
        assert_eq!(comparators.len(), 2);
    }

    #[test]
    fn test_not_in_operator() {
        let cmp = expr("x not in y\n");
        let NodeKind::Compare { ops, .. } = cmp.kind else {
            panic!("expected Compare");
        };
        assert_eq!(ops[0].tag(), "NotIn");
    }

    #[test]
    fn test_bool_op_flattens_same_operator() {
        let node = expr("a and b and c\n");
        let NodeKind::BoolOp { op, values } = node.kind else {
            panic!("expected BoolOp");
        };
        assert_eq!(op.tag(), "And");
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_dict_with_splat_has_null_key() {
        let node = expr("{'a': 1, **rest}\n");
        let NodeKind::Dict { keys, values } = node.kind else {
            panic!("expected Dict");
        };
        assert_eq!(keys.len(), 2);
        assert!(keys[0].is_some());
        assert!(keys[1].is_none());
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_list_comprehension_with_condition() {
        let node = expr("[x * 2 for x in items if x]\n");
        let NodeKind::ListComp { elt, generators } = node.kind else {
            panic!("expected ListComp");
        };
        assert_eq!(elt.tag(), "BinOp");
        let NodeKind::Comprehension {
            target,
            ifs,
            is_async,
            ..
        } = &generators[0].kind
        else {
            panic!("expected comprehension");
        };
        assert_eq!(ifs.len(), 1);
        assert!(!is_async);
        let NodeKind::Name { ctx, .. } = &target.kind else {
            panic!("expected Name target");
        };
        assert_eq!(ctx.tag(), "Store");
    }

    #[test]
    fn test_parentheses_are_transparent() {
        let node = expr("(x)\n");
        assert_eq!(node.tag(), "Name");
        assert_eq!(node.location.col_offset, 1);
    }

    #[test]
    fn test_subscript_with_slice_and_index() {
        let node = expr("a[1:2, ::3]\n");
        let NodeKind::Subscript { slice, .. } = node.kind else {
            panic!("expected Subscript");
        };
        let NodeKind::Tuple { elts, .. } = slice.kind else {
            panic!("expected Tuple slice");
        };
        let NodeKind::Slice { lower, upper, step } = &elts[1].kind else {
            panic!("expected Slice");
        };
        assert!(lower.is_none() && upper.is_none());
        assert!(step.is_some());
    }

    #[test]
    fn test_conditional_expression_order() {
        let node = expr("a if cond else b\n");
        let NodeKind::IfExp { test, body, .. } = node.kind else {
            panic!("expected IfExp");
        };
        assert!(matches!(&test.kind, NodeKind::Name { id, .. } if id == "cond"));
        assert!(matches!(&body.kind, NodeKind::Name { id, .. } if id == "a"));
    }

    #[test]
    fn test_negative_number_is_unary() {
        let node = expr("-1\n");
        let NodeKind::UnaryOp { op, operand } = node.kind else {
            panic!("expected UnaryOp");
        };
        assert_eq!(op.tag(), "USub");
        assert_eq!(
            operand.kind,
            NodeKind::Constant {
                value: Constant::Int(1),
                kind: None
            }
        );
    }

    #[test]
    fn test_cannot_assign_to_call() {
        let err = build_tree("f() = 1\n", &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }
}
