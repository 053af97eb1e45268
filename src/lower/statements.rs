// Statement lowering
//
// One arm per tree-sitter statement kind. Compound statements recurse into
// their `block` bodies; decorated definitions pass their decorators down.

use super::helpers::{
    children, field, fields, find_child_by_type, find_children_by_type, has_token, location,
    named_children, required_field, span, syntax_error,
};
use super::TreeBuilder;
use crate::ast::{ExprContext, Node, NodeKind, Operator};
use crate::error::Result;
use tree_sitter::Node as TsNode;

impl TreeBuilder<'_> {
    pub(super) fn statement(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let kind = match node.kind() {
            "expression_statement" => return self.expression_statement(node),
            "return_statement" => NodeKind::Return {
                value: self.optional_expression(&node)?,
            },
            "delete_statement" => NodeKind::Delete {
                targets: self.delete_targets(&node)?,
            },
            "raise_statement" => {
                let cause = field(&node, "cause");
                let exc = named_children(&node)
                    .into_iter()
                    .find(|child| Some(child.id()) != cause.map(|c| c.id()));
                NodeKind::Raise {
                    exc: exc.map(|e| self.expression(e)).transpose()?.map(Box::new),
                    cause: cause.map(|c| self.expression(c)).transpose()?.map(Box::new),
                }
            }
            "pass_statement" => NodeKind::Pass,
            "break_statement" => NodeKind::Break,
            "continue_statement" => NodeKind::Continue,
            "global_statement" => NodeKind::Global {
                names: self.identifiers(&node),
            },
            "nonlocal_statement" => NodeKind::Nonlocal {
                names: self.identifiers(&node),
            },
            "assert_statement" => {
                let parts = named_children(&node);
                let test = parts
                    .first()
                    .ok_or_else(|| syntax_error(&node, "assert needs a test"))?;
                NodeKind::Assert {
                    test: Box::new(self.expression(*test)?),
                    msg: parts
                        .get(1)
                        .map(|msg| self.expression(*msg))
                        .transpose()?
                        .map(Box::new),
                }
            }
            "import_statement" => NodeKind::Import {
                names: self.import_names(&node)?,
            },
            "import_from_statement" => return self.import_from(node),
            "future_import_statement" => NodeKind::ImportFrom {
                module: Some("__future__".to_string()),
                names: self.import_names(&node)?,
                level: 0,
            },
            "if_statement" => return self.if_statement(node),
            "for_statement" => return self.for_statement(node),
            "while_statement" => NodeKind::While {
                test: Box::new(self.expression(required_field(&node, "condition")?)?),
                body: self.block(required_field(&node, "body")?)?,
                orelse: self.else_body(&node)?,
            },
            "try_statement" => return self.try_statement(node),
            "with_statement" => return self.with_statement(node),
            "function_definition" => return self.function_definition(node, Vec::new()),
            "class_definition" => return self.class_definition(node, Vec::new()),
            "decorated_definition" => return self.decorated_definition(node),
            "match_statement" => return self.match_statement(node),
            "type_alias_statement" => return self.type_alias(node),
            "print_statement" => return self.print_statement(node),
            "exec_statement" => {
                return Err(syntax_error(&node, "Missing parentheses in call to 'exec'"))
            }
            other => {
                return Err(syntax_error(
                    &node,
                    format!("unexpected '{}' in statement position", other),
                ))
            }
        };
        Ok(Node::new(kind, loc))
    }

    /// Statements of a `block` body
    pub(super) fn block(&self, node: TsNode<'_>) -> Result<Vec<Node>> {
        if node.kind() != "block" {
            return Ok(vec![self.statement(node)?]);
        }
        named_children(&node)
            .into_iter()
            .map(|stmt| self.statement(stmt))
            .collect()
    }

    /// Body of the optional `else` clause stored under `alternative`
    fn else_body(&self, node: &TsNode<'_>) -> Result<Vec<Node>> {
        match field(node, "alternative") {
            Some(clause) => self.block(required_field(&clause, "body")?),
            None => Ok(Vec::new()),
        }
    }

    fn identifiers(&self, node: &TsNode<'_>) -> Vec<String> {
        find_children_by_type(node, "identifier")
            .iter()
            .map(|ident| self.text(ident).to_string())
            .collect()
    }

    fn optional_expression(&self, node: &TsNode<'_>) -> Result<Option<Box<Node>>> {
        named_children(node)
            .first()
            .map(|value| self.expression(*value))
            .transpose()
            .map(|value| value.map(Box::new))
    }

    fn delete_targets(&self, node: &TsNode<'_>) -> Result<Vec<Node>> {
        let parts = named_children(node);
        match parts.first() {
            Some(list) if list.kind() == "expression_list" => named_children(list)
                .into_iter()
                .map(|target| self.target(target, ExprContext::Del))
                .collect(),
            Some(target) => Ok(vec![self.target(*target, ExprContext::Del)?]),
            None => Err(syntax_error(node, "del needs a target")),
        }
    }

    fn expression_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let parts = named_children(&node);
        let value = match parts.as_slice() {
            [single] if single.kind() == "assignment" => return self.assignment(*single, &node),
            [single] if single.kind() == "augmented_assignment" => {
                return self.augmented_assignment(*single)
            }
            [single] => self.expression(*single)?,
            [first, .., last] => {
                let elts = parts
                    .iter()
                    .map(|part| self.expression(*part))
                    .collect::<Result<Vec<_>>>()?;
                self.tuple(elts, span(first, last), ExprContext::Load)
            }
            [] => return Err(syntax_error(&node, "empty expression statement")),
        };
        Ok(Node::new(
            NodeKind::Expr {
                value: Box::new(value),
            },
            loc,
        ))
    }

    /// `print >>f, x` is a right shift of the name `print` inside a tuple;
    /// any other `print` statement is the Python 2 form
    fn print_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let Some(chevron) = find_child_by_type(&node, "chevron") else {
            return Err(syntax_error(&node, "Missing parentheses in call to 'print'"));
        };
        let keyword = find_child_by_type(&node, "print")
            .ok_or_else(|| syntax_error(&node, "expected 'print'"))?;
        let shift = find_child_by_type(&chevron, ">>")
            .ok_or_else(|| syntax_error(&chevron, "expected '>>'"))?;
        let stream = named_children(&chevron)
            .first()
            .copied()
            .ok_or_else(|| syntax_error(&chevron, "expected an expression after '>>'"))?;

        let print_loc = location(&keyword);
        let right = self.expression(stream)?;
        let shifted = Node::new(
            NodeKind::BinOp {
                left: Node::boxed(
                    NodeKind::Name {
                        id: "print".to_string(),
                        ctx: Self::ctx(ExprContext::Load, print_loc),
                    },
                    print_loc,
                ),
                op: Node::boxed(NodeKind::Operator(Operator::RShift), location(&shift)),
                right: Box::new(right),
            },
            print_loc.to(location(&stream)),
        );

        let rest = named_children(&node)
            .into_iter()
            .filter(|child| child.id() != chevron.id())
            .collect::<Vec<_>>();
        let trailing_comma = children(&node).last().copied().filter(|last| last.kind() == ",");

        let value = if rest.is_empty() && trailing_comma.is_none() {
            shifted
        } else {
            let mut elts = vec![shifted];
            for expr in rest {
                elts.push(self.expression(expr)?);
            }
            let end = match trailing_comma {
                Some(comma) => location(&comma),
                None => elts.last().map_or(print_loc, |last| last.location),
            };
            self.tuple(elts, print_loc.to(end), ExprContext::Load)
        };

        Ok(Node::new(
            NodeKind::Expr {
                value: Box::new(value),
            },
            location(&node),
        ))
    }

    fn assignment(&self, node: TsNode<'_>, stmt: &TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let left = required_field(&node, "left")?;

        if let Some(annotation) = field(&node, "type") {
            let value = field(&node, "right")
                .map(|right| self.right_hand_side(right))
                .transpose()?
                .map(Box::new);
            let kind = NodeKind::AnnAssign {
                target: Box::new(self.target(left, ExprContext::Store)?),
                annotation: Box::new(self.type_annotation(annotation)?),
                value,
                simple: left.kind() == "identifier",
            };
            return Ok(Node::new(kind, loc));
        }

        // `a = b = value` nests on the right; flatten into one target list
        let mut targets = vec![self.target(left, ExprContext::Store)?];
        let mut right = required_field(&node, "right")?;
        while right.kind() == "assignment" && field(&right, "type").is_none() {
            targets.push(self.target(required_field(&right, "left")?, ExprContext::Store)?);
            right = required_field(&right, "right")?;
        }

        let mut assign = Node::new(
            NodeKind::Assign {
                targets,
                value: Box::new(self.right_hand_side(right)?),
            },
            loc,
        );
        assign.type_comment = self.trailing_type_comment(stmt);
        Ok(assign)
    }

    fn augmented_assignment(&self, node: TsNode<'_>) -> Result<Node> {
        let op_node = required_field(&node, "operator")?;
        let op = Operator::from_token(self.text(&op_node)).ok_or_else(|| {
            syntax_error(&op_node, format!("unknown operator '{}'", self.text(&op_node)))
        })?;

        let kind = NodeKind::AugAssign {
            target: Box::new(self.target(required_field(&node, "left")?, ExprContext::Store)?),
            op: Node::boxed(NodeKind::Operator(op), location(&op_node)),
            value: Box::new(self.right_hand_side(required_field(&node, "right")?)?),
        };
        Ok(Node::new(kind, location(&node)))
    }

    fn right_hand_side(&self, node: TsNode<'_>) -> Result<Node> {
        match node.kind() {
            "assignment" | "augmented_assignment" => {
                Err(syntax_error(&node, "invalid syntax in assignment value"))
            }
            _ => self.expression(node),
        }
    }

    fn import_names(&self, node: &TsNode<'_>) -> Result<Vec<Node>> {
        fields(node, "name")
            .into_iter()
            .map(|name| self.alias(name))
            .collect()
    }

    fn alias(&self, node: TsNode<'_>) -> Result<Node> {
        let kind = match node.kind() {
            "aliased_import" => NodeKind::Alias {
                name: self.dotted_name(&required_field(&node, "name")?),
                asname: Some(self.text(&required_field(&node, "alias")?).to_string()),
            },
            "dotted_name" => NodeKind::Alias {
                name: self.dotted_name(&node),
                asname: None,
            },
            other => {
                return Err(syntax_error(
                    &node,
                    format!("unexpected '{}' in import", other),
                ))
            }
        };
        Ok(Node::new(kind, location(&node)))
    }

    pub(super) fn dotted_name(&self, node: &TsNode<'_>) -> String {
        named_children(node)
            .iter()
            .map(|part| self.text(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn import_from(&self, node: TsNode<'_>) -> Result<Node> {
        let module_node = required_field(&node, "module_name")?;
        let (module, level) = if module_node.kind() == "relative_import" {
            let level = find_child_by_type(&module_node, "import_prefix")
                .map(|prefix| self.text(&prefix).matches('.').count())
                .unwrap_or(0);
            let module = find_child_by_type(&module_node, "dotted_name")
                .map(|name| self.dotted_name(&name));
            (module, level)
        } else {
            (Some(self.dotted_name(&module_node)), 0)
        };

        let names = match find_child_by_type(&node, "wildcard_import") {
            Some(star) => vec![Node::new(
                NodeKind::Alias {
                    name: "*".to_string(),
                    asname: None,
                },
                location(&star),
            )],
            None => self.import_names(&node)?,
        };

        Ok(Node::new(
            NodeKind::ImportFrom {
                module,
                names,
                level,
            },
            location(&node),
        ))
    }

    fn if_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let test = self.expression(required_field(&node, "condition")?)?;
        let body = self.block(required_field(&node, "consequence")?)?;

        // Fold `elif` chains from the back into nested `If` nodes
        let mut orelse = Vec::new();
        for clause in fields(&node, "alternative").iter().rev() {
            match clause.kind() {
                "else_clause" => orelse = self.block(required_field(clause, "body")?)?,
                "elif_clause" => {
                    let inner_orelse = std::mem::take(&mut orelse);
                    let end = inner_orelse
                        .last()
                        .map_or_else(|| location(clause), |last| last.location);
                    let nested = NodeKind::If {
                        test: Box::new(self.expression(required_field(clause, "condition")?)?),
                        body: self.block(required_field(clause, "consequence")?)?,
                        orelse: inner_orelse,
                    };
                    orelse = vec![Node::new(nested, location(clause).to(end))];
                }
                other => {
                    return Err(syntax_error(
                        clause,
                        format!("unexpected '{}' in if statement", other),
                    ))
                }
            }
        }

        Ok(Node::new(
            NodeKind::If {
                test: Box::new(test),
                body,
                orelse,
            },
            location(&node),
        ))
    }

    fn for_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let body_node = required_field(&node, "body")?;
        let kind = NodeKind::For {
            is_async: has_token(&node, "async"),
            target: Box::new(self.target(required_field(&node, "left")?, ExprContext::Store)?),
            iter: Box::new(self.expression(required_field(&node, "right")?)?),
            body: self.block(body_node)?,
            orelse: self.else_body(&node)?,
        };
        let mut stmt = Node::new(kind, location(&node));
        stmt.type_comment = self.header_type_comment(&node, &body_node);
        Ok(stmt)
    }

    fn try_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let body = self.block(required_field(&node, "body")?)?;
        let mut handlers = Vec::new();
        let mut orelse = Vec::new();
        let mut finalbody = Vec::new();
        let mut is_star = false;

        for clause in named_children(&node) {
            match clause.kind() {
                "except_clause" => handlers.push(self.except_handler(clause)?),
                "except_group_clause" => {
                    is_star = true;
                    handlers.push(self.except_handler(clause)?);
                }
                "else_clause" => orelse = self.block(required_field(&clause, "body")?)?,
                "finally_clause" => {
                    let block = find_child_by_type(&clause, "block")
                        .ok_or_else(|| syntax_error(&clause, "finally needs a body"))?;
                    finalbody = self.block(block)?;
                }
                _ => {}
            }
        }

        Ok(Node::new(
            NodeKind::Try {
                is_star,
                body,
                handlers,
                orelse,
                finalbody,
            },
            location(&node),
        ))
    }

    /// `except [type [as name]]:` clause; the body is always the last child
    fn except_handler(&self, node: TsNode<'_>) -> Result<Node> {
        let mut parts = named_children(&node);
        let body_node = parts
            .pop()
            .filter(|last| last.kind() == "block")
            .ok_or_else(|| syntax_error(&node, "except clause needs a body"))?;

        let (type_node, name_node) = match parts.as_slice() {
            [] => (None, None),
            [single] if single.kind() == "as_pattern" => {
                let (value, alias) = self.as_pattern_parts(single)?;
                (Some(value), alias)
            }
            [single] => (Some(*single), None),
            [exc, name, ..] => (Some(*exc), Some(*name)),
        };

        let kind = NodeKind::ExceptHandler {
            type_: type_node
                .map(|exc| self.expression(exc))
                .transpose()?
                .map(Box::new),
            name: name_node.map(|name| self.text(&name).to_string()),
            body: self.block(body_node)?,
        };
        Ok(Node::new(kind, location(&node)))
    }

    /// Split `value as target` into its value and the node under `as_pattern_target`
    pub(super) fn as_pattern_parts<'t>(
        &self,
        node: &TsNode<'t>,
    ) -> Result<(TsNode<'t>, Option<TsNode<'t>>)> {
        let parts = named_children(node);
        let value = parts
            .first()
            .copied()
            .ok_or_else(|| syntax_error(node, "empty 'as' clause"))?;
        let target = field(node, "alias")
            .or_else(|| parts.get(1).copied())
            .map(|alias| {
                if alias.kind() == "as_pattern_target" {
                    named_children(&alias).first().copied().unwrap_or(alias)
                } else {
                    alias
                }
            });
        Ok((value, target))
    }

    fn with_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let clause = find_child_by_type(&node, "with_clause")
            .ok_or_else(|| syntax_error(&node, "with statement needs items"))?;
        let items = find_children_by_type(&clause, "with_item")
            .into_iter()
            .map(|item| self.with_item(item))
            .collect::<Result<Vec<_>>>()?;

        let body_node = required_field(&node, "body")?;
        let kind = NodeKind::With {
            is_async: has_token(&node, "async"),
            items,
            body: self.block(body_node)?,
        };
        let mut stmt = Node::new(kind, location(&node));
        stmt.type_comment = self.header_type_comment(&node, &body_node);
        Ok(stmt)
    }

    fn with_item(&self, node: TsNode<'_>) -> Result<Node> {
        let value = required_field(&node, "value")?;
        let (context_expr, optional_vars) = if value.kind() == "as_pattern" {
            let (expr, target) = self.as_pattern_parts(&value)?;
            let target = target
                .map(|t| self.target(t, ExprContext::Store))
                .transpose()?;
            (self.expression(expr)?, target)
        } else {
            (self.expression(value)?, None)
        };

        Ok(Node::new(
            NodeKind::WithItem {
                context_expr: Box::new(context_expr),
                optional_vars: optional_vars.map(Box::new),
            },
            location(&node),
        ))
    }

    fn function_definition(&self, node: TsNode<'_>, decorator_list: Vec<Node>) -> Result<Node> {
        let body_node = required_field(&node, "body")?;
        let kind = NodeKind::FunctionDef {
            is_async: has_token(&node, "async"),
            name: self.text(&required_field(&node, "name")?).to_string(),
            args: Box::new(self.arguments(required_field(&node, "parameters")?)?),
            body: self.block(body_node)?,
            decorator_list,
            returns: field(&node, "return_type")
                .map(|returns| self.type_annotation(returns))
                .transpose()?
                .map(Box::new),
            type_params: self.optional_type_params(&node)?,
        };
        let mut def = Node::new(kind, location(&node));
        def.type_comment = self.function_type_comment(&node, &body_node);
        Ok(def)
    }

    fn class_definition(&self, node: TsNode<'_>, decorator_list: Vec<Node>) -> Result<Node> {
        let (bases, keywords) = match field(&node, "superclasses") {
            Some(list) => self.call_arguments(&list)?,
            None => (Vec::new(), Vec::new()),
        };
        let kind = NodeKind::ClassDef {
            name: self.text(&required_field(&node, "name")?).to_string(),
            bases,
            keywords,
            body: self.block(required_field(&node, "body")?)?,
            decorator_list,
            type_params: self.optional_type_params(&node)?,
        };
        Ok(Node::new(kind, location(&node)))
    }

    fn optional_type_params(&self, node: &TsNode<'_>) -> Result<Vec<Node>> {
        match field(node, "type_parameters") {
            Some(params) => self.type_params(params),
            None => Ok(Vec::new()),
        }
    }

    fn decorated_definition(&self, node: TsNode<'_>) -> Result<Node> {
        let decorators = find_children_by_type(&node, "decorator")
            .into_iter()
            .map(|decorator| {
                let expr = named_children(&decorator)
                    .first()
                    .copied()
                    .ok_or_else(|| syntax_error(&decorator, "empty decorator"))?;
                self.expression(expr)
            })
            .collect::<Result<Vec<_>>>()?;

        let definition = required_field(&node, "definition")?;
        match definition.kind() {
            "function_definition" => self.function_definition(definition, decorators),
            "class_definition" => self.class_definition(definition, decorators),
            other => Err(syntax_error(
                &definition,
                format!("cannot decorate '{}'", other),
            )),
        }
    }

    fn type_alias(&self, node: TsNode<'_>) -> Result<Node> {
        let left = required_field(&node, "left")?;
        let left = if left.kind() == "type" {
            named_children(&left).first().copied().unwrap_or(left)
        } else {
            left
        };

        // `type Alias[T] = ...` parses its left side as a generic type
        let (name_node, type_params) = if left.kind() == "generic_type" {
            let name = named_children(&left)
                .first()
                .copied()
                .ok_or_else(|| syntax_error(&left, "type alias needs a name"))?;
            let params = match find_child_by_type(&left, "type_parameter") {
                Some(params) => self.type_params(params)?,
                None => Vec::new(),
            };
            (name, params)
        } else {
            (left, Vec::new())
        };

        let name_loc = location(&name_node);
        let kind = NodeKind::TypeAlias {
            name: Box::new(Node::new(
                NodeKind::Name {
                    id: self.text(&name_node).to_string(),
                    ctx: Self::ctx(ExprContext::Store, name_loc),
                },
                name_loc,
            )),
            type_params,
            value: Box::new(self.type_annotation(required_field(&node, "right")?)?),
        };
        Ok(Node::new(kind, location(&node)))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Constant, Location, Node, NodeKind};
    use crate::lower::{build_tree, BuildOptions};

    fn first_statement(source: &str) -> Node {
        first_statement_with(source, &BuildOptions::default())
    }

    fn first_statement_with(source: &str, options: &BuildOptions) -> Node {
        match build_tree(source, options).unwrap().kind {
            NodeKind::Module { mut body } => body.remove(0),
            other => panic!("expected module, got {}", other.tag()),
        }
    }

    #[test]
    fn test_chained_assignment_has_two_targets() {
        let stmt = first_statement("a = b = 1\n");
        match stmt.kind {
            NodeKind::Assign { targets, value } => {
                assert_eq!(targets.len(), 2);
                assert!(targets.iter().all(|t| t.tag() == "Name"));
                assert_eq!(value.tag(), "Constant");
            }
            other => panic!("expected Assign, got {}", other.tag()),
        }
    }

    #[test]
    fn test_annotated_assignment() {
        let stmt = first_statement("x: int = 5\n");
        match stmt.kind {
            NodeKind::AnnAssign {
                annotation, simple, ..
            } => {
                assert!(simple);
                assert_eq!(annotation.tag(), "Name");
            }
            other => panic!("expected AnnAssign, got {}", other.tag()),
        }
    }

    #[test]
    fn test_augmented_assignment_operator() {
        let stmt = first_statement("total += 2\n");
        match stmt.kind {
            NodeKind::AugAssign { op, .. } => assert_eq!(op.tag(), "Add"),
            other => panic!("expected AugAssign, got {}", other.tag()),
        }
    }

    #[test]
    fn test_elif_nests_into_orelse() {
        let stmt = first_statement("if a:\n    pass\nelif b:\n    pass\nelse:\n    x = 1\n");
        let NodeKind::If { orelse, .. } = stmt.kind else {
            panic!("expected If");
        };
        assert_eq!(orelse.len(), 1);
        assert_eq!(orelse[0].tag(), "If");
        assert_eq!(orelse[0].location.lineno, 3);
        assert_eq!(orelse[0].location.end_lineno, 6);
        let NodeKind::If { orelse: inner, .. } = &orelse[0].kind else {
            panic!("expected nested If");
        };
        assert_eq!(inner[0].tag(), "Assign");
    }

    #[test]
    fn test_relative_import() {
        let stmt = first_statement("from ..pkg.mod import a as b, c\n");
        let NodeKind::ImportFrom {
            module,
            names,
            level,
        } = stmt.kind
        else {
            panic!("expected ImportFrom");
        };
        assert_eq!(module.as_deref(), Some("pkg.mod"));
        assert_eq!(level, 2);
        assert_eq!(names.len(), 2);
        assert_eq!(
            names[0].kind,
            NodeKind::Alias {
                name: "a".to_string(),
                asname: Some("b".to_string())
            }
        );
    }

    #[test]
    fn test_bare_relative_import_has_no_module() {
        let stmt = first_statement("from . import x\n");
        let NodeKind::ImportFrom { module, level, .. } = stmt.kind else {
            panic!("expected ImportFrom");
        };
        assert_eq!(module, None);
        assert_eq!(level, 1);
    }

    #[test]
    fn test_async_function_is_flagged() {
        let stmt = first_statement("async def f():\n    await g()\n");
        assert_eq!(stmt.tag(), "AsyncFunctionDef");
    }

    #[test]
    fn test_decorated_function_keeps_def_position() {
        let stmt = first_statement("@wraps(f)\ndef g():\n    pass\n");
        assert_eq!(stmt.location.lineno, 2);
        let NodeKind::FunctionDef { decorator_list, .. } = stmt.kind else {
            panic!("expected FunctionDef");
        };
        assert_eq!(decorator_list.len(), 1);
        assert_eq!(decorator_list[0].tag(), "Call");
    }

    #[test]
    fn test_with_as_target_is_store() {
        let stmt = first_statement("with open(p) as fh:\n    pass\n");
        let NodeKind::With { items, .. } = stmt.kind else {
            panic!("expected With");
        };
        let NodeKind::WithItem { optional_vars, .. } = &items[0].kind else {
            panic!("expected withitem");
        };
        let target = optional_vars.as_ref().unwrap();
        let NodeKind::Name { id, ctx } = &target.kind else {
            panic!("expected Name");
        };
        assert_eq!(id, "fh");
        assert_eq!(ctx.tag(), "Store");
    }

    #[test]
    fn test_try_star_and_handlers() {
        let stmt = first_statement(
            "try:\n    pass\nexcept* ValueError as e:\n    pass\nfinally:\n    pass\n",
        );
        assert_eq!(stmt.tag(), "TryStar");
        let NodeKind::Try {
            handlers,
            finalbody,
            ..
        } = stmt.kind
        else {
            panic!("expected Try");
        };
        assert_eq!(finalbody.len(), 1);
        let NodeKind::ExceptHandler { name, type_, .. } = &handlers[0].kind else {
            panic!("expected handler");
        };
        assert_eq!(name.as_deref(), Some("e"));
        assert_eq!(type_.as_ref().unwrap().tag(), "Name");
    }

    #[test]
    fn test_assignment_type_comment_is_opt_in() {
        let source = "x = []  # type: List[int]\n";
        assert_eq!(first_statement(source).type_comment, None);

        let options = BuildOptions {
            type_comments: true,
        };
        assert_eq!(
            first_statement_with(source, &options).type_comment.as_deref(),
            Some("List[int]")
        );
    }

    #[test]
    fn test_function_header_type_comment() {
        let options = BuildOptions {
            type_comments: true,
        };
        let stmt = first_statement_with("def f(a):  # type: (int) -> str\n    return a\n", &options);
        assert_eq!(stmt.type_comment.as_deref(), Some("(int) -> str"));
    }

    #[test]
    fn test_return_tuple() {
        let stmt = first_statement("def f():\n    return 1, 2\n");
        let NodeKind::FunctionDef { body, .. } = stmt.kind else {
            panic!("expected FunctionDef");
        };
        let NodeKind::Return { value } = &body[0].kind else {
            panic!("expected Return");
        };
        assert_eq!(value.as_ref().unwrap().tag(), "Tuple");
    }

    #[test]
    fn test_global_names() {
        let stmt = first_statement("global a, b\n");
        assert_eq!(
            stmt.kind,
            NodeKind::Global {
                names: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn test_type_alias() {
        let stmt = first_statement("type Point = tuple[float, float]\n");
        let NodeKind::TypeAlias { name, value, .. } = stmt.kind else {
            panic!("expected TypeAlias");
        };
        assert_eq!(name.tag(), "Name");
        assert_eq!(value.tag(), "Subscript");
    }

    #[test]
    fn test_print_chevron_is_a_shift() {
        let stmt = first_statement("print >>f, x\n");
        let NodeKind::Expr { value } = stmt.kind else {
            panic!("expected Expr");
        };
        assert_eq!(value.location, Location::new(1, 0, 1, 12));
        let NodeKind::Tuple { elts, .. } = value.kind else {
            panic!("expected Tuple");
        };
        assert_eq!(elts.len(), 2);
        let NodeKind::BinOp { left, op, right } = &elts[0].kind else {
            panic!("expected BinOp");
        };
        assert_eq!(elts[0].location, Location::new(1, 0, 1, 9));
        assert!(matches!(&left.kind, NodeKind::Name { id, .. } if id == "print"));
        assert_eq!(op.tag(), "RShift");
        assert!(matches!(&right.kind, NodeKind::Name { id, .. } if id == "f"));
        assert!(matches!(&elts[1].kind, NodeKind::Name { id, .. } if id == "x"));
    }

    #[test]
    fn test_print_chevron_without_values() {
        let stmt = first_statement("print >> f\n");
        let NodeKind::Expr { value } = stmt.kind else {
            panic!("expected Expr");
        };
        assert_eq!(value.tag(), "BinOp");
    }

    #[test]
    fn test_python2_print_is_rejected() {
        let err = build_tree("print x\n", &BuildOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Missing parentheses in call to 'print'"));
    }

    #[test]
    fn test_compound_ends_ignore_trailing_comments() {
        let def = first_statement("def f():\n    pass\n    # trailing\nx = 1\n");
        assert_eq!(def.location, Location::new(1, 0, 2, 8));

        let for_loop = first_statement("for x in y: pass  # hi\n");
        assert_eq!(for_loop.location, Location::new(1, 0, 1, 16));

        let branch = first_statement("if x: pass  # c\n");
        assert_eq!(branch.location, Location::new(1, 0, 1, 10));

        let class = first_statement("class C:\n    pass\n    # c\n");
        assert_eq!(class.location.end_lineno, 2);

        let with = first_statement("with a:\n    pass\n    # c\n");
        assert_eq!(with.location.end_lineno, 2);
    }

    #[test]
    fn test_assert_message() {
        let stmt = first_statement("assert x, 'boom'\n");
        let NodeKind::Assert { msg, .. } = stmt.kind else {
            panic!("expected Assert");
        };
        assert_eq!(
            msg.unwrap().kind,
            NodeKind::Constant {
                value: Constant::Str("boom".to_string()),
                kind: None
            }
        );
    }
}
