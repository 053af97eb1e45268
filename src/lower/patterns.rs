// `match` statements and structural patterns
//
// The grammar inlines its simple patterns, so a single `case_pattern` can hold
// loose tokens: `_`, a leading `-` before a number, or the `|` separators of
// an alternation. `pattern_atoms` walks those tokens in order.

use super::helpers::{
    children, field, fields, find_child_by_type, location, named_children, required_field, span,
    syntax_error,
};
use super::TreeBuilder;
use crate::ast::{Constant, ExprContext, Location, Node, NodeKind, Operator, UnaryOperator};
use crate::error::Result;
use tree_sitter::Node as TsNode;

fn wildcard(location: Location) -> Node {
    Node::new(
        NodeKind::MatchAs {
            pattern: None,
            name: None,
        },
        location,
    )
}

impl TreeBuilder<'_> {
    pub(super) fn match_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let subjects = fields(&node, "subject");
        let subject = match subjects.as_slice() {
            [single] => self.expression(*single)?,
            [first, .., last] => {
                let elts = subjects
                    .iter()
                    .map(|s| self.expression(*s))
                    .collect::<Result<Vec<_>>>()?;
                self.tuple(elts, span(first, last), ExprContext::Load)
            }
            [] => return Err(syntax_error(&node, "match needs a subject")),
        };

        let body = required_field(&node, "body")?;
        let cases = named_children(&body)
            .into_iter()
            .filter(|child| child.kind() == "case_clause")
            .map(|clause| self.case_clause(clause))
            .collect::<Result<Vec<_>>>()?;

        Ok(Node::new(
            NodeKind::Match {
                subject: Box::new(subject),
                cases,
            },
            location(&node),
        ))
    }

    fn case_clause(&self, node: TsNode<'_>) -> Result<Node> {
        let patterns: Vec<TsNode<'_>> = named_children(&node)
            .into_iter()
            .filter(|child| child.kind() == "case_pattern")
            .collect();
        let pattern = match patterns.as_slice() {
            [single] => self.pattern(*single)?,
            // `case a, b:` is an open sequence pattern
            [first, .., last] => Node::new(
                NodeKind::MatchSequence {
                    patterns: patterns
                        .iter()
                        .map(|p| self.pattern(*p))
                        .collect::<Result<Vec<_>>>()?,
                },
                span(first, last),
            ),
            [] => return Err(syntax_error(&node, "case needs a pattern")),
        };

        let guard = field(&node, "guard")
            .map(|clause| {
                let test = named_children(&clause)
                    .first()
                    .copied()
                    .ok_or_else(|| syntax_error(&clause, "guard needs a condition"))?;
                self.expression(test)
            })
            .transpose()?;

        let kind = NodeKind::MatchCase {
            pattern: Box::new(pattern),
            guard: guard.map(Box::new),
            body: self.block(required_field(&node, "consequence")?)?,
        };
        Ok(Node::new(kind, location(&node)))
    }

    pub(super) fn pattern(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let kind = match node.kind() {
            "case_pattern" => return self.single_pattern(&node, children(&node)),
            "as_pattern" => {
                let parts = named_children(&node);
                let [inner, .., alias] = parts.as_slice() else {
                    return Err(syntax_error(&node, "malformed 'as' pattern"));
                };
                let name_node = if alias.kind() == "as_pattern_target" {
                    named_children(alias).first().copied().unwrap_or(*alias)
                } else {
                    *alias
                };
                NodeKind::MatchAs {
                    pattern: Some(Box::new(self.pattern(*inner)?)),
                    name: Some(self.text(&name_node).to_string()),
                }
            }
            "union_pattern" => NodeKind::MatchOr {
                patterns: self.pattern_atoms(&children(&node))?,
            },
            "list_pattern" | "tuple_pattern" => NodeKind::MatchSequence {
                patterns: self.pattern_atoms(&children(&node))?,
            },
            "dict_pattern" => self.mapping_pattern(&node)?,
            "class_pattern" => self.class_pattern(&node)?,
            "splat_pattern" => {
                let name = named_children(&node)
                    .first()
                    .map(|ident| self.text(ident).to_string())
                    .filter(|name| name != "_");
                NodeKind::MatchStar { name }
            }
            "dotted_name" => {
                let parts = named_children(&node);
                match parts.as_slice() {
                    [single] if self.text(single) == "_" => return Ok(wildcard(loc)),
                    [single] => NodeKind::MatchAs {
                        pattern: None,
                        name: Some(self.text(single).to_string()),
                    },
                    _ => NodeKind::MatchValue {
                        value: Box::new(self.dotted_expression(&node)?),
                    },
                }
            }
            "identifier" => NodeKind::MatchAs {
                pattern: None,
                name: Some(self.text(&node).to_string()),
            },
            "true" => NodeKind::MatchSingleton {
                value: Constant::Bool(true),
            },
            "false" => NodeKind::MatchSingleton {
                value: Constant::Bool(false),
            },
            "none" => NodeKind::MatchSingleton {
                value: Constant::None,
            },
            "string" | "concatenated_string" | "integer" | "float" | "complex_pattern" => {
                NodeKind::MatchValue {
                    value: Box::new(self.pattern_value(&node)?),
                }
            }
            other => {
                return Err(syntax_error(
                    &node,
                    format!("unexpected '{}' in pattern", other),
                ))
            }
        };
        Ok(Node::new(kind, loc))
    }

    /// Exactly one pattern made of the given tokens
    fn single_pattern(&self, node: &TsNode<'_>, tokens: Vec<TsNode<'_>>) -> Result<Node> {
        let mut atoms = self.pattern_atoms(&tokens)?;
        match atoms.len() {
            1 => Ok(atoms.remove(0)),
            _ => Err(syntax_error(node, "expected a single pattern")),
        }
    }

    /// Patterns among loose tokens, skipping punctuation and folding `-` into numbers
    fn pattern_atoms(&self, tokens: &[TsNode<'_>]) -> Result<Vec<Node>> {
        let mut atoms = Vec::new();
        let mut minus: Option<TsNode<'_>> = None;
        for token in tokens {
            if token.is_named() {
                let atom = match minus.take() {
                    Some(sign) => {
                        let loc = location(&sign).to(location(token));
                        let value = self.negated(&sign, token)?;
                        Node::new(
                            NodeKind::MatchValue {
                                value: Box::new(value),
                            },
                            loc,
                        )
                    }
                    None => self.pattern(*token)?,
                };
                atoms.push(atom);
            } else {
                match token.kind() {
                    "-" => minus = Some(*token),
                    "_" => atoms.push(wildcard(location(token))),
                    _ => {}
                }
            }
        }
        Ok(atoms)
    }

    /// `-1` inside a pattern
    fn negated(&self, sign: &TsNode<'_>, number: &TsNode<'_>) -> Result<Node> {
        let operand = self.pattern_value(number)?;
        Ok(Node::new(
            NodeKind::UnaryOp {
                op: Node::boxed(NodeKind::UnaryOperator(UnaryOperator::USub), location(sign)),
                operand: Box::new(operand),
            },
            location(sign).to(location(number)),
        ))
    }

    /// Literal used as a value pattern or a mapping key
    fn pattern_value(&self, node: &TsNode<'_>) -> Result<Node> {
        match node.kind() {
            "complex_pattern" => self.complex_pattern(node),
            "dotted_name" => self.dotted_expression(node),
            "true" | "false" | "none" | "string" | "concatenated_string" | "integer" | "float" => {
                self.expression(*node)
            }
            other => Err(syntax_error(
                node,
                format!("unexpected '{}' in literal pattern", other),
            )),
        }
    }

    /// `-1 + 2j`: real part, sign, imaginary part
    fn complex_pattern(&self, node: &TsNode<'_>) -> Result<Node> {
        let tokens = children(node);
        let mut operands = Vec::new();
        let mut op: Option<(Operator, Location)> = None;
        let mut minus: Option<TsNode<'_>> = None;

        for token in &tokens {
            if token.is_named() {
                let value = match minus.take() {
                    Some(sign) if operands.is_empty() => self.negated(&sign, token)?,
                    _ => self.expression(*token)?,
                };
                operands.push(value);
            } else if operands.is_empty() && token.kind() == "-" {
                minus = Some(*token);
            } else if let Some(parsed) = Operator::from_token(self.text(token)) {
                op = Some((parsed, location(token)));
            }
        }

        let mut operands = operands.into_iter();
        let (Some(left), Some(right), Some((op, op_loc))) = (operands.next(), operands.next(), op)
        else {
            return Err(syntax_error(node, "malformed complex literal pattern"));
        };
        Ok(Node::new(
            NodeKind::BinOp {
                left: Box::new(left),
                op: Node::boxed(NodeKind::Operator(op), op_loc),
                right: Box::new(right),
            },
            location(node),
        ))
    }

    /// `a.b.c` as a chain of `Attribute` loads
    fn dotted_expression(&self, node: &TsNode<'_>) -> Result<Node> {
        let mut parts = named_children(node).into_iter();
        let first = parts
            .next()
            .ok_or_else(|| syntax_error(node, "empty dotted name"))?;
        let first_loc = location(&first);
        let mut expr = Node::new(
            NodeKind::Name {
                id: self.text(&first).to_string(),
                ctx: Self::ctx(ExprContext::Load, first_loc),
            },
            first_loc,
        );
        for part in parts {
            let loc = first_loc.to(location(&part));
            expr = Node::new(
                NodeKind::Attribute {
                    value: Box::new(expr),
                    attr: self.text(&part).to_string(),
                    ctx: Self::ctx(ExprContext::Load, loc),
                },
                loc,
            );
        }
        Ok(expr)
    }

    fn mapping_pattern(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let key_nodes = fields(node, "key");
        let value_nodes = fields(node, "value");
        if key_nodes.len() != value_nodes.len() {
            return Err(syntax_error(node, "malformed mapping pattern"));
        }

        let keys = key_nodes
            .iter()
            .map(|key| self.pattern_value(key))
            .collect::<Result<Vec<_>>>()?;
        let patterns = value_nodes
            .iter()
            .map(|value| self.pattern(*value))
            .collect::<Result<Vec<_>>>()?;
        let rest = find_child_by_type(node, "splat_pattern").and_then(|splat| {
            named_children(&splat)
                .first()
                .map(|ident| self.text(ident).to_string())
        });

        Ok(NodeKind::MatchMapping {
            keys,
            patterns,
            rest,
        })
    }

    fn class_pattern(&self, node: &TsNode<'_>) -> Result<NodeKind> {
        let cls_node = find_child_by_type(node, "dotted_name")
            .ok_or_else(|| syntax_error(node, "class pattern needs a class"))?;
        let cls = self.dotted_expression(&cls_node)?;

        let mut patterns = Vec::new();
        let mut kwd_attrs = Vec::new();
        let mut kwd_patterns = Vec::new();
        for argument in named_children(node)
            .into_iter()
            .filter(|child| child.id() != cls_node.id())
        {
            let keyword = if argument.kind() == "keyword_pattern" {
                Some(argument)
            } else {
                named_children(&argument)
                    .into_iter()
                    .find(|inner| inner.kind() == "keyword_pattern")
            };
            match keyword {
                Some(keyword) => {
                    let tokens = children(&keyword);
                    let name = tokens
                        .iter()
                        .find(|t| t.kind() == "identifier")
                        .ok_or_else(|| syntax_error(&keyword, "keyword pattern needs a name"))?;
                    let after_equals: Vec<TsNode<'_>> = tokens
                        .iter()
                        .skip_while(|t| t.kind() != "=")
                        .skip(1)
                        .copied()
                        .collect();
                    kwd_attrs.push(self.text(name).to_string());
                    kwd_patterns.push(self.single_pattern(&keyword, after_equals)?);
                }
                None if kwd_attrs.is_empty() => patterns.push(self.pattern(argument)?),
                None => {
                    return Err(syntax_error(
                        &argument,
                        "positional patterns follow keyword patterns",
                    ))
                }
            }
        }

        Ok(NodeKind::MatchClass {
            cls: Box::new(cls),
            patterns,
            kwd_attrs,
            kwd_patterns,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Constant, Node, NodeKind};
    use crate::lower::{build_tree, BuildOptions};

    fn first_case_pattern(source: &str) -> Node {
        let module = build_tree(source, &BuildOptions::default()).unwrap();
        let NodeKind::Module { mut body } = module.kind else {
            panic!("expected module");
        };
        let NodeKind::Match { mut cases, .. } = body.remove(0).kind else {
            panic!("expected Match");
        };
        let NodeKind::MatchCase { pattern, .. } = cases.remove(0).kind else {
            panic!("expected match_case");
        };
        *pattern
    }

    fn case(pattern: &str) -> Node {
        first_case_pattern(&format!("match x:\n    case {}:\n        pass\n", pattern))
    }

    #[test]
    fn test_wildcard_and_capture() {
        assert_eq!(
            case("_").kind,
            NodeKind::MatchAs {
                pattern: None,
                name: None
            }
        );
        assert_eq!(
            case("y").kind,
            NodeKind::MatchAs {
                pattern: None,
                name: Some("y".to_string())
            }
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(case("1").tag(), "MatchValue");
        assert_eq!(case("-1").tag(), "MatchValue");
        assert_eq!(
            case("None").kind,
            NodeKind::MatchSingleton {
                value: Constant::None
            }
        );
        let NodeKind::MatchValue { value } = case("Color.RED").kind else {
            panic!("expected MatchValue");
        };
        assert_eq!(value.tag(), "Attribute");
    }

    #[test]
    fn test_alternatives() {
        let NodeKind::MatchOr { patterns } = case("1 | 2 | 3").kind else {
            panic!("expected MatchOr");
        };
        assert_eq!(patterns.len(), 3);
    }

    #[test]
    fn test_sequence_with_star() {
        let NodeKind::MatchSequence { patterns } = case("[first, *rest]").kind else {
            panic!("expected MatchSequence");
        };
        assert_eq!(patterns.len(), 2);
        assert_eq!(
            patterns[1].kind,
            NodeKind::MatchStar {
                name: Some("rest".to_string())
            }
        );
    }

    #[test]
    fn test_class_pattern_keywords() {
        let NodeKind::MatchClass {
            patterns,
            kwd_attrs,
            kwd_patterns,
            ..
        } = case("Point(0, y=1)").kind
        else {
            panic!("expected MatchClass");
        };
        assert_eq!(patterns.len(), 1);
        assert_eq!(kwd_attrs, vec!["y".to_string()]);
        assert_eq!(kwd_patterns[0].tag(), "MatchValue");
    }

    #[test]
    fn test_mapping_pattern_rest() {
        let NodeKind::MatchMapping {
            keys,
            patterns,
            rest,
        } = case("{'k': v, **others}").kind
        else {
            panic!("expected MatchMapping");
        };
        assert_eq!(keys.len(), 1);
        assert_eq!(patterns.len(), 1);
        assert_eq!(rest.as_deref(), Some("others"));
    }
}
