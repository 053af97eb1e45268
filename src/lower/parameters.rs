// Parameter lists and PEP 695 type parameters

use super::helpers::{has_token, location, named_children, required_field, syntax_error};
use super::TreeBuilder;
use crate::ast::{Location, Node, NodeKind};
use crate::error::Result;
use tree_sitter::Node as TsNode;

/// Collects parameters in declaration order into the `arguments` buckets
#[derive(Default)]
struct ArgumentsBuilder {
    posonlyargs: Vec<Node>,
    args: Vec<Node>,
    vararg: Option<Box<Node>>,
    kwonlyargs: Vec<Node>,
    kw_defaults: Vec<Option<Node>>,
    kwarg: Option<Box<Node>>,
    defaults: Vec<Node>,
    keyword_only: bool,
}

impl ArgumentsBuilder {
    fn push(&mut self, arg: Node, default: Option<Node>) {
        if self.keyword_only {
            self.kwonlyargs.push(arg);
            self.kw_defaults.push(default);
        } else {
            self.args.push(arg);
            self.defaults.extend(default);
        }
    }

    /// A bare `/` turns everything seen so far into positional-only
    fn positional_only(&mut self) {
        self.posonlyargs.append(&mut self.args);
    }

    fn build(self) -> NodeKind {
        NodeKind::Arguments {
            posonlyargs: self.posonlyargs,
            args: self.args,
            vararg: self.vararg,
            kwonlyargs: self.kwonlyargs,
            kw_defaults: self.kw_defaults,
            kwarg: self.kwarg,
            defaults: self.defaults,
        }
    }
}

fn arg(name: &str, annotation: Option<Node>, location: Location) -> Node {
    Node::new(
        NodeKind::Arg {
            arg: name.to_string(),
            annotation: annotation.map(Box::new),
        },
        location,
    )
}

impl TreeBuilder<'_> {
    /// Lower `parameters` or `lambda_parameters` into an `arguments` node
    pub(super) fn arguments(&self, node: TsNode<'_>) -> Result<Node> {
        let mut builder = ArgumentsBuilder::default();

        for param in named_children(&node) {
            match param.kind() {
                "identifier" => builder.push(arg(self.text(&param), None, location(&param)), None),
                "typed_parameter" => {
                    let annotation = Some(self.type_annotation(required_field(&param, "type")?)?);
                    let inner = named_children(&param)
                        .first()
                        .copied()
                        .ok_or_else(|| syntax_error(&param, "typed parameter needs a name"))?;
                    match inner.kind() {
                        "list_splat_pattern" => {
                            builder.vararg =
                                Some(Box::new(arg(self.splat_name(&inner)?, annotation, location(&param))));
                            builder.keyword_only = true;
                        }
                        "dictionary_splat_pattern" => {
                            builder.kwarg =
                                Some(Box::new(arg(self.splat_name(&inner)?, annotation, location(&param))));
                        }
                        _ => builder.push(arg(self.text(&inner), annotation, location(&param)), None),
                    }
                }
                "default_parameter" => {
                    let name = required_field(&param, "name")?;
                    let default = self.expression(required_field(&param, "value")?)?;
                    builder.push(arg(self.text(&name), None, location(&name)), Some(default));
                }
                "typed_default_parameter" => {
                    let name = required_field(&param, "name")?;
                    let annotation_node = required_field(&param, "type")?;
                    let annotation = self.type_annotation(annotation_node)?;
                    let default = self.expression(required_field(&param, "value")?)?;
                    let loc = location(&name).to(location(&annotation_node));
                    builder.push(arg(self.text(&name), Some(annotation), loc), Some(default));
                }
                "list_splat_pattern" => {
                    let name = self.splat_name(&param)?;
                    builder.vararg = Some(Box::new(arg(name, None, self.splat_location(&param))));
                    builder.keyword_only = true;
                }
                "dictionary_splat_pattern" => {
                    let name = self.splat_name(&param)?;
                    builder.kwarg = Some(Box::new(arg(name, None, self.splat_location(&param))));
                }
                "keyword_separator" => builder.keyword_only = true,
                "positional_separator" => builder.positional_only(),
                "tuple_pattern" => {
                    return Err(syntax_error(
                        &param,
                        "sublist parameters are not supported in Python 3",
                    ))
                }
                other => {
                    return Err(syntax_error(
                        &param,
                        format!("unexpected '{}' in parameters", other),
                    ))
                }
            }
        }

        Ok(Node::new(builder.build(), location(&node)))
    }

    /// `lambda: x` has no parameter node at all
    pub(super) fn empty_arguments(&self, lambda: &TsNode<'_>) -> Node {
        Node::new(ArgumentsBuilder::default().build(), location(lambda))
    }

    fn splat_name(&self, node: &TsNode<'_>) -> Result<&str> {
        named_children(node)
            .first()
            .map(|name| self.text(name))
            .ok_or_else(|| syntax_error(node, "'*' parameter needs a name"))
    }

    fn splat_location(&self, node: &TsNode<'_>) -> Location {
        named_children(node)
            .first()
            .map_or_else(|| location(node), |name| location(name))
    }

    /// `[T, U: int, *Ts, **P]`
    pub(super) fn type_params(&self, node: TsNode<'_>) -> Result<Vec<Node>> {
        named_children(&node)
            .into_iter()
            .map(|param| self.type_param(param))
            .collect()
    }

    fn type_param(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let inner = if node.kind() == "type" {
            named_children(&node).first().copied().unwrap_or(node)
        } else {
            node
        };

        let kind = match inner.kind() {
            "identifier" => NodeKind::TypeVar {
                name: self.text(&inner).to_string(),
                bound: None,
            },
            "constrained_type" => {
                let parts = named_children(&inner);
                let [name, bound] = parts.as_slice() else {
                    return Err(syntax_error(&inner, "malformed type parameter bound"));
                };
                NodeKind::TypeVar {
                    name: self.text(name).to_string(),
                    bound: Some(Box::new(self.type_annotation(*bound)?)),
                }
            }
            "splat_type" => {
                let name = named_children(&inner)
                    .first()
                    .map(|ident| self.text(ident).to_string())
                    .ok_or_else(|| syntax_error(&inner, "type parameter needs a name"))?;
                if has_token(&inner, "**") {
                    NodeKind::ParamSpec { name }
                } else {
                    NodeKind::TypeVarTuple { name }
                }
            }
            other => {
                return Err(syntax_error(
                    &inner,
                    format!("unexpected '{}' in type parameters", other),
                ))
            }
        };
        Ok(Node::new(kind, loc))
    }
}
