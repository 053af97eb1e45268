// Statement converters

use super::metadata::merge;
use super::Converter;
use crate::ast::Node;
use serde_json::{json, Value};

pub(super) fn module(cv: &mut Converter, node: &Node, body: &[Node]) -> Value {
    merge(node, json!({ "type": "Module", "body": cv.visit_all(body) }))
}

pub(super) fn expr(cv: &mut Converter, node: &Node, value: &Node) -> Value {
    merge(node, json!({ "type": "Expr", "value": cv.visit(value) }))
}

pub(super) fn import(cv: &mut Converter, node: &Node, names: &[Node]) -> Value {
    merge(node, json!({ "type": "Import", "names": cv.visit_all(names) }))
}

pub(super) fn import_from(
    cv: &mut Converter,
    node: &Node,
    module: Option<&str>,
    names: &[Node],
    level: usize,
) -> Value {
    merge(
        node,
        json!({
            "type": "ImportFrom",
            "module": module,
            "names": cv.visit_all(names),
            "level": level,
        }),
    )
}

pub(super) fn class_def(
    cv: &mut Converter,
    node: &Node,
    name: &str,
    bases: &[Node],
    keywords: &[Node],
    body: &[Node],
    decorator_list: &[Node],
) -> Value {
    merge(
        node,
        json!({
            "type": "ClassDef",
            "name": name,
            "bases": cv.visit_all(bases),
            "keywords": cv.visit_all(keywords),
            "body": cv.visit_all(body),
            "decorator_list": cv.visit_all(decorator_list),
        }),
    )
}

/// The return annotation is emitted under `return`
pub(super) fn function_def(
    cv: &mut Converter,
    node: &Node,
    name: &str,
    args: &Node,
    body: &[Node],
    decorator_list: &[Node],
    returns: Option<&Node>,
) -> Value {
    merge(
        node,
        json!({
            "type": "FunctionDef",
            "name": name,
            "args": cv.visit(args),
            "body": cv.visit_all(body),
            "decorator_list": cv.visit_all(decorator_list),
            "return": cv.visit_opt(returns),
        }),
    )
}

pub(super) fn return_(cv: &mut Converter, node: &Node, value: Option<&Node>) -> Value {
    merge(node, json!({ "type": "Return", "value": cv.visit_opt(value) }))
}

pub(super) fn assign(cv: &mut Converter, node: &Node, targets: &[Node], value: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "Assign",
            "targets": cv.visit_all(targets),
            "value": cv.visit(value),
        }),
    )
}

pub(super) fn with(cv: &mut Converter, node: &Node, items: &[Node], body: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "With",
            "items": cv.visit_all(items),
            "body": cv.visit_all(body),
        }),
    )
}

pub(super) fn for_(
    cv: &mut Converter,
    node: &Node,
    target: &Node,
    iter: &Node,
    body: &[Node],
    orelse: &[Node],
) -> Value {
    merge(
        node,
        json!({
            "type": "For",
            "target": cv.visit(target),
            "iter": cv.visit(iter),
            "body": cv.visit_all(body),
            "orelse": cv.visit_all(orelse),
        }),
    )
}

pub(super) fn if_(cv: &mut Converter, node: &Node, test: &Node, body: &[Node], orelse: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "If",
            "test": cv.visit(test),
            "body": cv.visit_all(body),
            "orelse": cv.visit_all(orelse),
        }),
    )
}
