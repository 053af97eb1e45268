// Converters for the auxiliary node kinds: call keywords, import aliases,
// parameter lists, comprehension clauses and `with` items

use super::metadata::merge;
use super::Converter;
use crate::ast::Node;
use serde_json::{json, Value};

/// Borrowed fields of an `arguments` node
pub(super) struct ArgumentLists<'a> {
    pub posonlyargs: &'a [Node],
    pub args: &'a [Node],
    pub vararg: Option<&'a Node>,
    pub kwonlyargs: &'a [Node],
    pub kw_defaults: &'a [Option<Node>],
    pub kwarg: Option<&'a Node>,
    pub defaults: &'a [Node],
}

/// `arg` is null for a `**mapping` splat
pub(super) fn keyword(cv: &mut Converter, node: &Node, arg: Option<&str>, value: &Node) -> Value {
    merge(
        node,
        json!({ "type": "keyword", "arg": arg, "value": cv.visit(value) }),
    )
}

pub(super) fn alias(node: &Node, name: &str, asname: Option<&str>) -> Value {
    merge(
        node,
        json!({ "type": "alias", "name": name, "asname": asname }),
    )
}

pub(super) fn arguments(cv: &mut Converter, node: &Node, lists: ArgumentLists<'_>) -> Value {
    merge(
        node,
        json!({
            "type": "arguments",
            "posonlyargs": cv.visit_all(lists.posonlyargs),
            "args": cv.visit_all(lists.args),
            "vararg": cv.visit_opt(lists.vararg),
            "kwonlyargs": cv.visit_all(lists.kwonlyargs),
            "kw_defaults": cv.visit_sparse(lists.kw_defaults),
            "kwarg": cv.visit_opt(lists.kwarg),
            "defaults": cv.visit_all(lists.defaults),
        }),
    )
}

pub(super) fn arg(cv: &mut Converter, node: &Node, arg: &str, annotation: Option<&Node>) -> Value {
    merge(
        node,
        json!({
            "type": "arg",
            "arg": arg,
            "annotation": cv.visit_opt(annotation),
        }),
    )
}

pub(super) fn comprehension(
    cv: &mut Converter,
    node: &Node,
    target: &Node,
    iter: &Node,
    ifs: &[Node],
    is_async: bool,
) -> Value {
    merge(
        node,
        json!({
            "type": "comprehension",
            "target": cv.visit(target),
            "iter": cv.visit(iter),
            "ifs": cv.visit_all(ifs),
            "is_async": is_async,
        }),
    )
}

pub(super) fn with_item(
    cv: &mut Converter,
    node: &Node,
    context_expr: &Node,
    optional_vars: Option<&Node>,
) -> Value {
    merge(
        node,
        json!({
            "type": "withitem",
            "context_expr": cv.visit(context_expr),
            "optional_vars": cv.visit_opt(optional_vars),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::convert::convert;
    use crate::lower::{build_tree, BuildOptions};
    use serde_json::{json, Value};

    fn first(source: &str) -> Value {
        let tree = build_tree(source, &BuildOptions::default()).unwrap();
        convert(&tree).record["body"][0].clone()
    }

    #[test]
    fn test_keyword_splat_has_null_arg() {
        let call = first("f(**opts)\n");
        let keyword = &call["value"]["keywords"][0];
        assert_eq!(keyword["type"], "keyword");
        assert_eq!(keyword["arg"], Value::Null);
        assert_eq!(keyword["value"]["id"], "opts");
        assert_eq!(keyword["lineno"], 1);
    }

    #[test]
    fn test_kw_defaults_keep_holes() {
        let def = first("def f(*, a, b=1):\n    pass\n");
        let args = &def["args"];
        assert_eq!(args["kwonlyargs"].as_array().unwrap().len(), 2);
        assert_eq!(args["kw_defaults"][0], Value::Null);
        assert_eq!(args["kw_defaults"][1]["value"], 1);
        assert_eq!(args["defaults"], json!([]));
    }

    #[test]
    fn test_import_alias() {
        let import = first("import os.path as p, sys\n");
        assert_eq!(import["type"], "Import");
        assert_eq!(import["names"][0]["name"], "os.path");
        assert_eq!(import["names"][0]["asname"], "p");
        assert_eq!(import["names"][1]["asname"], Value::Null);
    }
}
