// Expression converters

use super::metadata::merge;
use super::Converter;
use crate::ast::{Constant, Node};
use serde_json::{json, Number, Value};

pub(super) fn call(cv: &mut Converter, node: &Node, func: &Node, args: &[Node], keywords: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "Call",
            "func": cv.visit(func),
            "args": cv.visit_all(args),
            "keywords": cv.visit_all(keywords),
        }),
    )
}

pub(super) fn name(cv: &mut Converter, node: &Node, id: &str, ctx: &Node) -> Value {
    merge(
        node,
        json!({ "type": "Name", "id": id, "ctx": cv.visit(ctx) }),
    )
}

pub(super) fn constant(node: &Node, value: &Constant, kind: Option<&str>) -> Value {
    merge(
        node,
        json!({
            "type": "Constant",
            "value": constant_value(value),
            "kind": kind,
        }),
    )
}

/// JSON rendering of a literal
///
/// Values JSON cannot hold natively become strings: big integers keep their
/// digits, non-finite floats read `inf`/`-inf`/`nan`, imaginary numbers their
/// Python spelling and `...` stays `...`. Bytes map one char per byte.
pub(super) fn constant_value(value: &Constant) -> Value {
    match value {
        Constant::None => Value::Null,
        Constant::Bool(b) => Value::Bool(*b),
        Constant::Int(i) => Value::from(*i),
        Constant::BigInt(digits) => Value::String(digits.clone()),
        Constant::Float(f) => Number::from_f64(*f).map_or_else(
            || {
                let text = if f.is_nan() {
                    "nan"
                } else if f.is_sign_negative() {
                    "-inf"
                } else {
                    "inf"
                };
                Value::String(text.to_string())
            },
            Value::Number,
        ),
        Constant::Complex(repr) => Value::String(repr.clone()),
        Constant::Str(s) => Value::String(s.clone()),
        Constant::Bytes(bytes) => Value::String(bytes.iter().map(|&b| char::from(b)).collect()),
        Constant::Ellipsis => Value::String("...".to_string()),
    }
}

pub(super) fn attribute(cv: &mut Converter, node: &Node, value: &Node, attr: &str, ctx: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "Attribute",
            "value": cv.visit(value),
            "attr": attr,
            "ctx": cv.visit(ctx),
        }),
    )
}

pub(super) fn subscript(cv: &mut Converter, node: &Node, value: &Node, slice: &Node, ctx: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "Subscript",
            "value": cv.visit(value),
            "slice": cv.visit(slice),
            "ctx": cv.visit(ctx),
        }),
    )
}

pub(super) fn bin_op(cv: &mut Converter, node: &Node, left: &Node, op: &Node, right: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "BinOp",
            "left": cv.visit(left),
            "op": cv.visit(op),
            "right": cv.visit(right),
        }),
    )
}

pub(super) fn unary_op(cv: &mut Converter, node: &Node, op: &Node, operand: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "UnaryOp",
            "op": cv.visit(op),
            "operand": cv.visit(operand),
        }),
    )
}

/// Only operators and comparators; the left operand is not part of the record
pub(super) fn compare(cv: &mut Converter, node: &Node, ops: &[Node], comparators: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "Compare",
            "ops": cv.visit_all(ops),
            "comparators": cv.visit_all(comparators),
        }),
    )
}

pub(super) fn if_exp(cv: &mut Converter, node: &Node, test: &Node, body: &Node, orelse: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "IfExp",
            "test": cv.visit(test),
            "body": cv.visit(body),
            "orelse": cv.visit(orelse),
        }),
    )
}

/// `**mapping` entries keep a null key so keys and values stay aligned
pub(super) fn dict(cv: &mut Converter, node: &Node, keys: &[Option<Node>], values: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "Dict",
            "keys": cv.visit_sparse(keys),
            "values": cv.visit_all(values),
        }),
    )
}

pub(super) fn list_comp(cv: &mut Converter, node: &Node, elt: &Node, generators: &[Node]) -> Value {
    merge(
        node,
        json!({
            "type": "ListComp",
            "elt": cv.visit(elt),
            "generators": cv.visit_all(generators),
        }),
    )
}

pub(super) fn joined_str(cv: &mut Converter, node: &Node, values: &[Node]) -> Value {
    merge(
        node,
        json!({ "type": "JoinedStr", "values": cv.visit_all(values) }),
    )
}

pub(super) fn formatted_value(
    cv: &mut Converter,
    node: &Node,
    value: &Node,
    conversion: i64,
    format_spec: Option<&Node>,
) -> Value {
    merge(
        node,
        json!({
            "type": "FormattedValue",
            "value": cv.visit(value),
            "conversion": conversion,
            "format_spec": cv.visit_opt(format_spec),
        }),
    )
}

pub(super) fn tuple(cv: &mut Converter, node: &Node, elts: &[Node], ctx: &Node) -> Value {
    merge(
        node,
        json!({
            "type": "Tuple",
            "elts": cv.visit_all(elts),
            "ctx": cv.visit(ctx),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert;
    use crate::lower::{build_tree, BuildOptions};

    fn value_of(source: &str) -> Value {
        let tree = build_tree(source, &BuildOptions::default()).unwrap();
        convert(&tree).record["body"][0]["value"].clone()
    }

    #[test]
    fn test_constant_values() {
        assert_eq!(constant_value(&Constant::Int(-3)), json!(-3));
        assert_eq!(constant_value(&Constant::Float(2.5)), json!(2.5));
        assert_eq!(constant_value(&Constant::Float(f64::INFINITY)), json!("inf"));
        assert_eq!(constant_value(&Constant::Float(f64::NAN)), json!("nan"));
        assert_eq!(constant_value(&Constant::Bool(true)), json!(true));
        assert_eq!(constant_value(&Constant::None), Value::Null);
        assert_eq!(constant_value(&Constant::Ellipsis), json!("..."));
        assert_eq!(
            constant_value(&Constant::Bytes(vec![104, 0xe9])),
            json!("h\u{e9}")
        );
    }

    #[test]
    fn test_compare_has_no_left() {
        let cmp = value_of("a == b\n");
        assert_eq!(cmp["type"], "Compare");
        assert!(cmp.get("left").is_none());
        assert_eq!(cmp["ops"][0]["type"], "Eq");
        assert_eq!(cmp["comparators"][0]["id"], "b");
    }

    #[test]
    fn test_is_not_and_not() {
        let cmp = value_of("a is not b\n");
        assert_eq!(cmp["ops"][0]["type"], "IsNot");

        let neg = value_of("not a\n");
        assert_eq!(neg["type"], "UnaryOp");
        assert_eq!(neg["op"]["type"], "Not");
    }

    #[test]
    fn test_dict_null_key() {
        let dict = value_of("{'a': 1, **b}\n");
        assert_eq!(dict["type"], "Dict");
        assert_eq!(dict["keys"][0]["value"], "a");
        assert_eq!(dict["keys"][1], Value::Null);
        assert_eq!(dict["values"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_list_comp_generator() {
        let comp = value_of("[x for x in y if x]\n");
        assert_eq!(comp["type"], "ListComp");
        let generator = &comp["generators"][0];
        assert_eq!(generator["type"], "comprehension");
        assert_eq!(generator["is_async"], false);
        assert_eq!(generator["ifs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_f_string_record() {
        let joined = value_of("f'{x!r:>4} done'\n");
        assert_eq!(joined["type"], "JoinedStr");
        let formatted = &joined["values"][0];
        assert_eq!(formatted["type"], "FormattedValue");
        assert_eq!(formatted["conversion"], 114);
        assert_eq!(formatted["format_spec"]["type"], "JoinedStr");
        assert_eq!(joined["values"][1]["value"], " done");
    }

    #[test]
    fn test_bin_op_operators() {
        let add = value_of("a + b\n");
        assert_eq!(add["op"]["type"], "Add");
        assert_eq!(add["op"]["col_offset"], 2);

        let union = value_of("int | None\n");
        assert_eq!(union["op"]["type"], "BitOr");
    }

    #[test]
    fn test_attribute_and_subscript() {
        let sub = value_of("obj.items[0]\n");
        assert_eq!(sub["type"], "Subscript");
        assert_eq!(sub["value"]["type"], "Attribute");
        assert_eq!(sub["value"]["attr"], "items");
        assert_eq!(sub["slice"]["value"], 0);
        assert_eq!(sub["ctx"]["type"], "Load");
    }

    #[test]
    fn test_if_exp_and_tuple() {
        let exp = value_of("(a, b) if c else ()\n");
        assert_eq!(exp["type"], "IfExp");
        assert_eq!(exp["body"]["type"], "Tuple");
        assert_eq!(exp["orelse"]["elts"], json!([]));
    }
}
