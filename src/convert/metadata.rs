//! Position metadata shared by every record
//!
//! Each record starts from the node's position map. Kind-specific fields are
//! layered on top, so a field that happens to share a name with a position
//! key wins.

use crate::ast::Node;
use serde_json::{Map, Value};

/// `lineno`, `col_offset`, `end_lineno`, `end_col_offset` and `type_comment`
pub fn position(node: &Node) -> Map<String, Value> {
    let loc = &node.location;
    let mut map = Map::new();
    map.insert("lineno".to_string(), Value::from(loc.lineno));
    map.insert("col_offset".to_string(), Value::from(loc.col_offset));
    map.insert("end_lineno".to_string(), Value::from(loc.end_lineno));
    map.insert("end_col_offset".to_string(), Value::from(loc.end_col_offset));
    map.insert(
        "type_comment".to_string(),
        node.type_comment
            .as_deref()
            .map_or(Value::Null, Value::from),
    );
    map
}

/// Position map overlaid with the kind-specific `fields` object
pub fn merge(node: &Node, fields: Value) -> Value {
    let mut record = position(node);
    if let Value::Object(fields) = fields {
        record.extend(fields);
    }
    Value::Object(record)
}
