// Fallback converter for kinds without a dedicated converter

use super::metadata::position;
use super::Converter;
use crate::ast::Node;
use serde_json::Value;

/// Record the kind, emit a diagnostic, still visit every child, and return a
/// positioned placeholder whose `type` embeds the node dump.
///
/// Child records are discarded; the visit exists so that unconverted kinds
/// deeper in the subtree are reported too.
pub(super) fn generic_visit(cv: &mut Converter, node: &Node) -> Value {
    let dump = node.to_string();
    if cv.missing.record(node.tag()) {
        tracing::debug!("First fallback conversion for {}", node.tag());
    }
    cv.diagnostics.push(format!("Unimplemented Node: {}", dump));

    for child in node.children() {
        cv.visit(child);
    }

    let mut record = position(node);
    record.insert("type".to_string(), Value::String(format!("Unimplemented: {}", dump)));
    Value::Object(record)
}
