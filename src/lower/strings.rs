// String literal lowering
//
// Plain and implicitly concatenated literals fold into one `Constant`. As soon
// as one piece is an f-string the whole literal becomes a `JoinedStr`, with
// adjacent literal text merged into a single `Constant` part.

use super::helpers::{field, find_child_by_type, has_token, location, named_children, syntax_error};
use super::literals::{decode_bytes, decode_str, split_string, unescape_braces, StringParts};
use super::TreeBuilder;
use crate::ast::{Constant, Location, Node, NodeKind};
use crate::error::Result;
use tree_sitter::Node as TsNode;

/// Accumulates the parts of a `JoinedStr`
struct JoinedParts {
    values: Vec<Node>,
    text: String,
    location: Location,
}

impl JoinedParts {
    fn new(location: Location) -> Self {
        Self {
            values: Vec::new(),
            text: String::new(),
            location,
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let value = Constant::Str(std::mem::take(&mut self.text));
        self.values
            .push(Node::new(NodeKind::Constant { value, kind: None }, self.location));
    }

    fn push_value(&mut self, node: Node) {
        self.flush();
        self.values.push(node);
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.values
    }
}

impl TreeBuilder<'_> {
    fn string_parts(&self, node: &TsNode<'_>) -> Result<StringParts> {
        split_string(self.text(node))
            .ok_or_else(|| syntax_error(node, "malformed string literal"))
    }

    pub(super) fn string(&self, node: TsNode<'_>) -> Result<Node> {
        let loc = location(&node);
        let pieces = if node.kind() == "concatenated_string" {
            named_children(&node)
        } else {
            vec![node]
        };
        let parts = pieces
            .iter()
            .map(|piece| self.string_parts(piece))
            .collect::<Result<Vec<_>>>()?;

        let bytes = parts.first().is_some_and(|p| p.prefix.bytes);
        if parts.iter().any(|p| p.prefix.bytes != bytes) {
            return Err(syntax_error(&node, "cannot mix bytes and nonbytes literals"));
        }

        if parts.iter().any(|p| p.prefix.format) {
            let mut joined = JoinedParts::new(loc);
            for (piece, part) in pieces.iter().zip(&parts) {
                self.fstring_piece(piece, part, &mut joined)?;
            }
            return Ok(Node::new(
                NodeKind::JoinedStr {
                    values: joined.finish(),
                },
                loc,
            ));
        }

        let value = if bytes {
            let mut out = Vec::new();
            for (piece, part) in pieces.iter().zip(&parts) {
                let body = self.body(piece, part);
                let decoded = decode_bytes(body, part.prefix.raw)
                    .map_err(|message| syntax_error(piece, message))?;
                out.extend(decoded);
            }
            Constant::Bytes(out)
        } else {
            let mut out = String::new();
            for (piece, part) in pieces.iter().zip(&parts) {
                let decoded = decode_str(self.body(piece, part), part.prefix.raw)
                    .map_err(|message| syntax_error(piece, unicode_error(message)))?;
                out.push_str(&decoded);
            }
            Constant::Str(out)
        };

        let kind = parts
            .first()
            .filter(|p| p.prefix.unicode)
            .map(|_| "u".to_string());
        Ok(Node::new(NodeKind::Constant { value, kind }, loc))
    }

    fn body(&self, piece: &TsNode<'_>, part: &StringParts) -> &str {
        let start = piece.start_byte();
        self.source_slice(start + part.body_start, start + part.body_end)
    }

    /// Literal text of an f-string between `start` and `end`, escapes evaluated
    fn fstring_text(&self, piece: &TsNode<'_>, start: usize, end: usize, raw: bool) -> Result<String> {
        let segment = unescape_braces(self.source_slice(start, end));
        decode_str(&segment, raw).map_err(|message| syntax_error(piece, unicode_error(message)))
    }

    fn fstring_piece(&self, piece: &TsNode<'_>, part: &StringParts, joined: &mut JoinedParts) -> Result<()> {
        let start = piece.start_byte();
        if !part.prefix.format {
            let text = decode_str(self.body(piece, part), part.prefix.raw)
                .map_err(|message| syntax_error(piece, unicode_error(message)))?;
            joined.push_text(&text);
            return Ok(());
        }

        let body_end = start + part.body_end;
        let mut cursor = start + part.body_start;
        for interpolation in named_children(piece)
            .into_iter()
            .filter(|child| child.kind() == "interpolation")
        {
            joined.push_text(&self.fstring_text(piece, cursor, interpolation.start_byte(), part.prefix.raw)?);
            let (debug_text, value) = self.interpolation(&interpolation)?;
            if let Some(text) = debug_text {
                joined.push_text(text);
            }
            joined.push_value(value);
            cursor = interpolation.end_byte();
        }
        joined.push_text(&self.fstring_text(piece, cursor, body_end, part.prefix.raw)?);
        Ok(())
    }

    /// `{expr!r:spec}`; the `=` debug form also returns the literal `expr=` text
    fn interpolation<'s>(&'s self, node: &TsNode<'_>) -> Result<(Option<&'s str>, Node)> {
        let expression = field(node, "expression")
            .or_else(|| {
                named_children(node).into_iter().find(|child| {
                    !matches!(child.kind(), "type_conversion" | "format_specifier")
                })
            })
            .ok_or_else(|| syntax_error(node, "f-string: empty expression not allowed"))?;
        let value = self.expression(expression)?;

        let mut conversion = find_child_by_type(node, "type_conversion")
            .map(|conv| match self.text(&conv).trim_start_matches('!') {
                "s" => Ok('s' as i64),
                "r" => Ok('r' as i64),
                "a" => Ok('a' as i64),
                other => Err(syntax_error(
                    &conv,
                    format!("f-string: invalid conversion character '{}'", other),
                )),
            })
            .transpose()?
            .unwrap_or(-1);

        let format_spec = find_child_by_type(node, "format_specifier")
            .map(|spec| self.format_spec(&spec))
            .transpose()?;

        let debug_text = if has_token(node, "=") {
            let equals = find_child_by_type(node, "=").map_or(node.end_byte(), |eq| eq.end_byte());
            if conversion == -1 && format_spec.is_none() {
                conversion = 'r' as i64;
            }
            Some(self.source_slice(node.start_byte() + 1, equals))
        } else {
            None
        };

        let kind = NodeKind::FormattedValue {
            value: Box::new(value),
            conversion,
            format_spec: format_spec.map(Box::new),
        };
        Ok((debug_text, Node::new(kind, location(node))))
    }

    /// The part after `:` in a replacement field, itself a `JoinedStr`
    fn format_spec(&self, node: &TsNode<'_>) -> Result<Node> {
        let loc = location(node);
        let mut joined = JoinedParts::new(loc);
        let mut cursor = node.start_byte();
        if self.source_slice(cursor, cursor + 1) == ":" {
            cursor += 1;
        }

        for nested in named_children(node)
            .into_iter()
            .filter(|child| matches!(child.kind(), "format_expression" | "interpolation"))
        {
            joined.push_text(&unescape_braces(self.source_slice(cursor, nested.start_byte())));
            let (debug_text, value) = self.interpolation(&nested)?;
            if let Some(text) = debug_text {
                joined.push_text(text);
            }
            joined.push_value(value);
            cursor = nested.end_byte();
        }
        joined.push_text(&unescape_braces(self.source_slice(cursor, node.end_byte())));

        Ok(Node::new(
            NodeKind::JoinedStr {
                values: joined.finish(),
            },
            loc,
        ))
    }
}

fn unicode_error(message: &str) -> String {
    format!("(unicode error) 'unicodeescape' codec can't decode bytes: {}", message)
}
