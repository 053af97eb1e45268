// pyast-json - Python source to a JSON rendition of its syntax tree
//
// Pipeline: tree-sitter parse (`language`), lowering to a typed Python AST
// (`lower`), structural records (`convert`). Each stage is usable on its own;
// `run_file` strings them together the way the command line does.

pub mod ast;
pub mod convert;
pub mod error;
pub mod language;
pub mod lower;

use std::fs;
use std::path::Path;

pub use convert::{convert, Conversion, Converter, MissingKinds};
pub use error::{Error, Result};
pub use lower::{build_tree, BuildOptions};

/// JSON layout of the emitted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single line, no extra whitespace
    #[default]
    Compact,
    /// Indented for humans
    Pretty,
}

/// Everything one conversion run produces
#[derive(Debug, Clone)]
pub struct Report {
    /// The encoded document, without a trailing newline
    pub json: String,
    /// `Unimplemented Node: ...` lines in traversal order
    pub diagnostics: Vec<String>,
    pub missing: MissingKinds,
}

/// Parse and convert Python source held in memory
pub fn convert_source(source: &str, options: &BuildOptions) -> Result<Conversion> {
    let tree = build_tree(source, options)?;
    Ok(convert(&tree))
}

/// Encode a record in the requested layout
pub fn encode(record: &serde_json::Value, format: OutputFormat) -> Result<String> {
    let json = match format {
        OutputFormat::Compact => serde_json::to_string(record)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
    };
    Ok(json)
}

/// Read, convert and encode one file
pub fn run_file(path: &Path, options: &BuildOptions, format: OutputFormat) -> Result<Report> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = decode_source(&bytes)?;

    tracing::debug!("Converting {} ({} bytes)", path.display(), bytes.len());
    let conversion = convert_source(source, options)?;

    Ok(Report {
        json: encode(&conversion.record, format)?,
        diagnostics: conversion.diagnostics,
        missing: conversion.missing,
    })
}

/// Source bytes as UTF-8 text, a leading byte order mark dropped
fn decode_source(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|err| {
        let valid = &bytes[..err.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = valid.len() - valid.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1) + 1;
        Error::syntax(
            line,
            column,
            format!(
                "(unicode error) 'utf-8' codec can't decode byte 0x{:02x} in position {}",
                bytes[err.valid_up_to()],
                err.valid_up_to()
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_source_end_to_end() {
        let conversion = convert_source("import os\n", &BuildOptions::default()).unwrap();
        assert_eq!(conversion.record["body"][0]["type"], "Import");
        assert!(conversion.missing.is_empty());
    }

    #[test]
    fn test_compact_and_pretty_encodings() {
        let record = serde_json::json!({"type": "Module", "body": []});
        let compact = encode(&record, OutputFormat::Compact).unwrap();
        let pretty = encode(&record, OutputFormat::Pretty).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact).unwrap(),
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap()
        );
    }

    #[test]
    fn test_decode_source_strips_bom() {
        assert_eq!(decode_source(b"\xef\xbb\xbfx = 1\n").unwrap(), "x = 1\n");
    }

    #[test]
    fn test_decode_source_reports_bad_byte_position() {
        let err = decode_source(b"x = 1\ny = '\xff'\n").unwrap_err();
        match err {
            Error::Syntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 6);
            }
            other => panic!("expected syntax error, got {other}"),
        }
    }
}
