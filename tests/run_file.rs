// End-to-end conversion of files on disk

use pyast_json::{run_file, BuildOptions, Error, OutputFormat, Report};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_source(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(contents: &str) -> (Report, Value) {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "module.py", contents.as_bytes());
    let report = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap();
    let record = serde_json::from_str(&report.json).unwrap();
    (report, record)
}

#[test]
fn test_simple_assignment_document() {
    let (report, record) = run("x = 1\n");

    assert_eq!(record["type"], "Module");
    let assign = &record["body"][0];
    assert_eq!(assign["type"], "Assign");
    assert_eq!(assign["lineno"], 1);
    assert_eq!(assign["end_col_offset"], 5);
    assert_eq!(assign["type_comment"], Value::Null);
    assert_eq!(assign["targets"][0]["id"], "x");
    assert_eq!(assign["targets"][0]["ctx"]["type"], "Store");
    assert_eq!(assign["value"]["type"], "Constant");
    assert_eq!(assign["value"]["value"], 1);
    assert_eq!(assign["value"]["kind"], Value::Null);

    assert!(report.missing.is_empty());
    assert!(report.diagnostics.is_empty());
    assert!(!report.json.contains('\n'));
}

#[test]
fn test_function_definition_document() {
    let (_, record) = run("def area(w, h=2) -> int:\n    return w * h\n");

    let def = &record["body"][0];
    assert_eq!(def["type"], "FunctionDef");
    assert_eq!(def["name"], "area");
    assert_eq!(def["return"]["id"], "int");
    assert_eq!(def["args"]["args"][1]["arg"], "h");
    assert_eq!(def["args"]["defaults"][0]["value"], 2);
    assert_eq!(def["decorator_list"], serde_json::json!([]));

    let ret = &def["body"][0];
    assert_eq!(ret["type"], "Return");
    assert_eq!(
        ret["value"]["op"]["type"],
        "Unimplemented: Mult(lineno=2, col_offset=13, end_lineno=2, end_col_offset=14)"
    );
}

#[test]
fn test_pretty_output_matches_compact() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "module.py", b"import os\nprint(os.sep)\n");

    let compact = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap();
    let pretty = run_file(&path, &BuildOptions::default(), OutputFormat::Pretty).unwrap();

    assert!(pretty.json.contains("\n  "));
    assert_eq!(
        serde_json::from_str::<Value>(&compact.json).unwrap(),
        serde_json::from_str::<Value>(&pretty.json).unwrap()
    );
}

#[test]
fn test_unconverted_kinds_are_reported() {
    let (report, record) = run("while x:\n    pass\n");

    let loop_record = &record["body"][0];
    assert_eq!(
        loop_record["type"],
        "Unimplemented: While(lineno=1, col_offset=0, end_lineno=2, end_col_offset=8)"
    );
    assert_eq!(loop_record["end_lineno"], 2);

    assert_eq!(report.missing.iter().collect::<Vec<_>>(), ["Pass", "While"]);
    assert_eq!(report.missing.report(), "Pass\nWhile\n");
    assert_eq!(
        report.diagnostics,
        [
            "Unimplemented Node: While(lineno=1, col_offset=0, end_lineno=2, end_col_offset=8)",
            "Unimplemented Node: Pass(lineno=2, col_offset=4, end_lineno=2, end_col_offset=8)",
        ]
    );
}

#[test]
fn test_match_statement_reported_once() {
    let (report, record) = run("match p:\n    case 1:\n        pass\n    case 2:\n        pass\n");

    let stmt = record["body"][0]["type"].as_str().unwrap();
    assert!(stmt.starts_with("Unimplemented: Match("));
    assert!(report.missing.contains("Match"));
    assert!(report.missing.contains("match_case"));
    assert_eq!(
        report
            .diagnostics
            .iter()
            .filter(|line| line.starts_with("Unimplemented Node: Pass("))
            .count(),
        2
    );
    assert_eq!(report.missing.iter().filter(|&kind| kind == "Pass").count(), 1);
}

#[test]
fn test_output_is_deterministic() {
    let source = "import json\nfor k in d:\n    if k:\n        print(k, sep='')\n";
    let (first, _) = run(source);
    let (second, _) = run(source);
    assert_eq!(first.json, second.json);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_type_comments_are_opt_in() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "typed.py", b"xs = []  # type: List[int]\n");

    let plain = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap();
    let plain: Value = serde_json::from_str(&plain.json).unwrap();
    assert_eq!(plain["body"][0]["type_comment"], Value::Null);

    let options = BuildOptions {
        type_comments: true,
    };
    let typed = run_file(&path, &options, OutputFormat::Compact).unwrap();
    let typed: Value = serde_json::from_str(&typed.json).unwrap();
    assert_eq!(typed["body"][0]["type_comment"], "List[int]");
}

#[test]
fn test_byte_order_mark_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "bom.py", b"\xef\xbb\xbfx = 1\n");
    let report = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap();
    let record: Value = serde_json::from_str(&report.json).unwrap();
    assert_eq!(record["body"][0]["col_offset"], 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.py");

    let err = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap_err();
    match err {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other}"),
    }
}

#[test]
fn test_syntax_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "broken.py", b"def f(:\n    pass\n");

    let err = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 1, .. }), "got {err}");
}

#[test]
fn test_undecodable_source_is_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "latin1.py", b"name = 'caf\xe9'\n");

    let err = run_file(&path, &BuildOptions::default(), OutputFormat::Compact).unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 1, column: 12, .. }), "got {err}");
}
