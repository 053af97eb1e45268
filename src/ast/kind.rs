//! The closed set of node kinds produced by the tree builder
//!
//! Field names and order follow Python's `ast` module. Async and `except*`
//! forms share a variant with their synchronous counterpart and differ only in
//! their tag.

use super::constant::Constant;
use super::operators::{BoolOperator, CmpOperator, ExprContext, Operator, UnaryOperator};
use super::Node;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Module {
        body: Vec<Node>,
    },

    // Statements
    FunctionDef {
        is_async: bool,
        name: String,
        args: Box<Node>,
        body: Vec<Node>,
        decorator_list: Vec<Node>,
        returns: Option<Box<Node>>,
        type_params: Vec<Node>,
    },
    ClassDef {
        name: String,
        bases: Vec<Node>,
        keywords: Vec<Node>,
        body: Vec<Node>,
        decorator_list: Vec<Node>,
        type_params: Vec<Node>,
    },
    Return {
        value: Option<Box<Node>>,
    },
    Delete {
        targets: Vec<Node>,
    },
    Assign {
        targets: Vec<Node>,
        value: Box<Node>,
    },
    TypeAlias {
        name: Box<Node>,
        type_params: Vec<Node>,
        value: Box<Node>,
    },
    AugAssign {
        target: Box<Node>,
        op: Box<Node>,
        value: Box<Node>,
    },
    AnnAssign {
        target: Box<Node>,
        annotation: Box<Node>,
        value: Option<Box<Node>>,
        simple: bool,
    },
    For {
        is_async: bool,
        target: Box<Node>,
        iter: Box<Node>,
        body: Vec<Node>,
        orelse: Vec<Node>,
    },
    While {
        test: Box<Node>,
        body: Vec<Node>,
        orelse: Vec<Node>,
    },
    If {
        test: Box<Node>,
        body: Vec<Node>,
        orelse: Vec<Node>,
    },
    With {
        is_async: bool,
        items: Vec<Node>,
        body: Vec<Node>,
    },
    Match {
        subject: Box<Node>,
        cases: Vec<Node>,
    },
    Raise {
        exc: Option<Box<Node>>,
        cause: Option<Box<Node>>,
    },
    Try {
        is_star: bool,
        body: Vec<Node>,
        handlers: Vec<Node>,
        orelse: Vec<Node>,
        finalbody: Vec<Node>,
    },
    Assert {
        test: Box<Node>,
        msg: Option<Box<Node>>,
    },
    Import {
        names: Vec<Node>,
    },
    ImportFrom {
        module: Option<String>,
        names: Vec<Node>,
        level: usize,
    },
    Global {
        names: Vec<String>,
    },
    Nonlocal {
        names: Vec<String>,
    },
    Expr {
        value: Box<Node>,
    },
    Pass,
    Break,
    Continue,

    // Expressions
    BoolOp {
        op: Box<Node>,
        values: Vec<Node>,
    },
    NamedExpr {
        target: Box<Node>,
        value: Box<Node>,
    },
    BinOp {
        left: Box<Node>,
        op: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: Box<Node>,
        operand: Box<Node>,
    },
    Lambda {
        args: Box<Node>,
        body: Box<Node>,
    },
    IfExp {
        test: Box<Node>,
        body: Box<Node>,
        orelse: Box<Node>,
    },
    Dict {
        /// `None` marks a `**mapping` entry
        keys: Vec<Option<Node>>,
        values: Vec<Node>,
    },
    Set {
        elts: Vec<Node>,
    },
    ListComp {
        elt: Box<Node>,
        generators: Vec<Node>,
    },
    SetComp {
        elt: Box<Node>,
        generators: Vec<Node>,
    },
    DictComp {
        key: Box<Node>,
        value: Box<Node>,
        generators: Vec<Node>,
    },
    GeneratorExp {
        elt: Box<Node>,
        generators: Vec<Node>,
    },
    Await {
        value: Box<Node>,
    },
    Yield {
        value: Option<Box<Node>>,
    },
    YieldFrom {
        value: Box<Node>,
    },
    Compare {
        left: Box<Node>,
        ops: Vec<Node>,
        comparators: Vec<Node>,
    },
    Call {
        func: Box<Node>,
        args: Vec<Node>,
        keywords: Vec<Node>,
    },
    FormattedValue {
        value: Box<Node>,
        /// -1 for none, otherwise the code point of `s`, `r` or `a`
        conversion: i64,
        format_spec: Option<Box<Node>>,
    },
    JoinedStr {
        values: Vec<Node>,
    },
    Constant {
        value: Constant,
        kind: Option<String>,
    },
    Attribute {
        value: Box<Node>,
        attr: String,
        ctx: Box<Node>,
    },
    Subscript {
        value: Box<Node>,
        slice: Box<Node>,
        ctx: Box<Node>,
    },
    Starred {
        value: Box<Node>,
        ctx: Box<Node>,
    },
    Name {
        id: String,
        ctx: Box<Node>,
    },
    List {
        elts: Vec<Node>,
        ctx: Box<Node>,
    },
    Tuple {
        elts: Vec<Node>,
        ctx: Box<Node>,
    },
    Slice {
        lower: Option<Box<Node>>,
        upper: Option<Box<Node>>,
        step: Option<Box<Node>>,
    },

    // Leaves
    ExprContext(ExprContext),
    BoolOperator(BoolOperator),
    Operator(Operator),
    UnaryOperator(UnaryOperator),
    CmpOperator(CmpOperator),

    // Auxiliary nodes
    Comprehension {
        target: Box<Node>,
        iter: Box<Node>,
        ifs: Vec<Node>,
        is_async: bool,
    },
    ExceptHandler {
        type_: Option<Box<Node>>,
        name: Option<String>,
        body: Vec<Node>,
    },
    Arguments {
        posonlyargs: Vec<Node>,
        args: Vec<Node>,
        vararg: Option<Box<Node>>,
        kwonlyargs: Vec<Node>,
        /// One entry per keyword-only argument, `None` when it has no default
        kw_defaults: Vec<Option<Node>>,
        kwarg: Option<Box<Node>>,
        defaults: Vec<Node>,
    },
    Arg {
        arg: String,
        annotation: Option<Box<Node>>,
    },
    Keyword {
        /// `None` for `**mapping` splats
        arg: Option<String>,
        value: Box<Node>,
    },
    Alias {
        name: String,
        asname: Option<String>,
    },
    WithItem {
        context_expr: Box<Node>,
        optional_vars: Option<Box<Node>>,
    },
    MatchCase {
        pattern: Box<Node>,
        guard: Option<Box<Node>>,
        body: Vec<Node>,
    },

    // Patterns
    MatchValue {
        value: Box<Node>,
    },
    MatchSingleton {
        value: Constant,
    },
    MatchSequence {
        patterns: Vec<Node>,
    },
    MatchMapping {
        keys: Vec<Node>,
        patterns: Vec<Node>,
        rest: Option<String>,
    },
    MatchClass {
        cls: Box<Node>,
        patterns: Vec<Node>,
        kwd_attrs: Vec<String>,
        kwd_patterns: Vec<Node>,
    },
    MatchStar {
        name: Option<String>,
    },
    MatchAs {
        pattern: Option<Box<Node>>,
        name: Option<String>,
    },
    MatchOr {
        patterns: Vec<Node>,
    },

    // Type parameters
    TypeVar {
        name: String,
        bound: Option<Box<Node>>,
    },
    ParamSpec {
        name: String,
    },
    TypeVarTuple {
        name: String,
    },
}

impl NodeKind {
    /// The kind tag, spelled exactly as Python's `ast` class name
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Module { .. } => "Module",
            NodeKind::FunctionDef { is_async: false, .. } => "FunctionDef",
            NodeKind::FunctionDef { is_async: true, .. } => "AsyncFunctionDef",
            NodeKind::ClassDef { .. } => "ClassDef",
            NodeKind::Return { .. } => "Return",
            NodeKind::Delete { .. } => "Delete",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::TypeAlias { .. } => "TypeAlias",
            NodeKind::AugAssign { .. } => "AugAssign",
            NodeKind::AnnAssign { .. } => "AnnAssign",
            NodeKind::For { is_async: false, .. } => "For",
            NodeKind::For { is_async: true, .. } => "AsyncFor",
            NodeKind::While { .. } => "While",
            NodeKind::If { .. } => "If",
            NodeKind::With { is_async: false, .. } => "With",
            NodeKind::With { is_async: true, .. } => "AsyncWith",
            NodeKind::Match { .. } => "Match",
            NodeKind::Raise { .. } => "Raise",
            NodeKind::Try { is_star: false, .. } => "Try",
            NodeKind::Try { is_star: true, .. } => "TryStar",
            NodeKind::Assert { .. } => "Assert",
            NodeKind::Import { .. } => "Import",
            NodeKind::ImportFrom { .. } => "ImportFrom",
            NodeKind::Global { .. } => "Global",
            NodeKind::Nonlocal { .. } => "Nonlocal",
            NodeKind::Expr { .. } => "Expr",
            NodeKind::Pass => "Pass",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::BoolOp { .. } => "BoolOp",
            NodeKind::NamedExpr { .. } => "NamedExpr",
            NodeKind::BinOp { .. } => "BinOp",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::Lambda { .. } => "Lambda",
            NodeKind::IfExp { .. } => "IfExp",
            NodeKind::Dict { .. } => "Dict",
            NodeKind::Set { .. } => "Set",
            NodeKind::ListComp { .. } => "ListComp",
            NodeKind::SetComp { .. } => "SetComp",
            NodeKind::DictComp { .. } => "DictComp",
            NodeKind::GeneratorExp { .. } => "GeneratorExp",
            NodeKind::Await { .. } => "Await",
            NodeKind::Yield { .. } => "Yield",
            NodeKind::YieldFrom { .. } => "YieldFrom",
            NodeKind::Compare { .. } => "Compare",
            NodeKind::Call { .. } => "Call",
            NodeKind::FormattedValue { .. } => "FormattedValue",
            NodeKind::JoinedStr { .. } => "JoinedStr",
            NodeKind::Constant { .. } => "Constant",
            NodeKind::Attribute { .. } => "Attribute",
            NodeKind::Subscript { .. } => "Subscript",
            NodeKind::Starred { .. } => "Starred",
            NodeKind::Name { .. } => "Name",
            NodeKind::List { .. } => "List",
            NodeKind::Tuple { .. } => "Tuple",
            NodeKind::Slice { .. } => "Slice",
            NodeKind::ExprContext(ctx) => ctx.tag(),
            NodeKind::BoolOperator(op) => op.tag(),
            NodeKind::Operator(op) => op.tag(),
            NodeKind::UnaryOperator(op) => op.tag(),
            NodeKind::CmpOperator(op) => op.tag(),
            NodeKind::Comprehension { .. } => "comprehension",
            NodeKind::ExceptHandler { .. } => "ExceptHandler",
            NodeKind::Arguments { .. } => "arguments",
            NodeKind::Arg { .. } => "arg",
            NodeKind::Keyword { .. } => "keyword",
            NodeKind::Alias { .. } => "alias",
            NodeKind::WithItem { .. } => "withitem",
            NodeKind::MatchCase { .. } => "match_case",
            NodeKind::MatchValue { .. } => "MatchValue",
            NodeKind::MatchSingleton { .. } => "MatchSingleton",
            NodeKind::MatchSequence { .. } => "MatchSequence",
            NodeKind::MatchMapping { .. } => "MatchMapping",
            NodeKind::MatchClass { .. } => "MatchClass",
            NodeKind::MatchStar { .. } => "MatchStar",
            NodeKind::MatchAs { .. } => "MatchAs",
            NodeKind::MatchOr { .. } => "MatchOr",
            NodeKind::TypeVar { .. } => "TypeVar",
            NodeKind::ParamSpec { .. } => "ParamSpec",
            NodeKind::TypeVarTuple { .. } => "TypeVarTuple",
        }
    }
}
