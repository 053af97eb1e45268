// `# type:` comment collection
//
// Only consulted when `BuildOptions::type_comments` is set. Assignments take
// the comment trailing their last line; `def`, `for` and `with` take the one
// after the header colon. A `def` may instead carry it on its own line ahead
// of the first body statement. `# type: ignore` is a directive, never a type.

use super::helpers::named_children;
use super::TreeBuilder;
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::Node as TsNode;

static TYPE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*type:\s*(.*?)\s*$").expect("type comment pattern is valid"));

static TYPE_IGNORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ignore(\W|$)").expect("type ignore pattern is valid"));

/// Extract the annotation from a comment's text
pub(super) fn parse_type_comment(comment: &str) -> Option<String> {
    let annotation = TYPE_COMMENT.captures(comment)?.get(1)?.as_str();
    if annotation.is_empty() || TYPE_IGNORE.is_match(annotation) {
        return None;
    }
    Some(annotation.to_string())
}

impl TreeBuilder<'_> {
    fn comment_on_row(&self, candidates: &[TsNode<'_>], row: usize) -> Option<String> {
        candidates
            .iter()
            .filter(|node| node.kind() == "comment" && node.start_position().row == row)
            .find_map(|node| parse_type_comment(self.text(node)))
    }

    /// Comment trailing a simple statement on its last line
    pub(super) fn trailing_type_comment(&self, stmt: &TsNode<'_>) -> Option<String> {
        if !self.options.type_comments {
            return None;
        }
        let row = stmt.end_position().row;

        let mut candidates = Vec::new();
        let mut cursor = stmt.walk();
        candidates.extend(stmt.children(&mut cursor).filter(|child| child.is_extra()));
        let mut sibling = stmt.next_sibling();
        while let Some(node) = sibling {
            if !node.is_extra() {
                break;
            }
            candidates.push(node);
            sibling = node.next_sibling();
        }
        self.comment_on_row(&candidates, row)
    }

    /// Comment following the colon that ends a compound statement's header
    pub(super) fn header_type_comment<'t>(&self, stmt: &TsNode<'t>, body: &TsNode<'t>) -> Option<String> {
        if !self.options.type_comments {
            return None;
        }
        let row = header_colon(stmt, body)?.end_position().row;

        let mut cursor = stmt.walk();
        let mut candidates: Vec<TsNode<'t>> =
            stmt.children(&mut cursor).filter(|c| c.is_extra()).collect();
        let mut body_cursor = body.walk();
        candidates.extend(
            body.children(&mut body_cursor)
                .take_while(|child| child.is_extra()),
        );

        self.comment_on_row(&candidates, row)
    }

    /// Header comment of a `def`, or a type comment line opening its body
    pub(super) fn function_type_comment<'t>(
        &self,
        stmt: &TsNode<'t>,
        body: &TsNode<'t>,
    ) -> Option<String> {
        if !self.options.type_comments {
            return None;
        }
        if let Some(comment) = self.header_type_comment(stmt, body) {
            return Some(comment);
        }

        let after = header_colon(stmt, body)?.end_byte();
        let before = named_children(body).first()?.start_byte();

        let mut cursor = stmt.walk();
        let mut body_cursor = body.walk();
        let mut comments: Vec<TsNode<'t>> = stmt
            .children(&mut cursor)
            .chain(body.children(&mut body_cursor))
            .filter(|node| node.kind() == "comment")
            .filter(|node| node.start_byte() >= after && node.end_byte() <= before)
            .collect();
        comments.sort_by_key(|node| node.start_byte());
        comments
            .iter()
            .find_map(|node| parse_type_comment(self.text(node)))
    }
}

/// Last `:` of the header, ahead of the body
fn header_colon<'t>(stmt: &TsNode<'t>, body: &TsNode<'t>) -> Option<TsNode<'t>> {
    let mut cursor = stmt.walk();
    let children: Vec<TsNode<'t>> = stmt.children(&mut cursor).collect();
    children
        .into_iter()
        .take_while(|child| child.id() != body.id())
        .filter(|child| child.kind() == ":")
        .last()
}
