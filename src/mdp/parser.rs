// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Classification of single lines of an mdp file.

/// Classified view of one line of an mdp file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MdpLine<'a> {
    /// Blank line, full-line comment, or a line that carries no assignment.
    Skip,
    /// A `key = value` assignment.
    Assignment(Assignment<'a>),
}

/// Parsed view of one `key = value [; comment]` line.
///
/// Concatenating `left`, `=`, `value_ws`, `value` and `comment` reproduces
/// the original line byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment<'a> {
    /// Everything left of `=`, including its own whitespace.
    pub left: &'a str,
    /// Whitespace between `=` and the value.
    pub value_ws: &'a str,
    /// Raw value text with surrounding whitespace removed.
    pub value: &'a str,
    /// Inline comment including its delimiter and the whitespace
    /// separating it from the value. Empty if the line has no comment.
    pub comment: &'a str,
}

impl<'a> Assignment<'a> {
    /// Key of the assignment (trimmed left-hand side).
    pub fn key(&self) -> &'a str {
        self.left.trim()
    }
}

/// Classify a line of an mdp file.
///
/// A line is skipped if it is empty after stripping leading whitespace,
/// starts with `#` or `;`, or contains no `=` character. Otherwise it is
/// split on the first `=`; the earliest `;` or `#` inside the right-hand
/// side starts the inline comment.
pub(crate) fn classify(line: &str) -> MdpLine<'_> {
    let stripped = line.trim_start();
    if stripped.is_empty() || stripped.starts_with(['#', ';']) {
        return MdpLine::Skip;
    }

    let Some((left, right)) = line.split_once('=') else {
        return MdpLine::Skip;
    };

    let comment_start = right.find([';', '#']).unwrap_or(right.len());
    let before_comment = &right[..comment_start];

    let value_start = before_comment.len() - before_comment.trim_start().len();
    let value = before_comment[value_start..].trim_end();

    MdpLine::Assignment(Assignment {
        left,
        value_ws: &before_comment[..value_start],
        value,
        comment: &right[value_start + value.len()..],
    })
}
