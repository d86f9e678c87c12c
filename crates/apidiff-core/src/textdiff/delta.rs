//! Line-level edit scripts.

use similar::{capture_diff_slices, Algorithm, DiffOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    Equal,
    Insert,
    Delete,
    Change,
}

/// A run of lines at an offset in one of the two sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub offset: usize,
    pub lines: Vec<String>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One entry of an edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub kind: DeltaKind,
    pub source: Chunk,
    pub target: Chunk,
}

/// Split text on `\r\n`, `\n` or `\r`
///
/// Empty text has no lines; a trailing terminator does not start a line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Compute the full edit script, equal runs included
///
/// Chunk offsets follow running cursors over both sequences, so the empty
/// side of an insertion or deletion sits where the other side's run is
/// spliced in.
pub fn line_deltas(source: &[String], target: &[String]) -> Vec<Delta> {
    let (mut old_cursor, mut new_cursor) = (0, 0);
    let mut deltas = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, source, target) {
        let (kind, old_len, new_len) = match op {
            DiffOp::Equal { len, .. } => (DeltaKind::Equal, len, len),
            DiffOp::Delete { old_len, .. } => (DeltaKind::Delete, old_len, 0),
            DiffOp::Insert { new_len, .. } => (DeltaKind::Insert, 0, new_len),
            DiffOp::Replace {
                old_len, new_len, ..
            } => (DeltaKind::Change, old_len, new_len),
        };
        deltas.push(Delta {
            kind,
            source: Chunk {
                offset: old_cursor,
                lines: source[old_cursor..old_cursor + old_len].to_vec(),
            },
            target: Chunk {
                offset: new_cursor,
                lines: target[new_cursor..new_cursor + new_len].to_vec(),
            },
        });
        old_cursor += old_len;
        new_cursor += new_len;
    }
    deltas
}

/// Re-apply an edit script to its source sequence
///
/// Returns `None` if the script does not match `source`.
pub fn apply(source: &[String], deltas: &[Delta]) -> Option<Vec<String>> {
    let mut cursor = 0;
    let mut out = Vec::new();
    for delta in deltas {
        if delta.source.offset != cursor {
            return None;
        }
        let end = cursor + delta.source.len();
        if source.get(cursor..end)? != delta.source.lines.as_slice() {
            return None;
        }
        match delta.kind {
            DeltaKind::Equal => out.extend_from_slice(&delta.source.lines),
            DeltaKind::Insert | DeltaKind::Delete | DeltaKind::Change => {
                out.extend_from_slice(&delta.target.lines)
            }
        }
        cursor = end;
    }
    if cursor != source.len() {
        return None;
    }
    Some(out)
}
