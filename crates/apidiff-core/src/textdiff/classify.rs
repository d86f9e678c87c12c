//! Direction of line-level changes.

use super::delta::{Delta, DeltaKind};
use crate::model::kinds::Direction;

/// Classify one non-equal delta
///
/// A change of one line into several lines counts as an insertion when the
/// single line survives split around the inserted text: its longest common
/// prefix with the first line of the other side, followed by a remainder the
/// last line ends with. The mirror case counts as a removal.
pub fn classify_delta(delta: &Delta) -> Direction {
    match delta.kind {
        DeltaKind::Insert => Direction::Added,
        DeltaKind::Delete => Direction::Removed,
        DeltaKind::Equal => Direction::Changed,
        DeltaKind::Change => {
            let (source, target) = (&delta.source.lines, &delta.target.lines);
            if source.len() == 1 && target.len() > 1 && survives_split(&source[0], target) {
                Direction::Added
            } else if target.len() == 1 && source.len() > 1 && survives_split(&target[0], source)
            {
                Direction::Removed
            } else {
                Direction::Changed
            }
        }
    }
}

fn survives_split(single: &str, multi: &[String]) -> bool {
    let (Some(first), Some(last)) = (multi.first(), multi.last()) else {
        return false;
    };
    let prefix = common_prefix_len(single, first);
    last.ends_with(&single[prefix..])
}

/// Byte length of the longest common prefix, on a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Combine the directions of all non-equal deltas
///
/// Pure insertions give `Added`, pure removals `Removed`, anything else
/// `Changed`. A script of equal runs only has no direction.
pub fn classify_script(deltas: &[Delta]) -> Option<Direction> {
    let mut directions = deltas
        .iter()
        .filter(|d| d.kind != DeltaKind::Equal)
        .map(classify_delta);
    let first = directions.next()?;
    if first != Direction::Changed && directions.all(|d| d == first) {
        Some(first)
    } else {
        Some(Direction::Changed)
    }
}
