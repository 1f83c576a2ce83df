// SPDX-License-Identifier: MIT

use crate::diff::Match;

/// One segment of a change script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffItem<T> {
    /// A run of elements present in both sequences.
    Matched { content: Vec<T> },
    /// Elements removed from the left sequence and/or inserted into the
    /// right one. A pure insertion has empty `deletions`, a pure deletion
    /// empty `additions`.
    Changed { deletions: Vec<T>, additions: Vec<T> },
}

/// Convert a match list into an ordered change script covering both
/// sequences completely.
///
/// `matches` must be strictly increasing in both components, as produced by
/// the matchers; the gaps between consecutive matches become `Changed`
/// segments and the matches themselves `Matched` segments, with maximal runs
/// of consecutive `Matched` segments merged into one.
pub fn build_change_script<T: Clone>(
    left: &[T],
    right: &[T],
    matches: &[Match],
) -> Vec<DiffItem<T>> {
    let mut raw: Vec<DiffItem<T>> = Vec::new();
    let mut start_left = 0;
    let mut start_right = 0;

    for &m in matches {
        push_changed(&mut raw, &left[start_left..m.left], &right[start_right..m.right]);
        raw.push(DiffItem::Matched {
            content: vec![left[m.left].clone()],
        });
        start_left = m.left + 1;
        start_right = m.right + 1;
    }
    push_changed(&mut raw, &left[start_left..], &right[start_right..]);

    merge_matched(raw)
}

fn push_changed<T: Clone>(items: &mut Vec<DiffItem<T>>, deletions: &[T], additions: &[T]) {
    if deletions.is_empty() && additions.is_empty() {
        return;
    }
    items.push(DiffItem::Changed {
        deletions: deletions.to_vec(),
        additions: additions.to_vec(),
    });
}

/// Merge maximal runs of consecutive `Matched` items. Matches are emitted
/// one element at a time above, but consumers want runs of unchanged
/// elements grouped. Adjacent `Changed` items cannot occur by construction.
fn merge_matched<T>(items: Vec<DiffItem<T>>) -> Vec<DiffItem<T>> {
    let mut result: Vec<DiffItem<T>> = Vec::with_capacity(items.len());
    for item in items {
        match (result.last_mut(), item) {
            (
                Some(DiffItem::Matched { content: previous }),
                DiffItem::Matched { content: mut next },
            ) => {
                previous.append(&mut next);
            }
            (_, item) => result.push(item),
        }
    }
    result
}

/// Render a change script in a compact unified-style text form, mostly
/// useful for tests and debug output.
pub fn format_changes(script: &[DiffItem<String>]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for item in script {
        match item {
            DiffItem::Matched { content } => lines.extend(content.iter().cloned()),
            DiffItem::Changed {
                deletions,
                additions,
            } => {
                lines.extend(deletions.iter().map(|line| format!("-{}", line)));
                lines.extend(additions.iter().map(|line| format!("+{}", line)));
            }
        }
    }
    lines.join("\n")
}
