// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::hash::Hash;

use crate::diff::shortest_path::shortest_path_matches;
use crate::diff::Match;
use crate::utils::{CancelToken, Cancelled, Progress};

/// Compute the matches between two sequences under the comparison key
/// projection `key`.
///
/// A patience pass anchors on elements whose key occurs exactly once on each
/// side: the anchors are matched by a shortest-path search over just the
/// anchor candidates (typically far fewer than the full sequences), trusted
/// outright, and the spans between consecutive anchors are diffed
/// recursively. When no unique common elements exist, the whole pair is
/// delegated to the exact shortest-path search, which bounds the recursion.
///
/// The returned matches are strictly increasing in both components. Fails
/// only when `cancel` is triggered mid-run.
pub fn match_sequences<T, K, F>(
    left: &[T],
    right: &[T],
    key: F,
    cancel: &CancelToken,
    progress: &mut Progress,
) -> Result<Vec<Match>, Cancelled>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    patience_matches(left, right, &key, cancel, progress)
}

fn patience_matches<T, K, F>(
    left: &[T],
    right: &[T],
    key: &F,
    cancel: &CancelToken,
    progress: &mut Progress,
) -> Result<Vec<Match>, Cancelled>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    if left.is_empty() || right.is_empty() {
        progress.done();
        return Ok(Vec::new());
    }

    let left_keys: Vec<K> = left.iter().map(key).collect();
    let right_keys: Vec<K> = right.iter().map(key).collect();

    if left_keys == right_keys {
        progress.done();
        return Ok((0..left.len())
            .map(|idx| Match {
                left: idx,
                right: idx,
            })
            .collect());
    }

    cancel.check()?;

    match anchored_matches(left, right, &left_keys, &right_keys, key, cancel, progress)? {
        Some(matches) => Ok(matches),
        None => shortest_path_matches(left, right, key, cancel, progress),
    }
}

/// The patience pass proper. Returns `None` when the unique-key intersection
/// is empty and the caller has to fall back to the full search.
#[allow(clippy::too_many_arguments)]
fn anchored_matches<T, K, F>(
    left: &[T],
    right: &[T],
    left_keys: &[K],
    right_keys: &[K],
    key: &F,
    cancel: &CancelToken,
    progress: &mut Progress,
) -> Result<Option<Vec<Match>>, Cancelled>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let left_unique = unique_key_indices(left_keys);
    let right_unique = unique_key_indices(right_keys);

    // Anchor candidates: elements unique on both sides, in sequence order.
    let left_anchors: Vec<usize> = (0..left.len())
        .filter(|idx| {
            left_unique.get(&left_keys[*idx]) == Some(idx)
                && right_unique.contains_key(&left_keys[*idx])
        })
        .collect();
    let right_anchors: Vec<usize> = (0..right.len())
        .filter(|idx| {
            right_unique.get(&right_keys[*idx]) == Some(idx)
                && left_unique.contains_key(&right_keys[*idx])
        })
        .collect();

    if left_anchors.is_empty() || right_anchors.is_empty() {
        return Ok(None);
    }

    let anchor_left: Vec<&T> = left_anchors.iter().map(|&idx| &left[idx]).collect();
    let anchor_right: Vec<&T> = right_anchors.iter().map(|&idx| &right[idx]).collect();
    let anchor_key = |element: &&T| key(*element);
    let anchors: Vec<Match> = shortest_path_matches(
        &anchor_left,
        &anchor_right,
        &anchor_key,
        cancel,
        &mut progress.child(0.0, 0.5),
    )?
    .into_iter()
    .map(|anchor| Match {
        left: left_anchors[anchor.left],
        right: right_anchors[anchor.right],
    })
    .collect();

    #[cfg(feature = "debug-diff")]
    println!(
        "patience: {} anchors over {}x{} elements",
        anchors.len(),
        left.len(),
        right.len()
    );

    // Recurse on the span strictly between consecutive anchors (and before
    // the first and after the last one), splicing the anchors themselves back
    // into the stream. Every gap is strictly smaller than the whole, so the
    // recursion terminates; empty gaps hit the fast paths.
    let total = (left.len() + right.len()) as f64;
    let mut gaps_progress = progress.child(0.5, 1.0);
    let mut result: Vec<Match> = Vec::with_capacity(anchors.len());
    let mut start_left = 0;
    let mut start_right = 0;

    for &anchor in &anchors {
        let from = (start_left + start_right) as f64 / total;
        let to = (anchor.left + anchor.right) as f64 / total;
        let gap = patience_matches(
            &left[start_left..anchor.left],
            &right[start_right..anchor.right],
            key,
            cancel,
            &mut gaps_progress.child(from, to),
        )?;
        result.extend(gap.into_iter().map(|m| Match {
            left: start_left + m.left,
            right: start_right + m.right,
        }));
        result.push(anchor);
        start_left = anchor.left + 1;
        start_right = anchor.right + 1;
    }

    let from = ((start_left + start_right) as f64 / total).min(1.0);
    let tail = patience_matches(
        &left[start_left..],
        &right[start_right..],
        key,
        cancel,
        &mut gaps_progress.child(from, 1.0),
    )?;
    result.extend(tail.into_iter().map(|m| Match {
        left: start_left + m.left,
        right: start_right + m.right,
    }));

    gaps_progress.done();
    progress.done();
    Ok(Some(result))
}

/// Index of each key that occurs exactly once in `keys`.
fn unique_key_indices<K: Eq + Hash>(keys: &[K]) -> HashMap<&K, usize> {
    let mut seen: HashMap<&K, Option<usize>> = HashMap::with_capacity(keys.len());
    for (idx, key) in keys.iter().enumerate() {
        seen.entry(key)
            .and_modify(|slot| *slot = None)
            .or_insert(Some(idx));
    }
    seen.into_iter()
        .filter_map(|(key, idx)| idx.map(|idx| (key, idx)))
        .collect()
}
