// SPDX-License-Identifier: MIT

//! Sequence matching and change-script construction.
//!
//! The pipeline has two stages. [`match_sequences`] computes a list of
//! [`Match`]es between two ordered sequences: a patience pass anchors on
//! elements whose comparison key occurs exactly once on each side and
//! recurses on the gaps between anchors, falling back to an exact
//! shortest-path search over the edit graph when no anchors exist.
//! [`build_change_script`] then turns the matches into an ordered list of
//! [`DiffItem`]s covering both input sequences.
//!
//! The same pipeline works at any element granularity; [`word_diff`] runs it
//! a second time over word tokens to refine a changed block.

mod bucket_queue;
mod changes;
mod patience;
mod shortest_path;
mod words;

pub use bucket_queue::BucketQueue;
pub use changes::{build_change_script, format_changes, DiffItem};
pub use patience::match_sequences;
pub use words::{tokenize_words, word_diff};

use crate::utils::{CancelToken, Cancelled, Progress};

/// A correspondence between `left[left]` and `right[right]`.
///
/// Match lists produced by the matchers are strictly increasing in both
/// components; [`build_change_script`] relies on that to carve the gaps
/// between consecutive matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub left: usize,
    pub right: usize,
}

/// Match two line sequences by identity and build the change script in one
/// step.
pub fn diff_lines(
    left: &[String],
    right: &[String],
    cancel: &CancelToken,
    progress: &mut Progress,
) -> Result<Vec<DiffItem<String>>, Cancelled> {
    let matches = match_sequences(left, right, |line: &String| line.clone(), cancel, progress)?;
    Ok(build_change_script(left, right, &matches))
}
