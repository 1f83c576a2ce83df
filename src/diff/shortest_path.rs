// SPDX-License-Identifier: MIT

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::diff::bucket_queue::BucketQueue;
use crate::diff::Match;
use crate::utils::{CancelToken, Cancelled, Progress};

/// How often the search loop polls the cancellation token. Checking every
/// iteration would be measurable overhead on large inputs.
const CANCEL_CHECK_INTERVAL: u64 = 10_000;

/// A search state: the first `x` left candidates and first `y` right
/// candidates have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Node {
    x: usize,
    y: usize,
}

/// Match `left` against `right` by finding a shortest path through the edit
/// graph over their candidate elements.
///
/// Elements whose comparison key occurs only on one side can never match, so
/// the graph is restricted to the remaining candidates. From a state `(x,y)`,
/// skipping a candidate on either side costs 1 and consuming two candidates
/// with equal keys costs 0; a minimum-cost path from `(0,0)` to the state
/// with both sides consumed therefore takes as many 0-cost steps as
/// possible, i.e. selects a longest common subsequence of the candidates.
/// The frontier is a [`BucketQueue`] keyed by tentative distance, which is
/// bounded by the number of candidates on both sides combined.
pub(crate) fn shortest_path_matches<T, K, F>(
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
    let left_keys: Vec<K> = left.iter().map(key).collect();
    let right_keys: Vec<K> = right.iter().map(key).collect();

    let left_key_set: HashSet<&K> = left_keys.iter().collect();
    let right_key_set: HashSet<&K> = right_keys.iter().collect();

    let left_candidates: Vec<usize> = (0..left.len())
        .filter(|&idx| right_key_set.contains(&left_keys[idx]))
        .collect();
    let right_candidates: Vec<usize> = (0..right.len())
        .filter(|&idx| left_key_set.contains(&right_keys[idx]))
        .collect();

    let candidate_count = left_candidates.len() + right_candidates.len();
    let start = Node { x: 0, y: 0 };
    let end = Node {
        x: left_candidates.len(),
        y: right_candidates.len(),
    };

    let mut queue: BucketQueue<Node> = BucketQueue::new(candidate_count);
    let mut distances: HashMap<Node, usize> = HashMap::new();
    let mut previous: HashMap<Node, Node> = HashMap::new();
    let mut visited: HashSet<Node> = HashSet::new();

    queue.add(start, 0);
    distances.insert(start, 0);

    let mut iterations: u64 = 0;
    loop {
        if iterations % CANCEL_CHECK_INTERVAL == 0 {
            cancel.check()?;
        }
        iterations += 1;

        let Some(current) = queue.dequeue_min() else {
            break;
        };
        let current_distance = distances[&current];

        // Dijkstra dequeues nodes in non-decreasing distance order, so the
        // distance doubles as a monotone progress measure.
        progress.report(current_distance as u64, candidate_count as u64);

        if current == end {
            break;
        }

        let mut neighbors: [Option<(Node, usize)>; 3] = [None; 3];
        if current.x < end.x {
            neighbors[0] = Some((
                Node {
                    x: current.x + 1,
                    y: current.y,
                },
                1,
            ));
            if current.y < end.y
                && left_keys[left_candidates[current.x]] == right_keys[right_candidates[current.y]]
            {
                neighbors[1] = Some((
                    Node {
                        x: current.x + 1,
                        y: current.y + 1,
                    },
                    0,
                ));
            }
        }
        if current.y < end.y {
            neighbors[2] = Some((
                Node {
                    x: current.x,
                    y: current.y + 1,
                },
                1,
            ));
        }

        for (next, cost) in neighbors.into_iter().flatten() {
            if visited.contains(&next) {
                continue;
            }
            let via_current = current_distance + cost;
            match distances.entry(next) {
                Entry::Occupied(mut entry) => {
                    if via_current < *entry.get() {
                        entry.insert(via_current);
                        previous.insert(next, current);
                        queue.delete(&next);
                        queue.add(next, via_current);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(via_current);
                    previous.insert(next, current);
                    queue.add(next, via_current);
                }
            }
        }

        visited.insert(current);
    }

    // Walk the predecessor chain backwards; every diagonal step consumed two
    // equal candidates and yields one match.
    let mut matches = Vec::new();
    let mut current = end;
    while current != start {
        let Some(&prev) = previous.get(&current) else {
            break;
        };
        if current.x == prev.x + 1 && current.y == prev.y + 1 {
            matches.push(Match {
                left: left_candidates[prev.x],
                right: right_candidates[prev.y],
            });
        }
        current = prev;
    }
    matches.reverse();

    progress.done();
    Ok(matches)
}
