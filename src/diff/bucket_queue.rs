// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::hash::Hash;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    head: usize,
    tail: usize,
}

#[derive(Debug)]
struct Node<T> {
    item: T,
    priority: usize,
    prev: usize,
    next: usize,
}

/// A priority queue over small bounded integer priorities.
///
/// Each priority has its own FIFO bucket, so `add` is O(1) and `dequeue_min`
/// is O(1) except for the forward rescan to find the next non-empty bucket,
/// which is amortized over the life of the queue. Items can also be deleted
/// by value in O(1) via a lookup index, which is what callers use to lower an
/// item's priority (delete, then re-add).
///
/// Nodes live in an arena owned by the queue; the lookup map holds slot
/// indices only. An item may be enqueued at most once at a time.
#[derive(Debug)]
pub struct BucketQueue<T> {
    buckets: Vec<Bucket>,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    lookup: HashMap<T, usize>,
    min_priority: Option<usize>,
}

impl<T: Eq + Hash + Clone> BucketQueue<T> {
    /// A queue accepting priorities in `0..=max_priority`.
    pub fn new(max_priority: usize) -> Self {
        Self {
            buckets: vec![Bucket { head: NIL, tail: NIL }; max_priority + 1],
            nodes: Vec::new(),
            free: Vec::new(),
            lookup: HashMap::new(),
            min_priority: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_priority.is_none()
    }

    /// Insert `item` at the back of the `priority` bucket.
    ///
    /// Panics if `priority` is out of range or `item` is already enqueued.
    pub fn add(&mut self, item: T, priority: usize) {
        assert!(
            priority < self.buckets.len(),
            "priority {} out of range 0..={}",
            priority,
            self.buckets.len() - 1
        );

        let node = Node {
            item: item.clone(),
            priority,
            prev: self.buckets[priority].tail,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        let previous = self.lookup.insert(item, idx);
        assert!(previous.is_none(), "item is already enqueued");

        let bucket = &mut self.buckets[priority];
        if bucket.tail == NIL {
            bucket.head = idx;
        } else {
            let tail = bucket.tail;
            self.nodes[tail].next = idx;
        }
        self.buckets[priority].tail = idx;

        if self.min_priority.map_or(true, |min| priority < min) {
            self.min_priority = Some(priority);
        }
    }

    /// Remove `item` from whatever bucket it sits in.
    ///
    /// Panics if `item` is not enqueued.
    pub fn delete(&mut self, item: &T) {
        let idx = self.lookup.remove(item).expect("item is not enqueued");
        self.unlink(idx);
    }

    /// Remove and return one item from the lowest non-empty bucket, in FIFO
    /// order among items of equal priority. Returns `None` if the queue is
    /// empty.
    pub fn dequeue_min(&mut self) -> Option<T> {
        let min = self.min_priority?;
        let head = self.buckets[min].head;
        debug_assert!(head != NIL);

        let item = self.nodes[head].item.clone();
        self.lookup.remove(&item);
        self.unlink(head);
        Some(item)
    }

    fn unlink(&mut self, idx: usize) {
        let Node {
            priority,
            prev,
            next,
            ..
        } = self.nodes[idx];

        if prev == NIL {
            self.buckets[priority].head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.buckets[priority].tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.free.push(idx);

        // Only the minimum bucket running empty invalidates the tracked
        // minimum; rescan forward from it. Each bucket is scanned past at
        // most once before it is refilled, so the rescans are amortized.
        if self.buckets[priority].head == NIL && self.min_priority == Some(priority) {
            self.min_priority = self.buckets[priority..]
                .iter()
                .position(|bucket| bucket.head != NIL)
                .map(|offset| priority + offset);
        }
    }
}
