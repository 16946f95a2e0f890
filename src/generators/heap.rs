//! Submodule providing [`AdjustableHeap`], the K-ary max-heap with an
//! external index-of-payload vector used by the greedy and guided-local-
//! search generators for "update priority" and "remove by payload".

/// A K-ary max-heap over `(priority, payload)` pairs, where `payload` is a
/// small dense integer (a [`crate::base_types::SubsetIdx`] index) used to
/// look up a heap entry's current position in `O(1)`, so priorities can be
/// updated or entries removed without a linear scan.
///
/// `spec.md` §9 calls for "K=16 ... for priority scans; K=2 ... for the
/// smaller GLS heaps"; `K` is a const generic so both shapes share one
/// implementation.
#[derive(Debug, Clone)]
pub struct AdjustableHeap<const K: usize> {
    entries: Vec<(f64, usize)>,
    position: Vec<Option<usize>>,
}

impl<const K: usize> AdjustableHeap<K> {
    /// An empty heap with room for `num_payloads` distinct payload values
    /// (`0..num_payloads`).
    #[must_use]
    pub fn with_capacity(num_payloads: usize) -> Self {
        Self { entries: Vec::with_capacity(num_payloads), position: vec![None; num_payloads] }
    }

    /// Number of entries currently in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the heap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` if `payload` currently has an entry in the heap.
    #[must_use]
    pub fn contains(&self, payload: usize) -> bool {
        self.position.get(payload).copied().flatten().is_some()
    }

    /// The maximum-priority entry, without removing it.
    #[must_use]
    pub fn peek_max(&self) -> Option<(f64, usize)> {
        self.entries.first().copied()
    }

    /// Inserts `payload` with `priority`. Replaces the existing entry (and
    /// re-heapifies) if `payload` is already present.
    pub fn push(&mut self, priority: f64, payload: usize) {
        if self.contains(payload) {
            self.update_priority(payload, priority);
            return;
        }
        if payload >= self.position.len() {
            self.position.resize(payload + 1, None);
        }
        let index = self.entries.len();
        self.entries.push((priority, payload));
        self.position[payload] = Some(index);
        self.sift_up(index);
    }

    /// Removes and returns the maximum-priority entry.
    pub fn pop_max(&mut self) -> Option<(f64, usize)> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries[0];
        self.remove_at(0);
        Some(top)
    }

    /// Updates `payload`'s priority in place, if present.
    pub fn update_priority(&mut self, payload: usize, new_priority: f64) {
        let Some(index) = self.position.get(payload).copied().flatten() else { return };
        let old_priority = self.entries[index].0;
        self.entries[index].0 = new_priority;
        if new_priority > old_priority {
            self.sift_up(index);
        } else if new_priority < old_priority {
            self.sift_down(index);
        }
    }

    /// Removes `payload`'s entry entirely, if present.
    pub fn remove(&mut self, payload: usize) {
        if let Some(index) = self.position.get(payload).copied().flatten() {
            self.remove_at(index);
        }
    }

    fn remove_at(&mut self, index: usize) {
        let last = self.entries.len() - 1;
        self.position[self.entries[index].1] = None;
        if index != last {
            self.entries.swap(index, last);
            self.position[self.entries[index].1] = Some(index);
        }
        self.entries.pop();
        if index < self.entries.len() {
            let restored_priority = self.entries[index].0;
            let parent_priority = self.parent(index).map(|p| self.entries[p].0);
            if parent_priority.is_some_and(|p| restored_priority > p) {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
        }
    }

    fn parent(&self, index: usize) -> Option<usize> {
        (index > 0).then(|| (index - 1) / K)
    }

    fn sift_up(&mut self, mut index: usize) {
        while let Some(parent) = self.parent(index) {
            if self.entries[index].0 <= self.entries[parent].0 {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let first_child = index * K + 1;
            if first_child >= self.entries.len() {
                break;
            }
            let last_child = (first_child + K).min(self.entries.len());
            let mut best = first_child;
            for child in first_child + 1..last_child {
                if self.entries[child].0 > self.entries[best].0 {
                    best = child;
                }
            }
            if self.entries[best].0 <= self.entries[index].0 {
                break;
            }
            self.swap(index, best);
            index = best;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.position[self.entries[a].1] = Some(a);
        self.position[self.entries[b].1] = Some(b);
    }
}
