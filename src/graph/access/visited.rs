//! Visited sets for graph searches.
//!
//! Searches address vertices by their dense position in the graph's vertex
//! list, so visited state is a word-packed bitset over positions. It also
//! tracks how many positions remain unvisited, which lets a search treat
//! "unvisited" as the complement without materializing a second set.

/// A dense, word-packed visited set over `0..len`.
pub(crate) struct VisitedSet {
    words: Vec<u64>,
    len: usize,
    visited: usize,
}

impl VisitedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; (len + 63) / 64],
            len,
            visited: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of positions not yet visited.
    #[inline(always)]
    pub(crate) fn remaining(&self) -> usize {
        self.len() - self.visited
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "position {idx} out of bounds");
        (self.words[idx / 64] & (1 << (idx % 64))) != 0
    }

    /// Returns `true` iff this call observed the position as not-yet-visited and marks it visited.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "position {idx} out of bounds");
        let word = &mut self.words[idx / 64];
        let mask = 1 << (idx % 64);
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.visited += 1;
        true
    }

    /// Positions not yet visited, in ascending order.
    pub(crate) fn unvisited(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&idx| !self.is_visited(idx))
    }
}
