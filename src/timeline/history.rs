// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Linear undo over segment list snapshots.

use crate::models::segment::Segment;
use std::collections::VecDeque;

/// History system for undo.
///
/// There is no redo: a state that has been undone is gone.
#[derive(Debug, Clone)]
pub struct History {
    /// Past states, oldest first
    undo_stack: VecDeque<Vec<Segment>>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Save current state before making a change
    pub fn snapshot(&mut self, segments: &[Segment]) {
        self.undo_stack.push_back(segments.to_vec());
        // Limit history size
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    /// Take back the most recent snapshot.
    pub fn undo(&mut self) -> Option<Vec<Segment>> {
        self.undo_stack.pop_back()
    }

    /// The snapshot `undo` would return, left in place.
    pub fn peek(&self) -> Option<&[Segment]> {
        self.undo_stack.back().map(Vec::as_slice)
    }

    /// Latest end time across every stored snapshot.
    pub fn max_end(&self) -> Option<f64> {
        self.undo_stack
            .iter()
            .flatten()
            .map(|s| s.end)
            .reduce(f64::max)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::palette::ENVIRONMENT_COLORS;

    fn state(end: f64) -> Vec<Segment> {
        vec![Segment::fresh(0.0, end, &ENVIRONMENT_COLORS[0])]
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut history = History::new(30);
        assert!(!history.can_undo());

        history.snapshot(&state(1.0));
        history.snapshot(&state(2.0));

        assert_eq!(history.undo().unwrap()[0].end, 2.0);
        assert_eq!(history.undo().unwrap()[0].end, 1.0);
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_oldest_dropped_beyond_capacity() {
        let mut history = History::new(3);
        for end in 1..=5 {
            history.snapshot(&state(end as f64));
        }

        assert_eq!(history.len(), 3);
        let ends: Vec<f64> = std::iter::from_fn(|| history.undo())
            .map(|s| s[0].end)
            .collect();
        assert_eq!(ends, vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut history = History::new(30);
        let mut live = state(4.0);
        history.snapshot(&live);

        live[0].end = 9.0;
        assert_eq!(history.undo().unwrap()[0].end, 4.0);
    }

    #[test]
    fn test_peek_leaves_snapshot() {
        let mut history = History::new(30);
        assert!(history.peek().is_none());
        assert!(history.max_end().is_none());

        history.snapshot(&state(7.0));
        history.snapshot(&state(3.0));

        assert_eq!(history.peek().unwrap()[0].end, 3.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.max_end(), Some(7.0));
        assert_eq!(history.undo().unwrap()[0].end, 3.0);
    }
}
