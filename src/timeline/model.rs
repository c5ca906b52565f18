// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The canonical segment list.
//!
//! `SegmentModel` is the only place that accepts a new segment list, and
//! it only does so after checking the ordering, non-overlap, length floor
//! and track bounds invariants. Every other component builds a candidate
//! list and hands it over here.

use crate::error::{EngineError, Result, Violation};
use crate::models::segment::{Segment, SegmentId};
use std::collections::HashSet;

/// Ordered, non-overlapping list of segments.
#[derive(Debug, Clone, Default)]
pub struct SegmentModel {
    segments: Vec<Segment>,
}

impl SegmentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort a candidate list and check it against the invariants.
    ///
    /// `duration <= 0` means no track is loaded yet and skips the upper
    /// bound check.
    pub fn validate(
        mut candidate: Vec<Segment>,
        duration: f64,
        epsilon: f64,
    ) -> std::result::Result<Vec<Segment>, Violation> {
        candidate.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut seen = HashSet::with_capacity(candidate.len());
        for seg in &candidate {
            if !seg.start.is_finite() || !seg.end.is_finite() {
                return Err(Violation::NonFinite(seg.id));
            }
            if !seen.insert(seg.id) {
                return Err(Violation::DuplicateId(seg.id));
            }
            if seg.start < 0.0 || (duration > 0.0 && seg.end > duration) {
                return Err(Violation::OutOfBounds {
                    id: seg.id,
                    duration,
                });
            }
            if seg.duration() < epsilon {
                return Err(Violation::TooShort {
                    id: seg.id,
                    length: seg.duration(),
                    floor: epsilon,
                });
            }
        }

        for pair in candidate.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(Violation::Overlap {
                    left: pair[0].id,
                    right: pair[1].id,
                });
            }
        }

        Ok(candidate)
    }

    /// Replace the segment list.
    ///
    /// The list is re-sorted by start time. On a violation the current
    /// list is kept and the violation is returned.
    pub fn apply(&mut self, candidate: Vec<Segment>, duration: f64, epsilon: f64) -> Result<()> {
        match Self::validate(candidate, duration, epsilon) {
            Ok(sorted) => {
                self.segments = sorted;
                Ok(())
            }
            Err(violation) => {
                log::warn!("Rejected segment list: {}", violation);
                Err(EngineError::InvariantViolation(violation))
            }
        }
    }

    /// Replace the list with one already known to be valid.
    pub(crate) fn replace_validated(&mut self, sorted: Vec<Segment>) {
        self.segments = sorted;
    }

    /// All segments, sorted by start.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Look up a segment by id.
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Zero-based position of a segment in the list.
    pub fn position(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// One-based ordinal of a segment, as shown to the user ("Kue #3").
    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.position(id).map(|idx| idx + 1)
    }

    /// The segment containing `t` in `[start, end)`, i.e. the current Kue.
    pub fn segment_at(&self, t: f64) -> Option<&Segment> {
        // Sorted and non-overlapping, so the only candidate is the last
        // segment starting at or before t.
        let idx = self.segments.partition_point(|s| s.start <= t);
        idx.checked_sub(1)
            .map(|i| &self.segments[i])
            .filter(|s| s.contains(t))
    }

    /// Drop every segment.
    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }
}
