// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cutting the track from a single time cursor.
//!
//! A tap while listening marks a cut. Depending on where the cursor is,
//! the cut starts the first Kue, splits the Kue under the cursor, or
//! appends a Kue after the last one. A long press seals the remainder of
//! the track.

use crate::engine::KueEngine;
use crate::models::segment::Segment;
use crate::util::timecode::format_time;

impl KueEngine {
    /// Cut at time `t`, returning the newly created segment.
    ///
    /// Returns `None` when there is nothing to do: `t` too close to either
    /// end of the track, exactly on a boundary, in a gap before the last
    /// segment, or too close to the last segment's end.
    pub fn cut_at_position(&mut self, t: f64) -> Option<Segment> {
        let eps = self.config.epsilon;
        let duration = self.track.duration;

        if !t.is_finite() || t < eps || t > duration - eps {
            log::debug!("cut_at_position: {:.3}s is outside the cuttable range", t);
            return None;
        }

        let segments = self.model.segments();

        let (candidate, created) = if segments.is_empty() {
            let created = Segment::fresh(0.0, t, self.environment(0));
            (vec![created.clone()], created)
        } else if let Some(target) = segments
            .iter()
            .find(|s| t > s.start + eps && t < s.end - eps)
        {
            // Left half keeps the original id and annotation.
            let created = Segment::fresh(t, target.end, self.environment(segments.len()));
            let target_id = target.id;
            let mut candidate: Vec<Segment> = segments
                .iter()
                .map(|s| {
                    if s.id == target_id {
                        Segment { end: t, ..s.clone() }
                    } else {
                        s.clone()
                    }
                })
                .collect();
            candidate.push(created.clone());
            (candidate, created)
        } else {
            let last_end = segments.last().map_or(0.0, |s| s.end);
            if t - last_end < eps {
                log::debug!("cut_at_position: nothing to cut at {:.3}s", t);
                return None;
            }
            let created = Segment::fresh(last_end, t, self.environment(segments.len()));
            let mut candidate = segments.to_vec();
            candidate.push(created.clone());
            (candidate, created)
        };

        match self.commit(candidate) {
            Ok(()) => {
                log::info!(
                    "Cut at {}, created Kue #{} ({} total)",
                    format_time(t, true),
                    self.model.index_of(created.id).unwrap_or(0),
                    self.model.len()
                );
                Some(created)
            }
            Err(e) => {
                log::warn!("cut_at_position: {}", e);
                None
            }
        }
    }

    /// Cut at the current playhead position.
    pub fn cut_at_current_time(&mut self) -> Option<Segment> {
        self.cut_at_position(self.track.current_time)
    }

    /// Cover the rest of the track, from the last segment's end to the end.
    ///
    /// Returns `None` when the tail is already closed or no track is loaded.
    pub fn close_to_end(&mut self) -> Option<Segment> {
        let eps = self.config.epsilon;
        let duration = self.track.duration;

        if duration <= 0.0 {
            log::debug!("close_to_end: no track loaded");
            return None;
        }

        let segments = self.model.segments();
        let created = match segments.last() {
            None => Segment::fresh(0.0, duration, self.environment(0)),
            Some(last) if last.end >= duration - eps => {
                log::debug!("close_to_end: already closed");
                return None;
            }
            Some(last) => Segment::fresh(last.end, duration, self.environment(segments.len())),
        };

        let mut candidate = segments.to_vec();
        candidate.push(created.clone());

        match self.commit(candidate) {
            Ok(()) => {
                log::info!(
                    "Closed to end from {}, {} total",
                    format_time(created.start, true),
                    self.model.len()
                );
                Some(created)
            }
            Err(e) => {
                log::warn!("close_to_end: {}", e);
                None
            }
        }
    }
}
