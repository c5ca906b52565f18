// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-based boundary editing.
//!
//! The gesture collaborator turns pointer events into three calls:
//! [`KueEngine::begin_drag`], repeated [`KueEngine::update_drag`] (or
//! [`KueEngine::drag_to`]), and [`KueEngine::end_drag`]. Updates mutate
//! the live model so the waveform can follow the pointer, and every
//! intermediate state satisfies the segment invariants, so aborting a
//! gesture is just ending it.
//!
//! When two segments touch, their shared boundary is a single junction
//! handle that moves both sides together.

use crate::engine::KueEngine;
use crate::error::{EngineError, Result};
use crate::models::segment::{Segment, SegmentId};
use crate::timeline::model::SegmentModel;

/// Which side of a segment is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// What a drag session moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// One edge of one segment.
    Edge { id: SegmentId, edge: Edge },
    /// The shared boundary of two adjacent segments.
    Junction { left: SegmentId, right: SegmentId },
}

/// A grabbable boundary on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHandle {
    pub target: DragTarget,
    pub time: f64,
}

/// Active drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    target: DragTarget,
    /// Boundary position when the gesture began
    origin: f64,
    /// List captured at begin; pushed to history on the first real change
    before: Option<Vec<Segment>>,
}

impl DragSession {
    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }
}

/// Clamp `t` to `[lo, hi]`, widened to always include `current`.
///
/// A segment already shorter than the drag gap may grow but not shrink.
fn clamp_including(t: f64, lo: f64, hi: f64, current: f64) -> f64 {
    t.clamp(lo.min(current), hi.max(current))
}

impl KueEngine {
    fn touches(&self, left: &Segment, right: &Segment) -> bool {
        (left.end - right.start).abs() < self.config.epsilon
    }

    /// Every draggable boundary, in timeline order.
    pub fn boundary_handles(&self) -> Vec<BoundaryHandle> {
        let segments = self.model.segments();
        let mut handles = Vec::with_capacity(segments.len() * 2);

        for (i, seg) in segments.iter().enumerate() {
            let joined_to_prev = i > 0 && self.touches(&segments[i - 1], seg);
            if !joined_to_prev {
                handles.push(BoundaryHandle {
                    target: DragTarget::Edge {
                        id: seg.id,
                        edge: Edge::Start,
                    },
                    time: seg.start,
                });
            }

            match segments.get(i + 1) {
                Some(next) if self.touches(seg, next) => handles.push(BoundaryHandle {
                    target: DragTarget::Junction {
                        left: seg.id,
                        right: next.id,
                    },
                    time: seg.end,
                }),
                _ => handles.push(BoundaryHandle {
                    target: DragTarget::Edge {
                        id: seg.id,
                        edge: Edge::End,
                    },
                    time: seg.end,
                }),
            }
        }

        handles
    }

    /// Start dragging one edge of a segment.
    ///
    /// An edge shared with an adjacent segment becomes a junction drag.
    /// A drag already in progress is ended first. History is captured
    /// here, so the whole gesture undoes as one step.
    pub fn begin_drag(&mut self, id: SegmentId, edge: Edge) -> Result<DragTarget> {
        if self.end_drag() {
            log::debug!("begin_drag: ended previous drag session");
        }

        let segments = self.model.segments();
        let idx = self
            .model
            .position(id)
            .ok_or(EngineError::UnknownSegment(id))?;
        let seg = &segments[idx];

        let (target, origin) = match edge {
            Edge::Start => match idx.checked_sub(1).map(|p| &segments[p]) {
                Some(prev) if self.touches(prev, seg) => (
                    DragTarget::Junction {
                        left: prev.id,
                        right: seg.id,
                    },
                    prev.end,
                ),
                _ => (DragTarget::Edge { id, edge }, seg.start),
            },
            Edge::End => match segments.get(idx + 1) {
                Some(next) if self.touches(seg, next) => (
                    DragTarget::Junction {
                        left: seg.id,
                        right: next.id,
                    },
                    seg.end,
                ),
                _ => (DragTarget::Edge { id, edge }, seg.end),
            },
        };

        self.drag = Some(DragSession {
            target,
            origin,
            before: Some(segments.to_vec()),
        });
        log::debug!("Started dragging {:?} at {:.3}s", target, origin);
        Ok(target)
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Move the dragged boundary by `delta` seconds from where it started.
    ///
    /// Returns the boundary's resulting position, or `None` without an
    /// active session.
    pub fn update_drag(&mut self, delta: f64) -> Option<f64> {
        let origin = self.drag.as_ref()?.origin;
        self.drag_to(origin + delta)
    }

    /// Move the dragged boundary to time `t`, clamped to the legal range.
    pub fn drag_to(&mut self, t: f64) -> Option<f64> {
        let target = self.drag.as_ref()?.target;
        if !t.is_finite() {
            return None;
        }

        let gap = self.config.drag_min_gap;
        let duration = self.track.duration;
        let segments = self.model.segments();
        let mut candidate = segments.to_vec();

        let applied = match target {
            DragTarget::Edge { id, edge } => {
                let idx = self.model.position(id)?;
                let seg = &segments[idx];
                match edge {
                    Edge::Start => {
                        let lo = idx.checked_sub(1).map_or(0.0, |p| segments[p].end);
                        let value = clamp_including(t, lo, seg.end - gap, seg.start);
                        candidate[idx].start = value;
                        value
                    }
                    Edge::End => {
                        let hi = match segments.get(idx + 1) {
                            Some(next) => next.start,
                            None if duration > 0.0 => duration,
                            None => seg.end,
                        };
                        let value = clamp_including(t, seg.start + gap, hi, seg.end);
                        candidate[idx].end = value;
                        value
                    }
                }
            }
            DragTarget::Junction { left, right } => {
                let li = self.model.position(left)?;
                let ri = self.model.position(right)?;
                let (l, r) = (&segments[li], &segments[ri]);
                let value = clamp_including(t, l.start + gap, r.end - gap, l.end);
                // Both sides in one candidate, never two separate commits.
                candidate[li].end = value;
                candidate[ri].start = value;
                value
            }
        };

        if candidate.as_slice() == segments {
            return Some(applied);
        }

        match SegmentModel::validate(candidate, duration, self.config.epsilon) {
            Ok(sorted) => {
                if let Some(before) = self.drag.as_mut().and_then(|d| d.before.take()) {
                    self.history.snapshot(&before);
                }
                self.model.replace_validated(sorted);
                Some(applied)
            }
            Err(violation) => {
                log::warn!("drag_to: rejected {:.3}s: {}", t, violation);
                None
            }
        }
    }

    /// Finish the active drag. Returns `false` when none was active.
    ///
    /// Also used to abort: every update already left a valid state.
    pub fn end_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(session) => {
                log::debug!("Stopped dragging {:?}", session.target);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{assert_invariants, bounds, engine_with_track};

    /// Track of 10s cut into [0,5) and [5,10).
    fn two_adjacent() -> KueEngine {
        let mut engine = engine_with_track(10.0);
        engine.cut_at_position(5.0).unwrap();
        engine.close_to_end().unwrap();
        engine
    }

    #[test]
    fn test_junction_drag_is_one_undo_step() {
        let mut engine = two_adjacent();
        let left = engine.segments()[0].id;
        let depth = engine.history.len();

        let target = engine.begin_drag(left, Edge::End).unwrap();
        assert!(matches!(target, DragTarget::Junction { .. }));

        assert_eq!(engine.update_drag(0.5), Some(5.5));
        assert_eq!(engine.update_drag(1.0), Some(6.0));
        assert_eq!(engine.update_drag(2.0), Some(7.0));
        assert!(engine.end_drag());

        assert_eq!(bounds(&engine), vec![(0.0, 7.0), (7.0, 10.0)]);
        assert_eq!(engine.history.len(), depth + 1);

        assert!(engine.undo().unwrap());
        assert_eq!(bounds(&engine), vec![(0.0, 5.0), (5.0, 10.0)]);
    }

    #[test]
    fn test_start_edge_on_junction_promotes() {
        let mut engine = two_adjacent();
        let right = engine.segments()[1].id;

        let target = engine.begin_drag(right, Edge::Start).unwrap();
        assert_eq!(
            target,
            DragTarget::Junction {
                left: engine.segments()[0].id,
                right,
            }
        );
        assert_eq!(engine.drag_to(3.0), Some(3.0));
        assert_eq!(bounds(&engine), vec![(0.0, 3.0), (3.0, 10.0)]);
    }

    #[test]
    fn test_junction_clamped_by_min_gap() {
        let mut engine = two_adjacent();
        let left = engine.segments()[0].id;
        engine.begin_drag(left, Edge::End).unwrap();

        assert_eq!(engine.drag_to(20.0), Some(9.5));
        assert_eq!(engine.drag_to(-4.0), Some(0.5));
        assert_invariants(&engine);
    }

    #[test]
    fn test_free_edges_clamped_by_neighbours() {
        let mut engine = engine_with_track(20.0);
        engine.cut_at_position(4.0).unwrap();
        let gap = Segment::fresh(8.0, 12.0, engine.environment(1));
        let middle = gap.id;
        let mut list = engine.segments().to_vec();
        list.push(gap);
        engine.replace_segments(list).unwrap();

        engine.begin_drag(middle, Edge::Start).unwrap();
        assert_eq!(engine.drag_to(1.0), Some(4.0));
        assert_eq!(engine.drag_to(11.9), Some(11.5));

        engine.begin_drag(middle, Edge::End).unwrap();
        assert_eq!(engine.drag_to(11.7), Some(12.0));
        assert_eq!(engine.drag_to(30.0), Some(20.0));
        assert_invariants(&engine);
    }

    #[test]
    fn test_short_segment_can_grow_but_not_shrink() {
        let mut engine = engine_with_track(10.0);
        let short = engine.cut_at_position(0.3).unwrap();

        engine.begin_drag(short.id, Edge::End).unwrap();
        assert_eq!(engine.drag_to(0.2), Some(0.3));
        assert_eq!(engine.drag_to(2.0), Some(2.0));
        assert_eq!(bounds(&engine), vec![(0.0, 2.0)]);
    }

    #[test]
    fn test_gesture_without_movement_leaves_no_history() {
        let mut engine = two_adjacent();
        let depth = engine.history.len();
        let left = engine.segments()[0].id;

        engine.begin_drag(left, Edge::End).unwrap();
        assert_eq!(engine.update_drag(0.0), Some(5.0));
        engine.end_drag();

        assert_eq!(engine.history.len(), depth);
    }

    #[test]
    fn test_second_begin_replaces_session() {
        let mut engine = two_adjacent();
        let (left, right) = (engine.segments()[0].id, engine.segments()[1].id);

        engine.begin_drag(left, Edge::Start).unwrap();
        engine.begin_drag(right, Edge::End).unwrap();

        let session = engine.drag_session().unwrap();
        assert_eq!(
            session.target(),
            DragTarget::Edge {
                id: right,
                edge: Edge::End
            }
        );
        assert_eq!(session.origin(), 10.0);
    }

    #[test]
    fn test_mutation_ends_drag() {
        let mut engine = two_adjacent();
        let left = engine.segments()[0].id;
        engine.begin_drag(left, Edge::End).unwrap();
        engine.drag_to(6.0);

        engine.cut_at_position(2.0).unwrap();
        assert!(!engine.is_dragging());
        assert!(engine.update_drag(1.0).is_none());
    }

    #[test]
    fn test_begin_unknown_segment() {
        let mut engine = two_adjacent();
        let stranger = Segment::fresh(0.0, 1.0, engine.environment(0)).id;
        assert_eq!(
            engine.begin_drag(stranger, Edge::Start),
            Err(EngineError::UnknownSegment(stranger))
        );
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_boundary_handles() {
        let mut engine = engine_with_track(20.0);
        engine.cut_at_position(4.0).unwrap();
        engine.cut_at_position(9.0).unwrap();
        let tail = Segment::fresh(12.0, 15.0, engine.environment(2));
        let mut list = engine.segments().to_vec();
        list.push(tail);
        engine.replace_segments(list).unwrap();

        let handles = engine.boundary_handles();
        let times: Vec<f64> = handles.iter().map(|h| h.time).collect();
        assert_eq!(times, vec![0.0, 4.0, 9.0, 12.0, 15.0]);
        assert!(matches!(handles[1].target, DragTarget::Junction { .. }));
        assert!(matches!(
            handles[2].target,
            DragTarget::Edge { edge: Edge::End, .. }
        ));
        assert!(matches!(
            handles[3].target,
            DragTarget::Edge {
                edge: Edge::Start,
                ..
            }
        ));
    }
}
