// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session state.
//!
//! `KueEngine` is the explicit session object for one open project. It
//! owns the segment list, the undo history, the playback context reported
//! by the player, and the active drag session. Collaborators hold a
//! reference to it rather than reaching into shared global state.
//!
//! Every mutating operation follows the same discipline: build a candidate
//! list, validate it through [`SegmentModel`], snapshot the current list
//! into [`History`], then commit. A rejected candidate changes nothing.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result, Violation};
use crate::models::palette::{self, EnvironmentColor};
use crate::models::project::{ProjectData, TrackContext};
use crate::models::segment::{Segment, SegmentId, SegmentPatch};
use crate::timeline::boundary::DragSession;
use crate::timeline::history::History;
use crate::timeline::model::SegmentModel;

/// Segmentation engine for one open project.
#[derive(Debug, Clone)]
pub struct KueEngine {
    pub(crate) config: EngineConfig,
    /// Name of the loaded project
    pub(crate) name: String,
    /// Player position, duration and zoom
    pub(crate) track: TrackContext,
    /// The authoritative segment list
    pub(crate) model: SegmentModel,
    /// History for undo
    pub(crate) history: History,
    /// Boundary drag in progress, if any
    pub(crate) drag: Option<DragSession>,
    /// Last tempo estimate from the analyzer, 0 when unknown
    pub(crate) bpm: u32,
}

impl Default for KueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl KueEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let history = History::new(config.history_capacity);
        Self {
            config,
            name: String::new(),
            track: TrackContext::default(),
            model: SegmentModel::new(),
            history,
            drag: None,
            bpm: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn track(&self) -> &TrackContext {
        &self.track
    }

    pub fn model(&self) -> &SegmentModel {
        &self.model
    }

    /// All segments, sorted by start.
    pub fn segments(&self) -> &[Segment] {
        self.model.segments()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.model.get(id)
    }

    /// The segment under time `t`.
    pub fn segment_at(&self, t: f64) -> Option<&Segment> {
        self.model.segment_at(t)
    }

    /// The segment under the playhead.
    pub fn current_segment(&self) -> Option<&Segment> {
        self.model.segment_at(self.track.current_time)
    }

    /// One-based display ordinal of a segment.
    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.model.index_of(id)
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Store the analyzer's tempo estimate.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    /// Record the track length reported by the player.
    ///
    /// Fails on a negative or non-finite value, and on a duration that
    /// would leave existing segments outside the track. History is dropped
    /// when a stored snapshot no longer fits the new length.
    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        if !duration.is_finite() || duration < 0.0 {
            log::error!("Player reported invalid duration {}", duration);
            return Err(EngineError::InvalidDuration(duration));
        }
        if duration > 0.0 {
            if let Some(last) = self.model.last().filter(|s| s.end > duration) {
                return Err(EngineError::InvariantViolation(Violation::OutOfBounds {
                    id: last.id,
                    duration,
                }));
            }
            if self.history.max_end().is_some_and(|end| end > duration) {
                log::warn!(
                    "Track shortened to {:.3}s, dropping {} undo steps",
                    duration,
                    self.history.len()
                );
                self.history.clear();
            }
        }
        self.track.duration = duration;
        self.track.current_time = self.track.current_time.min(duration);
        Ok(())
    }

    /// Record the playhead position, clamped to the track.
    pub fn set_current_time(&mut self, t: f64) {
        if t.is_finite() {
            self.track.current_time = t.clamp(0.0, self.track.duration.max(0.0));
        }
    }

    /// Record the rendering zoom (pixels per second).
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.track.zoom = zoom;
        }
    }

    /// Palette entry for a rotation index.
    pub(crate) fn environment(&self, index: usize) -> &EnvironmentColor {
        palette::rotate(&self.config.palette, index)
    }

    /// Validate a candidate list, snapshot the current one and commit.
    pub(crate) fn commit(&mut self, candidate: Vec<Segment>) -> Result<()> {
        self.end_drag();
        let sorted =
            SegmentModel::validate(candidate, self.track.duration, self.config.epsilon).map_err(
                |violation| {
                    log::warn!("Rejected segment list: {}", violation);
                    EngineError::InvariantViolation(violation)
                },
            )?;
        self.history.snapshot(self.model.segments());
        self.model.replace_validated(sorted);
        Ok(())
    }

    /// Replace the whole segment list as one undoable step.
    pub fn replace_segments(&mut self, segments: Vec<Segment>) -> Result<()> {
        self.commit(segments)?;
        log::info!("Replaced segment list, total: {}", self.model.len());
        Ok(())
    }

    /// Edit the annotation of one segment.
    ///
    /// Returns `false` when the id is unknown or nothing changed.
    pub fn update_segment(&mut self, id: SegmentId, patch: &SegmentPatch) -> bool {
        let Some(current) = self.model.get(id) else {
            log::debug!("update_segment: unknown segment {}", id);
            return false;
        };
        let updated = patch.applied_to(current);
        if &updated == current {
            return false;
        }

        let candidate = self
            .model
            .segments()
            .iter()
            .map(|s| if s.id == id { updated.clone() } else { s.clone() })
            .collect();
        self.commit(candidate).is_ok()
    }

    /// Delete one segment. Returns `false` when the id is unknown.
    pub fn delete_segment(&mut self, id: SegmentId) -> bool {
        if self.model.get(id).is_none() {
            log::debug!("delete_segment: unknown segment {}", id);
            return false;
        }
        let candidate = self
            .model
            .segments()
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        let deleted = self.commit(candidate).is_ok();
        if deleted {
            log::info!("Deleted segment {}, total: {}", id, self.model.len());
        }
        deleted
    }

    /// Remove every segment. Returns `false` when already empty.
    pub fn clear_segments(&mut self) -> bool {
        if self.model.is_empty() {
            return false;
        }
        let cleared = self.commit(Vec::new()).is_ok();
        if cleared {
            log::info!("Cleared all segments");
        }
        cleared
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Restore the list as it was before the last mutation.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. A snapshot that
    /// no longer fits the track is a hard failure; the live list and the
    /// history are both kept.
    pub fn undo(&mut self) -> Result<bool> {
        self.end_drag();
        let Some(previous) = self.history.peek() else {
            return Ok(false);
        };
        let sorted = SegmentModel::validate(
            previous.to_vec(),
            self.track.duration,
            self.config.epsilon,
        )
        .map_err(|violation| {
            log::error!("Undo snapshot failed validation: {}", violation);
            EngineError::CorruptSnapshot(violation)
        })?;
        self.history.undo();
        self.model.replace_validated(sorted);
        log::info!("Undo, total: {}", self.model.len());
        Ok(true)
    }

    /// Replace the session with a stored project.
    ///
    /// History is cleared; the loaded state is the bottom of the stack.
    pub fn load_project(&mut self, project: ProjectData) -> Result<()> {
        self.end_drag();
        self.model
            .apply(project.segments, self.track.duration, self.config.epsilon)?;
        self.history.clear();
        self.name = project.name;
        self.bpm = project.bpm;
        log::info!(
            "Loaded project '{}' with {} segments",
            self.name,
            self.model.len()
        );
        Ok(())
    }

    /// Snapshot the session as a storable project document.
    pub fn to_project_data(&self) -> ProjectData {
        ProjectData {
            name: self.name.clone(),
            bpm: self.bpm,
            segments: self.model.segments().to_vec(),
        }
    }

    /// Discard all session state.
    pub fn close(&mut self) {
        self.end_drag();
        self.model.clear();
        self.history.clear();
        self.track = TrackContext::default();
        self.name.clear();
        self.bpm = 0;
        log::info!("Closed project session");
    }
}
