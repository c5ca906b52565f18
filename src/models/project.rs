// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project and track state.
//!
//! This module holds the playback context the engine works against and
//! the project document that the persistence collaborator stores.

use super::segment::Segment;
use serde::{Deserialize, Serialize};

/// Playback context reported by the player and the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackContext {
    /// Playhead position in seconds.
    pub current_time: f64,
    /// Total length of the loaded track; 0 until the player reports it.
    pub duration: f64,
    /// Pixels per second. Only the rendering surface cares.
    pub zoom: f64,
}

impl Default for TrackContext {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            zoom: 10.0,
        }
    }
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub name: String,
    /// Tempo estimate, 0 when unknown.
    #[serde(default)]
    pub bpm: u32,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl ProjectData {
    /// Create an empty project with the given name.
    pub fn new(name: String) -> Self {
        Self {
            name,
            bpm: 0,
            segments: Vec::new(),
        }
    }
}
