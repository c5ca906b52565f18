// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Segment ("Kue") data structures.
//!
//! This module defines the time interval that the timeline is chopped
//! into, along with the annotation carried by each interval.

use super::palette::EnvironmentColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque segment identifier.
///
/// New identifiers are only minted by the engine; identifiers arriving
/// from a stored project are taken as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(Uuid);

impl SegmentId {
    pub(crate) fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Structured prompt fields used by the video generation collaborator.
///
/// The engine carries these around but never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptFields {
    pub subject: String,
    pub action: String,
    pub lighting: String,
    pub camera: String,
    pub style: String,
}

/// A half-open time interval `[start, end)` on the track, plus annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
    #[serde(default = "default_hero")]
    pub is_hero: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptFields>,
}

fn default_hero() -> bool {
    true
}

impl Segment {
    /// Create a fresh hero segment tagged with the given environment.
    pub(crate) fn fresh(start: f64, end: f64, environment: &EnvironmentColor) -> Self {
        Self {
            id: SegmentId::mint(),
            start,
            end,
            note: String::new(),
            color: Some(environment.hero.clone()),
            color_name: Some(environment.name.clone()),
            is_hero: true,
            thumbnail: None,
            prompt: None,
        }
    }

    /// Length of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check whether `t` falls inside `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

/// Partial update of a segment's annotation fields.
///
/// Timing is deliberately absent: moving boundaries goes through a drag
/// session so the non-overlap rules are enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPatch {
    pub note: Option<String>,
    pub color: Option<Option<String>>,
    pub color_name: Option<Option<String>>,
    pub is_hero: Option<bool>,
    pub thumbnail: Option<Option<String>>,
    pub prompt: Option<Option<PromptFields>>,
}

impl SegmentPatch {
    /// Patch that only replaces the note.
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Default::default()
        }
    }

    /// Apply the patch to a segment, returning the updated copy.
    pub fn applied_to(&self, segment: &Segment) -> Segment {
        let mut updated = segment.clone();
        if let Some(note) = &self.note {
            updated.note = note.clone();
        }
        if let Some(color) = &self.color {
            updated.color = color.clone();
        }
        if let Some(color_name) = &self.color_name {
            updated.color_name = color_name.clone();
        }
        if let Some(is_hero) = self.is_hero {
            updated.is_hero = is_hero;
        }
        if let Some(thumbnail) = &self.thumbnail {
            updated.thumbnail = thumbnail.clone();
        }
        if let Some(prompt) = &self.prompt {
            updated.prompt = prompt.clone();
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::palette::ENVIRONMENT_COLORS;

    #[test]
    fn test_contains_is_half_open() {
        let seg = Segment::fresh(2.0, 4.0, &ENVIRONMENT_COLORS[0]);
        assert!(seg.contains(2.0));
        assert!(seg.contains(3.999));
        assert!(!seg.contains(4.0));
        assert!(!seg.contains(1.999));
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut seg = Segment::fresh(0.0, 4.0, &ENVIRONMENT_COLORS[1]);
        seg.note = "intro".to_string();

        let patched = SegmentPatch {
            is_hero: Some(false),
            thumbnail: Some(Some("thumb-1".to_string())),
            ..Default::default()
        }
        .applied_to(&seg);

        assert_eq!(patched.note, "intro");
        assert!(!patched.is_hero);
        assert_eq!(patched.thumbnail.as_deref(), Some("thumb-1"));
        assert_eq!(patched.color_name.as_deref(), Some("Pool/Water"));
        assert_eq!(patched.id, seg.id);
    }

    #[test]
    fn test_deserialize_web_app_segment() {
        let json = r#"{
            "id": "6f1c2f0e-7a3b-4c1d-9e2f-0a1b2c3d4e5f",
            "start": 1.5,
            "end": 3.25,
            "note": "hook",
            "colorName": "Party/Pink",
            "prompt": { "subject": "dancer" }
        }"#;

        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.start, 1.5);
        assert_eq!(seg.color_name.as_deref(), Some("Party/Pink"));
        assert!(seg.is_hero);
        let prompt = seg.prompt.unwrap();
        assert_eq!(prompt.subject, "dancer");
        assert_eq!(prompt.camera, "");
    }
}
