// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the segmentation engine.
//!
//! Expected "nothing to do" outcomes are not errors and never show up
//! here; see the individual operations for how they report a no-op.

use crate::models::segment::SegmentId;
use thiserror::Error;

/// A broken segment list invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("segments {left} and {right} overlap")]
    Overlap { left: SegmentId, right: SegmentId },

    #[error("segment {id} is {length:.3}s long, below the {floor:.3}s floor")]
    TooShort {
        id: SegmentId,
        length: f64,
        floor: f64,
    },

    #[error("segment {id} lies outside the track [0, {duration:.3}]")]
    OutOfBounds { id: SegmentId, duration: f64 },

    #[error("segment {0} has a non-finite boundary")]
    NonFinite(SegmentId),

    #[error("segment id {0} appears more than once")]
    DuplicateId(SegmentId),
}

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A commit would have broken the segment list; nothing was changed.
    #[error("rejected segment list: {0}")]
    InvariantViolation(Violation),

    /// No segment with this id exists.
    #[error("unknown segment {0}")]
    UnknownSegment(SegmentId),

    /// An undo snapshot no longer satisfies the invariants.
    #[error("history snapshot is corrupted: {0}")]
    CorruptSnapshot(Violation),

    /// The player reported an impossible track duration.
    #[error("invalid track duration {0}")]
    InvalidDuration(f64),

    /// Engine configuration is unusable.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl From<Violation> for EngineError {
    fn from(violation: Violation) -> Self {
        EngineError::InvariantViolation(violation)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
