// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! KUECUT - Kue timeline segmentation engine
//!
//! Chops a music or video track into an ordered sequence of
//! non-overlapping, prompt-annotated time segments ("Kues"). The engine
//! only knows abstract time in seconds: playback, waveform rendering,
//! storage and tempo detection are collaborators that call into it.
//!
//! ```
//! use kuecut::KueEngine;
//!
//! let mut engine = KueEngine::new();
//! engine.set_duration(10.0)?;
//! engine.cut_at_position(4.0);
//! engine.close_to_end();
//! assert_eq!(engine.segments().len(), 2);
//!
//! engine.undo()?;
//! assert_eq!(engine.segments().len(), 1);
//! # Ok::<(), kuecut::EngineError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod models;
pub mod timeline;
pub mod util;

pub use config::EngineConfig;
pub use engine::KueEngine;
pub use error::{EngineError, Violation};
pub use models::project::{ProjectData, TrackContext};
pub use models::segment::{PromptFields, Segment, SegmentId, SegmentPatch};
pub use timeline::boundary::{BoundaryHandle, DragTarget, Edge};
pub use timeline::lyrics::LyricOutcome;
