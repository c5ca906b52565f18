// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Distributing lyric lines onto existing segments, one line per Kue.

use crate::engine::KueEngine;
use crate::models::segment::Segment;

/// What a lyric distribution did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricOutcome {
    /// There are no segments to distribute onto.
    NoSegments,
    /// The text contained no non-blank line.
    NoLines,
    /// `assigned` segments received a line; `dropped` lines had no segment.
    Assigned { assigned: usize, dropped: usize },
}

/// Split pasted text into trimmed, non-blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl KueEngine {
    /// Assign `lines[i]` to the note of the i-th segment.
    ///
    /// Segments past the last line keep their note. Blank lines are
    /// skipped before pairing.
    pub fn assign_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> LyricOutcome {
        if self.model.is_empty() {
            log::debug!("assign_lines: no segments");
            return LyricOutcome::NoSegments;
        }

        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return LyricOutcome::NoLines;
        }

        let segments = self.model.segments();
        let assigned = lines.len().min(segments.len());
        let dropped = lines.len() - assigned;

        let candidate: Vec<Segment> = segments
            .iter()
            .enumerate()
            .map(|(idx, seg)| match lines.get(idx) {
                Some(line) => Segment {
                    note: (*line).to_string(),
                    ..seg.clone()
                },
                None => seg.clone(),
            })
            .collect();

        if candidate.as_slice() != segments {
            if let Err(e) = self.commit(candidate) {
                log::warn!("assign_lines: {}", e);
                return LyricOutcome::Assigned {
                    assigned: 0,
                    dropped: lines.len(),
                };
            }
        }

        log::info!(
            "Lyrics assigned to {} Kues ({} lines dropped)",
            assigned,
            dropped
        );
        LyricOutcome::Assigned { assigned, dropped }
    }

    /// Split pasted text and distribute it with [`KueEngine::assign_lines`].
    pub fn assign_lyrics(&mut self, text: &str) -> LyricOutcome {
        self.assign_lines(&split_lines(text))
    }
}
