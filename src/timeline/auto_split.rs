// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Uniform BPM grid generation.

use crate::engine::KueEngine;
use crate::models::segment::Segment;

/// Compute grid cells `[start, end)` of `(60 / bpm) * beats_per_bar`
/// seconds covering `[0, duration]`.
///
/// Returns `None` for a tempo that yields no usable grid: non-positive
/// BPM or duration, zero beats per bar, or cells shorter than
/// `min_interval`. A trailing cell shorter than `epsilon` is dropped.
pub fn bpm_grid(
    bpm: f64,
    beats_per_bar: u32,
    duration: f64,
    epsilon: f64,
    min_interval: f64,
) -> Option<Vec<(f64, f64)>> {
    if !bpm.is_finite() || bpm <= 0.0 || beats_per_bar == 0 {
        return None;
    }
    if !duration.is_finite() || duration <= 0.0 {
        return None;
    }

    let interval = (60.0 / bpm) * beats_per_bar as f64;
    if interval < min_interval {
        return None;
    }

    let mut cells = Vec::new();
    for index in 0usize.. {
        // Bounds are exact multiples of the interval.
        let start = index as f64 * interval;
        if start >= duration {
            break;
        }
        let end = ((index + 1) as f64 * interval).min(duration);
        if end - start < epsilon {
            break;
        }
        cells.push((start, end));
    }
    Some(cells)
}

impl KueEngine {
    /// Replace the whole segment list with a BPM grid.
    ///
    /// This discards every existing segment (undoable). Returns the number
    /// of generated segments, or `None` if the tempo was rejected.
    pub fn auto_split_by_bpm(&mut self, bpm: f64, beats_per_bar: u32) -> Option<usize> {
        let Some(cells) = bpm_grid(
            bpm,
            beats_per_bar,
            self.track.duration,
            self.config.epsilon,
            self.config.min_grid_interval,
        ) else {
            log::debug!(
                "auto_split_by_bpm: rejected {} BPM x {} beats on a {:.3}s track",
                bpm,
                beats_per_bar,
                self.track.duration
            );
            return None;
        };

        let candidate: Vec<Segment> = cells
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| Segment::fresh(start, end, self.environment(index)))
            .collect();
        let count = candidate.len();

        match self.commit(candidate) {
            Ok(()) => {
                log::info!(
                    "Auto-split at {} BPM x {} beats: {} Kues generated",
                    bpm,
                    beats_per_bar,
                    count
                );
                Some(count)
            }
            Err(e) => {
                log::warn!("auto_split_by_bpm: {}", e);
                None
            }
        }
    }

    /// Auto-split with the stored BPM and the configured beats per bar.
    pub fn auto_split(&mut self) -> Option<usize> {
        let beats_per_bar = self.config.default_beats_per_bar;
        self.auto_split_by_bpm(self.bpm as f64, beats_per_bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{assert_invariants, bounds, engine_with_track};

    #[test]
    fn test_grid_120_bpm_four_beats() {
        let mut engine = engine_with_track(10.0);
        assert_eq!(engine.auto_split_by_bpm(120.0, 4), Some(5));
        assert_eq!(
            bounds(&engine),
            vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 8.0), (8.0, 10.0)]
        );
        assert_invariants(&engine);
    }

    #[test]
    fn test_trailing_fragment() {
        // 2s cells on 10.05s: the last 0.05s is below epsilon.
        let cells = bpm_grid(120.0, 4, 10.05, 0.1, 0.5).unwrap();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells.last(), Some(&(8.0, 10.0)));

        // On 10.5s the 0.5s remainder is kept.
        let cells = bpm_grid(120.0, 4, 10.5, 0.1, 0.5).unwrap();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.last(), Some(&(10.0, 10.5)));
    }

    #[test]
    fn test_rejects_pathological_tempo() {
        assert!(bpm_grid(0.0, 4, 10.0, 0.1, 0.5).is_none());
        assert!(bpm_grid(-90.0, 4, 10.0, 0.1, 0.5).is_none());
        assert!(bpm_grid(f64::INFINITY, 4, 10.0, 0.1, 0.5).is_none());
        assert!(bpm_grid(120.0, 0, 10.0, 0.1, 0.5).is_none());
        assert!(bpm_grid(120.0, 4, 0.0, 0.1, 0.5).is_none());
        // 600 BPM, one beat per bar: 0.1s cells.
        assert!(bpm_grid(600.0, 1, 10.0, 0.1, 0.5).is_none());
        // 120 BPM, one beat per bar: exactly 0.5s is allowed.
        assert_eq!(bpm_grid(120.0, 1, 10.0, 0.1, 0.5).unwrap().len(), 20);
    }

    #[test]
    fn test_replaces_existing_and_is_undoable() {
        let mut engine = engine_with_track(10.0);
        engine.cut_at_position(3.0).unwrap();
        engine.close_to_end().unwrap();

        assert_eq!(engine.auto_split_by_bpm(60.0, 4), Some(3));
        assert_eq!(bounds(&engine), vec![(0.0, 4.0), (4.0, 8.0), (8.0, 10.0)]);

        assert!(engine.undo().unwrap());
        assert_eq!(bounds(&engine), vec![(0.0, 3.0), (3.0, 10.0)]);
    }

    #[test]
    fn test_rejected_tempo_leaves_list() {
        let mut engine = engine_with_track(10.0);
        engine.cut_at_position(3.0).unwrap();
        let depth = engine.history.len();

        assert_eq!(engine.auto_split_by_bpm(0.0, 4), None);
        assert_eq!(engine.segments().len(), 1);
        assert_eq!(engine.history.len(), depth);
    }

    #[test]
    fn test_colors_rotate_by_index() {
        let mut engine = engine_with_track(40.0);
        engine.auto_split_by_bpm(120.0, 2).unwrap();

        let names: Vec<&str> = engine
            .segments()
            .iter()
            .map(|s| s.color_name.as_deref().unwrap())
            .collect();
        assert_eq!(names.len(), 40);
        assert_eq!(names[0], "Neutral");
        assert_eq!(names[1], "Pool/Water");
        assert_eq!(names[8], "Neutral");
        assert_ne!(names[3], names[4]);
    }

    #[test]
    fn test_auto_split_uses_stored_bpm() {
        let mut engine = engine_with_track(10.0);
        assert_eq!(engine.auto_split(), None);
        engine.set_bpm(120);
        assert_eq!(engine.auto_split(), Some(5));
    }
}
