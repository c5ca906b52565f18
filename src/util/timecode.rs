// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time coordinate utility functions.
//!
//! This module provides conversions between waveform pixel offsets and
//! track time, and the timecode strings shown next to Kues.

/// Convert a pixel offset on the waveform to seconds.
///
/// A non-positive zoom maps everything to 0.
pub fn pixel_to_time(pixel: f64, zoom: f64) -> f64 {
    if zoom > 0.0 {
        pixel / zoom
    } else {
        0.0
    }
}

/// Convert seconds to a pixel offset on the waveform.
pub fn time_to_pixel(seconds: f64, zoom: f64) -> f64 {
    seconds * zoom
}

/// Format seconds as `m:ss.mmm`, or `m:ss` without milliseconds.
pub fn format_time(seconds: f64, include_ms: bool) -> String {
    if !seconds.is_finite() {
        return if include_ms { "0:00.000" } else { "0:00" }.to_string();
    }
    let total_ms = (seconds.max(0.0) * 1000.0).floor() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let ms = total_ms % 1000;

    if include_ms {
        format!("{}:{:02}.{:03}", minutes, secs, ms)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format seconds as `s.mmm` for compact displays.
pub fn format_time_short(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0.000".to_string();
    }
    format!("{:.3}", seconds)
}
