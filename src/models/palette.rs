// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Environment color palette.
//!
//! Engine-created segments are tagged round-robin with one of these
//! environments so neighbouring Kues are easy to tell apart.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A named environment with a bright (hero) and a muted (fill) shade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentColor {
    pub name: String,
    pub hero: String,
    pub fill: String,
    #[serde(default)]
    pub description: String,
}

impl EnvironmentColor {
    fn new(name: &str, hero: &str, fill: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            hero: hero.to_string(),
            fill: fill.to_string(),
            description: description.to_string(),
        }
    }
}

/// Default palette, in rotation order.
pub static ENVIRONMENT_COLORS: LazyLock<Vec<EnvironmentColor>> = LazyLock::new(|| {
    vec![
        EnvironmentColor::new(
            "Neutral",
            "#8b5cf6",
            "#4c2889",
            "Default, no specific setting",
        ),
        EnvironmentColor::new(
            "Pool/Water",
            "#3b82f6",
            "#1e3a5f",
            "Pool, beach, water",
        ),
        EnvironmentColor::new(
            "Sunset/Warm",
            "#f97316",
            "#7c3a0a",
            "Sunset, warm room",
        ),
        EnvironmentColor::new(
            "Nature/Green",
            "#22c55e",
            "#14532d",
            "Outdoors, garden, forest",
        ),
        EnvironmentColor::new(
            "Party/Pink",
            "#ec4899",
            "#831843",
            "Club, party, neon",
        ),
        EnvironmentColor::new(
            "Urban/Yellow",
            "#eab308",
            "#713f12",
            "City, street, taxi",
        ),
        EnvironmentColor::new(
            "Night/Dark",
            "#6366f1",
            "#312e81",
            "Night, dark interior",
        ),
        EnvironmentColor::new(
            "Studio/White",
            "#f8fafc",
            "#94a3b8",
            "Studio, clean background",
        ),
    ]
});

/// Pick the palette entry for a rotation index.
///
/// `palette` must be non-empty; the engine config guarantees this.
pub fn rotate(palette: &[EnvironmentColor], index: usize) -> &EnvironmentColor {
    &palette[index % palette.len()]
}
