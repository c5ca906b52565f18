// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module converts project documents to and from JSON and YAML
//! text. Where the text is stored is up to the persistence layer.

use crate::models::project::ProjectData;
use anyhow::{Context, Result};

/// Export project data to JSON format.
pub fn to_json(data: &ProjectData) -> Result<String> {
    let json = serde_json::to_string_pretty(data).context("Failed to encode project as JSON")?;
    Ok(json)
}

/// Import project data from JSON format.
pub fn from_json(json: &str) -> Result<ProjectData> {
    let data = serde_json::from_str(json).context("Failed to parse project JSON")?;
    Ok(data)
}

/// Export project data to YAML format.
pub fn to_yaml(data: &ProjectData) -> Result<String> {
    let yaml = serde_yaml::to_string(data).context("Failed to encode project as YAML")?;
    Ok(yaml)
}

/// Import project data from YAML format.
pub fn from_yaml(yaml: &str) -> Result<ProjectData> {
    let data = serde_yaml::from_str(yaml).context("Failed to parse project YAML")?;
    Ok(data)
}
