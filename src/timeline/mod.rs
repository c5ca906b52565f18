// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline segmentation: the segment list and the operations on it.

pub mod auto_split;
pub mod boundary;
pub mod cut;
pub mod history;
pub mod lyrics;
pub mod model;
