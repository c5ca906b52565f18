// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Plain data types shared by the engine and its collaborators.

pub mod palette;
pub mod project;
pub mod segment;
