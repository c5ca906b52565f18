// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Conversion of project documents to and from text formats.

pub mod serialization;
