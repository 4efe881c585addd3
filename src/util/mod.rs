// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String helpers shared by both engines.
//!
//! Case-insensitive substring matching that reports byte ranges in the
//! *original* text, so highlighting can splice markup around exactly what the
//! user typed without re-casing anything. Plus the line splitter the lexical
//! engine windows over.

pub mod casefold;
pub mod lines;
