// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clavier Layout: the 88-key piano keyboard model.
//!
//! This crate builds the full key set of a standard piano — 52 white and 36
//! black keys, MIDI notes 21 (A0) through 108 (C8) — together with precise
//! hit-test geometry for a given layout size and white-key width. It is a
//! headless model: it knows nothing about painting, windows, or input
//! devices. Higher layers consume its [`Key`] records to draw the keyboard
//! and to resolve pointer positions.
//!
//! ## Geometry
//!
//! White keys are not plain rectangles for hit-testing purposes: wherever a
//! black key overlaps a white key, the white key's touchable region is split
//! into 2 or 3 axis-aligned rectangles that together tile its visual
//! footprint. Black keys are single rectangles sitting on the boundary
//! between two white keys, with a one-white-key shift applied to F♯, G♯, and
//! A♯ to reflect the non-uniform spacing of black keys within an octave.
//!
//! All rectangles use half-open containment semantics ([`kurbo::Rect`]), so
//! adjacent keys never both claim a boundary point.
//!
//! ## Minimal example
//!
//! ```rust
//! use clavier_layout::Keyboard;
//!
//! let mut keyboard = Keyboard::new();
//! keyboard.build(800, 300, 80, 0.6);
//!
//! assert_eq!(keyboard.keys().len(), 88);
//! assert_eq!(keyboard.keys()[0].midi_note, 21); // A0
//! assert_eq!(keyboard.total_width(), 52 * 80);
//! ```
//!
//! ## Rebuilds
//!
//! [`Keyboard::build`] replaces the whole key set. It is deterministic and
//! idempotent: identical inputs always reproduce identical keys. A rebuild
//! resets per-key press/ownership state, so any tracker holding key indices
//! from the previous geometry must be cleared by the caller.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod key;
mod keyboard;

pub use key::{Key, KeyKind, PointerId, Solfege};
pub use keyboard::Keyboard;

/// MIDI note number of the lowest key on an 88-key piano (A0).
pub const MIDI_FIRST: u8 = 21;

/// MIDI note number of the highest key on an 88-key piano (C8).
pub const MIDI_LAST: u8 = 108;

/// Number of keys on the keyboard.
pub const NUM_KEYS: usize = 88;

/// Number of white keys on the keyboard.
pub const NUM_WHITE_KEYS: usize = 52;

/// Number of black keys on the keyboard.
pub const NUM_BLACK_KEYS: usize = 36;
