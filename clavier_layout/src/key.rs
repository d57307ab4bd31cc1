// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-key identity and state.

use alloc::string::String;
use kurbo::Rect;
use smallvec::SmallVec;

/// Stable integer identifier of one active touch contact.
///
/// Ids are assigned by the host's input system and remain stable for the
/// duration of the contact.
pub type PointerId = u32;

/// Whether a key is a black key or a white key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// A raised black key.
    Black,
    /// A white key.
    White,
}

/// Solfège name of a key's pitch class.
///
/// Black keys carry the solfège of the natural below them (C♯ is `Do`,
/// F♯ is `Fa`, and so on).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Solfege {
    /// C
    Do,
    /// D
    Re,
    /// E
    Mi,
    /// F
    Fa,
    /// G
    So,
    /// A
    La,
    /// B
    Si,
}

/// One key of the keyboard: immutable identity plus mutable interaction
/// state.
///
/// Identity fields are recomputed deterministically on every
/// [`Keyboard::build`](crate::Keyboard::build); interaction state (pressed,
/// owner, highlight labels) is reset by a rebuild and mutated only by the
/// touch tracker and highlight resolver layers.
#[derive(Clone, Debug)]
pub struct Key {
    /// Black or white.
    pub kind: KeyKind,
    /// Solfège pitch class.
    pub voice: Solfege,
    /// Octave group this key belongs to (0..=8 for white, 0..=7 for black).
    pub octave_group: usize,
    /// Position of the key within its octave group.
    pub position_in_group: usize,
    /// MIDI note number, 21 (A0) through 108 (C8).
    pub midi_note: u8,
    /// Display name: `"C4"` for white keys, two-line enharmonic names such
    /// as `"C♯\nD♭"` for black keys.
    pub letter_name: String,
    /// Visual footprint of the key, used for painting.
    pub bounds: Rect,
    /// 1–3 disjoint rectangles that tile the touchable region of the key.
    pub hit_areas: SmallVec<[Rect; 3]>,
    /// Whether the key is currently held down.
    pub pressed: bool,
    /// The pointer holding this key down, if any.
    pub owner: Option<PointerId>,
    /// Highlight label per tier (index 0 = tier 1). Empty means unset.
    pub highlight_labels: [String; 3],
}

impl Key {
    /// Returns the sorted-key index for this key's MIDI note
    /// (`midi_note - 21`).
    #[must_use]
    pub fn sorted_index(&self) -> usize {
        usize::from(self.midi_note - crate::MIDI_FIRST)
    }
}
