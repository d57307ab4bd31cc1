// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 88-key keyboard container and its geometry construction.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::{SmallVec, smallvec};

use crate::key::{Key, KeyKind, Solfege};
use crate::{MIDI_FIRST, MIDI_LAST};

/// Number of white-key octave groups (group 0 = {A0, B0}, group 8 = {C8}).
const WHITE_KEY_GROUPS: usize = 9;

/// Number of black-key octave groups (group 0 = {A♯0}).
const BLACK_KEY_GROUPS: usize = 8;

/// Two-line enharmonic display names for the five black keys of a full
/// octave group, in position order.
const BLACK_NAMES: [&str; 5] = [
    "C♯\nD♭",
    "D♯\nE♭",
    "F♯\nG♭",
    "G♯\nA♭",
    "A♯\nB♭",
];

/// Which side(s) of a white key a black key touches.
///
/// This decides how the white key's touchable region splits around the
/// overlapping black key(s).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flank {
    /// Black key immediately to the left only (E, B).
    Left,
    /// Black keys on both sides (D, G, A).
    Center,
    /// Black key immediately to the right only (C, F, A0).
    Right,
    /// No adjacent black key (C8).
    Free,
}

/// White-key metadata for a full 7-key octave group, in position order:
/// letter, solfège, flank class, and MIDI offset within the group.
const WHITE_OCTAVE: [(char, Solfege, Flank, usize); 7] = [
    ('C', Solfege::Do, Flank::Right, 12),
    ('D', Solfege::Re, Flank::Center, 14),
    ('E', Solfege::Mi, Flank::Left, 16),
    ('F', Solfege::Fa, Flank::Right, 17),
    ('G', Solfege::So, Flank::Center, 19),
    ('A', Solfege::La, Flank::Center, 21),
    ('B', Solfege::Si, Flank::Left, 23),
];

/// Black-key metadata for a full 5-key octave group, in position order:
/// solfège and MIDI offset within the group.
const BLACK_OCTAVE: [(Solfege, usize); 5] = [
    (Solfege::Do, 13),
    (Solfege::Re, 15),
    (Solfege::Fa, 18),
    (Solfege::So, 20),
    (Solfege::La, 22),
];

/// The 88-key piano model: key identity plus hit-test geometry for the
/// current layout dimensions and white-key width.
///
/// Keys are stored sorted ascending by MIDI note number, so the key for
/// MIDI note `n` lives at index `n - 21`. White and black keys are also
/// exposed as index lists in octave-group order for rendering.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    keys: Vec<Key>,
    white: Vec<usize>,
    black: Vec<usize>,
    layout_width: i32,
    layout_height: i32,
    white_key_width: i32,
    black_key_width: i32,
    black_key_height: i32,
}

impl Keyboard {
    /// Creates an empty keyboard. Call [`Keyboard::build`] to populate it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the full key set and geometry.
    ///
    /// - `layout_width` / `layout_height`: the widget's layout size in
    ///   pixels. When either is non-positive, the call is a no-op and any
    ///   prior geometry is kept.
    /// - `white_key_width`: width of one white key in pixels. The black key
    ///   width is derived as `round(white_key_width * 0.75)`.
    /// - `black_to_white_height_ratio`: black key height as a fraction of
    ///   the layout height, rounded to whole pixels.
    ///
    /// The rebuild is deterministic and idempotent. It replaces every key,
    /// resetting press/ownership state and highlight labels; callers
    /// tracking key indices across rebuilds must clear that state.
    pub fn build(
        &mut self,
        layout_width: i32,
        layout_height: i32,
        white_key_width: i32,
        black_to_white_height_ratio: f64,
    ) {
        if layout_width <= 0 || layout_height <= 0 {
            return;
        }

        self.layout_width = layout_width;
        self.layout_height = layout_height;
        self.white_key_width = white_key_width;
        // Round half up: (3w + 2) / 4 == round(0.75 * w) for positive w.
        self.black_key_width = (3 * white_key_width + 2) / 4;
        self.black_key_height =
            round_px(f64::from(layout_height) * black_to_white_height_ratio);

        self.keys.clear();
        self.build_black_keys();
        self.build_white_keys();
        self.keys.sort_by_key(|key| key.midi_note);

        self.white.clear();
        self.black.clear();
        for (index, key) in self.keys.iter().enumerate() {
            match key.kind {
                KeyKind::White => self.white.push(index),
                KeyKind::Black => self.black.push(index),
            }
        }
    }

    fn build_black_keys(&mut self) {
        for group in 0..BLACK_KEY_GROUPS {
            if group == 0 {
                // Group 0 has the lone A♯0/B♭0.
                self.push_black(0, 0, Solfege::La, 22, BLACK_NAMES[4]);
                continue;
            }
            for (position, &(voice, offset)) in BLACK_OCTAVE.iter().enumerate() {
                self.push_black(group, position, voice, offset + 12 * group, BLACK_NAMES[position]);
            }
        }
    }

    fn push_black(
        &mut self,
        group: usize,
        position: usize,
        voice: Solfege,
        midi: usize,
        name: &str,
    ) {
        let bounds = self.black_key_rect(group, position);
        self.keys.push(Key {
            kind: KeyKind::Black,
            voice,
            octave_group: group,
            position_in_group: position,
            midi_note: midi_note(midi),
            letter_name: name.to_string(),
            bounds,
            hit_areas: smallvec![bounds],
            pressed: false,
            owner: None,
            highlight_labels: [String::new(), String::new(), String::new()],
        });
    }

    fn build_white_keys(&mut self) {
        for group in 0..WHITE_KEY_GROUPS {
            match group {
                0 => {
                    self.push_white(0, 0, Solfege::La, 21, "A0".to_string(), Flank::Right);
                    self.push_white(0, 1, Solfege::Si, 23, "B0".to_string(), Flank::Left);
                }
                8 => {
                    self.push_white(8, 0, Solfege::Do, 108, "C8".to_string(), Flank::Free);
                }
                _ => {
                    for (position, &(letter, voice, flank, offset)) in
                        WHITE_OCTAVE.iter().enumerate()
                    {
                        self.push_white(
                            group,
                            position,
                            voice,
                            offset + 12 * group,
                            format!("{letter}{group}"),
                            flank,
                        );
                    }
                }
            }
        }
    }

    fn push_white(
        &mut self,
        group: usize,
        position: usize,
        voice: Solfege,
        midi: usize,
        name: String,
        flank: Flank,
    ) {
        let serial = white_serial(group, position);
        let left = serial * self.white_key_width;
        let right = left + self.white_key_width;
        let bounds = rect_px(left, 0, right, self.layout_height);
        let hit_areas = self.white_hit_areas(left, right, flank);
        self.keys.push(Key {
            kind: KeyKind::White,
            voice,
            octave_group: group,
            position_in_group: position,
            midi_note: midi_note(midi),
            letter_name: name,
            bounds,
            hit_areas,
            pressed: false,
            owner: None,
            highlight_labels: [String::new(), String::new(), String::new()],
        });
    }

    /// Splits a white key's footprint around the overlapping black key(s).
    ///
    /// The split x positions sit half a black key inside the shared white
    /// key boundaries; the split y position is the black key height. The
    /// returned rectangles are pairwise disjoint and tile the footprint.
    fn white_hit_areas(&self, left: i32, right: i32, flank: Flank) -> SmallVec<[Rect; 3]> {
        let half = self.black_key_width / 2;
        let top = self.black_key_height;
        let bottom = self.layout_height;
        match flank {
            Flank::Left => smallvec![
                rect_px(left, top, left + half, bottom),
                rect_px(left + half, 0, right, bottom),
            ],
            Flank::Center => smallvec![
                rect_px(left, top, left + half, bottom),
                rect_px(left + half, 0, right - half, bottom),
                rect_px(right - half, top, right, bottom),
            ],
            Flank::Right => smallvec![
                rect_px(left, 0, right - half, bottom),
                rect_px(right - half, top, right, bottom),
            ],
            Flank::Free => smallvec![rect_px(left, 0, right, bottom)],
        }
    }

    /// Rectangle of a black key, centered on the boundary between its two
    /// neighboring white keys. Positions 2..=4 (F♯, G♯, A♯) shift one white
    /// key further right than positions 0..=1.
    fn black_key_rect(&self, group: usize, position: usize) -> Rect {
        let offset = if group == 0 { 5 } else { 0 };
        let shift = if position >= 2 { 1 } else { 0 };
        let units = to_i32(7 * group + offset + position + shift) - 4;
        let left = units * self.white_key_width - self.black_key_width / 2;
        rect_px(left, 0, left + self.black_key_width, self.black_key_height)
    }

    /// All 88 keys, sorted ascending by MIDI note number.
    ///
    /// Before the first successful [`Keyboard::build`] the slice is empty.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Mutable access to the sorted key slice.
    pub fn keys_mut(&mut self) -> &mut [Key] {
        &mut self.keys
    }

    /// The key at the given sorted index, if built.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    /// Mutable access to the key at the given sorted index.
    pub fn key_mut(&mut self, index: usize) -> Option<&mut Key> {
        self.keys.get_mut(index)
    }

    /// Maps a MIDI note number to its sorted key index.
    ///
    /// Returns `None` for numbers outside `21..=108` or before the first
    /// build.
    #[must_use]
    pub fn index_for_midi(&self, midi: i32) -> Option<usize> {
        if self.keys.is_empty()
            || midi < i32::from(MIDI_FIRST)
            || midi > i32::from(MIDI_LAST)
        {
            return None;
        }
        usize::try_from(midi - i32::from(MIDI_FIRST)).ok()
    }

    /// Indices of the white keys, in octave-group order.
    #[must_use]
    pub fn white_indices(&self) -> &[usize] {
        &self.white
    }

    /// Indices of the black keys, in octave-group order.
    #[must_use]
    pub fn black_indices(&self) -> &[usize] {
        &self.black
    }

    /// Full keyboard width in pixels: `52 * white_key_width`.
    ///
    /// Zero before the first successful build.
    #[must_use]
    pub fn total_width(&self) -> i32 {
        to_i32(self.white.len()) * self.white_key_width
    }

    /// Current white-key width in pixels.
    #[must_use]
    pub fn white_key_width(&self) -> i32 {
        self.white_key_width
    }

    /// Current black-key width in pixels.
    #[must_use]
    pub fn black_key_width(&self) -> i32 {
        self.black_key_width
    }

    /// Current black-key height in pixels.
    #[must_use]
    pub fn black_key_height(&self) -> i32 {
        self.black_key_height
    }

    /// Layout width passed to the last successful build.
    #[must_use]
    pub fn layout_width(&self) -> i32 {
        self.layout_width
    }

    /// Layout height passed to the last successful build.
    #[must_use]
    pub fn layout_height(&self) -> i32 {
        self.layout_height
    }
}

fn rect_px(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    Rect::new(f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1))
}

/// Serial position of a white key across the whole keyboard (0..=51).
fn white_serial(group: usize, position: usize) -> i32 {
    let offset = if group == 0 { 5 } else { 0 };
    to_i32(7 * group + offset + position) - 5
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "inputs are small key/group counts"
)]
fn to_i32(value: usize) -> i32 {
    value as i32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "MIDI note numbers stay within 21..=108 by construction"
)]
fn midi_note(midi: usize) -> u8 {
    midi as u8
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "pixel dimensions are small positive values"
)]
fn round_px(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::{NUM_BLACK_KEYS, NUM_KEYS, NUM_WHITE_KEYS};

    fn built() -> Keyboard {
        let mut keyboard = Keyboard::new();
        keyboard.build(800, 100, 10, 0.6);
        keyboard
    }

    #[test]
    fn build_yields_88_keys_covering_midi_range() {
        let keyboard = built();
        assert_eq!(keyboard.keys().len(), NUM_KEYS);
        assert_eq!(keyboard.white_indices().len(), NUM_WHITE_KEYS);
        assert_eq!(keyboard.black_indices().len(), NUM_BLACK_KEYS);

        let midis: Vec<u8> = keyboard.keys().iter().map(|k| k.midi_note).collect();
        let expected: Vec<u8> = (MIDI_FIRST..=MIDI_LAST).collect();
        assert_eq!(midis, expected);
    }

    #[test]
    fn derived_dimensions_round_half_up() {
        let keyboard = built();
        // 10 * 0.75 = 7.5 rounds up to 8.
        assert_eq!(keyboard.black_key_width(), 8);
        // 100 * 0.6 = 60.
        assert_eq!(keyboard.black_key_height(), 60);
        assert_eq!(keyboard.total_width(), 52 * 10);
    }

    #[test]
    fn non_positive_dimensions_keep_prior_geometry() {
        let mut keyboard = built();
        keyboard.build(0, 100, 20, 0.6);
        keyboard.build(800, -1, 20, 0.6);
        assert_eq!(keyboard.keys().len(), NUM_KEYS);
        assert_eq!(keyboard.white_key_width(), 10);

        let mut empty = Keyboard::new();
        empty.build(-5, 100, 10, 0.6);
        assert!(empty.keys().is_empty());
        assert_eq!(empty.total_width(), 0);
    }

    #[test]
    fn rebuild_with_identical_inputs_is_idempotent() {
        let a = built();
        let mut b = built();
        b.build(800, 100, 10, 0.6);
        for (ka, kb) in a.keys().iter().zip(b.keys()) {
            assert_eq!(ka.midi_note, kb.midi_note);
            assert_eq!(ka.kind, kb.kind);
            assert_eq!(ka.bounds, kb.bounds);
            assert_eq!(ka.hit_areas.as_slice(), kb.hit_areas.as_slice());
            assert_eq!(ka.letter_name, kb.letter_name);
        }
    }

    #[test]
    fn rebuild_resets_interaction_state() {
        let mut keyboard = built();
        let key = keyboard.key_mut(0).unwrap();
        key.pressed = true;
        key.owner = Some(7);

        keyboard.build(800, 100, 10, 0.6);
        assert!(keyboard.keys().iter().all(|k| !k.pressed && k.owner.is_none()));
    }

    #[test]
    fn group_and_position_identity() {
        let keyboard = built();
        let a0 = &keyboard.keys()[0];
        assert_eq!(a0.letter_name, "A0");
        assert_eq!((a0.octave_group, a0.position_in_group), (0, 0));
        assert_eq!(a0.voice, Solfege::La);

        // MIDI 25 is C♯1: black group 1, position 0.
        let cs1 = &keyboard.keys()[keyboard.index_for_midi(25).unwrap()];
        assert_eq!(cs1.kind, KeyKind::Black);
        assert_eq!((cs1.octave_group, cs1.position_in_group), (1, 0));
        assert_eq!(cs1.voice, Solfege::Do);

        let c8 = keyboard.keys().last().unwrap();
        assert_eq!(c8.letter_name, "C8");
        assert_eq!(c8.midi_note, 108);
        assert_eq!(c8.hit_areas.len(), 1);
    }

    #[test]
    fn white_split_rectangle_counts_match_flanking() {
        let keyboard = built();
        // C4 (right-flanked): 2 rects. D4 (center): 3. E4 (left): 2.
        let counts: Vec<usize> = [60, 62, 64]
            .iter()
            .map(|&m| keyboard.keys()[keyboard.index_for_midi(m).unwrap()].hit_areas.len())
            .collect();
        assert_eq!(counts, [2, 3, 2]);
    }

    #[test]
    fn hit_areas_tile_key_footprint_without_overlap() {
        let keyboard = built();
        for key in keyboard.keys() {
            let union_area: f64 = key.hit_areas.iter().map(Rect::area).sum();
            assert!(
                (union_area - key.bounds.area()).abs() < 1e-9,
                "hit areas must tile the footprint of {}",
                key.letter_name
            );
            for (i, a) in key.hit_areas.iter().enumerate() {
                for b in key.hit_areas.iter().skip(i + 1) {
                    assert_eq!(
                        a.intersect(*b).area(),
                        0.0,
                        "hit areas of {} overlap",
                        key.letter_name
                    );
                }
            }
        }
    }

    #[test]
    fn black_key_placement_includes_upper_group_shift() {
        let keyboard = built();
        // C♯4: group 4, position 0 -> left boundary unit 7*4 - 4 = 24.
        let cs4 = &keyboard.keys()[keyboard.index_for_midi(61).unwrap()];
        assert_eq!(cs4.bounds, Rect::new(236.0, 0.0, 244.0, 60.0));

        // F♯4: position 2 gains the one-unit shift -> unit 7*4 - 4 + 2 + 1.
        let fs4 = &keyboard.keys()[keyboard.index_for_midi(66).unwrap()];
        assert_eq!(fs4.bounds, Rect::new(286.0, 0.0, 294.0, 60.0));

        // A♯0: unit 1, centered on the A0/B0 boundary.
        let bb0 = &keyboard.keys()[keyboard.index_for_midi(22).unwrap()];
        assert_eq!(bb0.bounds, Rect::new(6.0, 0.0, 14.0, 60.0));
    }

    #[test]
    fn index_for_midi_bounds() {
        let keyboard = built();
        assert_eq!(keyboard.index_for_midi(21), Some(0));
        assert_eq!(keyboard.index_for_midi(60), Some(39));
        assert_eq!(keyboard.index_for_midi(108), Some(87));
        assert_eq!(keyboard.index_for_midi(20), None);
        assert_eq!(keyboard.index_for_midi(109), None);
        assert_eq!(Keyboard::new().index_for_midi(60), None);
    }
}
