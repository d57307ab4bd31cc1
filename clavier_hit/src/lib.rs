// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clavier Hit: resolve a point to a key with black-before-white priority.
//!
//! Black keys visually sit above the white keys they overlap, so a point in
//! the overlap band must resolve to the black key. [`key_at`] encodes that
//! ordering: it scans every black key first and falls back to white keys
//! only when no black key contains the point.
//!
//! Containment is half-open per [`kurbo::Rect::contains`] (left/top edges
//! inclusive, right/bottom exclusive), so two adjacent keys never both
//! claim a shared boundary point.
//!
//! ## Minimal example
//!
//! ```rust
//! use clavier_layout::{Keyboard, KeyKind};
//! use kurbo::Point;
//!
//! let mut keyboard = Keyboard::new();
//! keyboard.build(800, 100, 10, 0.6);
//!
//! // A point near the top of the A0/B0 boundary lands on A♯0.
//! let index = clavier_hit::key_at(&keyboard, Point::new(10.0, 5.0)).unwrap();
//! let key = &keyboard.keys()[index];
//! assert_eq!(key.kind, KeyKind::Black);
//! assert_eq!(key.midi_note, 22);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use clavier_layout::{Key, Keyboard};
use kurbo::Point;

/// Returns whether any of a key's hit-area rectangles contains the point.
#[must_use]
pub fn key_hit(key: &Key, pt: Point) -> bool {
    key.hit_areas.iter().any(|area| area.contains(pt))
}

/// Resolves a point to the sorted index of the key under it.
///
/// Black keys are scanned first (in octave-group order), then white keys;
/// the first containing key wins. Returns `None` when the point lies
/// outside every key, or before the keyboard has been built.
#[must_use]
pub fn key_at(keyboard: &Keyboard, pt: Point) -> Option<usize> {
    let keys = keyboard.keys();
    keyboard
        .black_indices()
        .iter()
        .chain(keyboard.white_indices())
        .copied()
        .find(|&index| key_hit(&keys[index], pt))
}

#[cfg(test)]
mod tests {
    use clavier_layout::{KeyKind, Keyboard};
    use kurbo::Point;

    use super::{key_at, key_hit};

    fn built() -> Keyboard {
        let mut keyboard = Keyboard::new();
        keyboard.build(800, 100, 10, 0.6);
        keyboard
    }

    #[test]
    fn black_wins_over_white_in_overlap_band() {
        let keyboard = built();
        // C♯4 occupies x 236..244, y 0..60 (white width 10, black 8x60).
        let pt = Point::new(237.0, 30.0);
        let index = key_at(&keyboard, pt).unwrap();
        let key = &keyboard.keys()[index];
        assert_eq!(key.kind, KeyKind::Black);
        assert_eq!(key.midi_note, 61);

        // The white key beneath also fails its own containment there.
        let c4 = &keyboard.keys()[keyboard.index_for_midi(60).unwrap()];
        assert!(!key_hit(c4, pt));
    }

    #[test]
    fn below_black_key_bottom_resolves_to_white() {
        let keyboard = built();
        // Same x band as C♯4, but below the black key height.
        let index = key_at(&keyboard, Point::new(237.0, 80.0)).unwrap();
        let key = &keyboard.keys()[index];
        assert_eq!(key.kind, KeyKind::White);
        assert_eq!(key.midi_note, 60);
    }

    #[test]
    fn out_of_bounds_misses() {
        let keyboard = built();
        assert_eq!(key_at(&keyboard, Point::new(-1.0, 10.0)), None);
        assert_eq!(key_at(&keyboard, Point::new(10.0, 200.0)), None);
        // Right edge of the keyboard is exclusive.
        assert_eq!(key_at(&keyboard, Point::new(520.0, 10.0)), None);
        assert!(key_at(&keyboard, Point::new(519.0, 10.0)).is_some());
    }

    #[test]
    fn boundary_points_resolve_to_exactly_one_key() {
        let keyboard = built();
        let keys = keyboard.keys();
        // Probe along the keyboard at the black-key level and below it.
        for y in [5.0, 30.0, 59.0, 61.0, 95.0] {
            for x in 0..520 {
                let pt = Point::new(f64::from(x), y);
                let owners = keys.iter().filter(|k| key_hit(k, pt)).count();
                assert_eq!(owners, 1, "point {pt} must land on exactly one key");
            }
        }
    }

    #[test]
    fn unbuilt_keyboard_never_hits() {
        let keyboard = Keyboard::new();
        assert_eq!(key_at(&keyboard, Point::new(5.0, 5.0)), None);
    }
}
