// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clavier Highlight: three independent highlight overlays per key.
//!
//! A keyboard can carry up to three highlight tiers — for example a scale,
//! a chord, and the currently sounding notes — each an independent mapping
//! from MIDI note number to a short label. [`HighlightResolver`] retains
//! the three entry lists and writes them into the keys' label slots, so the
//! overlays survive a geometry rebuild: re-run [`HighlightResolver::apply`]
//! after every [`Keyboard::build`](clavier_layout::Keyboard::build).
//!
//! When several tiers are active on one key, only the topmost enabled tier
//! contributes the displayed text (priority 3 > 2 > 1); lower tiers still
//! render their badge rectangle without text. [`topmost_label`] resolves
//! that priority against an enabled-tier mask.
//!
//! ## Minimal example
//!
//! ```rust
//! use clavier_highlight::{HighlightEntry, HighlightResolver, Tier, TierMask, topmost_label};
//! use clavier_layout::Keyboard;
//!
//! let mut keyboard = Keyboard::new();
//! keyboard.build(800, 100, 10, 0.6);
//!
//! let mut highlights = HighlightResolver::new();
//! highlights.set_tier(Tier::One, vec![HighlightEntry::new(60, "C4")]);
//! highlights.apply(&mut keyboard);
//!
//! let key = &keyboard.keys()[39]; // 60 - 21
//! assert_eq!(key.highlight_labels[0], "C4");
//! assert_eq!(topmost_label(key, TierMask::all()), Some("C4"));
//! ```
//!
//! Entries whose MIDI number falls outside `21..=108` are silently ignored.
//! Setting a tier to an empty list clears that tier on every key.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use clavier_layout::{Key, Keyboard};

/// One of the three highlight overlays.
///
/// Display priority is [`Tier::Three`] > [`Tier::Two`] > [`Tier::One`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Lowest-priority overlay.
    One,
    /// Middle overlay.
    Two,
    /// Highest-priority overlay.
    Three,
}

impl Tier {
    /// All tiers, lowest priority first.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Zero-based slot index into a key's `highlight_labels`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    /// The corresponding mask bit.
    #[must_use]
    pub fn mask(self) -> TierMask {
        match self {
            Self::One => TierMask::TIER1,
            Self::Two => TierMask::TIER2,
            Self::Three => TierMask::TIER3,
        }
    }
}

bitflags::bitflags! {
    /// Which highlight tiers are currently enabled for display.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TierMask: u8 {
        /// Tier 1 enabled.
        const TIER1 = 0b001;
        /// Tier 2 enabled.
        const TIER2 = 0b010;
        /// Tier 3 enabled.
        const TIER3 = 0b100;
    }
}

/// A single highlight: a MIDI note number and the label to show on it.
///
/// The note number is an `i32` so that out-of-range values are
/// representable; they are ignored when applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightEntry {
    /// Target key's MIDI note number; only `21..=108` takes effect.
    pub midi_note: i32,
    /// Label text for the key's badge.
    pub label: String,
}

impl HighlightEntry {
    /// Creates an entry.
    pub fn new(midi_note: i32, label: impl Into<String>) -> Self {
        Self {
            midi_note,
            label: label.into(),
        }
    }
}

/// Retains the three highlight entry lists and writes them into a keyboard.
///
/// The resolver is the source of truth; the labels stored on the keys are a
/// projection that a geometry rebuild wipes. Call
/// [`HighlightResolver::apply`] after changing a tier or rebuilding.
#[derive(Clone, Debug, Default)]
pub struct HighlightResolver {
    tiers: [Vec<HighlightEntry>; 3],
}

impl HighlightResolver {
    /// Creates a resolver with all tiers empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the retained entry list for one tier.
    ///
    /// Takes effect on the keyboard at the next [`HighlightResolver::apply`].
    pub fn set_tier(&mut self, tier: Tier, entries: Vec<HighlightEntry>) {
        self.tiers[tier.index()] = entries;
    }

    /// The retained entries of one tier.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[HighlightEntry] {
        &self.tiers[tier.index()]
    }

    /// Writes all three tiers into the keys' label slots.
    ///
    /// Each tier first clears its slot on every key, then sets the label
    /// for every in-range entry. Idempotent.
    pub fn apply(&self, keyboard: &mut Keyboard) {
        for tier in Tier::ALL {
            let slot = tier.index();
            for key in keyboard.keys_mut() {
                key.highlight_labels[slot].clear();
            }
            for entry in &self.tiers[slot] {
                if let Some(index) = keyboard.index_for_midi(entry.midi_note) {
                    if let Some(key) = keyboard.key_mut(index) {
                        key.highlight_labels[slot] = entry.label.clone();
                    }
                }
            }
        }
    }
}

/// Resolves the single displayed label for a key.
///
/// Returns tier 3's label if non-empty and enabled, else tier 2's, else
/// tier 1's, else `None`.
#[must_use]
pub fn topmost_label(key: &Key, enabled: TierMask) -> Option<&str> {
    for tier in [Tier::Three, Tier::Two, Tier::One] {
        if !enabled.contains(tier.mask()) {
            continue;
        }
        let label = &key.highlight_labels[tier.index()];
        if !label.is_empty() {
            return Some(label);
        }
    }
    None
}
