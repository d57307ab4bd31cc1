// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View option flags and pixel metrics.

use clavier_highlight::TierMask;
use peniko::Color;

bitflags::bitflags! {
    /// Feature toggles of the keyboard view.
    ///
    /// Each flag is independently settable and takes effect on the next
    /// render plan.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewOptions: u8 {
        /// Pointer input produces key presses.
        const KEY_PRESS = 0b00_0001;
        /// Note names (`C4`, `A♯`…) are included in the render plan.
        const NOTE_NAMES = 0b00_0010;
        /// Per-octave color bands are included in the render plan.
        const OCTAVE_COLORING = 0b00_0100;
        /// Tier-1 highlight badges are shown.
        const HIGHLIGHT_1 = 0b00_1000;
        /// Tier-2 highlight badges are shown. Currently forced off: the
        /// view exposes no setter for this flag.
        const HIGHLIGHT_2 = 0b01_0000;
        /// Tier-3 highlight badges are shown.
        const HIGHLIGHT_3 = 0b10_0000;
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::KEY_PRESS
            | Self::NOTE_NAMES
            | Self::OCTAVE_COLORING
            | Self::HIGHLIGHT_1
            | Self::HIGHLIGHT_3
    }
}

impl ViewOptions {
    /// The enabled highlight tiers as a [`TierMask`].
    #[must_use]
    pub fn enabled_tiers(self) -> TierMask {
        let mut mask = TierMask::empty();
        if self.contains(Self::HIGHLIGHT_1) {
            mask |= TierMask::TIER1;
        }
        if self.contains(Self::HIGHLIGHT_2) {
            mask |= TierMask::TIER2;
        }
        if self.contains(Self::HIGHLIGHT_3) {
            mask |= TierMask::TIER3;
        }
        mask
    }
}

/// Pixel constants of the view.
///
/// All values are plain pixels; hosts working in density-independent units
/// scale them before constructing the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMetrics {
    /// Smallest white-key width a shrink request can reach.
    pub min_white_key_width: i32,
    /// White-key width used until the host sets one.
    pub default_white_key_width: i32,
    /// Black key height as a fraction of the layout height.
    pub black_to_white_height_ratio: f64,
    /// Text size for note names on the key faces.
    pub note_text_size: i32,
    /// Text size inside highlight badges.
    pub badge_text_size: i32,
    /// Vertical padding above the badge text.
    pub badge_padding_top: i32,
    /// Vertical padding below the badge text.
    pub badge_padding_bottom: i32,
    /// Base offset between stacked badges of successive tiers.
    pub badge_drift: i32,
}

impl Default for ViewMetrics {
    fn default() -> Self {
        Self {
            min_white_key_width: 50,
            default_white_key_width: 80,
            black_to_white_height_ratio: 0.6,
            note_text_size: 20,
            badge_text_size: 20,
            badge_padding_top: 4,
            badge_padding_bottom: 4,
            badge_drift: 6,
        }
    }
}

/// Palette index used for tier-1 badge fills.
pub(crate) const TIER1_COLOR_INDEX: usize = 0;

/// Palette index used for tier-2 badge fills.
pub(crate) const TIER2_COLOR_INDEX: usize = 6;

/// Palette index used for tier-3 badge fills.
pub(crate) const TIER3_COLOR_INDEX: usize = 1;

/// Default per-octave color palette, one entry per white-key octave group.
#[must_use]
pub fn default_palette() -> [Color; 9] {
    [
        Color::from_rgb8(0xaf, 0xdf, 0xb1),
        Color::from_rgb8(0xfb, 0xb3, 0xb3),
        Color::from_rgb8(0xa2, 0xdc, 0xd7),
        Color::from_rgb8(0xd1, 0xc3, 0xec),
        Color::from_rgb8(0xff, 0xcc, 0x80),
        Color::from_rgb8(0xe5, 0xef, 0x82),
        Color::from_rgb8(0x98, 0xdf, 0xff),
        Color::from_rgb8(0xaf, 0xdf, 0xb1),
        Color::from_rgb8(0xfb, 0xb3, 0xb3),
    ]
}
