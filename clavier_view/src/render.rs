// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless render plan: what to draw, in paint order, without painting.

use alloc::string::String;
use alloc::vec::Vec;

use clavier_highlight::{Tier, TierMask};
use clavier_layout::{Key, KeyKind, Keyboard};
use kurbo::Rect;
use peniko::Color;

use crate::options::{
    TIER1_COLOR_INDEX, TIER2_COLOR_INDEX, TIER3_COLOR_INDEX, ViewMetrics, ViewOptions,
};

/// One key face to fill.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFace {
    /// Footprint rectangle in keyboard coordinates.
    pub rect: Rect,
    /// Black or white.
    pub kind: KeyKind,
    /// Octave group, for styling.
    pub octave_group: usize,
    /// Whether the key is currently held down.
    pub pressed: bool,
    /// Note name to draw on the face, when note names are enabled. Black
    /// key names contain a newline separating the two enharmonic lines.
    pub note_name: Option<String>,
}

/// Octave color band near the bottom of a white key.
#[derive(Clone, Debug, PartialEq)]
pub struct OctaveBand {
    /// Band rectangle in keyboard coordinates.
    pub rect: Rect,
    /// Fill color from the octave palette.
    pub color: Color,
}

/// One highlight badge on a key.
///
/// Badges of successive active tiers stack upward; only the topmost active
/// tier carries text, lower tiers draw their rectangle without text.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    /// Badge rectangle in keyboard coordinates.
    pub rect: Rect,
    /// Fill color.
    pub color: Color,
    /// The tier this badge belongs to.
    pub tier: Tier,
    /// Badge text; `None` when a higher tier is active on the same key.
    pub text: Option<String>,
}

/// Everything the renderer needs for one frame, in paint order: white key
/// faces, octave bands, white-key badges, black key faces, then black-key
/// badges. A white key's badges sit under the black keys, so a tall badge
/// stack never obscures a black key.
///
/// Coordinates are keyboard-local; the renderer applies the horizontal
/// scroll translation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPlan {
    /// White key faces, octave-group order.
    pub white_keys: Vec<KeyFace>,
    /// Octave color bands (empty when octave coloring is off).
    pub octave_bands: Vec<OctaveBand>,
    /// Badges on white keys, tiers low to high per key.
    pub white_badges: Vec<Badge>,
    /// Black key faces, octave-group order.
    pub black_keys: Vec<KeyFace>,
    /// Badges on black keys, tiers low to high per key.
    pub black_badges: Vec<Badge>,
}

pub(crate) fn build_plan(
    keyboard: &Keyboard,
    options: ViewOptions,
    metrics: &ViewMetrics,
    palette: &[Color; 9],
) -> RenderPlan {
    let mut plan = RenderPlan::default();
    let keys = keyboard.keys();

    for &index in keyboard.white_indices() {
        let key = &keys[index];
        plan.white_keys.push(face(key, options));
        if options.contains(ViewOptions::OCTAVE_COLORING) {
            plan.octave_bands.push(octave_band(key, palette));
        }
        push_badges(key, options, metrics, palette, &mut plan.white_badges);
    }
    for &index in keyboard.black_indices() {
        let key = &keys[index];
        plan.black_keys.push(face(key, options));
        push_badges(key, options, metrics, palette, &mut plan.black_badges);
    }
    plan
}

fn face(key: &Key, options: ViewOptions) -> KeyFace {
    KeyFace {
        rect: key.bounds,
        kind: key.kind,
        octave_group: key.octave_group,
        pressed: key.pressed,
        note_name: options
            .contains(ViewOptions::NOTE_NAMES)
            .then(|| key.letter_name.clone()),
    }
}

fn octave_band(key: &Key, palette: &[Color; 9]) -> OctaveBand {
    let height = px(key.bounds.height());
    let margin_lr = px(key.bounds.width()) / 4;
    let margin_bottom = height * 4 / 100;
    let band_height = height * 2 / 100;
    let bottom = px(key.bounds.y1) - margin_bottom;
    OctaveBand {
        rect: rect_px(
            px(key.bounds.x0) + margin_lr,
            bottom - band_height,
            px(key.bounds.x1) - margin_lr,
            bottom,
        ),
        color: palette[key.octave_group],
    }
}

/// Bottom edge of the lowest badge on a key: the space above the note-name
/// block (and, for white keys, above the octave band).
fn badge_bottom(key: &Key, metrics: &ViewMetrics) -> i32 {
    let height = px(key.bounds.height());
    match key.kind {
        KeyKind::White => {
            let margin_bottom = height * 4 / 100;
            let band_height = height * 2 / 100;
            let name_height = metrics.note_text_size / 4
                + metrics.note_text_size
                + metrics.note_text_size / 5;
            px(key.bounds.y1) - margin_bottom - band_height - name_height
        }
        KeyKind::Black => {
            let margin_bottom = height * 14 / 100;
            let pad = px(key.bounds.width()) / 2 / 5;
            let name_height = 2 * pad + 2 * metrics.note_text_size;
            px(key.bounds.y1) - margin_bottom - name_height
        }
    }
}

fn push_badges(
    key: &Key,
    options: ViewOptions,
    metrics: &ViewMetrics,
    palette: &[Color; 9],
    out: &mut Vec<Badge>,
) {
    let enabled = options.enabled_tiers();
    let active = |tier: Tier| {
        enabled.contains(tier.mask()) && !key.highlight_labels[tier.index()].is_empty()
    };
    if !active(Tier::One) && !active(Tier::Two) && !active(Tier::Three) {
        return;
    }

    let topmost = [Tier::Three, Tier::Two, Tier::One]
        .into_iter()
        .find(|&tier| active(tier));

    let margin_lr = px(key.bounds.width()) / 4;
    let bottom = badge_bottom(key, metrics);
    let badge_height =
        metrics.badge_padding_top + metrics.badge_text_size + metrics.badge_padding_bottom;
    let base = rect_px(
        px(key.bounds.x0) + margin_lr,
        bottom - badge_height,
        px(key.bounds.x1) - margin_lr,
        bottom,
    );

    let mut emit = |rect: Rect, tier: Tier, color_index: usize| {
        let text = (topmost == Some(tier))
            .then(|| key.highlight_labels[tier.index()].clone());
        out.push(Badge {
            rect,
            color: palette[color_index],
            tier,
            text,
        });
    };

    if active(Tier::One) {
        emit(base, Tier::One, TIER1_COLOR_INDEX);
    }
    // Successive tiers drift up and to the right; the drift doubles once
    // tier 2 has claimed its slot.
    let mut drift = metrics.badge_drift;
    if active(Tier::Two) {
        emit(drifted(base, drift), Tier::Two, TIER2_COLOR_INDEX);
        drift += drift;
    }
    if active(Tier::Three) {
        emit(drifted(base, drift), Tier::Three, TIER3_COLOR_INDEX);
    }
}

fn drifted(rect: Rect, drift: i32) -> Rect {
    let dx = f64::from(drift);
    let dy = f64::from(2 * drift);
    Rect::new(rect.x0 + dx, rect.y0 - dy, rect.x1 + dx, rect.y1 - dy)
}

fn rect_px(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    Rect::new(f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "key geometry is built from small integer pixel values"
)]
fn px(value: f64) -> i32 {
    value as i32
}
