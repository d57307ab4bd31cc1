// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;

use clavier_highlight::{HighlightEntry, HighlightResolver, Tier};
use clavier_layout::{Keyboard, PointerId};
use clavier_touch::{KeyEvent, KeyInfo, TouchTracker};
use kurbo::Point;
use peniko::Color;

use crate::options::{ViewMetrics, ViewOptions, default_palette};
use crate::render::{self, RenderPlan};

/// Observer for keyboard lifecycle and key activity.
///
/// All methods have empty default bodies, so implementors override only
/// what they care about.
pub trait KeyboardListener {
    /// The keyboard has produced its first frame after a (re)build.
    fn init_finished(&mut self) {}
    /// A key went down.
    fn key_pressed(&mut self, _info: &KeyInfo) {}
    /// A key came back up.
    fn key_released(&mut self, _info: &KeyInfo) {}
}

/// The headless keyboard widget: layout, touch, highlights, and scroll
/// behind one surface.
///
/// Pointer coordinates given to the view are viewport-local; the view adds
/// its own horizontal scroll offset before hit testing.
pub struct KeyboardView {
    keyboard: Keyboard,
    tracker: TouchTracker,
    highlights: HighlightResolver,
    options: ViewOptions,
    metrics: ViewMetrics,
    palette: [Color; 9],
    white_key_width: i32,
    layout_width: i32,
    layout_height: i32,
    scroll_x: i32,
    init_finished: bool,
    listener: Option<Box<dyn KeyboardListener>>,
}

impl core::fmt::Debug for KeyboardView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyboardView")
            .field("keyboard", &self.keyboard)
            .field("tracker", &self.tracker)
            .field("options", &self.options)
            .field("white_key_width", &self.white_key_width)
            .field("scroll_x", &self.scroll_x)
            .field("init_finished", &self.init_finished)
            .finish_non_exhaustive()
    }
}

impl KeyboardView {
    /// Creates a view with default options and metrics. No keys exist
    /// until [`set_layout_size`](Self::set_layout_size) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(ViewMetrics::default())
    }

    /// Creates a view with custom metrics.
    #[must_use]
    pub fn with_metrics(metrics: ViewMetrics) -> Self {
        let white_key_width = metrics.default_white_key_width;
        Self {
            keyboard: Keyboard::new(),
            tracker: TouchTracker::new(),
            highlights: HighlightResolver::new(),
            options: ViewOptions::default(),
            metrics,
            palette: default_palette(),
            white_key_width,
            layout_width: 0,
            layout_height: 0,
            scroll_x: 0,
            init_finished: false,
            listener: None,
        }
    }

    /// Installs (or removes) the listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn KeyboardListener>>) {
        self.listener = listener;
    }

    /// Sets the viewport size in pixels and (re)builds the key geometry.
    ///
    /// Any held keys are released (with events dispatched) before the old
    /// geometry is discarded, and highlights are re-applied afterwards.
    /// Re-sending the current size, or a non-positive dimension, is a
    /// no-op: layout passes routinely repeat the same size and must not
    /// disturb held keys or the init latch.
    pub fn set_layout_size(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        if width == self.layout_width && height == self.layout_height {
            return;
        }
        self.layout_width = width;
        self.layout_height = height;
        self.rebuild();
    }

    /// Changes the white key width, clamped so the keyboard neither grows
    /// past an eighth of the viewport per key nor shrinks below the
    /// configured minimum. A no-op before the first layout, when the
    /// request equals the current width, or when the clamped value does.
    pub fn set_white_key_width(&mut self, width: i32) {
        if self.keyboard.keys().is_empty() || width == self.white_key_width {
            return;
        }
        let clamped = if width > self.white_key_width {
            width.min(self.layout_width / 8)
        } else {
            width.max(self.metrics.min_white_key_width)
        };
        if clamped == self.white_key_width {
            return;
        }
        self.white_key_width = clamped;
        self.rebuild();
        self.clamp_scroll();
    }

    /// A pointer touched down at viewport coordinates.
    pub fn pointer_down(&mut self, pointer: PointerId, x: i32, y: i32) {
        let point = self.to_keyboard(x, y);
        let event = self.tracker.pointer_down(&mut self.keyboard, pointer, point);
        self.dispatch(event);
    }

    /// All currently-down pointers moved; `touches` is the full set of
    /// active pointer positions in viewport coordinates.
    pub fn pointer_move(&mut self, touches: &[(PointerId, i32, i32)]) {
        let mapped: Vec<(PointerId, Point)> = touches
            .iter()
            .map(|&(pointer, x, y)| (pointer, self.to_keyboard(x, y)))
            .collect();
        let events = self.tracker.pointer_move(&mut self.keyboard, &mapped);
        for event in events {
            self.dispatch(Some(event));
        }
    }

    /// A pointer lifted.
    pub fn pointer_up(&mut self, pointer: PointerId) {
        let event = self.tracker.pointer_up(&mut self.keyboard, pointer);
        self.dispatch(event);
    }

    /// The gesture was cancelled; every held key is released.
    pub fn pointer_cancel(&mut self) {
        let events = self.tracker.release_all(&mut self.keyboard);
        for event in events {
            self.dispatch(Some(event));
        }
    }

    /// Replaces all three highlight tiers at once and applies them.
    pub fn set_highlights(
        &mut self,
        tier1: Vec<HighlightEntry>,
        tier2: Vec<HighlightEntry>,
        tier3: Vec<HighlightEntry>,
    ) {
        self.highlights.set_tier(Tier::One, tier1);
        self.highlights.set_tier(Tier::Two, tier2);
        self.highlights.set_tier(Tier::Three, tier3);
        self.highlights.apply(&mut self.keyboard);
    }

    /// Scrolls so the viewport's left edge sits at `x`, clamped to the
    /// scrollable range.
    pub fn scroll_to(&mut self, x: i32) {
        self.scroll_x = x.clamp(0, self.max_scroll());
    }

    /// Scrolls by a relative amount, clamped to the scrollable range.
    pub fn scroll_by(&mut self, dx: i32) {
        self.scroll_to(self.scroll_x + dx);
    }

    /// Enables or disables press handling. Releases keep working while
    /// disabled, so no key is left stuck down.
    pub fn set_key_press_enabled(&mut self, enabled: bool) {
        self.options.set(ViewOptions::KEY_PRESS, enabled);
        self.tracker.set_enabled(enabled);
    }

    /// Shows or hides the note names drawn on key faces.
    pub fn set_show_note_names(&mut self, show: bool) {
        self.options.set(ViewOptions::NOTE_NAMES, show);
    }

    /// Shows or hides the per-octave color bands on white keys.
    pub fn set_octave_coloring_enabled(&mut self, enabled: bool) {
        self.options.set(ViewOptions::OCTAVE_COLORING, enabled);
    }

    /// Shows or hides tier 1 highlight badges.
    pub fn set_highlight_tier1_enabled(&mut self, enabled: bool) {
        self.options.set(ViewOptions::HIGHLIGHT_1, enabled);
    }

    /// Shows or hides tier 3 highlight badges. Tier 2 has no setter and
    /// stays hidden.
    pub fn set_highlight_tier3_enabled(&mut self, enabled: bool) {
        self.options.set(ViewOptions::HIGHLIGHT_3, enabled);
    }

    /// Replaces the nine-color octave palette. Ignored unless exactly
    /// nine colors are given.
    pub fn set_octave_palette(&mut self, colors: &[Color]) {
        if let Ok(palette) = <[Color; 9]>::try_from(colors) {
            self.palette = palette;
        }
    }

    /// Builds the draw list for the current frame.
    ///
    /// The first successful plan after a (re)build fires
    /// [`KeyboardListener::init_finished`] exactly once.
    pub fn render_plan(&mut self) -> RenderPlan {
        let plan = render::build_plan(&self.keyboard, self.options, &self.metrics, &self.palette);
        if !self.keyboard.keys().is_empty() && !self.init_finished {
            self.init_finished = true;
            if let Some(listener) = self.listener.as_mut() {
                listener.init_finished();
            }
        }
        plan
    }

    /// Full width of the keyboard in pixels, independent of the viewport.
    #[must_use]
    pub fn full_width(&self) -> i32 {
        self.keyboard.total_width()
    }

    /// Width of the visible viewport.
    #[must_use]
    pub fn visible_width(&self) -> i32 {
        self.layout_width
    }

    /// Current white key width in pixels.
    #[must_use]
    pub fn white_key_width(&self) -> i32 {
        self.white_key_width
    }

    /// Current horizontal scroll offset.
    #[must_use]
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    /// Current view options.
    #[must_use]
    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// The view's metrics.
    #[must_use]
    pub fn metrics(&self) -> &ViewMetrics {
        &self.metrics
    }

    /// The underlying keyboard geometry.
    #[must_use]
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Number of pointers currently holding a key.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.tracker.active_touches()
    }

    fn rebuild(&mut self) {
        // Geometry is about to move under any held keys; release them
        // first so every press gets a matching release.
        let events = self.tracker.release_all(&mut self.keyboard);
        for event in events {
            self.dispatch(Some(event));
        }
        self.tracker.clear();
        self.init_finished = false;
        self.keyboard.build(
            self.layout_width,
            self.layout_height,
            self.white_key_width,
            self.metrics.black_to_white_height_ratio,
        );
        self.highlights.apply(&mut self.keyboard);
    }

    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.clamp(0, self.max_scroll());
    }

    fn max_scroll(&self) -> i32 {
        (self.full_width() - self.visible_width()).max(0)
    }

    fn to_keyboard(&self, x: i32, y: i32) -> Point {
        Point::new(f64::from(x + self.scroll_x), f64::from(y))
    }

    fn dispatch(&mut self, event: Option<KeyEvent>) {
        let (Some(event), Some(listener)) = (event, self.listener.as_mut()) else {
            return;
        };
        match event {
            KeyEvent::Pressed(info) => listener.key_pressed(&info),
            KeyEvent::Released(info) => listener.key_released(&info),
        }
    }
}

impl Default for KeyboardView {
    fn default() -> Self {
        Self::new()
    }
}
