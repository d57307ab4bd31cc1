// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The headless piano keyboard widget.
//!
//! [`KeyboardView`] combines the layout, touch, and highlight layers behind
//! a single surface: feed it a viewport size and pointer events, and ask it
//! for a [`RenderPlan`] each frame. It never draws; the plan lists the key
//! faces, octave color bands, and highlight badges for the host's renderer
//! to paint, in paint order and keyboard coordinates.
//!
//! ```
//! use clavier_view::{KeyboardView, RenderPlan};
//!
//! let mut view = KeyboardView::new();
//! view.set_layout_size(640, 220);
//! view.scroll_to(i32::MAX); // clamps to the scrollable range
//!
//! let plan: RenderPlan = view.render_plan();
//! assert_eq!(plan.white_keys.len(), 52);
//! assert_eq!(plan.black_keys.len(), 36);
//! assert_eq!(view.scroll_x(), view.full_width() - 640);
//! ```
//!
//! Pointer coordinates are viewport-local; the view offsets them by its
//! scroll position before hit testing, so hosts forward raw event
//! coordinates unchanged.
#![no_std]

extern crate alloc;

mod options;
mod render;
mod view;

pub use clavier_highlight::{HighlightEntry, Tier};
pub use clavier_layout::{KeyKind, Keyboard, PointerId};
pub use clavier_touch::{KeyEvent, KeyInfo};

pub use options::{ViewMetrics, ViewOptions, default_palette};
pub use render::{Badge, KeyFace, OctaveBand, RenderPlan};
pub use view::{KeyboardListener, KeyboardView};
