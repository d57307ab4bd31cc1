// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clavier Touch: the multi-touch press/release state machine.
//!
//! [`TouchTracker`] turns raw pointer events into key press/release
//! transitions over a [`clavier_layout::Keyboard`]. It maintains the
//! finger-to-key ownership mapping so that each key reports press and
//! release exactly once per finger:
//!
//! - A finger owns at most one key; a key is pressed by at most one finger.
//! - A down on an already-pressed key, or on empty space, is a no-op.
//! - A move batch is processed in two passes over the full pointer set:
//!   first every finger that has left its key releases it, then every
//!   finger may press the key now under it. This captures a finger sliding
//!   from one key directly onto the next within a single gesture.
//! - An up releases only that finger's key; a cancel releases everything.
//!
//! Methods return the emitted [`KeyEvent`]s as values; callers forward them
//! to whatever listener or channel suits their host.
//!
//! ## Minimal example
//!
//! ```rust
//! use clavier_layout::Keyboard;
//! use clavier_touch::{KeyEvent, TouchTracker};
//! use kurbo::Point;
//!
//! let mut keyboard = Keyboard::new();
//! keyboard.build(800, 100, 10, 0.6);
//! let mut tracker = TouchTracker::new();
//!
//! // Finger 0 lands on middle C.
//! let event = tracker.pointer_down(&mut keyboard, 0, Point::new(231.0, 80.0));
//! match event {
//!     Some(KeyEvent::Pressed(info)) => assert_eq!(info.midi_note, 60),
//!     _ => panic!("expected a press"),
//! }
//!
//! // Lifting the finger releases the same key.
//! let event = tracker.pointer_up(&mut keyboard, 0);
//! assert!(matches!(event, Some(KeyEvent::Released(info)) if info.midi_note == 60));
//! ```
//!
//! ## Disabling input
//!
//! [`TouchTracker::set_enabled`] gates only the press-producing paths
//! (down and move). Releases still work while disabled, so a key can never
//! get stuck pressed when the flag is toggled off mid-gesture. Disabling
//! does not synthesize releases for keys that are already down.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tracker;

pub use clavier_layout::PointerId;
pub use tracker::{KeyEvent, KeyInfo, TouchTracker};
