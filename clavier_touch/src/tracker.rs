// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The finger-to-key ownership state machine.

use alloc::vec::Vec;

use clavier_layout::{Key, KeyKind, Keyboard, PointerId, Solfege};
use hashbrown::HashMap;
use kurbo::Point;

/// Identity payload of a press/release notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    /// Black or white.
    pub kind: KeyKind,
    /// Solfège pitch class.
    pub voice: Solfege,
    /// Octave group of the key.
    pub octave_group: usize,
    /// Position of the key within its group.
    pub position_in_group: usize,
    /// MIDI note number, 21..=108.
    pub midi_note: u8,
}

impl KeyInfo {
    fn from_key(key: &Key) -> Self {
        Self {
            kind: key.kind,
            voice: key.voice,
            octave_group: key.octave_group,
            position_in_group: key.position_in_group,
            midi_note: key.midi_note,
        }
    }
}

/// A key transition produced by the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// A key went down.
    Pressed(KeyInfo),
    /// A key came back up.
    Released(KeyInfo),
}

/// Tracks which finger holds which key and derives press/release events
/// from raw pointer input.
///
/// The tracker stores sorted key indices, which a geometry rebuild
/// invalidates; call [`TouchTracker::clear`] (after an explicit
/// [`TouchTracker::release_all`] if releases should be observed) whenever
/// the keyboard is rebuilt.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    owners: HashMap<PointerId, usize>,
    enabled: bool,
}

impl TouchTracker {
    /// Creates an idle tracker with key presses enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
            enabled: true,
        }
    }

    /// Handles a pointer going down at `pos`.
    ///
    /// Emits at most one press: the topmost key under the point, if that
    /// key is not already pressed and the finger does not already own a
    /// key. No-op while disabled.
    pub fn pointer_down(
        &mut self,
        keyboard: &mut Keyboard,
        pointer: PointerId,
        pos: Point,
    ) -> Option<KeyEvent> {
        if !self.enabled || self.owners.contains_key(&pointer) {
            return None;
        }
        let index = clavier_hit::key_at(keyboard, pos)?;
        let key = keyboard.key_mut(index)?;
        if key.pressed {
            return None;
        }
        key.pressed = true;
        key.owner = Some(pointer);
        self.owners.insert(pointer, index);
        Some(KeyEvent::Pressed(KeyInfo::from_key(key)))
    }

    /// Handles a move batch covering every active pointer.
    ///
    /// Pass 1 releases each owned key whose finger has left its hit areas;
    /// pass 2 re-runs the down logic for every finger, so a finger sliding
    /// off one key and onto another produces `Released` then `Pressed` in
    /// that order. Releases are collected from a snapshot first and applied
    /// afterwards; the ownership map is never mutated while being iterated.
    /// No-op while disabled.
    pub fn pointer_move(
        &mut self,
        keyboard: &mut Keyboard,
        touches: &[(PointerId, Point)],
    ) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        if !self.enabled {
            return events;
        }

        let mut departed: Vec<(PointerId, usize)> = Vec::new();
        for &(pointer, pos) in touches {
            if let Some(&index) = self.owners.get(&pointer) {
                if !clavier_hit::key_hit(&keyboard.keys()[index], pos) {
                    departed.push((pointer, index));
                }
            }
        }
        for &(pointer, index) in &departed {
            if let Some(event) = self.release(keyboard, pointer, index) {
                events.push(event);
            }
        }

        for &(pointer, pos) in touches {
            if let Some(event) = self.pointer_down(keyboard, pointer, pos) {
                events.push(event);
            }
        }
        events
    }

    /// Handles one pointer lifting.
    ///
    /// Releases only that finger's key; a finger that owns nothing is a
    /// no-op. Works even while disabled.
    pub fn pointer_up(&mut self, keyboard: &mut Keyboard, pointer: PointerId) -> Option<KeyEvent> {
        let index = self.owners.get(&pointer).copied()?;
        self.release(keyboard, pointer, index)
    }

    /// Handles an all-pointers-up or cancel: releases every pressed key and
    /// drops all finger associations.
    ///
    /// Events are emitted in ascending key order for determinism. Works
    /// even while disabled.
    pub fn release_all(&mut self, keyboard: &mut Keyboard) -> Vec<KeyEvent> {
        let mut owned: Vec<(PointerId, usize)> =
            self.owners.iter().map(|(&p, &i)| (p, i)).collect();
        owned.sort_by_key(|&(_, index)| index);

        let mut events = Vec::with_capacity(owned.len());
        for &(pointer, index) in &owned {
            if let Some(event) = self.release(keyboard, pointer, index) {
                events.push(event);
            }
        }
        events
    }

    /// Drops all finger associations without emitting events.
    ///
    /// Use after a geometry rebuild, which replaces the keys the stored
    /// indices refer to.
    pub fn clear(&mut self) {
        self.owners.clear();
    }

    /// Enables or disables press generation. Releases are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether presses are currently generated.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of fingers currently holding a key.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.owners.len()
    }

    fn release(
        &mut self,
        keyboard: &mut Keyboard,
        pointer: PointerId,
        index: usize,
    ) -> Option<KeyEvent> {
        self.owners.remove(&pointer);
        let key = keyboard.key_mut(index)?;
        key.pressed = false;
        key.owner = None;
        Some(KeyEvent::Released(KeyInfo::from_key(key)))
    }
}
