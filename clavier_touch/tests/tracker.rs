// Copyright 2025 the Clavier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `clavier_touch` state machine.
//!
//! These exercise multi-finger gestures end to end over a real keyboard:
//! ownership injectivity, the two-pass move semantics, cancellation, and
//! the enabled flag.

use clavier_layout::Keyboard;
use clavier_touch::{KeyEvent, PointerId, TouchTracker};
use kurbo::Point;

fn built() -> Keyboard {
    let mut keyboard = Keyboard::new();
    keyboard.build(800, 100, 10, 0.6);
    keyboard
}

/// Center of a white key's lower region, by MIDI note.
fn white_center(keyboard: &Keyboard, midi: i32) -> Point {
    let key = &keyboard.keys()[keyboard.index_for_midi(midi).unwrap()];
    Point::new(key.bounds.center().x, 85.0)
}

fn assert_ownership_consistent(keyboard: &Keyboard) {
    let mut seen = Vec::new();
    for key in keyboard.keys() {
        assert_eq!(
            key.owner.is_some(),
            key.pressed,
            "owner and pressed must agree on {}",
            key.letter_name
        );
        if let Some(owner) = key.owner {
            assert!(!seen.contains(&owner), "finger {owner} owns two keys");
            seen.push(owner);
        }
    }
}

#[test]
fn black_key_down_emits_exactly_one_press() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    // Inside C♯1: black group 1, position 0 -> MIDI 13 + 12 = 25.
    let cs1 = &keyboard.keys()[keyboard.index_for_midi(25).unwrap()];
    let pos = cs1.bounds.center();

    let event = tracker.pointer_down(&mut keyboard, 3, pos);
    match event {
        Some(KeyEvent::Pressed(info)) => {
            assert_eq!(info.midi_note, 25);
            assert_eq!(info.octave_group, 1);
            assert_eq!(info.position_in_group, 0);
        }
        other => panic!("expected a single press, got {other:?}"),
    }
    assert_ownership_consistent(&keyboard);
}

#[test]
fn slide_releases_old_key_before_pressing_new_one() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    let c4 = white_center(&keyboard, 60);
    let d4 = white_center(&keyboard, 62);
    tracker.pointer_down(&mut keyboard, 0, c4);

    let events = tracker.pointer_move(&mut keyboard, &[(0, d4)]);
    assert_eq!(events.len(), 2, "one release and one press");
    assert!(matches!(events[0], KeyEvent::Released(info) if info.midi_note == 60));
    assert!(matches!(events[1], KeyEvent::Pressed(info) if info.midi_note == 62));
    assert_ownership_consistent(&keyboard);
}

#[test]
fn move_within_the_same_key_emits_nothing() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    let pos = white_center(&keyboard, 60);
    tracker.pointer_down(&mut keyboard, 0, pos);

    let nudged = Point::new(pos.x + 2.0, pos.y - 10.0);
    assert!(tracker.pointer_move(&mut keyboard, &[(0, nudged)]).is_empty());
    assert_eq!(tracker.active_touches(), 1);
}

#[test]
fn two_fingers_swapping_keys_in_one_batch() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    let c4 = white_center(&keyboard, 60);
    let d4 = white_center(&keyboard, 62);
    tracker.pointer_down(&mut keyboard, 0, c4);
    tracker.pointer_down(&mut keyboard, 1, d4);

    // Both fingers cross over in the same batch. All releases happen
    // before any press, so both presses succeed.
    let events = tracker.pointer_move(&mut keyboard, &[(0, d4), (1, c4)]);
    let releases = events
        .iter()
        .filter(|e| matches!(e, KeyEvent::Released(_)))
        .count();
    let presses = events
        .iter()
        .filter(|e| matches!(e, KeyEvent::Pressed(_)))
        .count();
    assert_eq!((releases, presses), (2, 2));
    assert!(matches!(events[0], KeyEvent::Released(_)));
    assert!(matches!(events[1], KeyEvent::Released(_)));
    assert_ownership_consistent(&keyboard);
    assert_eq!(tracker.active_touches(), 2);
}

#[test]
fn pointer_up_releases_only_that_finger() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    let c4 = white_center(&keyboard, 60);
    let e4 = white_center(&keyboard, 64);
    tracker.pointer_down(&mut keyboard, 0, c4);
    tracker.pointer_down(&mut keyboard, 1, e4);

    let event = tracker.pointer_up(&mut keyboard, 0);
    assert!(matches!(event, Some(KeyEvent::Released(info)) if info.midi_note == 60));
    assert_eq!(tracker.active_touches(), 1);
    assert!(keyboard.keys().iter().any(|k| k.pressed));
    assert_ownership_consistent(&keyboard);
}

#[test]
fn release_all_empties_everything() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    for (finger, midi) in [(0, 60), (1, 64), (2, 67)] {
        let pos = white_center(&keyboard, midi);
        tracker.pointer_down(&mut keyboard, finger, pos);
    }

    let events = tracker.release_all(&mut keyboard);
    assert_eq!(events.len(), 3);
    // Ascending key order.
    let midis: Vec<u8> = events
        .iter()
        .map(|e| match e {
            KeyEvent::Released(info) => info.midi_note,
            KeyEvent::Pressed(info) => panic!("unexpected press of {}", info.midi_note),
        })
        .collect();
    assert_eq!(midis, [60, 64, 67]);

    assert_eq!(tracker.active_touches(), 0);
    assert!(keyboard.keys().iter().all(|k| !k.pressed && k.owner.is_none()));
}

#[test]
fn disabled_tracker_blocks_presses_but_not_releases() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    let c4 = white_center(&keyboard, 60);
    tracker.pointer_down(&mut keyboard, 0, c4);

    tracker.set_enabled(false);
    assert!(!tracker.is_enabled());
    let d4 = white_center(&keyboard, 62);
    assert!(tracker.pointer_down(&mut keyboard, 1, d4).is_none());
    assert!(tracker.pointer_move(&mut keyboard, &[(0, d4)]).is_empty());

    // The held key is not stuck: up still releases it.
    let event = tracker.pointer_up(&mut keyboard, 0);
    assert!(matches!(event, Some(KeyEvent::Released(info)) if info.midi_note == 60));
    assert!(keyboard.keys().iter().all(|k| !k.pressed));
}

#[test]
fn ownership_stays_injective_across_random_walk() {
    let mut keyboard = built();
    let mut tracker = TouchTracker::new();

    // A deterministic pseudo-random walk of three fingers over the keys.
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    for step in 0..500 {
        let finger: PointerId = next() % 3;
        let x = f64::from(next() % 540);
        let y = f64::from(next() % 110);
        match next() % 4 {
            0 => {
                tracker.pointer_down(&mut keyboard, finger, Point::new(x, y));
            }
            1 => {
                tracker.pointer_move(&mut keyboard, &[(finger, Point::new(x, y))]);
            }
            2 => {
                tracker.pointer_up(&mut keyboard, finger);
            }
            _ => {
                if step % 7 == 0 {
                    tracker.release_all(&mut keyboard);
                }
            }
        }
        assert_ownership_consistent(&keyboard);
    }

    tracker.release_all(&mut keyboard);
    assert_eq!(tracker.active_touches(), 0);
    assert!(keyboard.keys().iter().all(|k| !k.pressed));
}
