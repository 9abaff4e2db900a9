// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn primary_button_rotates_secondary_pans() {
    assert_eq!(drag_mode_for_button(0, false), Some(DragMode::Rotate));
    assert_eq!(drag_mode_for_button(0, true), Some(DragMode::Pan));
    assert_eq!(drag_mode_for_button(2, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for_button(1, false), None);
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(key_action("m"), Some(KeyAction::ToggleMute));
    assert_eq!(key_action("M"), Some(KeyAction::ToggleMute));
    assert_eq!(key_action("h"), Some(KeyAction::ToggleOverlay));
    assert_eq!(key_action("H"), Some(KeyAction::ToggleOverlay));
    assert_eq!(key_action("x"), None);
    assert_eq!(key_action(" "), None);
}

#[test]
fn drag_reports_deltas_for_its_pointer() {
    let mut drag = DragState::default();
    assert_eq!(drag.advance(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(DragMode::Rotate, 1, Vec2::new(10.0, 10.0));
    assert_eq!(
        drag.advance(1, Vec2::new(15.0, 8.0)),
        Some((DragMode::Rotate, Vec2::new(5.0, -2.0)))
    );
    assert_eq!(
        drag.advance(1, Vec2::new(16.0, 8.0)),
        Some((DragMode::Rotate, Vec2::new(1.0, 0.0)))
    );
    // other pointers are ignored
    assert_eq!(drag.advance(2, Vec2::new(100.0, 100.0)), None);

    drag.end(2);
    assert!(drag.active.is_some());
    drag.end(1);
    assert_eq!(drag.advance(1, Vec2::new(20.0, 20.0)), None);
}
