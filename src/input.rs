use glam::Vec2;
use web_sys as web;

/// What a pointer drag does to the orbit controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: Option<DragMode>,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, mode: DragMode, pointer_id: i32, at: Vec2) {
        self.active = Some(mode);
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous pointer position, if `pointer_id` is dragging.
    pub fn advance(&mut self, pointer_id: i32, at: Vec2) -> Option<(DragMode, Vec2)> {
        let mode = self.active?;
        if pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some((mode, delta))
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = None;
        }
    }
}

/// Primary button rotates (pans with a modifier held), secondary button pans.
#[inline]
pub fn drag_mode_for_button(button: i16, modifier: bool) -> Option<DragMode> {
    match button {
        0 if modifier => Some(DragMode::Pan),
        0 => Some(DragMode::Rotate),
        2 => Some(DragMode::Pan),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMute,
    ToggleOverlay,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "m" | "M" => Some(KeyAction::ToggleMute),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
