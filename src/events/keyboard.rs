use crate::dom;
use crate::frame::FrameContext;
use crate::input::{self, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, frame_ctx: &Rc<RefCell<FrameContext>>) {
    let mut ctx = frame_ctx.borrow_mut();
    let just_unlocked = ctx.unlock_audio();
    match input::key_action(&ev.key()) {
        Some(KeyAction::ToggleMute) => ctx.toggle_mute(),
        Some(KeyAction::ToggleOverlay) => {
            // the unlocking press already dismissed the overlay
            if just_unlocked {
                return;
            }
            if let Some(doc) = dom::window_document() {
                overlay::toggle(&doc);
            }
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(frame_ctx: Rc<RefCell<FrameContext>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &frame_ctx);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
