pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_orbit_input;

use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-sync the viewport on every window resize.
pub fn wire_resize(frame_ctx: Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let viewport = dom::current_viewport(&win);
        frame_ctx.borrow_mut().resize(viewport);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
