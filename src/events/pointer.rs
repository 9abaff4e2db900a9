use crate::frame::FrameContext;
use crate::input::{self, DragMode, DragState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
struct OrbitWiring {
    canvas: web::HtmlCanvasElement,
    frame_ctx: Rc<RefCell<FrameContext>>,
    drag: Rc<RefCell<DragState>>,
}

/// Pointer drag, wheel and context-menu handlers feeding the orbit controls.
pub fn wire_orbit_input(canvas: &web::HtmlCanvasElement, frame_ctx: Rc<RefCell<FrameContext>>) {
    let w = OrbitWiring {
        canvas: canvas.clone(),
        frame_ctx,
        drag: Rc::new(RefCell::new(DragState::default())),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // any press counts as the unlocking gesture
        w2.frame_ctx.borrow_mut().unlock_audio();
        let modifier = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
        if let Some(mode) = input::drag_mode_for_button(ev.button(), modifier) {
            let at = input::pointer_canvas_css(&ev, &w2.canvas);
            w2.drag.borrow_mut().begin(mode, ev.pointer_id(), at);
            _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let at = input::pointer_canvas_css(&ev, &w2.canvas);
        let Some((mode, delta)) = w2.drag.borrow_mut().advance(ev.pointer_id(), at) else {
            return;
        };
        let mut ctx = w2.frame_ctx.borrow_mut();
        let height = ctx.viewport.height as f32;
        let ctx = &mut *ctx;
        match mode {
            DragMode::Rotate => ctx.scene.controls.rotate_drag(delta.x, delta.y, height),
            DragMode::Pan => {
                ctx.scene
                    .controls
                    .pan_drag(delta.x, delta.y, height, &ctx.scene.camera)
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &OrbitWiring) {
    let w2 = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w2.drag.borrow_mut().end(ev.pointer_id());
        _ = w2.canvas.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        _ = window.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        w2.frame_ctx
            .borrow_mut()
            .scene
            .controls
            .dolly_wheel(ev.delta_y() as f32);
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(w: &OrbitWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
