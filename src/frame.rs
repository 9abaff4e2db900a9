use crate::audio::AudioAnalyser;
use crate::core::{FrequencySnapshot, Geometry, SceneState, Viewport};
use crate::dom;
use crate::overlay;
use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: SceneState,
    pub canvas: web::HtmlCanvasElement,
    pub viewport: Viewport,

    // None until the analyser graph exists; the silent snapshot stands in
    pub audio: Option<AudioAnalyser>,
    pub silence: FrequencySnapshot,
    pub audio_unlocked: bool,

    pub gpu: Option<render::GpuState>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        match &self.audio {
            Some(a) => self.scene.tick(a),
            None => self.scene.tick(&self.silence),
        };

        if let Some(g) = &mut self.gpu {
            match g.render(&self.scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[gpu] surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    /// Bring camera, canvas and surface in line with `viewport`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        viewport.apply_to(&mut self.scene.camera);
        dom::apply_canvas_size(&self.canvas, &viewport);
        if let Some(g) = &mut self.gpu {
            let (w, h) = viewport.buffer_size();
            g.resize(w, h);
        }
    }

    pub fn install_matcap(&mut self, image: &image::RgbaImage) {
        if let Some(g) = &mut self.gpu {
            g.set_matcap(image);
        }
    }

    pub fn install_text(&mut self, geometry: Geometry) {
        if let Some(g) = &mut self.gpu {
            g.set_text_mesh(&geometry);
        }
        self.scene.set_text(geometry);
    }

    pub fn install_track(&mut self, buffer: &web::AudioBuffer) {
        match &self.audio {
            Some(a) => {
                if let Err(e) = a.play(buffer) {
                    log::warn!("[audio] playback failed: {:#}", e);
                }
            }
            None => log::warn!("[audio] track loaded but no analyser is available"),
        }
    }

    /// First user gesture: resume audio and dismiss the start overlay.
    ///
    /// Returns true only for the gesture that performed the unlock.
    pub fn unlock_audio(&mut self) -> bool {
        if self.audio_unlocked {
            return false;
        }
        self.audio_unlocked = true;
        if let Some(a) = &self.audio {
            a.resume();
        }
        if let Some(doc) = dom::window_document() {
            overlay::hide(&doc);
        }
        true
    }

    pub fn toggle_mute(&mut self) {
        if let Some(a) = &self.audio {
            let muted = a.toggle_mute();
            log::info!("[keys] muted={}", muted);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, viewport: &Viewport) -> Option<render::GpuState> {
    let (w, h) = viewport.buffer_size();
    match render::GpuState::new(canvas, w, h).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
