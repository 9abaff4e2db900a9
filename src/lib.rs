#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{build_text_mesh, FrequencySnapshot, SceneConfig, SceneState, TextParams, ANALYSER_BINS, TITLE_TEXT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("donut-field starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn build_audio() -> Option<(web::AudioContext, audio::AudioAnalyser)> {
    let audio_ctx = match web::AudioContext::new() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[audio] AudioContext unavailable: {:?}", e);
            return None;
        }
    };
    match audio::AudioAnalyser::new(&audio_ctx, ANALYSER_BINS) {
        Ok(a) => Some((audio_ctx, a)),
        Err(e) => {
            log::warn!("[audio] analyser unavailable: {:#}", e);
            None
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::query_canvas(&document, CANVAS_SELECTOR)?;

    let viewport = dom::current_viewport(&window);
    let scene = SceneState::build(SceneConfig::default(), viewport.aspect(), &mut rand::thread_rng());

    let (audio_ctx, analyser) = match build_audio() {
        Some((c, a)) => (Some(c), Some(a)),
        None => (None, None),
    };
    let suspended = analyser.as_ref().map(|a| a.is_suspended()).unwrap_or(false);

    // Surface size must be known before the adapter is requested
    dom::apply_canvas_size(&canvas, &viewport);
    let gpu = frame::init_gpu(&canvas, &viewport).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas: canvas.clone(),
        viewport,
        audio: analyser,
        silence: FrequencySnapshot::silent(ANALYSER_BINS),
        audio_unlocked: false,
        gpu,
    }));
    frame_ctx.borrow_mut().resize(viewport);

    events::wire_resize(frame_ctx.clone());
    events::wire_orbit_input(&canvas, frame_ctx.clone());
    events::wire_global_keydown(frame_ctx.clone());

    if suspended {
        overlay::show(&document);
    } else {
        frame_ctx.borrow_mut().audio_unlocked = true;
        overlay::hide(&document);
    }

    let ctx = frame_ctx.clone();
    assets::spawn_load(MATCAP_TEXTURE_PATH, assets::load_texture(MATCAP_TEXTURE_PATH), move |img| {
        ctx.borrow_mut().install_matcap(&img);
    });

    let ctx = frame_ctx.clone();
    assets::spawn_load(FONT_PATH, assets::load_font(FONT_PATH), move |face| {
        let geometry = build_text_mesh(&face, TITLE_TEXT, &TextParams::default());
        ctx.borrow_mut().install_text(geometry);
    });

    if let Some(audio_ctx) = audio_ctx {
        let ctx = frame_ctx.clone();
        assets::spawn_load(
            AUDIO_PATH,
            async move { assets::load_audio(&audio_ctx, AUDIO_PATH).await },
            move |buffer| ctx.borrow_mut().install_track(&buffer),
        );
    }

    frame::start_loop(frame_ctx);
    Ok(())
}
