use crate::core::Typeface;
use anyhow::{anyhow, bail, Context};
use instant::Instant;
use std::future::Future;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_array_buffer(path: &str) -> anyhow::Result<js_sys::ArrayBuffer> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow!("fetch {} failed: {:?}", path, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow!("fetch {} returned a non-response: {:?}", path, e))?;
    if !resp.ok() {
        bail!("fetch {} returned HTTP {}", path, resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow!("read {} body: {:?}", path, e))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("read {} body: {:?}", path, e))?;
    buf.dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| anyhow!("{} body is not an ArrayBuffer: {:?}", path, e))
}

pub async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let buf = fetch_array_buffer(path).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode an image into tightly packed RGBA8.
pub async fn load_texture(path: &str) -> anyhow::Result<image::RgbaImage> {
    let bytes = fetch_bytes(path).await?;
    let img = image::load_from_memory(&bytes).with_context(|| format!("decode image {}", path))?;
    Ok(img.to_rgba8())
}

pub async fn load_font(path: &str) -> anyhow::Result<Typeface> {
    let bytes = fetch_bytes(path).await?;
    Typeface::from_slice(&bytes).with_context(|| format!("parse typeface {}", path))
}

pub async fn load_audio(audio_ctx: &web::AudioContext, path: &str) -> anyhow::Result<web::AudioBuffer> {
    let buf = fetch_array_buffer(path).await?;
    let decoding = audio_ctx
        .decode_audio_data(&buf)
        .map_err(|e| anyhow!("decodeAudioData {}: {:?}", path, e))?;
    let decoded = JsFuture::from(decoding)
        .await
        .map_err(|e| anyhow!("decode audio {}: {:?}", path, e))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow!("{} did not decode to an AudioBuffer: {:?}", path, e))
}

/// Run `load` in the background and hand the result to `on_ready`.
///
/// Failures are logged and dropped; no retry.
pub fn spawn_load<T, Fut, F>(path: &'static str, load: Fut, on_ready: F)
where
    T: 'static,
    Fut: Future<Output = anyhow::Result<T>> + 'static,
    F: FnOnce(T) + 'static,
{
    spawn_local(async move {
        let started = Instant::now();
        match load.await {
            Ok(value) => {
                log::info!(
                    "[assets] {} loaded in {} ms",
                    path,
                    started.elapsed().as_millis()
                );
                on_ready(value);
            }
            Err(e) => log::warn!("[assets] {} unavailable: {:#}", path, e),
        }
    });
}
