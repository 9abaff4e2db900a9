use crate::constants::{AUDIO_LOOP, AUDIO_VOLUME};
use crate::core::{FrequencySnapshot, FrequencySource};
use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Looping track playback with a byte-frequency analyser on its signal.
///
/// Graph: source -> volume -> analyser, and volume -> output -> destination.
/// Muting acts on `output` so analysis keeps running.
pub struct AudioAnalyser {
    audio_ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    volume: web::GainNode,
    output: web::GainNode,
    source: RefCell<Option<web::AudioBufferSourceNode>>,
    muted: Cell<bool>,
}

impl AudioAnalyser {
    pub fn new(audio_ctx: &web::AudioContext, bins: usize) -> anyhow::Result<Self> {
        let analyser =
            web::AnalyserNode::new(audio_ctx).map_err(|e| anyhow!("AnalyserNode error: {:?}", e))?;
        // FFT size is twice the number of frequency bins
        analyser.set_fft_size((bins * 2) as u32);
        let volume = create_gain(audio_ctx, AUDIO_VOLUME, "volume")?;
        let output = create_gain(audio_ctx, 1.0, "output")?;
        _ = volume.connect_with_audio_node(&analyser);
        _ = volume.connect_with_audio_node(&output);
        _ = output.connect_with_audio_node(&audio_ctx.destination());
        log::info!(
            "[audio] analyser ready: fft={} bins={}",
            analyser.fft_size(),
            analyser.frequency_bin_count()
        );
        Ok(Self {
            audio_ctx: audio_ctx.clone(),
            analyser,
            volume,
            output,
            source: RefCell::new(None),
            muted: Cell::new(false),
        })
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    /// Start looping `buffer`, replacing any track already playing.
    pub fn play(&self, buffer: &web::AudioBuffer) -> anyhow::Result<()> {
        let src = self
            .audio_ctx
            .create_buffer_source()
            .map_err(|e| anyhow!("AudioBufferSourceNode error: {:?}", e))?;
        src.set_buffer(Some(buffer));
        src.set_loop(AUDIO_LOOP);
        src.connect_with_audio_node(&self.volume)
            .map_err(|e| anyhow!("connect source error: {:?}", e))?;
        src.start().map_err(|e| anyhow!("source start error: {:?}", e))?;
        if let Some(old) = self.source.replace(Some(src)) {
            _ = old.stop();
        }
        log::info!(
            "[audio] playing {:.1}s track (loop={})",
            buffer.duration(),
            AUDIO_LOOP
        );
        Ok(())
    }

    /// Flip output mute; returns the new muted state.
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.muted.get();
        self.muted.set(muted);
        self.output.gain().set_value(if muted { 0.0 } else { 1.0 });
        muted
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.audio_ctx.state() == web::AudioContextState::Suspended
    }

    pub fn resume(&self) {
        if self.is_suspended() {
            _ = self.audio_ctx.resume();
            log::info!("[audio] context resumed");
        }
    }
}

impl FrequencySource for AudioAnalyser {
    fn frequency_snapshot(&self) -> FrequencySnapshot {
        let mut bins = vec![0u8; self.bin_count()];
        self.analyser.get_byte_frequency_data(&mut bins);
        FrequencySnapshot::new(bins)
    }
}
