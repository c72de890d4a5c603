//! Web Audio playback for the typewriter cues.
//!
//! Samples are fetched and decoded in the background after start-up; a cue
//! whose sample is missing (still loading, 404, undecodable) is silently
//! skipped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioContext, AudioContextState, Response, Window};

use crate::host::{SoundCue, SoundPlayer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Sample {
    Key1,
    Key2,
    Key3,
    Bell,
    Reset,
    Bounce,
    Pop,
    Launch,
}

const SAMPLE_FILES: [(Sample, &str); 8] = [
    (Sample::Key1, "1.wav"),
    (Sample::Key2, "2.wav"),
    (Sample::Key3, "3.wav"),
    (Sample::Bell, "bell.wav"),
    (Sample::Reset, "reset.wav"),
    (Sample::Bounce, "bounce.wav"),
    (Sample::Pop, "pop.wav"),
    (Sample::Launch, "launch.wav"),
];

const KEYSTROKES: [Sample; 3] = [Sample::Key1, Sample::Key2, Sample::Key3];

fn gain_for(cue: SoundCue) -> f32 {
    match cue {
        SoundCue::Keystroke => 0.4,
        SoundCue::Bell => 1.0,
        SoundCue::Reset => 0.8,
        SoundCue::Bounce | SoundCue::Pop => 0.7,
        SoundCue::Launch { .. } => 0.9,
    }
}

pub struct WebAudio {
    ctx: Option<AudioContext>,
    buffers: Rc<RefCell<HashMap<Sample, AudioBuffer>>>,
    rng: SmallRng,
}

impl WebAudio {
    /// Create the audio context. Without Web Audio every cue is a no-op.
    pub fn new() -> Self {
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                tracing::warn!(error = ?e, "audio context unavailable, sound disabled");
                None
            }
        };
        Self {
            ctx,
            buffers: Rc::new(RefCell::new(HashMap::new())),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Start fetching and decoding every sample.
    pub fn load_all(&self, window: &Window) {
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };
        for (sample, url) in SAMPLE_FILES {
            let window = window.clone();
            let ctx = ctx.clone();
            let buffers = self.buffers.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_and_decode(&window, &ctx, url).await {
                    Ok(buffer) => {
                        buffers.borrow_mut().insert(sample, buffer);
                    }
                    Err(e) => tracing::warn!(url, error = ?e, "failed to load sample"),
                }
            });
        }
    }

    fn sample_for(&mut self, cue: SoundCue) -> Option<AudioBuffer> {
        let buffers = self.buffers.borrow();
        let sample = match cue {
            SoundCue::Keystroke => {
                let loaded: Vec<Sample> = KEYSTROKES
                    .into_iter()
                    .filter(|s| buffers.contains_key(s))
                    .collect();
                if loaded.is_empty() {
                    return None;
                }
                loaded[self.rng.gen_range(0..loaded.len())]
            }
            SoundCue::Bell => Sample::Bell,
            SoundCue::Reset => Sample::Reset,
            SoundCue::Bounce => Sample::Bounce,
            SoundCue::Pop => Sample::Pop,
            SoundCue::Launch { .. } => Sample::Launch,
        };
        buffers.get(&sample).cloned()
    }

    fn try_play(&mut self, cue: SoundCue) -> Result<(), JsValue> {
        let Some(ctx) = self.ctx.clone() else {
            return Ok(());
        };
        let Some(buffer) = self.sample_for(cue) else {
            return Ok(());
        };
        // Browsers keep the context suspended until a user gesture.
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }

        let source = ctx.create_buffer_source()?;
        let gain = ctx.create_gain()?;
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let level = gain_for(cue);
        let param = gain.gain();
        param.set_value(level);
        if let SoundCue::Launch { fade_ms } = cue {
            let t0 = ctx.current_time();
            param.set_value_at_time(level, t0)?;
            param.linear_ramp_to_value_at_time(0.0, t0 + fade_ms / 1000.0)?;
        }
        source.start()?;
        Ok(())
    }
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPlayer for WebAudio {
    fn play(&mut self, cue: SoundCue) {
        if let Err(e) = self.try_play(cue) {
            tracing::warn!(?cue, error = ?e, "sound playback failed");
        }
    }
}

async fn fetch_and_decode(
    window: &Window,
    ctx: &AudioContext,
    url: &str,
) -> Result<AudioBuffer, JsValue> {
    let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(response.array_buffer()?).await?.dyn_into()?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes)?).await?;
    decoded.dyn_into()
}
