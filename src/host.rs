//! Collaborators the core drives: sound, text presentation and particle
//! visuals. The browser implementation lives in `web`; tests use in-memory
//! recorders.

use crate::color::Oklch;
use crate::layout::{Rect, TextMeasure, Viewport};
use crate::particles::{Particle, ParticleKind};

/// Named sound effects. Playback is fire-and-forget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    Keystroke,
    /// The buffer just reached its maximum length.
    Bell,
    /// The buffer was emptied after having been full.
    Reset,
    Bounce,
    Pop,
    /// Rocket rumble fading to silence over `fade_ms`.
    Launch { fade_ms: f64 },
}

/// CSS-driven animations toggled on the text display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    Jump,
    Pop,
    LaunchRumble,
    LaunchLiftoff,
}

impl Animation {
    pub const ALL: [Animation; 4] = [
        Animation::Jump,
        Animation::Pop,
        Animation::LaunchRumble,
        Animation::LaunchLiftoff,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Animation::Jump => "jump",
            Animation::Pop => "pop",
            Animation::LaunchRumble => "launch-rumble",
            Animation::LaunchLiftoff => "launch-liftoff",
        }
    }
}

/// What a particle should look like this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub glyph: char,
    /// vmin, scaled from the display font size.
    pub font_size: f64,
    /// CSS color whose alpha follows the particle's life.
    pub color: String,
    pub opacity: f64,
    pub kind: ParticleKind,
}

impl Sprite {
    pub fn of<V>(p: &Particle<V>, display_font_size: f64) -> Self {
        let opacity = p.life.clamp(0.0, 1.0);
        Self {
            x: p.x,
            y: p.y,
            glyph: p.glyph,
            font_size: display_font_size * p.size,
            color: p.color.css_with_alpha(opacity),
            opacity,
            kind: p.kind,
        }
    }
}

pub trait SoundPlayer {
    /// Play a cue. Implementations swallow every failure.
    fn play(&mut self, cue: SoundCue);
}

pub trait RenderSurface {
    /// Opaque per-particle visual owned by the particle.
    type Visual;

    fn viewport(&self) -> Viewport;

    /// Current bounding box of the text display.
    fn display_box(&self) -> Rect;

    fn present_text(&mut self, text: &str, font_size: f64, color: &Oklch);

    fn set_animation(&mut self, animation: Animation, active: bool);

    fn spawn_visual(&mut self, sprite: &Sprite) -> Self::Visual;

    fn update_visual(&mut self, visual: &mut Self::Visual, sprite: &Sprite);

    fn release_visual(&mut self, visual: Self::Visual);
}

/// Everything a session needs from its surroundings.
pub trait Host: SoundPlayer + RenderSurface + TextMeasure {}

impl<T: SoundPlayer + RenderSurface + TextMeasure> Host for T {}
