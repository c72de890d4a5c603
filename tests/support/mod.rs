// In-memory host shared by the native integration tests. It measures text
// with fixed-advance metrics and records everything the session asks of it.
#![allow(dead_code)]

use std::collections::HashSet;

use typewriter_toy::color::Oklch;
use typewriter_toy::host::{Animation, RenderSurface, SoundCue, SoundPlayer, Sprite};
use typewriter_toy::layout::{MonospaceMetrics, Rect, TextMeasure, Viewport};

pub const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

#[derive(Debug)]
pub struct RecordingHost {
    pub viewport: Viewport,
    pub display: Rect,
    pub metrics: MonospaceMetrics,
    pub sounds: Vec<SoundCue>,
    /// (text, font size) per presentation, oldest first.
    pub presented: Vec<(String, f64)>,
    pub colors: Vec<Oklch>,
    pub active: HashSet<Animation>,
    pub toggles: Vec<(Animation, bool)>,
    next_visual: u32,
    pub live_visuals: HashSet<u32>,
    pub spawned: u32,
    pub updated: u32,
    pub released: u32,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            viewport: VIEWPORT,
            display: Rect::new(100.0, 300.0, 800.0, 200.0),
            metrics: MonospaceMetrics::for_viewport(VIEWPORT),
            sounds: Vec::new(),
            presented: Vec::new(),
            colors: Vec::new(),
            active: HashSet::new(),
            toggles: Vec::new(),
            next_visual: 0,
            live_visuals: HashSet::new(),
            spawned: 0,
            updated: 0,
            released: 0,
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.presented.last().map(|(t, _)| t.as_str())
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.sounds.iter().filter(|c| **c == cue).count()
    }

    pub fn is_active(&self, animation: Animation) -> bool {
        self.active.contains(&animation)
    }
}

impl TextMeasure for RecordingHost {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        self.metrics.measure(text, font_size)
    }
}

impl SoundPlayer for RecordingHost {
    fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }
}

impl RenderSurface for RecordingHost {
    type Visual = u32;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn display_box(&self) -> Rect {
        self.display
    }

    fn present_text(&mut self, text: &str, font_size: f64, color: &Oklch) {
        self.presented.push((text.to_string(), font_size));
        self.colors.push(*color);
    }

    fn set_animation(&mut self, animation: Animation, active: bool) {
        self.toggles.push((animation, active));
        if active {
            self.active.insert(animation);
        } else {
            self.active.remove(&animation);
        }
    }

    fn spawn_visual(&mut self, _sprite: &Sprite) -> u32 {
        self.next_visual += 1;
        self.spawned += 1;
        self.live_visuals.insert(self.next_visual);
        self.next_visual
    }

    fn update_visual(&mut self, visual: &mut u32, _sprite: &Sprite) {
        assert!(self.live_visuals.contains(visual), "update of released visual {visual}");
        self.updated += 1;
    }

    fn release_visual(&mut self, visual: u32) {
        assert!(self.live_visuals.remove(&visual), "double release of visual {visual}");
        self.released += 1;
    }
}
