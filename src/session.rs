//! Session state: everything the page mutates, owned in one place.

use std::ops::Range;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::color::Oklch;
use crate::config::TypewriterConfig;
use crate::effects::{EffectState, EffectTimer};
use crate::host::{Animation, Host, SoundCue};
use crate::input::{Key, Trigger};
use crate::layout::{compute_font_size, locate_last};
use crate::particles::{ParticleKind, ParticleSystem};
use crate::scheduler::Scheduler;
use crate::text::{DisplayString, PushOutcome};
use crate::words::Dictionary;

/// Particles per deletion burst.
pub const DELETE_BURST: Range<usize> = 8..14;

/// What a key press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Appended,
    /// Appended and the line is now full.
    Filled,
    /// Line already full; nothing happened.
    Rejected,
    Deleted,
    Cleared,
    Triggered(Trigger),
    /// The same effect is still running.
    Busy(Trigger),
    Ignored,
}

/// The typewriter's whole mutable state. `V` is the host's particle visual.
pub struct Session<V> {
    pub(crate) config: TypewriterConfig,
    pub(crate) text: DisplayString,
    pub(crate) color: Oklch,
    pub(crate) font_size: f64,
    /// The line was full since it was last empty.
    pub(crate) was_at_max: bool,
    pub(crate) particles: ParticleSystem<V>,
    pub(crate) timers: Scheduler<EffectTimer>,
    pub(crate) effects: EffectState,
    pub(crate) words: Dictionary,
    pub(crate) rng: SmallRng,
}

impl<V> Session<V> {
    pub fn new(config: TypewriterConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(config: TypewriterConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: TypewriterConfig, mut rng: SmallRng) -> Self {
        let color = Oklch::random(&mut rng);
        Self {
            text: DisplayString::new(config.max_chars),
            font_size: config.initial_font_size,
            config,
            color,
            was_at_max: false,
            particles: ParticleSystem::new(),
            timers: Scheduler::new(),
            effects: EffectState::default(),
            words: Dictionary::default(),
            rng,
        }
    }

    pub fn with_dictionary(mut self, words: Dictionary) -> Self {
        self.words = words;
        self
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn color(&self) -> Oklch {
        self.color
    }

    pub fn particles(&self) -> &ParticleSystem<V> {
        &self.particles
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn handle_key<H: Host<Visual = V>>(&mut self, key: Key, now: f64, host: &mut H) -> KeyOutcome {
        let launching = self.is_launching();
        match key {
            Key::Char(_) | Key::Backspace if launching => KeyOutcome::Ignored,
            Key::Char(c) => self.type_char(c, host),
            Key::Backspace => self.delete_last(host),
            Key::Escape => self.clear(host),
            Key::Trigger(trigger) => self.trigger(trigger, now, host),
            Key::Other => KeyOutcome::Ignored,
        }
    }

    fn type_char<H: Host<Visual = V>>(&mut self, c: char, host: &mut H) -> KeyOutcome {
        let outcome = self.text.push(c);
        if outcome == PushOutcome::Rejected {
            return KeyOutcome::Rejected;
        }
        self.refresh_display(host);
        host.play(SoundCue::Keystroke);
        if outcome == PushOutcome::Filled {
            host.play(SoundCue::Bell);
            self.was_at_max = true;
            return KeyOutcome::Filled;
        }
        KeyOutcome::Appended
    }

    fn delete_last<H: Host<Visual = V>>(&mut self, host: &mut H) -> KeyOutcome {
        if self.text.is_empty() {
            return KeyOutcome::Ignored;
        }
        let anchor = locate_last(self.text.as_str(), self.font_size, host.display_box(), &*host);
        match anchor {
            Some(pos) => {
                let n = self.particles.spawn_burst(
                    &mut self.rng,
                    (pos.x, pos.y),
                    pos.glyph,
                    self.color,
                    ParticleKind::Burst,
                    DELETE_BURST,
                );
                tracing::trace!(glyph = %pos.glyph, x = pos.x, y = pos.y, n, "deletion burst");
            }
            None => tracing::debug!("no anchor for deleted character, skipping burst"),
        }
        self.text.pop();
        self.refresh_display(host);
        KeyOutcome::Deleted
    }

    /// Escape: abort a launch in flight and empty the line.
    fn clear<H: Host<Visual = V>>(&mut self, host: &mut H) -> KeyOutcome {
        let aborted = self.cancel_launch(host);
        if self.text.is_empty() && !aborted {
            return KeyOutcome::Ignored;
        }
        self.text.clear();
        self.refresh_display(host);
        KeyOutcome::Cleared
    }

    /// Recompute the font size and push text, size and color to the host.
    /// An empty line resets to the initial size with a fresh color, and plays
    /// the reset cue if the line had been full.
    pub fn refresh_display<H: Host<Visual = V>>(&mut self, host: &mut H) {
        if self.text.is_empty() {
            self.font_size = self.config.initial_font_size;
            self.color = Oklch::random(&mut self.rng);
            if self.was_at_max {
                host.play(SoundCue::Reset);
                self.was_at_max = false;
            }
        } else {
            let width = host.viewport().width;
            self.font_size =
                compute_font_size(self.text.as_str(), width, &self.config.fit_params(), &*host);
        }
        host.present_text(self.text.as_str(), self.font_size, &self.color);
    }

    /// Back to a blank page: timers cancelled, effects stopped, particles and
    /// their visuals released.
    pub fn reset<H: Host<Visual = V>>(&mut self, host: &mut H) {
        self.timers.clear();
        self.effects = EffectState::default();
        for animation in Animation::ALL {
            host.set_animation(animation, false);
        }
        for p in self.particles.drain() {
            if let Some(visual) = p.visual {
                host.release_visual(visual);
            }
        }
        self.text.clear();
        self.was_at_max = false;
        self.refresh_display(host);
    }
}
