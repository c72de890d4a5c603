//! Function-key effects and their timers.
//!
//! Each effect is gated by a flag so a second trigger while it runs is a
//! no-op. Stage changes are scheduled on the session's [`Scheduler`] and run
//! from [`Session::poll_timers`], which the animation driver calls at the top
//! of every frame.
//!
//! [`Scheduler`]: crate::scheduler::Scheduler

use std::ops::Range;

use rand::Rng;

use crate::color::Oklch;
use crate::host::{Animation, Host, SoundCue};
use crate::input::Trigger;
use crate::layout::locate_all;
use crate::particles::ParticleKind;
use crate::scheduler::TaskId;
use crate::session::{KeyOutcome, Session};

/// Particles per glyph when the line pops.
pub const POP_BURST: Range<usize> = 3..6;
/// Sparks per ignition tick.
pub const IGNITION_BURST: Range<usize> = 2..5;
const IGNITION_GLYPHS: [char; 4] = ['*', '·', '•', '+'];

/// Timer payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectTimer {
    JumpEnd,
    PopEnd,
    /// Rumble becomes liftoff.
    Liftoff,
    IgnitionSpark,
    /// The rocket is gone: clear the line.
    LaunchClear,
}

#[derive(Debug, Default)]
pub struct EffectState {
    pub(crate) jumping: bool,
    pub(crate) popping: bool,
    pub(crate) launch: Option<LaunchRun>,
}

/// Timers owned by the launch in flight.
#[derive(Debug)]
pub(crate) struct LaunchRun {
    stages: Vec<TaskId>,
    ignition: Option<TaskId>,
}

impl<V> Session<V> {
    pub fn is_jumping(&self) -> bool {
        self.effects.jumping
    }

    pub fn is_popping(&self) -> bool {
        self.effects.popping
    }

    pub fn is_launching(&self) -> bool {
        self.effects.launch.is_some()
    }

    pub(crate) fn trigger<H: Host<Visual = V>>(
        &mut self,
        trigger: Trigger,
        now: f64,
        host: &mut H,
    ) -> KeyOutcome {
        if self.is_launching() {
            match trigger {
                Trigger::Launch => return KeyOutcome::Busy(trigger),
                Trigger::ColorShift => {}
                _ => return KeyOutcome::Ignored,
            }
        }
        match trigger {
            Trigger::RandomWord => self.random_word(host),
            Trigger::ColorShift => self.color_shift(host),
            Trigger::Jump => self.jump(now, host),
            Trigger::Pop => self.pop(now, host),
            Trigger::Launch => self.launch(now, host),
        }
    }

    fn random_word<H: Host<Visual = V>>(&mut self, host: &mut H) -> KeyOutcome {
        let Some(word) = self.words.pick(&mut self.rng) else {
            return KeyOutcome::Ignored;
        };
        self.text.replace(word);
        self.color = Oklch::random(&mut self.rng);
        self.refresh_display(host);
        host.play(SoundCue::Keystroke);
        if self.text.is_full() {
            host.play(SoundCue::Bell);
            self.was_at_max = true;
        }
        KeyOutcome::Triggered(Trigger::RandomWord)
    }

    fn color_shift<H: Host<Visual = V>>(&mut self, host: &mut H) -> KeyOutcome {
        self.color = self.color.shifted(self.config.hue_shift_degrees);
        host.present_text(self.text.as_str(), self.font_size, &self.color);
        host.play(SoundCue::Keystroke);
        KeyOutcome::Triggered(Trigger::ColorShift)
    }

    fn jump<H: Host<Visual = V>>(&mut self, now: f64, host: &mut H) -> KeyOutcome {
        if self.effects.jumping {
            return KeyOutcome::Busy(Trigger::Jump);
        }
        self.effects.jumping = true;
        host.set_animation(Animation::Jump, true);
        host.play(SoundCue::Bounce);
        self.timers.once(now, self.config.jump_ms, EffectTimer::JumpEnd);
        KeyOutcome::Triggered(Trigger::Jump)
    }

    fn pop<H: Host<Visual = V>>(&mut self, now: f64, host: &mut H) -> KeyOutcome {
        if self.effects.popping {
            return KeyOutcome::Busy(Trigger::Pop);
        }
        if self.text.is_empty() {
            return KeyOutcome::Ignored;
        }
        self.effects.popping = true;
        host.set_animation(Animation::Pop, true);
        host.play(SoundCue::Pop);
        let anchors = locate_all(self.text.as_str(), self.font_size, host.display_box(), &*host);
        for pos in anchors {
            self.particles.spawn_burst(
                &mut self.rng,
                (pos.x, pos.y),
                pos.glyph,
                self.color,
                ParticleKind::Burst,
                POP_BURST,
            );
        }
        self.timers.once(now, self.config.pop_ms, EffectTimer::PopEnd);
        KeyOutcome::Triggered(Trigger::Pop)
    }

    fn launch<H: Host<Visual = V>>(&mut self, now: f64, host: &mut H) -> KeyOutcome {
        if self.text.is_empty() {
            return KeyOutcome::Ignored;
        }
        let timing = self.config.launch;
        host.set_animation(Animation::LaunchRumble, true);
        host.play(SoundCue::Launch {
            fade_ms: timing.launch_ms,
        });
        let stages = vec![
            self.timers.once(now, timing.liftoff_ms, EffectTimer::Liftoff),
            self.timers.once(now, timing.launch_ms, EffectTimer::LaunchClear),
        ];
        self.effects.launch = Some(LaunchRun {
            stages,
            ignition: None,
        });
        self.start_ignition(now);
        tracing::debug!(text = self.text.as_str(), "launch started");
        KeyOutcome::Triggered(Trigger::Launch)
    }

    /// Start the repeating spark spawner, cancelling any previous one.
    fn start_ignition(&mut self, now: f64) {
        let timing = self.config.launch;
        let Some(run) = self.effects.launch.as_mut() else {
            return;
        };
        if let Some(previous) = run.ignition.take() {
            self.timers.cancel(previous);
        }
        run.ignition = Some(self.timers.repeating(
            now,
            timing.ignition_interval_ms,
            timing.ignition_ms,
            EffectTimer::IgnitionSpark,
        ));
    }

    /// Sparks fall from under a random glyph of the rising line.
    fn spawn_ignition_sparks<H: Host<Visual = V>>(&mut self, host: &mut H) {
        let bounds = host.display_box();
        let anchors = locate_all(self.text.as_str(), self.font_size, bounds, &*host);
        if anchors.is_empty() {
            return;
        }
        let anchor = anchors[self.rng.gen_range(0..anchors.len())];
        let glyph = IGNITION_GLYPHS[self.rng.gen_range(0..IGNITION_GLYPHS.len())];
        self.particles.spawn_burst(
            &mut self.rng,
            (anchor.x, bounds.bottom()),
            glyph,
            self.color,
            ParticleKind::Ignition,
            IGNITION_BURST,
        );
    }

    /// Stop a launch in flight. Returns whether one was running.
    pub(crate) fn cancel_launch<H: Host<Visual = V>>(&mut self, host: &mut H) -> bool {
        let Some(run) = self.effects.launch.take() else {
            return false;
        };
        for id in run.stages.into_iter().chain(run.ignition) {
            self.timers.cancel(id);
        }
        host.set_animation(Animation::LaunchRumble, false);
        host.set_animation(Animation::LaunchLiftoff, false);
        true
    }

    fn finish_launch<H: Host<Visual = V>>(&mut self, host: &mut H) {
        self.cancel_launch(host);
        self.text.clear();
        self.refresh_display(host);
        tracing::debug!("launch finished, line cleared");
    }

    /// Run every effect stage due at `now`; returns what fired.
    pub fn poll_timers<H: Host<Visual = V>>(&mut self, now: f64, host: &mut H) -> Vec<EffectTimer> {
        let fired = self.timers.poll(now);
        let mut out = Vec::with_capacity(fired.len());
        for (_, timer) in fired {
            match timer {
                EffectTimer::JumpEnd => {
                    self.effects.jumping = false;
                    host.set_animation(Animation::Jump, false);
                }
                EffectTimer::PopEnd => {
                    self.effects.popping = false;
                    host.set_animation(Animation::Pop, false);
                }
                EffectTimer::Liftoff => {
                    host.set_animation(Animation::LaunchRumble, false);
                    host.set_animation(Animation::LaunchLiftoff, true);
                }
                EffectTimer::IgnitionSpark => {
                    if self.is_launching() {
                        self.spawn_ignition_sparks(host);
                    }
                }
                EffectTimer::LaunchClear => self.finish_launch(host),
            }
            out.push(timer);
        }
        out
    }
}
