//! Glyph particle simulation.
//!
//! Particles live in screen space (pixels, y grows downward) and advance once
//! per animation frame. The simulator owns only numeric state plus an opaque
//! visual handle `V` that the render surface creates and releases.

use std::ops::Range;

use rand::Rng;

use crate::color::Oklch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Scattered upward, e.g. when a character is deleted.
    Burst,
    /// Falling sparks under the rocket.
    Ignition,
}

/// Randomization ranges for one particle kind.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnProfile {
    pub vx: Range<f64>,
    pub vy: Range<f64>,
    pub decay: Range<f64>,
    pub size: Range<f64>,
}

impl ParticleKind {
    pub fn profile(self) -> SpawnProfile {
        match self {
            ParticleKind::Burst => SpawnProfile {
                vx: -4.0..4.0,
                vy: -6.0..2.0,
                decay: 0.02..0.04,
                size: 0.5..1.0,
            },
            ParticleKind::Ignition => SpawnProfile {
                vx: -1.5..1.5,
                vy: 1.0..4.0,
                decay: 0.03..0.06,
                size: 0.3..0.6,
            },
        }
    }
}

/// One transient glyph.
#[derive(Clone, Debug)]
pub struct Particle<V> {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining life in (0, 1]; the particle is removed once it reaches 0.
    pub life: f64,
    /// Base life lost per step.
    pub decay: f64,
    pub glyph: char,
    /// Scale relative to the display font size.
    pub size: f64,
    pub color: Oklch,
    pub kind: ParticleKind,
    /// Render-side handle, created on first render.
    pub visual: Option<V>,
}

impl<V> Particle<V> {
    pub fn new(x: f64, y: f64, glyph: char, color: Oklch, kind: ParticleKind) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            life: 1.0,
            decay: 0.0,
            glyph,
            size: 1.0,
            color,
            kind,
            visual: None,
        }
    }

    fn randomized<R: Rng + ?Sized>(
        rng: &mut R,
        origin: (f64, f64),
        glyph: char,
        color: Oklch,
        kind: ParticleKind,
    ) -> Self {
        let profile = kind.profile();
        Self {
            vx: sample(rng, &profile.vx),
            vy: sample(rng, &profile.vy),
            decay: sample(rng, &profile.decay),
            size: sample(rng, &profile.size),
            ..Self::new(origin.0, origin.1, glyph, color, kind)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Physics knobs applied on every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Added to vy each step (pixels/frame²).
    pub gravity: f64,
    /// Population above which decay speeds up.
    pub excess_threshold: usize,
    /// Extra decay multiplier per particle over the threshold.
    pub excess_decay_factor: f64,
    /// Extra decay multiplier per rank of age (oldest gets the most).
    pub age_decay_factor: f64,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            excess_threshold: 60,
            excess_decay_factor: 0.05,
            age_decay_factor: 0.02,
        }
    }
}

/// Owns every live particle, oldest first.
#[derive(Debug)]
pub struct ParticleSystem<V> {
    particles: Vec<Particle<V>>,
}

impl<V> Default for ParticleSystem<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ParticleSystem<V> {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle<V>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<V>] {
        &mut self.particles
    }

    /// Append an already-built particle; it becomes the youngest.
    pub fn push(&mut self, particle: Particle<V>) {
        self.particles.push(particle);
    }

    /// Spawn a randomized number of particles (from `count`) at `origin`.
    /// Returns how many were created.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: (f64, f64),
        glyph: char,
        color: Oklch,
        kind: ParticleKind,
        count: Range<usize>,
    ) -> usize {
        let n = if count.start < count.end {
            rng.gen_range(count)
        } else {
            count.start
        };
        self.particles.reserve(n);
        for _ in 0..n {
            self.particles
                .push(Particle::randomized(rng, origin, glyph, color, kind));
        }
        n
    }

    /// Advance every particle by one frame and remove the expired ones,
    /// handing them back so their visuals can be released.
    ///
    /// Above the excess threshold each particle's decay is scaled by
    /// `1 + excess * excess_decay_factor + rank * age_decay_factor`, where
    /// rank counts down from the population size for the oldest particle to
    /// 1 for the youngest.
    pub fn step(&mut self, params: &StepParams) -> Vec<Particle<V>> {
        let n = self.particles.len();
        let excess = n.saturating_sub(params.excess_threshold);

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += params.gravity;

            let mut decay = p.decay;
            if excess > 0 {
                let rank = (n - i) as f64;
                decay *= 1.0
                    + excess as f64 * params.excess_decay_factor
                    + rank * params.age_decay_factor;
            }
            p.life -= decay;
        }

        if self.particles.iter().all(Particle::is_alive) {
            return Vec::new();
        }
        let (alive, expired): (Vec<_>, Vec<_>) = std::mem::take(&mut self.particles)
            .into_iter()
            .partition(Particle::is_alive);
        self.particles = alive;
        expired
    }

    /// Remove everything, returning the particles for visual cleanup.
    pub fn drain(&mut self) -> Vec<Particle<V>> {
        std::mem::take(&mut self.particles)
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}
