//! OKLCH display color.

use rand::Rng;

/// Color in the OKLCH space, the format the page styles with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
}

impl Oklch {
    pub const fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        Self {
            lightness,
            chroma,
            hue,
        }
    }

    /// Bright, fairly saturated color with any hue.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            lightness: rng.gen_range(0.55..0.9),
            chroma: rng.gen_range(0.1..0.3),
            hue: rng.gen_range(0.0..360.0),
        }
    }

    /// Rotate the hue, wrapping into [0, 360).
    pub fn shifted(self, degrees: f64) -> Self {
        Self {
            hue: (self.hue + degrees).rem_euclid(360.0),
            ..self
        }
    }

    pub fn css(&self) -> String {
        format!(
            "oklch({:.3} {:.3} {:.1})",
            self.lightness, self.chroma, self.hue
        )
    }

    /// CSS color with the alpha channel clamped to [0, 1].
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!(
            "oklch({:.3} {:.3} {:.1} / {:.3})",
            self.lightness,
            self.chroma,
            self.hue,
            alpha.clamp(0.0, 1.0)
        )
    }
}

impl Default for Oklch {
    fn default() -> Self {
        Self::new(0.75, 0.2, 40.0)
    }
}
