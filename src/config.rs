//! Tunables for the session, the simulator and the effect timings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypewriterError};
use crate::layout::FitParams;
use crate::particles::StepParams;

/// Rocket launch stage timings (ms from the trigger).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LaunchTiming {
    /// Rumble switches to liftoff.
    pub liftoff_ms: f64,
    pub ignition_interval_ms: f64,
    /// How long ignition sparks keep spawning.
    pub ignition_ms: f64,
    /// Rocket is gone; the line is cleared.
    pub launch_ms: f64,
}

impl Default for LaunchTiming {
    fn default() -> Self {
        Self {
            liftoff_ms: 900.0,
            ignition_interval_ms: 60.0,
            ignition_ms: 2200.0,
            launch_ms: 3200.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypewriterConfig {
    pub max_chars: usize,
    /// vmin
    pub initial_font_size: f64,
    pub min_font_size: f64,
    pub font_step: f64,
    pub fill_ratio: f64,
    pub gravity: f64,
    pub excess_threshold: usize,
    pub excess_decay_factor: f64,
    pub age_decay_factor: f64,
    pub hue_shift_degrees: f64,
    pub jump_ms: f64,
    pub pop_ms: f64,
    pub launch: LaunchTiming,
    /// tracing level name: "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            max_chars: 32,
            initial_font_size: 90.0,
            min_font_size: 2.0,
            font_step: 0.5,
            fill_ratio: 0.9,
            gravity: 0.2,
            excess_threshold: 60,
            excess_decay_factor: 0.05,
            age_decay_factor: 0.02,
            hue_shift_degrees: 45.0,
            jump_ms: 600.0,
            pop_ms: 450.0,
            launch: LaunchTiming::default(),
            log_level: "info".to_string(),
        }
    }
}

impl TypewriterConfig {
    pub fn fit_params(&self) -> FitParams {
        FitParams {
            initial: self.initial_font_size,
            min: self.min_font_size,
            step: self.font_step,
            fill_ratio: self.fill_ratio,
        }
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            gravity: self.gravity,
            excess_threshold: self.excess_threshold,
            excess_decay_factor: self.excess_decay_factor,
            age_decay_factor: self.age_decay_factor,
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(TypewriterError::InvalidConfig(msg.to_string()));
        if self.max_chars == 0 {
            return invalid("max_chars must be at least 1");
        }
        if !(self.min_font_size > 0.0 && self.min_font_size <= self.initial_font_size) {
            return invalid("font sizes must satisfy 0 < min_font_size <= initial_font_size");
        }
        if !(self.font_step > 0.0) {
            return invalid("font_step must be positive");
        }
        if !(self.fill_ratio > 0.0 && self.fill_ratio <= 1.0) {
            return invalid("fill_ratio must be in (0, 1]");
        }
        if !self.gravity.is_finite() {
            return invalid("gravity must be finite");
        }
        if self.excess_decay_factor < 0.0 || self.age_decay_factor < 0.0 {
            return invalid("decay factors must not be negative");
        }
        let l = &self.launch;
        if !(l.ignition_interval_ms > 0.0) {
            return invalid("launch.ignition_interval_ms must be positive");
        }
        if !(l.liftoff_ms <= l.launch_ms && l.ignition_ms <= l.launch_ms) {
            return invalid("launch stages must end by launch.launch_ms");
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
