//! Typewriter toy core crate.
//!
//! A single line of large text that shrinks to fit as you type, bursts into
//! falling glyph particles when you delete, and reacts to F1..F5 with a
//! random word, a hue shift, a jump, a pop and a rocket launch.
//!
//! Everything except the `web` module is plain Rust driven through the
//! [`host::Host`] traits, so the session and the animation driver run (and
//! are tested) natively. `start_typewriter()` wires it to the page.

use wasm_bindgen::prelude::*;

pub mod color;
pub mod config;
pub mod driver;
pub mod effects;
pub mod error;
pub mod host;
pub mod input;
pub mod layout;
pub mod logging;
pub mod particles;
pub mod scheduler;
pub mod session;
pub mod text;
pub mod web;
pub mod words;

pub use config::{LaunchTiming, TypewriterConfig};
pub use driver::{AnimationDriver, TickReport};
pub use error::{Result, TypewriterError};
pub use host::{Animation, Host, RenderSurface, SoundCue, SoundPlayer, Sprite};
pub use input::{Key, Trigger};
pub use session::{KeyOutcome, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// F1 vocabulary: short, common, lowercase.
pub const WORDS: &[&str] = &[
    "cat", "dog", "run", "sun", "fun", "big", "top", "red", "hat", "cup",
    "book", "tree", "fish", "bird", "rock", "cake", "moon", "star", "game", "door",
    "house", "water", "paper", "phone", "music", "light", "chair", "table", "green", "smile",
    "happy", "quick", "bread", "cloud", "beach", "dream", "magic", "dance", "heart", "ocean",
    "world", "peace", "brave", "sweet", "focus", "sharp", "grace", "spark", "fresh", "royal",
];

#[wasm_bindgen]
pub fn start_typewriter() -> std::result::Result<(), JsValue> {
    web::start_typewriter_mode(TypewriterConfig::default())
}

/// Start with JSON overrides, e.g. `{"max_chars": 20, "log_level": "debug"}`.
/// Missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_typewriter_with_config(json: &str) -> std::result::Result<(), JsValue> {
    let config = TypewriterConfig::from_json(json)?;
    web::start_typewriter_mode(config)
}

#[wasm_bindgen]
pub fn reset_typewriter() {
    web::reset();
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
