//! DOM-backed host: text display element, one `div` per particle, canvas
//! text metrics and Web Audio.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use crate::color::Oklch;
use crate::host::{Animation, RenderSurface, SoundCue, SoundPlayer, Sprite};
use crate::layout::{MonospaceMetrics, Rect, TextMeasure, Viewport};
use crate::web::audio::WebAudio;

const PARTICLE_STYLE: &str =
    "position:fixed; left:0; top:0; pointer-events:none; user-select:none; z-index:1000; font-family:monospace; will-change:transform;";

pub struct DomHost {
    window: Window,
    document: Document,
    display: HtmlElement,
    /// Off-screen context used only for `measureText`.
    metrics: Option<CanvasRenderingContext2d>,
    audio: WebAudio,
}

impl DomHost {
    pub fn new(window: Window, document: Document, display: HtmlElement, audio: WebAudio) -> Self {
        let metrics = match measuring_context(&document) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                tracing::warn!(error = ?e, "canvas metrics unavailable, using monospace estimate");
                None
            }
        };
        Self {
            window,
            document,
            display,
            metrics,
            audio,
        }
    }

    fn create_particle(&self, sprite: &Sprite) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.set_class_name("particle");
        el.set_attribute("style", PARTICLE_STYLE)?;
        el.set_text_content(Some(&sprite.glyph.to_string()));
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&el)?;
        Ok(el)
    }
}

fn measuring_context(document: &Document) -> Result<CanvasRenderingContext2d, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()
        .map_err(JsValue::from)
}

fn style_sprite(el: &HtmlElement, sprite: &Sprite) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property(
        "transform",
        &format!(
            "translate3d({:.2}px, {:.2}px, 0) translate(-50%, -50%)",
            sprite.x, sprite.y
        ),
    )?;
    style.set_property("color", &sprite.color)?;
    style.set_property("font-size", &format!("{:.3}vmin", sprite.font_size))?;
    Ok(())
}

impl TextMeasure for DomHost {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        let viewport = self.viewport();
        let fallback = || MonospaceMetrics::for_viewport(viewport).measure(text, font_size);
        let Some(ctx) = self.metrics.as_ref() else {
            return fallback();
        };
        ctx.set_font(&format!("{}px monospace", font_size * viewport.vmin_px()));
        ctx.measure_text(text)
            .map(|m| m.width())
            .unwrap_or_else(|_| fallback())
    }
}

impl SoundPlayer for DomHost {
    fn play(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }
}

impl RenderSurface for DomHost {
    /// `None` when the element could not be created; the particle is then
    /// simulated but invisible.
    type Visual = Option<HtmlElement>;

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport {
            width: dim(self.window.inner_width()),
            height: dim(self.window.inner_height()),
        }
    }

    fn display_box(&self) -> Rect {
        let r = self.display.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn present_text(&mut self, text: &str, font_size: f64, color: &Oklch) {
        self.display.set_text_content(Some(text));
        let style = self.display.style();
        let applied = style
            .set_property("font-size", &format!("{font_size}vmin"))
            .and_then(|_| style.set_property("color", &color.css()));
        if let Err(e) = applied {
            tracing::warn!(error = ?e, "failed to style text display");
        }
    }

    fn set_animation(&mut self, animation: Animation, active: bool) {
        let toggled = self
            .display
            .class_list()
            .toggle_with_force(animation.class_name(), active);
        if let Err(e) = toggled {
            tracing::warn!(?animation, error = ?e, "failed to toggle animation class");
        }
    }

    fn spawn_visual(&mut self, sprite: &Sprite) -> Self::Visual {
        let el = self
            .create_particle(sprite)
            .map_err(|e| tracing::warn!(error = ?e, "failed to create particle element"))
            .ok()?;
        let _ = style_sprite(&el, sprite);
        Some(el)
    }

    fn update_visual(&mut self, visual: &mut Self::Visual, sprite: &Sprite) {
        if let Some(el) = visual {
            let _ = style_sprite(el, sprite);
        }
    }

    fn release_visual(&mut self, visual: Self::Visual) {
        if let Some(el) = visual {
            el.remove();
        }
    }
}
