//! Text layout: auto-fit font sizing and per-character anchor points.
//!
//! Font sizes are in viewport-relative units (vmin, as the page styles the
//! display); widths and coordinates are CSS pixels. Measurement goes through
//! [`TextMeasure`] so the algorithms here never touch a browser API.

/// "How wide is this text at this size" capability.
pub trait TextMeasure {
    /// Rendered width in pixels of `text` in the display's monospace face at
    /// `font_size` vmin.
    fn measure(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed-advance metric used when nothing better is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size (em).
    pub advance_ratio: f64,
    /// Pixels per vmin unit.
    pub vmin_px: f64,
}

impl MonospaceMetrics {
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;

    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            advance_ratio: Self::DEFAULT_ADVANCE_RATIO,
            vmin_px: viewport.vmin_px(),
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.vmin_px * self.advance_ratio
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn vmin_px(&self) -> f64 {
        self.width.min(self.height) / 100.0
    }
}

/// Axis-aligned screen rectangle (the text container's bounding box).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.bottom()
    }
}

/// Parameters of the shrink-to-fit search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub initial: f64,
    pub min: f64,
    pub step: f64,
    /// Fraction of the viewport width the text may occupy.
    pub fill_ratio: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            initial: 90.0,
            min: 2.0,
            step: 0.5,
            fill_ratio: 0.9,
        }
    }
}

/// Center of one rendered character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharPosition {
    pub x: f64,
    pub y: f64,
    pub glyph: char,
}

/// Largest font size, stepping down linearly from `params.initial`, at which
/// `text` fits in `fill_ratio` of the viewport width. Empty text gets the
/// initial size; text that overflows even at the floor gets the floor.
pub fn compute_font_size<M: TextMeasure + ?Sized>(
    text: &str,
    viewport_width: f64,
    params: &FitParams,
    measure: &M,
) -> f64 {
    if text.is_empty() {
        return params.initial;
    }
    let max_width = viewport_width * params.fill_ratio;
    let mut size = params.initial;
    while size > params.min && measure.measure(text, size) > max_width {
        size = (size - params.step).max(params.min);
    }
    size
}

/// Screen center of the character at `index` (in chars), assuming the text is
/// horizontally centered in `container`.
pub fn locate_character<M: TextMeasure + ?Sized>(
    text: &str,
    index: usize,
    font_size: f64,
    container: Rect,
    measure: &M,
) -> Option<CharPosition> {
    let (start, glyph) = text.char_indices().nth(index)?;
    let end = start + glyph.len_utf8();

    let before = measure.measure(&text[..start], font_size);
    let through = measure.measure(&text[..end], font_size);
    let full = measure.measure(text, font_size);

    let text_left = container.left + (container.width - full) / 2.0;
    let (_, y) = container.center();
    Some(CharPosition {
        x: text_left + before + (through - before) / 2.0,
        y,
        glyph,
    })
}

/// Center of the last character, the usual spawn point for deletion bursts.
pub fn locate_last<M: TextMeasure + ?Sized>(
    text: &str,
    font_size: f64,
    container: Rect,
    measure: &M,
) -> Option<CharPosition> {
    let count = text.chars().count();
    locate_character(text, count.checked_sub(1)?, font_size, container, measure)
}

/// Centers of every character in one pass, reusing prefix widths.
pub fn locate_all<M: TextMeasure + ?Sized>(
    text: &str,
    font_size: f64,
    container: Rect,
    measure: &M,
) -> Vec<CharPosition> {
    if text.is_empty() {
        return Vec::new();
    }
    let full = measure.measure(text, font_size);
    let text_left = container.left + (container.width - full) / 2.0;
    let (_, y) = container.center();

    let mut out = Vec::with_capacity(text.len());
    let mut before = 0.0;
    for (start, glyph) in text.char_indices() {
        let end = start + glyph.len_utf8();
        let through = measure.measure(&text[..end], font_size);
        out.push(CharPosition {
            x: text_left + before + (through - before) / 2.0,
            y,
            glyph,
        });
        before = through;
    }
    out
}
