//! Widget rendering for the calculator window
//!
//! Implements the two-line display and keypad visualization using
//! tiny-skia for rendering and ab_glyph for text. Separates layout
//! calculation from rendering for better testability.

use tiny_skia::{Color, ColorU8, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::app::state::CalcState;
use crate::domain::core::Rect;
use crate::domain::keypad::{Keypad, KeypadError};
use crate::domain::token::StyleClass;
use crate::ui::font::UiFont;

/// Layout errors
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: i32, height: i32 },

    #[error(transparent)]
    Keypad(#[from] KeypadError),
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,
}

/// Widget color scheme
///
/// Key colors are a pure function of the key's style class; nothing
/// here depends on calculator state.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub primary_text: ColorU8,
    pub secondary_text: ColorU8,
    operator_fill: Color,
    operator_text: ColorU8,
    modifier_fill: Color,
    modifier_text: ColorU8,
    digit_fill: Color,
    digit_text: ColorU8,
}

impl Theme {
    /// The default dark theme
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgba8(0, 0, 0, 255),
            primary_text: ColorU8::from_rgba(255, 255, 255, 255),
            secondary_text: ColorU8::from_rgba(156, 163, 175, 255),
            operator_fill: Color::from_rgba8(249, 115, 22, 255),
            operator_text: ColorU8::from_rgba(255, 255, 255, 255),
            modifier_fill: Color::from_rgba8(209, 213, 219, 255),
            modifier_text: ColorU8::from_rgba(17, 17, 17, 255),
            digit_fill: Color::from_rgba8(107, 114, 128, 255),
            digit_text: ColorU8::from_rgba(255, 255, 255, 255),
        }
    }

    /// Returns the fill color for a key style class
    pub fn key_fill(&self, style: StyleClass) -> Color {
        match style {
            StyleClass::Operator => self.operator_fill,
            StyleClass::Modifier => self.modifier_fill,
            StyleClass::Digit => self.digit_fill,
        }
    }

    /// Returns the label color for a key style class
    pub fn key_text(&self, style: StyleClass) -> ColorU8 {
        match style {
            StyleClass::Operator => self.operator_text,
            StyleClass::Modifier => self.modifier_text,
            StyleClass::Digit => self.digit_text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Pre-calculated widget layout
///
/// Splits the canvas into the display region and the keypad panel and
/// derives the text sizes from the UI scale. This contains all the
/// geometric information needed to render the widget and to hit-test
/// pointer input, independent of any rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetLayout {
    /// Overall canvas area
    canvas: Rect,
    /// Display region above the keypad
    display_area: Rect,
    /// Keypad occupying the rest of the canvas
    keypad: Keypad,
    /// Primary display text size in pixels
    primary_px: f32,
    /// Secondary (pending line) text size in pixels
    secondary_px: f32,
    /// Key label text size in pixels
    label_px: f32,
    /// Inner padding of the display region in pixels
    padding_px: f32,
}

impl WidgetLayout {
    /// Creates a layout for a canvas at the given UI scale
    ///
    /// # Arguments
    /// * `canvas` - Canvas rectangle in real pixels
    /// * `scale` - UI scale factor (DPI scale times user scale)
    ///
    /// # Returns
    /// A new layout or LayoutError if the canvas cannot hold the widget
    pub fn new(canvas: Rect, scale: f32) -> Result<Self, LayoutError> {
        if canvas.w <= 0 || canvas.h <= 0 {
            return Err(LayoutError::InvalidCanvas {
                width: canvas.w,
                height: canvas.h,
            });
        }

        // Display takes the top ~30% of the canvas, keypad the rest
        let display_height = canvas.h * 3 / 10;
        let display_area = Rect::new(canvas.x, canvas.y, canvas.w, display_height);
        let panel = Rect::new(
            canvas.x,
            canvas.y + display_height,
            canvas.w,
            canvas.h - display_height,
        );
        let keypad = Keypad::new(panel)?;

        Ok(Self {
            canvas,
            display_area,
            keypad,
            primary_px: (40.0 * scale).max(24.0),
            secondary_px: (16.0 * scale).max(10.0),
            label_px: (22.0 * scale).max(12.0),
            padding_px: (12.0 * scale).max(6.0),
        })
    }

    /// Returns the overall canvas area
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Returns the display region
    pub fn display_area(&self) -> Rect {
        self.display_area
    }

    /// Returns the keypad
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}

/// Widget renderer producing an RGBA pixmap from the current state
pub struct WidgetRenderer {
    font: UiFont,
    theme: Theme,
}

impl WidgetRenderer {
    /// Creates a renderer drawing with the given font and default theme
    pub fn new(font: UiFont) -> Self {
        Self {
            font,
            theme: Theme::dark(),
        }
    }

    /// Renders the widget to a pixmap
    pub fn render(&self, layout: &WidgetLayout, state: &CalcState) -> Result<Pixmap, RendererError> {
        let canvas = layout.canvas();
        let mut pixmap = Pixmap::new(canvas.w as u32, canvas.h as u32)
            .ok_or(RendererError::PixmapCreationFailed)?;

        pixmap.fill(self.theme.background);

        self.render_display(&mut pixmap, layout, state);
        self.render_keypad(&mut pixmap, layout);

        Ok(pixmap)
    }

    /// Draws the secondary and primary display lines, right-aligned
    fn render_display(&self, pixmap: &mut Pixmap, layout: &WidgetLayout, state: &CalcState) {
        let area = layout.display_area();
        let right = area.right() as f32 - layout.padding_px;
        let primary_baseline = area.bottom() as f32 - layout.padding_px;

        if let Some(pending) = state.pending_line() {
            let width = self.font.line_width(&pending, layout.secondary_px);
            let baseline = primary_baseline - self.font.ascent(layout.primary_px) - layout.padding_px / 2.0;
            self.font.draw_line(
                pixmap,
                &pending,
                right - width,
                baseline,
                layout.secondary_px,
                self.theme.secondary_text,
            );
        }

        let display = state.display();
        let width = self.font.line_width(display, layout.primary_px);
        self.font.draw_line(
            pixmap,
            display,
            right - width,
            primary_baseline,
            layout.primary_px,
            self.theme.primary_text,
        );
    }

    /// Draws every key as a rounded rectangle with a centered label
    fn render_keypad(&self, pixmap: &mut Pixmap, layout: &WidgetLayout) {
        for key in layout.keypad().keys() {
            let style = key.token.style();
            fill_round_rect(pixmap, key.rect, self.theme.key_fill(style));

            let label = key.token.label();
            let width = self.font.line_width(label, layout.label_px);
            let cx = key.rect.x as f32 + key.rect.w as f32 / 2.0;
            let cy = key.rect.y as f32 + key.rect.h as f32 / 2.0;
            // Optical centering: baseline sits a bit below the midline
            let baseline = cy + layout.label_px * 0.35;
            self.font.draw_line(
                pixmap,
                label,
                cx - width / 2.0,
                baseline,
                layout.label_px,
                self.theme.key_text(style),
            );
        }
    }
}

/// Fills a rounded rectangle
fn fill_round_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    if rect.w <= 0 || rect.h <= 0 {
        return;
    }

    let (x, y) = (rect.x as f32, rect.y as f32);
    let (w, h) = (rect.w as f32, rect.h as f32);
    let radius = (w.min(h) / 4.0).max(1.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + radius, y);
    pb.line_to(x + w - radius, y);
    pb.quad_to(x + w, y, x + w, y + radius);
    pb.line_to(x + w, y + h - radius);
    pb.quad_to(x + w, y + h, x + w - radius, y + h);
    pb.line_to(x + radius, y + h);
    pb.quad_to(x, y + h, x, y + h - radius);
    pb.line_to(x, y + radius);
    pb.quad_to(x, y, x + radius, y);
    pb.close();

    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Converts a pixmap to BGRA bytes for a Win32 DIB blit
///
/// tiny-skia stores RGBA; GDI expects the blue channel first.
pub fn pixmap_to_bgra(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.data().chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }
    out
}
