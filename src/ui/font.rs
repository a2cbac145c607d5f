//! System font discovery and text rasterization
//!
//! Loads a TrueType font from a list of well-known system locations and
//! rasterizes single lines of text into a pixmap with ab_glyph. The
//! widget only ever draws onto opaque surfaces, so glyph coverage is
//! blended against an opaque destination.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

/// Well-known font locations, most preferred first
const FONT_CANDIDATES: &[&str] = &[
    // Windows
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\calibri.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
];

/// Font loading errors
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("No usable system font found ({candidates} locations tried)")]
    NotFound { candidates: usize },

    #[error("Font data at {path} could not be parsed")]
    Invalid { path: String },
}

/// A loaded UI font
pub struct UiFont {
    font: FontVec,
}

impl UiFont {
    /// Loads the first readable font from the candidate locations
    ///
    /// # Returns
    /// A usable font, or FontError::NotFound when no candidate exists
    pub fn load_system() -> Result<Self, FontError> {
        for path in FONT_CANDIDATES {
            let Ok(data) = std::fs::read(path) else {
                continue;
            };
            // A readable candidate that fails to parse is an error worth
            // surfacing rather than silently skipping
            let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
                path: (*path).to_string(),
            })?;
            return Ok(Self { font });
        }
        Err(FontError::NotFound {
            candidates: FONT_CANDIDATES.len(),
        })
    }

    /// Creates a font from raw TrueType data
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
            path: "<memory>".to_string(),
        })?;
        Ok(Self { font })
    }

    /// Measures the advance width of a line at the given pixel size
    pub fn line_width(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut previous = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Returns the ascent of the font at the given pixel size
    pub fn ascent(&self, px: f32) -> f32 {
        self.font.as_scaled(PxScale::from(px)).ascent()
    }

    /// Draws a line of text with its baseline at (`x`, `baseline_y`)
    ///
    /// Coverage is blended src-over against the destination, which is
    /// assumed opaque (the widget never draws text on transparency).
    pub fn draw_line(&self, pixmap: &mut Pixmap, text: &str, x: f32, baseline_y: f32, px: f32, color: ColorU8) {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut cursor = x;
        let mut previous = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                cursor += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(PxScale::from(px), point(cursor, baseline_y));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let width = pixmap.width() as i32;
                let height = pixmap.height() as i32;

                outlined.draw(|gx, gy, coverage| {
                    let px_x = bounds.min.x as i32 + gx as i32;
                    let px_y = bounds.min.y as i32 + gy as i32;
                    if px_x < 0 || px_y < 0 || px_x >= width || px_y >= height {
                        return;
                    }

                    let index = (px_y * width + px_x) as usize;
                    let pixels = pixmap.pixels_mut();
                    let dst = pixels[index];

                    let alpha = coverage.clamp(0.0, 1.0);
                    let blend = |src: u8, dst: u8| -> u8 {
                        (f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha)).round() as u8
                    };

                    let r = blend(color.red(), dst.red());
                    let g = blend(color.green(), dst.green());
                    let b = blend(color.blue(), dst.blue());
                    if let Some(out) = PremultipliedColorU8::from_rgba(r, g, b, 255) {
                        pixels[index] = out;
                    }
                });
            }

            cursor += scaled.h_advance(id);
            previous = Some(id);
        }
    }
}
