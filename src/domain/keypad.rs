//! Keypad geometry and key-cell calculations
//!
//! This module handles the logical keypad representation for the widget.
//! It maps the fixed 19-key layout onto a panel rectangle and resolves
//! pointer positions back to tokens.

use crate::domain::core::Rect;
use crate::domain::token::{BinaryOp, Token};

/// Number of keypad columns
pub const COLUMNS: i32 = 4;
/// Number of keypad rows
pub const ROWS: i32 = 5;

/// The fixed keypad layout: token, row, column, column span
///
/// Mirrors the visual arrangement:
///
/// ```text
/// AC  ±  %  ÷
///  7  8  9  ×
///  4  5  6  -
///  1  2  3  +
///  0     .  =
/// ```
const LAYOUT: [(Token, i32, i32, i32); 19] = [
    (Token::Clear, 0, 0, 1),
    (Token::ToggleSign, 0, 1, 1),
    (Token::Percent, 0, 2, 1),
    (Token::Op(BinaryOp::Divide), 0, 3, 1),
    (Token::Digit(7), 1, 0, 1),
    (Token::Digit(8), 1, 1, 1),
    (Token::Digit(9), 1, 2, 1),
    (Token::Op(BinaryOp::Multiply), 1, 3, 1),
    (Token::Digit(4), 2, 0, 1),
    (Token::Digit(5), 2, 1, 1),
    (Token::Digit(6), 2, 2, 1),
    (Token::Op(BinaryOp::Subtract), 2, 3, 1),
    (Token::Digit(1), 3, 0, 1),
    (Token::Digit(2), 3, 1, 1),
    (Token::Digit(3), 3, 2, 1),
    (Token::Op(BinaryOp::Add), 3, 3, 1),
    // "0" spans two columns
    (Token::Digit(0), 4, 0, 2),
    (Token::Decimal, 4, 2, 1),
    (Token::Equals, 4, 3, 1),
];

/// Errors that can occur during keypad construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadError {
    /// Panel area is too small for minimum key requirements
    PanelTooSmall {
        panel_width: i32,
        panel_height: i32,
        min_key_width: i32,
        min_key_height: i32,
    },
}

impl std::fmt::Display for KeypadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeypadError::PanelTooSmall {
                panel_width,
                panel_height,
                min_key_width,
                min_key_height,
            } => write!(
                f,
                "panel {}x{} too small for {}x{} minimum keys",
                panel_width, panel_height, min_key_width, min_key_height
            ),
        }
    }
}

impl std::error::Error for KeypadError {}

/// One rendered keypad key: its token and pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub token: Token,
    pub rect: Rect,
}

/// The fixed 4-column keypad laid out over a panel rectangle
///
/// The keypad divides the panel into a 4x5 cell grid and places the 19
/// keys into it, with the "0" key spanning two cells. Each key rectangle
/// is the cell (or merged cells) inset by a uniform gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    panel: Rect,
    cell_width: i32,
    cell_height: i32,
    gap: i32,
}

impl Keypad {
    /// Minimum key width in pixels
    pub const MIN_KEY_WIDTH: i32 = 24;
    /// Minimum key height in pixels
    pub const MIN_KEY_HEIGHT: i32 = 20;

    /// Creates a keypad covering the specified panel area
    ///
    /// # Arguments
    /// * `panel` - Pixel rectangle the keypad will cover
    ///
    /// # Returns
    /// A new Keypad instance or KeypadError if the panel is too small
    pub fn new(panel: Rect) -> Result<Self, KeypadError> {
        let cell_width = panel.w / COLUMNS;
        let cell_height = panel.h / ROWS;

        if cell_width < Self::MIN_KEY_WIDTH || cell_height < Self::MIN_KEY_HEIGHT {
            return Err(KeypadError::PanelTooSmall {
                panel_width: panel.w,
                panel_height: panel.h,
                min_key_width: Self::MIN_KEY_WIDTH,
                min_key_height: Self::MIN_KEY_HEIGHT,
            });
        }

        // Gap scales with cell size but never collapses to zero
        let gap = (cell_width.min(cell_height) / 16).max(1);

        Ok(Self {
            panel,
            cell_width,
            cell_height,
            gap,
        })
    }

    /// Returns the panel area this keypad covers
    pub fn panel(&self) -> Rect {
        self.panel
    }

    /// Returns the number of keys in the layout
    pub fn key_count() -> usize {
        LAYOUT.len()
    }

    /// Returns every key with its computed pixel rectangle, in layout order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        LAYOUT.iter().map(|&(token, row, col, span)| Key {
            token,
            rect: self.slot_rect(row, col, span),
        })
    }

    /// Resolves a pointer position to the token of the key under it
    ///
    /// # Arguments
    /// * `px`, `py` - Pointer position in the same pixel space as the panel
    ///
    /// # Returns
    /// The token whose key rectangle contains the point, or None if the
    /// point falls outside every key (gaps included)
    pub fn hit_test(&self, px: i32, py: i32) -> Option<Token> {
        self.keys()
            .find(|key| key.rect.contains_point(px, py))
            .map(|key| key.token)
    }

    /// Computes the pixel rectangle for a layout slot
    fn slot_rect(&self, row: i32, col: i32, span: i32) -> Rect {
        let cell = Rect::new(
            self.panel.x + col * self.cell_width,
            self.panel.y + row * self.cell_height,
            span * self.cell_width,
            self.cell_height,
        );
        cell.inset(self.gap)
    }
}
