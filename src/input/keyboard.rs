//! Physical keyboard mapping for the calculator widget
//!
//! Translates virtual-key codes into calculator key messages. The
//! mapping is pure and testable without Win32; the hook that feeds it
//! lives in `capture`.
//!
//! Only keys whose produced character equals a keypad label are mapped
//! (digits, ".", "+", "-", "%", "="), plus Enter for "=" and Backspace.
//! Everything else is ignored — including "*" and "/", whose characters
//! are not keypad labels.

use crate::domain::token::{BinaryOp, Token};

/// A translated physical-keyboard event
///
/// Backspace is not a [`Token`]: the keypad renders no key for it, but
/// the controller still handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMsg {
    /// A key that corresponds to a keypad token
    Press(Token),
    /// The keyboard-only Backspace
    Backspace,
}

// Virtual-key codes used by the mapping (US layout for the OEM keys)
const VK_BACK: u32 = 0x08;
const VK_RETURN: u32 = 0x0d;
const VK_KEY_0: u32 = 0x30;
const VK_KEY_5: u32 = 0x35;
const VK_KEY_9: u32 = 0x39;
const VK_NUMPAD_0: u32 = 0x60;
const VK_NUMPAD_9: u32 = 0x69;
const VK_ADD: u32 = 0x6b;
const VK_SUBTRACT: u32 = 0x6d;
const VK_DECIMAL: u32 = 0x6e;
const VK_OEM_PLUS: u32 = 0xbb; // '=' unshifted, '+' shifted
const VK_OEM_MINUS: u32 = 0xbd; // '-' unshifted
const VK_OEM_PERIOD: u32 = 0xbe; // '.' unshifted

/// Converts a virtual-key code plus shift state to a key message
///
/// # Arguments
/// * `vk_code` - Windows virtual-key code of the pressed key
/// * `shift` - Whether a Shift key was held
///
/// # Returns
/// The corresponding key message, or None for keys that don't map to
/// any keypad label
pub fn key_msg_for_vk(vk_code: u32, shift: bool) -> Option<KeyMsg> {
    let press = |token| Some(KeyMsg::Press(token));

    match (vk_code, shift) {
        (VK_BACK, _) => Some(KeyMsg::Backspace),
        (VK_RETURN, _) => press(Token::Equals),

        // Main-row digits; shifted they produce punctuation, of which
        // only Shift+5 = "%" is a keypad label
        (VK_KEY_0..=VK_KEY_9, false) => press(Token::Digit((vk_code - VK_KEY_0) as u8)),
        (VK_KEY_5, true) => press(Token::Percent),

        // Numeric keypad; shift state is irrelevant there
        (VK_NUMPAD_0..=VK_NUMPAD_9, _) => press(Token::Digit((vk_code - VK_NUMPAD_0) as u8)),
        (VK_ADD, _) => press(Token::Op(BinaryOp::Add)),
        (VK_SUBTRACT, _) => press(Token::Op(BinaryOp::Subtract)),
        (VK_DECIMAL, _) => press(Token::Decimal),

        (VK_OEM_PLUS, false) => press(Token::Equals),
        (VK_OEM_PLUS, true) => press(Token::Op(BinaryOp::Add)),
        (VK_OEM_MINUS, false) => press(Token::Op(BinaryOp::Subtract)),
        (VK_OEM_PERIOD, false) => press(Token::Decimal),

        _ => None,
    }
}

impl KeyMsg {
    /// Encodes the message into a word for posting through a window message
    pub fn to_raw(self) -> usize {
        match self {
            KeyMsg::Backspace => 0,
            KeyMsg::Press(Token::Digit(d)) => 1 + usize::from(d),
            KeyMsg::Press(Token::Decimal) => 11,
            KeyMsg::Press(Token::Op(BinaryOp::Add)) => 12,
            KeyMsg::Press(Token::Op(BinaryOp::Subtract)) => 13,
            KeyMsg::Press(Token::Op(BinaryOp::Multiply)) => 14,
            KeyMsg::Press(Token::Op(BinaryOp::Divide)) => 15,
            KeyMsg::Press(Token::Equals) => 16,
            KeyMsg::Press(Token::Clear) => 17,
            KeyMsg::Press(Token::ToggleSign) => 18,
            KeyMsg::Press(Token::Percent) => 19,
        }
    }

    /// Decodes a word previously produced by [`KeyMsg::to_raw`]
    pub fn from_raw(raw: usize) -> Option<KeyMsg> {
        let msg = match raw {
            0 => KeyMsg::Backspace,
            1..=10 => KeyMsg::Press(Token::Digit((raw - 1) as u8)),
            11 => KeyMsg::Press(Token::Decimal),
            12 => KeyMsg::Press(Token::Op(BinaryOp::Add)),
            13 => KeyMsg::Press(Token::Op(BinaryOp::Subtract)),
            14 => KeyMsg::Press(Token::Op(BinaryOp::Multiply)),
            15 => KeyMsg::Press(Token::Op(BinaryOp::Divide)),
            16 => KeyMsg::Press(Token::Equals),
            17 => KeyMsg::Press(Token::Clear),
            18 => KeyMsg::Press(Token::ToggleSign),
            19 => KeyMsg::Press(Token::Percent),
            _ => return None,
        };
        Some(msg)
    }
}
