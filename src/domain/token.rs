//! Key tokens and their fixed visual classification
//!
//! This module defines the closed set of symbolic tokens the keypad can
//! produce and the arithmetic operators behind them. It's completely pure
//! and testable without Win32.
//!
//! ## Design Principles
//! - **Closed set**: every input the controller can receive is one of these
//!   tokens; there is no "unknown key" case past the input layer
//! - **Enum-keyed styling**: each token maps to exactly one style class
//!   through a single lookup, never through label set-membership tests
//! - **Pure functions**: no I/O, no side effects

/// One of the four binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Applies the operator to two operands using f64 semantics
    ///
    /// Division by zero follows IEEE 754 and yields infinity or NaN,
    /// never an error.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
        }
    }

    /// Returns the keypad label for this operator
    pub fn label(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
        }
    }
}

/// A symbolic identifier for one logical calculator key
///
/// Tokens are produced by pointer hits on rendered keys and by the
/// physical-keyboard mapping, and consumed by the state-transition
/// function. Backspace is deliberately not a token: it is a
/// keyboard-only message with no rendered key (see `input`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Digit key 0-9
    Digit(u8),
    /// Decimal point key
    Decimal,
    /// Binary operator key
    Op(BinaryOp),
    /// Evaluate the pending operation
    Equals,
    /// Reset to the initial state
    Clear,
    /// Toggle the sign of the current display
    ToggleSign,
    /// Divide the current display by 100
    Percent,
}

/// Visual style class of a keypad key
///
/// Exactly three classes exist; the mapping from token to class is fixed
/// and carries no state dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    /// Arithmetic keys: ÷ × - + =
    Operator,
    /// State-modifier keys: AC ± %
    Modifier,
    /// Digits and the decimal point
    Digit,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Token {
    /// Returns the label rendered on this token's key
    pub fn label(&self) -> &'static str {
        match self {
            // Digits outside 0-9 are never constructed; fall back rather than panic
            Token::Digit(d) => DIGIT_LABELS.get(usize::from(*d)).copied().unwrap_or("0"),
            Token::Decimal => ".",
            Token::Op(op) => op.label(),
            Token::Equals => "=",
            Token::Clear => "AC",
            Token::ToggleSign => "±",
            Token::Percent => "%",
        }
    }

    /// Returns the fixed style class for this token
    pub fn style(&self) -> StyleClass {
        match self {
            Token::Op(_) | Token::Equals => StyleClass::Operator,
            Token::Clear | Token::ToggleSign | Token::Percent => StyleClass::Modifier,
            Token::Digit(_) | Token::Decimal => StyleClass::Digit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_arithmetic() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(BinaryOp::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(BinaryOp::Divide.apply(3.0, 2.0), 1.5);
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(BinaryOp::Divide.apply(9.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOp::Divide.apply(-9.0, 0.0), f64::NEG_INFINITY);
        assert!(BinaryOp::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn digit_labels() {
        for d in 0..10u8 {
            assert_eq!(Token::Digit(d).label(), d.to_string());
        }
    }

    #[test]
    fn symbol_labels() {
        assert_eq!(Token::Clear.label(), "AC");
        assert_eq!(Token::ToggleSign.label(), "±");
        assert_eq!(Token::Percent.label(), "%");
        assert_eq!(Token::Op(BinaryOp::Divide).label(), "÷");
        assert_eq!(Token::Op(BinaryOp::Multiply).label(), "×");
        assert_eq!(Token::Op(BinaryOp::Subtract).label(), "-");
        assert_eq!(Token::Op(BinaryOp::Add).label(), "+");
        assert_eq!(Token::Equals.label(), "=");
        assert_eq!(Token::Decimal.label(), ".");
    }

    #[test]
    fn style_classes_are_fixed() {
        assert_eq!(Token::Op(BinaryOp::Add).style(), StyleClass::Operator);
        assert_eq!(Token::Equals.style(), StyleClass::Operator);

        assert_eq!(Token::Clear.style(), StyleClass::Modifier);
        assert_eq!(Token::ToggleSign.style(), StyleClass::Modifier);
        assert_eq!(Token::Percent.style(), StyleClass::Modifier);

        for d in 0..10u8 {
            assert_eq!(Token::Digit(d).style(), StyleClass::Digit);
        }
        assert_eq!(Token::Decimal.style(), StyleClass::Digit);
    }
}
