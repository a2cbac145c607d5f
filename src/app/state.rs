//! Calculator state and key-token transitions
//!
//! Defines the calculator's single state entity and the deterministic
//! transition applied for every key token. Transitions are synchronous,
//! perform no I/O, and cannot fail: tokens come from a closed set and
//! f64 arithmetic never throws.

use crate::domain::number::{format_value, parse_display};
use crate::domain::token::{BinaryOp, Token};

/// The captured left operand and operator awaiting the right operand
///
/// Encoding both in one struct makes "operator set iff value set" hold
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pending {
    pub value: f64,
    pub op: BinaryOp,
}

/// Complete state of the calculator widget
///
/// Created with defaults at widget mount, mutated only through
/// [`CalcState::apply`] and [`CalcState::backspace`], discarded at
/// unmount. There is no persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcState {
    /// Text shown as the primary value
    display: String,
    /// Pending operation captured when a binary operator was pressed
    pending: Option<Pending>,
    /// Literal digits/decimal point typed since the last
    /// operator/result/clear; supports Backspace and "." de-duplication
    raw_input: String,
    /// True immediately after "=" or "%" produced a value; the next
    /// digit then starts a fresh number instead of appending
    showing_result: bool,
}

impl Default for CalcState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcState {
    /// Creates the initial state: display "0", nothing pending
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            raw_input: String::new(),
            showing_result: false,
        }
    }

    /// Returns the primary display text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the pending operation, if a binary operator was pressed
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Returns the secondary display line: `"{value} {op}"`, or None
    /// when no operation is in progress
    pub fn pending_line(&self) -> Option<String> {
        self.pending
            .map(|p| format!("{} {}", format_value(p.value), p.op.label()))
    }

    /// Returns the in-progress literal entry
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Returns true if the display currently shows a computed result
    pub fn is_showing_result(&self) -> bool {
        self.showing_result
    }

    /// Processes a key token and returns the new state
    ///
    /// # Arguments
    /// * `token` - Token to process
    ///
    /// # Returns
    /// New calculator state after processing the token
    pub fn apply(self, token: Token) -> CalcState {
        let CalcState {
            display,
            pending,
            mut raw_input,
            showing_result,
        } = self;

        match token {
            Token::Clear => CalcState::new(),

            Token::ToggleSign => {
                let toggled = toggle_sign_text(&display);
                // Asymmetry preserved from the observed widget: raw input
                // is only mirrored while a result is showing, so a digit
                // typed next continues editing the negated result
                if showing_result {
                    raw_input = toggled.clone();
                }
                CalcState {
                    display: toggled,
                    pending,
                    raw_input,
                    showing_result,
                }
            }

            Token::Percent => {
                let scaled = format_value(parse_display(&display) / 100.0);
                CalcState {
                    display: scaled.clone(),
                    // Pending operation is deliberately untouched
                    pending,
                    raw_input: scaled,
                    showing_result: true,
                }
            }

            Token::Op(op) => CalcState {
                pending: Some(Pending {
                    value: parse_display(&display),
                    op,
                }),
                display,
                raw_input: String::new(),
                showing_result: false,
            },

            Token::Equals => match pending {
                // Without a captured operand, "=" is a no-op
                None => CalcState {
                    display,
                    pending,
                    raw_input,
                    showing_result,
                },
                Some(p) => {
                    let result = p.op.apply(p.value, parse_display(&display));
                    CalcState {
                        display: format_value(result),
                        pending: None,
                        raw_input: String::new(),
                        showing_result: true,
                    }
                }
            },

            Token::Decimal => {
                if raw_input.contains('.') {
                    return CalcState {
                        display,
                        pending,
                        raw_input,
                        showing_result,
                    };
                }
                raw_input.push('.');
                CalcState {
                    display: raw_input.clone(),
                    pending,
                    raw_input,
                    showing_result: false,
                }
            }

            Token::Digit(d) => {
                let digit = char::from_digit(u32::from(d), 10).unwrap_or('0');
                if showing_result {
                    raw_input = digit.to_string();
                } else {
                    raw_input.push(digit);
                }
                CalcState {
                    display: raw_input.clone(),
                    pending,
                    raw_input,
                    showing_result: false,
                }
            }
        }
    }

    /// Processes the keyboard-only Backspace and returns the new state
    ///
    /// Ignored while a result is showing or when nothing has been typed;
    /// otherwise drops the last character of the current entry.
    pub fn backspace(self) -> CalcState {
        if self.showing_result || self.raw_input.is_empty() {
            return self;
        }
        let CalcState {
            pending,
            mut raw_input,
            showing_result,
            ..
        } = self;
        raw_input.pop();
        let display = if raw_input.is_empty() {
            "0".to_string()
        } else {
            raw_input.clone()
        };
        CalcState {
            display,
            pending,
            raw_input,
            showing_result,
        }
    }
}

/// Toggles a leading "-" on the display text
fn toggle_sign_text(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(tokens: &[Token]) -> CalcState {
        tokens
            .iter()
            .fold(CalcState::new(), |state, &t| state.apply(t))
    }

    fn digits(text: &str) -> Vec<Token> {
        text.chars()
            .map(|c| match c {
                '.' => Token::Decimal,
                d => Token::Digit(d.to_digit(10).unwrap() as u8),
            })
            .collect()
    }

    #[test]
    fn initial_state() {
        let state = CalcState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.pending(), None);
        assert_eq!(state.raw_input(), "");
        assert!(!state.is_showing_result());
    }

    #[test]
    fn digits_concatenate() {
        let state = press_all(&digits("123"));
        assert_eq!(state.display(), "123");
        assert_eq!(state.raw_input(), "123");
    }

    #[test]
    fn leading_zeros_are_kept_verbatim() {
        // The entry is a literal; "00" really displays as "00"
        let state = press_all(&digits("007"));
        assert_eq!(state.display(), "007");
    }

    #[test]
    fn decimal_point_appends_once() {
        let state = press_all(&digits("1.5"));
        assert_eq!(state.display(), "1.5");

        let state = state.apply(Token::Decimal).apply(Token::Digit(2));
        assert_eq!(state.display(), "1.52");
        assert_eq!(state.raw_input().matches('.').count(), 1);
    }

    #[test]
    fn leading_decimal_point_starts_entry() {
        let state = CalcState::new().apply(Token::Decimal);
        assert_eq!(state.display(), ".");
        assert_eq!(state.raw_input(), ".");
    }

    #[test]
    fn addition_evaluates_on_equals() {
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
        ]);
        assert_eq!(state.display(), "8");
        assert_eq!(state.pending(), None);
        assert!(state.is_showing_result());
    }

    #[test]
    fn all_operators_match_f64_arithmetic() {
        let cases = [
            (7.0, BinaryOp::Add, 2.5),
            (7.0, BinaryOp::Subtract, 2.5),
            (7.0, BinaryOp::Multiply, 2.5),
            (7.0, BinaryOp::Divide, 2.5),
        ];
        for (a, op, b) in cases {
            let state = press_all(&digits(&a.to_string()))
                .apply(Token::Op(op))
                .apply(Token::Digit(2))
                .apply(Token::Decimal)
                .apply(Token::Digit(5))
                .apply(Token::Equals);
            assert_eq!(state.display(), format_value(op.apply(a, b)));
        }
    }

    #[test]
    fn division_by_zero_displays_infinity() {
        let state = press_all(&[
            Token::Digit(9),
            Token::Op(BinaryOp::Divide),
            Token::Digit(0),
            Token::Equals,
        ]);
        assert_eq!(state.display(), "Infinity");
    }

    #[test]
    fn zero_divided_by_zero_displays_nan() {
        let state = press_all(&[
            Token::Digit(0),
            Token::Op(BinaryOp::Divide),
            Token::Digit(0),
            Token::Equals,
        ]);
        assert_eq!(state.display(), "NaN");
    }

    #[test]
    fn equals_without_pending_is_noop() {
        let typed = press_all(&digits("42"));
        let after = typed.clone().apply(Token::Equals);
        assert_eq!(after, typed);
    }

    #[test]
    fn operator_captures_display_and_clears_entry() {
        let state = press_all(&digits("12")).apply(Token::Op(BinaryOp::Multiply));
        assert_eq!(
            state.pending(),
            Some(Pending {
                value: 12.0,
                op: BinaryOp::Multiply
            })
        );
        assert_eq!(state.raw_input(), "");
        // Display still shows the captured operand until a digit arrives
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn second_operator_overwrites_without_evaluating() {
        // 5 + 3 × must NOT fold into 8 ×; it captures 3 × instead
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Op(BinaryOp::Multiply),
        ]);
        assert_eq!(
            state.pending(),
            Some(Pending {
                value: 3.0,
                op: BinaryOp::Multiply
            })
        );
        assert_eq!(state.display(), "3");
    }

    #[test]
    fn pending_line_shows_value_and_operator() {
        let state = press_all(&digits("5")).apply(Token::Op(BinaryOp::Add));
        assert_eq!(state.pending_line(), Some("5 +".to_string()));

        let state = state.apply(Token::Digit(3)).apply(Token::Equals);
        assert_eq!(state.pending_line(), None);
    }

    #[test]
    fn clear_restores_initial_state_from_anywhere() {
        let states = [
            press_all(&digits("123.45")),
            press_all(&[Token::Digit(5), Token::Op(BinaryOp::Add), Token::Digit(3)]),
            press_all(&[
                Token::Digit(9),
                Token::Op(BinaryOp::Divide),
                Token::Digit(0),
                Token::Equals,
            ]),
            CalcState::new().apply(Token::ToggleSign),
        ];
        for state in states {
            assert_eq!(state.apply(Token::Clear), CalcState::new());
        }
    }

    #[test]
    fn toggle_sign_twice_is_identity() {
        let state = press_all(&digits("42"));
        let toggled = state.clone().apply(Token::ToggleSign);
        assert_eq!(toggled.display(), "-42");
        let back = toggled.apply(Token::ToggleSign);
        assert_eq!(back.display(), "42");
    }

    #[test]
    fn toggle_sign_leaves_raw_input_while_typing() {
        // Mid-entry, only the display is negated
        let state = press_all(&digits("42")).apply(Token::ToggleSign);
        assert_eq!(state.display(), "-42");
        assert_eq!(state.raw_input(), "42");
    }

    #[test]
    fn toggle_sign_mirrors_raw_input_after_result() {
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
            Token::ToggleSign,
        ]);
        assert_eq!(state.display(), "-8");
        assert_eq!(state.raw_input(), "-8");

        // The mirrored entry is what "." extends: the result still shows,
        // so a bare digit would replace it, but a decimal point appends
        let state = state.apply(Token::Decimal).apply(Token::Digit(5));
        assert_eq!(state.display(), "-8.5");
    }

    #[test]
    fn digit_after_toggled_result_still_replaces() {
        // "±" does not clear the showing-result flag, so a digit starts
        // a fresh number even on the negated result
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
            Token::ToggleSign,
            Token::Digit(1),
        ]);
        assert_eq!(state.display(), "1");
    }

    #[test]
    fn percent_divides_display_by_hundred() {
        let state = press_all(&digits("8")).apply(Token::Percent);
        assert_eq!(state.display(), "0.08");
        assert_eq!(state.raw_input(), "0.08");
        assert!(state.is_showing_result());
    }

    #[test]
    fn percent_leaves_pending_untouched() {
        let state = press_all(&[Token::Digit(5), Token::Op(BinaryOp::Add), Token::Digit(3)])
            .apply(Token::Percent);
        assert_eq!(
            state.pending(),
            Some(Pending {
                value: 5.0,
                op: BinaryOp::Add
            })
        );
    }

    #[test]
    fn digit_after_result_starts_fresh_number() {
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
            Token::Digit(9),
        ]);
        assert_eq!(state.display(), "9");
        assert_eq!(state.raw_input(), "9");
    }

    #[test]
    fn digit_after_percent_replaces_number() {
        let state = press_all(&digits("8"))
            .apply(Token::Percent)
            .apply(Token::Digit(9));
        assert_eq!(state.display(), "9");
    }

    #[test]
    fn backspace_drops_last_character() {
        let state = press_all(&digits("12")).backspace();
        assert_eq!(state.raw_input(), "1");
        assert_eq!(state.display(), "1");
    }

    #[test]
    fn backspace_on_single_character_shows_zero() {
        let state = press_all(&digits("7")).backspace();
        assert_eq!(state.raw_input(), "");
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn backspace_ignored_while_showing_result() {
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
        ]);
        let after = state.clone().backspace();
        assert_eq!(after, state);
    }

    #[test]
    fn backspace_ignored_on_empty_entry() {
        let state = CalcState::new().backspace();
        assert_eq!(state, CalcState::new());
    }

    #[test]
    fn chained_calculation_via_result() {
        // The result of 5+3 can be used as the left operand of the next op
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
            Token::Op(BinaryOp::Multiply),
            Token::Digit(2),
            Token::Equals,
        ]);
        assert_eq!(state.display(), "16");
    }

    #[test]
    fn full_scenario_walkthrough() {
        // 5 + 3 = → 8
        let state = press_all(&[
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
        ]);
        assert_eq!(state.display(), "8");

        // % → 0.08
        let state = state.apply(Token::Percent);
        assert_eq!(state.display(), "0.08");

        // AC → 0
        let state = state.apply(Token::Clear);
        assert_eq!(state.display(), "0");

        // 9 ÷ 0 = → Infinity
        let state = state
            .apply(Token::Digit(9))
            .apply(Token::Op(BinaryOp::Divide))
            .apply(Token::Digit(0))
            .apply(Token::Equals);
        assert_eq!(state.display(), "Infinity");
    }
}
