//! Widget controller and input binding
//!
//! The controller owns the calculator state and the widget layout,
//! translating both input sources (pointer clicks on rendered keys and
//! translated keyboard messages) into tokens for the state machine. It
//! reports whether each event changed anything so the shell knows when
//! to repaint.

use tracing::debug;

use crate::app::state::CalcState;
use crate::domain::token::Token;
use crate::input::keyboard::KeyMsg;
use crate::ui::renderer::WidgetLayout;

/// Controller binding input events to calculator state transitions
pub struct CalcController {
    state: CalcState,
    layout: WidgetLayout,
}

impl CalcController {
    /// Creates a controller with the initial calculator state
    pub fn new(layout: WidgetLayout) -> Self {
        Self {
            state: CalcState::new(),
            layout,
        }
    }

    /// Returns the current calculator state
    pub fn state(&self) -> &CalcState {
        &self.state
    }

    /// Returns the widget layout
    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    /// Applies a key token
    ///
    /// # Returns
    /// true if the widget should repaint
    pub fn handle_token(&mut self, token: Token) -> bool {
        self.state = std::mem::take(&mut self.state).apply(token);
        debug!(key = token.label(), display = self.state.display(), "token applied");
        true
    }

    /// Applies a translated keyboard message
    ///
    /// # Returns
    /// true if the widget should repaint
    pub fn handle_key(&mut self, msg: KeyMsg) -> bool {
        match msg {
            KeyMsg::Press(token) => self.handle_token(token),
            KeyMsg::Backspace => {
                self.state = std::mem::take(&mut self.state).backspace();
                debug!(display = self.state.display(), "backspace applied");
                true
            }
        }
    }

    /// Hit-tests a pointer position and applies the key under it
    ///
    /// # Arguments
    /// * `px`, `py` - Pointer position in canvas pixels
    ///
    /// # Returns
    /// true if a key was hit and the widget should repaint
    pub fn handle_pointer(&mut self, px: i32, py: i32) -> bool {
        match self.layout.keypad().hit_test(px, py) {
            Some(token) => self.handle_token(token),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Rect;
    use crate::domain::token::BinaryOp;

    fn test_controller() -> CalcController {
        let layout = WidgetLayout::new(Rect::new(0, 0, 320, 480), 1.0).unwrap();
        CalcController::new(layout)
    }

    fn key_center(controller: &CalcController, token: Token) -> (i32, i32) {
        let key = controller
            .layout()
            .keypad()
            .keys()
            .find(|k| k.token == token)
            .unwrap();
        (key.rect.x + key.rect.w / 2, key.rect.y + key.rect.h / 2)
    }

    #[test]
    fn starts_in_initial_state() {
        let controller = test_controller();
        assert_eq!(controller.state().display(), "0");
    }

    #[test]
    fn tokens_reach_the_state_machine() {
        let mut controller = test_controller();
        assert!(controller.handle_token(Token::Digit(4)));
        assert!(controller.handle_token(Token::Digit(2)));
        assert_eq!(controller.state().display(), "42");
    }

    #[test]
    fn pointer_clicks_resolve_to_keys() {
        let mut controller = test_controller();

        for token in [
            Token::Digit(5),
            Token::Op(BinaryOp::Add),
            Token::Digit(3),
            Token::Equals,
        ] {
            let (cx, cy) = key_center(&controller, token);
            assert!(controller.handle_pointer(cx, cy));
        }
        assert_eq!(controller.state().display(), "8");
    }

    #[test]
    fn pointer_clicks_outside_keys_are_ignored() {
        let mut controller = test_controller();

        // The display region holds no keys
        assert!(!controller.handle_pointer(10, 10));
        assert_eq!(controller.state().display(), "0");
    }

    #[test]
    fn keyboard_messages_apply() {
        let mut controller = test_controller();

        controller.handle_key(KeyMsg::Press(Token::Digit(1)));
        controller.handle_key(KeyMsg::Press(Token::Digit(2)));
        controller.handle_key(KeyMsg::Backspace);
        assert_eq!(controller.state().display(), "1");
        assert_eq!(controller.state().raw_input(), "1");
    }

    #[test]
    fn both_input_sources_share_one_state() {
        let mut controller = test_controller();

        let (cx, cy) = key_center(&controller, Token::Digit(7));
        controller.handle_pointer(cx, cy);
        controller.handle_key(KeyMsg::Press(Token::Digit(0)));
        assert_eq!(controller.state().display(), "70");
    }
}
