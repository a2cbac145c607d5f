//! End-to-end flows through the controller, exercising both input
//! sources the way the window shell drives them.

use calcpad::app::controller::CalcController;
use calcpad::domain::core::Rect;
use calcpad::domain::token::{BinaryOp, Token};
use calcpad::input::keyboard::{key_msg_for_vk, KeyMsg};
use calcpad::ui::renderer::WidgetLayout;

fn new_controller() -> CalcController {
    let layout = WidgetLayout::new(Rect::new(0, 0, 320, 480), 1.0).unwrap();
    CalcController::new(layout)
}

/// Clicks the key carrying `token` at its center
fn click(controller: &mut CalcController, token: Token) {
    let key = controller
        .layout()
        .keypad()
        .keys()
        .find(|k| k.token == token)
        .unwrap_or_else(|| panic!("no key for {:?}", token));
    let hit = controller.handle_pointer(key.rect.x + key.rect.w / 2, key.rect.y + key.rect.h / 2);
    assert!(hit, "click on {:?} must register", token);
}

/// Types a virtual-key code the way the keyboard listener posts it
fn type_vk(controller: &mut CalcController, vk: u32, shift: bool) {
    let msg = key_msg_for_vk(vk, shift).expect("key must map");
    let msg = KeyMsg::from_raw(msg.to_raw()).expect("round-trip through window message");
    controller.handle_key(msg);
}

#[test]
fn pointer_driven_walkthrough() {
    let mut controller = new_controller();

    // 5 + 3 = → 8
    click(&mut controller, Token::Digit(5));
    click(&mut controller, Token::Op(BinaryOp::Add));
    click(&mut controller, Token::Digit(3));
    click(&mut controller, Token::Equals);
    assert_eq!(controller.state().display(), "8");

    // % → 0.08
    click(&mut controller, Token::Percent);
    assert_eq!(controller.state().display(), "0.08");

    // AC → 0
    click(&mut controller, Token::Clear);
    assert_eq!(controller.state().display(), "0");

    // 9 ÷ 0 = → Infinity
    click(&mut controller, Token::Digit(9));
    click(&mut controller, Token::Op(BinaryOp::Divide));
    click(&mut controller, Token::Digit(0));
    click(&mut controller, Token::Equals);
    assert_eq!(controller.state().display(), "Infinity");
}

#[test]
fn keyboard_driven_walkthrough() {
    let mut controller = new_controller();

    // "1" "2" Backspace leaves "1"
    type_vk(&mut controller, 0x31, false);
    type_vk(&mut controller, 0x32, false);
    type_vk(&mut controller, 0x08, false);
    assert_eq!(controller.state().raw_input(), "1");
    assert_eq!(controller.state().display(), "1");

    // Shift+'=' is "+", Enter evaluates
    type_vk(&mut controller, 0xbb, true);
    type_vk(&mut controller, 0x37, false);
    type_vk(&mut controller, 0x0d, false);
    assert_eq!(controller.state().display(), "8");
}

#[test]
fn numpad_division_by_zero() {
    let mut controller = new_controller();

    type_vk(&mut controller, 0x69, false); // numpad 9
    // "/" has no keypad label; divide must come from the rendered key
    click(&mut controller, Token::Op(BinaryOp::Divide));
    type_vk(&mut controller, 0x60, false); // numpad 0
    type_vk(&mut controller, 0x0d, false); // Enter
    assert_eq!(controller.state().display(), "Infinity");
}

#[test]
fn mixed_sources_decimal_entry() {
    let mut controller = new_controller();

    click(&mut controller, Token::Digit(3));
    type_vk(&mut controller, 0xbe, false); // '.'
    click(&mut controller, Token::Digit(1));
    type_vk(&mut controller, 0xbe, false); // second '.' is ignored
    click(&mut controller, Token::Digit(4));
    assert_eq!(controller.state().display(), "3.14");
}

#[test]
fn percent_then_digit_starts_fresh_entry() {
    let mut controller = new_controller();

    click(&mut controller, Token::Digit(8));
    click(&mut controller, Token::Percent);
    assert_eq!(controller.state().display(), "0.08");

    type_vk(&mut controller, 0x39, false); // "9" replaces, not appends
    assert_eq!(controller.state().display(), "9");
}
