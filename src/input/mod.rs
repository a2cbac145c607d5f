pub mod keyboard;

#[cfg(windows)]
pub mod capture;

pub use keyboard::{key_msg_for_vk, KeyMsg};

#[cfg(windows)]
pub use capture::{KeyboardListener, KeyboardListenerError, WM_CALCPAD_KEY};
