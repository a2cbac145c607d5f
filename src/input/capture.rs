//! Process-wide keyboard listener for the widget window
//!
//! Installs a low-level keyboard hook for exactly as long as the widget
//! window lives: acquired when the window mounts, released when the
//! listener guard drops. Critical threading requirements:
//! - Hook callback runs on SYSTEM thread, NOT main thread
//! - Hook NEVER mutates application state directly
//! - All events are posted to the widget window for processing

use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, LRESULT, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Input::KeyboardAndMouse::{GetKeyState, VK_SHIFT},
            WindowsAndMessaging::{
                CallNextHookEx, GetForegroundWindow, PostMessageW, SetWindowsHookExW,
                UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT, WH_KEYBOARD_LL, WM_KEYDOWN,
                WM_SYSKEYDOWN,
            },
        },
    },
    core::PCWSTR,
};

use crate::input::keyboard::{key_msg_for_vk, KeyMsg};

/// Custom window message carrying an encoded [`KeyMsg`] in its WPARAM
pub const WM_CALCPAD_KEY: u32 = 0x8000; // WM_APP range

/// Errors that can occur while managing the keyboard listener
#[derive(Debug, thiserror::Error)]
pub enum KeyboardListenerError {
    #[error("Failed to install keyboard hook")]
    HookInstallationFailed,
    #[error("Failed to uninstall keyboard hook")]
    UninstallFailed,
}

/// Global state for the hook callback
/// CRITICAL: This must be minimal and only touched from install/remove
static mut LISTENER_STATE: Option<ListenerState> = None;

struct ListenerState {
    target_hwnd: HWND,
}

fn call_next_hook(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// RAII guard for the process-wide keyboard listener
///
/// Installing the guard hooks the keyboard; dropping it unhooks with
/// guaranteed release, so a listener can never outlive its window.
#[derive(Debug)]
pub struct KeyboardListener {
    hook: Option<HHOOK>,
}

impl KeyboardListener {
    /// Installs the keyboard listener targeting the widget window
    ///
    /// Translated key messages are posted to `target_hwnd` as
    /// [`WM_CALCPAD_KEY`] messages.
    pub fn install(target_hwnd: HWND) -> Result<Self, KeyboardListenerError> {
        unsafe {
            LISTENER_STATE = Some(ListenerState { target_hwnd });

            let hinstance = GetModuleHandleW(PCWSTR::null())
                .map_err(|_| KeyboardListenerError::HookInstallationFailed)?;

            let hook = SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), hinstance, 0)
                .map_err(|_| KeyboardListenerError::HookInstallationFailed)?;

            Ok(Self { hook: Some(hook) })
        }
    }

    /// Removes the listener; called automatically on drop
    pub fn remove(&mut self) -> Result<(), KeyboardListenerError> {
        if let Some(hook) = self.hook.take() {
            unsafe {
                UnhookWindowsHookEx(hook).map_err(|_| KeyboardListenerError::UninstallFailed)?;
                LISTENER_STATE = None;
            }
        }
        Ok(())
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        // Guaranteed cleanup
        let _ = self.remove();
    }
}

/// Low-level keyboard hook procedure
///
/// Runs on a system thread: never mutates application state, never
/// blocks, only posts messages to the widget window. Must call
/// CallNextHookEx to maintain system stability.
unsafe extern "system" fn keyboard_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code < 0 {
        return call_next_hook(code, wparam, lparam);
    }

    let state = unsafe {
        match &*std::ptr::addr_of!(LISTENER_STATE) {
            Some(state) => state,
            None => return call_next_hook(code, wparam, lparam),
        }
    };

    // Only key-down events produce tokens
    if wparam.0 != (WM_KEYDOWN as usize) && wparam.0 != (WM_SYSKEYDOWN as usize) {
        return call_next_hook(code, wparam, lparam);
    }

    // The listener is process-wide for the widget's lifetime, but keys
    // only act on the widget while its window is in the foreground
    if unsafe { GetForegroundWindow() } != state.target_hwnd {
        return call_next_hook(code, wparam, lparam);
    }

    let keyboard_data = lparam.0 as *const KBDLLHOOKSTRUCT;
    let vk_code = unsafe { (*keyboard_data).vkCode };
    let shift = unsafe { GetKeyState(i32::from(VK_SHIFT.0)) } < 0;

    match key_msg_for_vk(vk_code, shift) {
        Some(msg) => {
            let _ = unsafe {
                PostMessageW(
                    state.target_hwnd,
                    WM_CALCPAD_KEY,
                    WPARAM(msg.to_raw()),
                    LPARAM(0),
                )
            };

            // Consume the key, mirroring the widget's preventDefault
            LRESULT(1)
        }
        None => call_next_hook(code, wparam, lparam),
    }
}
