//! Calculator widget window
//!
//! Creates the native window the widget mounts into, pumps its message
//! loop, and translates Win32 events into controller calls. The widget
//! state lives in a heap allocation referenced from the window user
//! data, exactly as long as the window itself; the keyboard listener is
//! installed after creation and released when the pump exits.

use std::ffi::c_void;

use tracing::{info, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, EndPaint, StretchDIBits, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    PAINTSTRUCT, SRCCOPY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, DispatchMessageW, GetClientRect,
    GetMessageW, GetWindowLongPtrW, InvalidateRect, LoadCursorW, PostQuitMessage, RegisterClassW,
    SetWindowLongPtrW, ShowWindow, TranslateMessage, CW_USEDEFAULT, GWLP_USERDATA, IDC_ARROW, MSG,
    SW_SHOW, WINDOW_EX_STYLE, WM_DESTROY, WM_LBUTTONDOWN, WM_NCDESTROY, WM_PAINT, WNDCLASSW,
    WS_CAPTION, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU,
};
use windows::core::w;

use crate::app::controller::CalcController;
use crate::config::WindowConfig;
use crate::domain::core::Rect;
use crate::input::capture::{KeyboardListener, KeyboardListenerError, WM_CALCPAD_KEY};
use crate::input::keyboard::KeyMsg;
use crate::ui::font::{FontError, UiFont};
use crate::ui::renderer::{pixmap_to_bgra, LayoutError, WidgetLayout, WidgetRenderer};

/// Window shell errors
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to register widget window class")]
    ClassRegistrationFailed,

    #[error("Failed to create widget window")]
    WindowCreationFailed,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Listener(#[from] KeyboardListenerError),
}

/// Widget state owned by the window
struct WindowState {
    controller: CalcController,
    renderer: WidgetRenderer,
}

/// Creates the widget window and runs its message loop until closed
///
/// # Arguments
/// * `config` - Validated window configuration
pub fn run(config: &WindowConfig) -> Result<(), WindowError> {
    // Fail on missing fonts before any window exists
    let font = UiFont::load_system()?;

    let class_name = w!("CalcpadWidgetWindow");
    register_window_class(class_name)?;

    let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;

    // Grow the outer rect so the client area matches the configured size
    let mut outer = RECT {
        left: 0,
        top: 0,
        right: config.width as i32,
        bottom: config.height as i32,
    };
    unsafe {
        let _ = AdjustWindowRectEx(&mut outer, style, false, WINDOW_EX_STYLE(0));
    }

    let hinstance = unsafe {
        GetModuleHandleW(None).map_err(|_| WindowError::WindowCreationFailed)?
    };

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class_name,
            w!("Calcpad"),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            outer.right - outer.left,
            outer.bottom - outer.top,
            None,
            None,
            hinstance,
            None,
        )
    };
    if hwnd.0 == 0 {
        return Err(WindowError::WindowCreationFailed);
    }

    // Layout against the actual client area and monitor DPI
    let dpi_scale = unsafe { GetDpiForWindow(hwnd) } as f32 / 96.0;
    let mut client = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut client);
    }
    let canvas = Rect::new(0, 0, client.right - client.left, client.bottom - client.top);

    let layout = WidgetLayout::new(canvas, dpi_scale * config.scale)?;
    let state = Box::new(WindowState {
        controller: CalcController::new(layout),
        renderer: WidgetRenderer::new(font),
    });
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
    }

    // Keyboard subscription lives exactly as long as the message loop;
    // dropping the guard below unhooks it
    let listener = KeyboardListener::install(hwnd)?;

    unsafe {
        ShowWindow(hwnd, SW_SHOW);
    }
    info!(
        width = canvas.w,
        height = canvas.h,
        dpi_scale,
        "widget window created"
    );

    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 {
            // WM_QUIT received
            break;
        } else if result.0 == -1 {
            warn!("message loop error, shutting down");
            break;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    drop(listener);
    info!("widget window closed");
    Ok(())
}

/// Registers the widget window class
fn register_window_class(class_name: windows::core::PCWSTR) -> Result<(), WindowError> {
    let hinstance = unsafe {
        GetModuleHandleW(None).map_err(|_| WindowError::ClassRegistrationFailed)?
    };

    let wc = WNDCLASSW {
        lpfnWndProc: Some(widget_window_proc),
        hInstance: hinstance.into(),
        lpszClassName: class_name,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW).unwrap_or_default() },
        ..Default::default()
    };

    let atom = unsafe { RegisterClassW(&wc) };
    if atom == 0 {
        return Err(WindowError::ClassRegistrationFailed);
    }
    Ok(())
}

/// Returns the widget state stashed in the window user data
unsafe fn window_state<'a>(hwnd: HWND) -> Option<&'a mut WindowState> {
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) };
    if ptr == 0 {
        return None;
    }
    Some(unsafe { &mut *(ptr as *mut WindowState) })
}

/// Window procedure for the widget window
unsafe extern "system" fn widget_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            unsafe { paint(hwnd) };
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            let px = (lparam.0 & 0xffff) as i16 as i32;
            let py = ((lparam.0 >> 16) & 0xffff) as i16 as i32;
            if let Some(state) = unsafe { window_state(hwnd) } {
                if state.controller.handle_pointer(px, py) {
                    unsafe {
                        let _ = InvalidateRect(hwnd, None, false);
                    }
                }
            }
            LRESULT(0)
        }

        WM_CALCPAD_KEY => {
            if let Some(key) = KeyMsg::from_raw(wparam.0) {
                if let Some(state) = unsafe { window_state(hwnd) } {
                    if state.controller.handle_key(key) {
                        unsafe {
                            let _ = InvalidateRect(hwnd, None, false);
                        }
                    }
                }
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }

        WM_NCDESTROY => {
            // Reclaim the state allocation made at creation
            let ptr = unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
            if ptr != 0 {
                drop(unsafe { Box::from_raw(ptr as *mut WindowState) });
            }
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }

        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Renders the widget and blits it to the window
unsafe fn paint(hwnd: HWND) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = unsafe { BeginPaint(hwnd, &mut ps) };

    if let Some(state) = unsafe { window_state(hwnd) } {
        match state
            .renderer
            .render(state.controller.layout(), state.controller.state())
        {
            Ok(pixmap) => {
                let width = pixmap.width() as i32;
                let height = pixmap.height() as i32;
                let bgra = pixmap_to_bgra(&pixmap);

                let mut bitmap_info = BITMAPINFO::default();
                bitmap_info.bmiHeader = BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // top-down bitmap so we can copy directly
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                };

                unsafe {
                    StretchDIBits(
                        hdc,
                        0,
                        0,
                        width,
                        height,
                        0,
                        0,
                        width,
                        height,
                        Some(bgra.as_ptr() as *const c_void),
                        &bitmap_info,
                        DIB_RGB_COLORS,
                        SRCCOPY,
                    );
                }
            }
            Err(err) => {
                warn!(error = %err, "widget rendering failed");
            }
        }
    }

    unsafe {
        let _ = EndPaint(hwnd, &ps);
    }
}
