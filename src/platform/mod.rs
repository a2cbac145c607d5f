//! Win32 window shell for the calculator widget
//!
//! Everything in this module is Windows-specific; the rest of the crate
//! never touches Win32 directly.

pub mod window;

pub use window::{run, WindowError};
