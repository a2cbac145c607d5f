pub mod font;
pub mod renderer;

pub use font::{FontError, UiFont};
pub use renderer::{LayoutError, RendererError, Theme, WidgetLayout, WidgetRenderer};
