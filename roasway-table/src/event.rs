/// Input delivered by the host, with element targeting.
///
/// Pointer coordinates are viewport pixels; only the horizontal axis
/// matters to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer button pressed on `target`.
    PointerDown { target: String, x: i32 },
    /// Pointer moved anywhere in the document.
    PointerMove { x: i32 },
    /// Pointer button released anywhere in the document.
    PointerUp,
    /// An element scrolled horizontally to `scroll_left`.
    Scroll { target: String, scroll_left: u32 },
    /// Click on `target`.
    Click { target: String },
    /// Window resized.
    WindowResize { width: u32, height: u32 },
    /// Page finished loading.
    Load,
}

/// Size of the browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
