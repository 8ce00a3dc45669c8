//! Web view placement within the window.

// =============================================================================
// COORDINATE CONVERSION
// =============================================================================

/// The article view fills the window's client area.
pub fn article_bounds(width: u32, height: u32) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(width, height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
