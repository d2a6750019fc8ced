//! A general-purpose view holding a background and a list of painted items.

use frostpane_core::ViewTag;
use frostpane_render::{Canvas, Drawable, Rect};

use super::{View, ViewBase};

/// A plain view with a background and stacked content drawables.
///
/// Content items are drawn in insertion order, each stretched to its own
/// rectangle in the panel's local coordinates.
///
/// # Example
///
/// ```
/// use frostpane::{Panel, ViewTag};
/// use frostpane::render::{Color, Rect};
///
/// let panel = Panel::new()
///     .with_tag(ViewTag::new(7).unwrap())
///     .with_background(Color::WHITE)
///     .with_content(Rect::new(8.0, 8.0, 16.0, 16.0), Color::RED);
/// assert_eq!(panel.content().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Panel {
    base: ViewBase,
    content: Vec<(Rect, Drawable)>,
}

impl Panel {
    /// Create an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag using builder pattern.
    pub fn with_tag(mut self, tag: ViewTag) -> Self {
        self.base.set_tag(Some(tag));
        self
    }

    /// Set the background using builder pattern.
    pub fn with_background(mut self, background: impl Into<Drawable>) -> Self {
        self.base.set_background(Some(background.into()));
        self
    }

    /// Set the geometry using builder pattern.
    pub fn with_geometry(mut self, geometry: Rect) -> Self {
        self.base.set_geometry(geometry);
        self
    }

    /// Add a content item using builder pattern.
    pub fn with_content(mut self, bounds: Rect, drawable: impl Into<Drawable>) -> Self {
        self.push_content(bounds, drawable);
        self
    }

    /// Append a content item.
    pub fn push_content(&mut self, bounds: Rect, drawable: impl Into<Drawable>) {
        self.content.push((bounds, drawable.into()));
    }

    /// The content items in paint order.
    pub fn content(&self) -> &[(Rect, Drawable)] {
        &self.content
    }
}

impl View for Panel {
    fn view_base(&self) -> &ViewBase {
        &self.base
    }

    fn view_base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn paint_content(&self, canvas: &mut Canvas<'_>) {
        for (bounds, drawable) in &self.content {
            canvas.draw_drawable(drawable, *bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use frostpane_render::{Color, PixelSurface};

    use super::*;

    #[test]
    fn test_panel_draws_background_then_content() {
        let panel = Panel::new()
            .with_geometry(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_background(Color::BLUE)
            .with_content(Rect::new(2.0, 2.0, 2.0, 2.0), Color::RED);

        let mut surface = PixelSurface::new(10, 10);
        panel.draw(&mut Canvas::new(&mut surface));

        assert_eq!(surface.get_rgba8(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(surface.get_rgba8(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_rgba8(9, 9), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_panel_without_providers() {
        let panel = Panel::new();
        assert!(panel.blur_radius_provider().is_none());
        assert!(panel.corner_radius_provider().is_none());
        assert!(panel.tag().is_none());
    }
}
