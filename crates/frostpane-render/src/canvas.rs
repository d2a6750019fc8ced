//! Translated drawing context over a [`PixelSurface`].
//!
//! Views paint in their own local coordinates, with (0, 0) at their top-left
//! corner. A [`Canvas`] carries the offset that maps those coordinates onto
//! the shared surface, and a save/restore stack for nesting.
//!
//! ```
//! use frostpane_render::{Canvas, Color, PixelSurface, Rect};
//!
//! let mut surface = PixelSurface::new(100, 100);
//! let mut canvas = Canvas::new(&mut surface);
//! canvas.with_translation(20.0, 30.0, |canvas| {
//!     canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
//! });
//! assert!(surface.get_pixel(20, 30).is_some());
//! ```

use crate::drawable::Drawable;
use crate::pixel_surface::PixelSurface;
use crate::types::{Color, Point, Rect};

/// A borrowed drawing context with a translation stack.
#[derive(Debug)]
pub struct Canvas<'a> {
    surface: &'a mut PixelSurface,
    origin: Point,
    saved: Vec<Point>,
}

impl<'a> Canvas<'a> {
    /// Create a canvas with no translation.
    pub fn new(surface: &'a mut PixelSurface) -> Self {
        Self {
            surface,
            origin: Point::ZERO,
            saved: Vec::new(),
        }
    }

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current translation.
    pub fn save(&mut self) {
        self.saved.push(self.origin);
    }

    /// Restore the previously saved translation.
    ///
    /// Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(origin) = self.saved.pop() {
            self.origin = origin;
        }
    }

    /// Apply a translation to the current origin.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.origin = Point::new(self.origin.x + tx, self.origin.y + ty);
    }

    /// Run `f` with an extra translation, restoring afterwards.
    pub fn with_translation<R>(&mut self, tx: f32, ty: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        self.translate(tx, ty);
        let result = f(self);
        self.restore();
        result
    }

    /// The current translation in surface coordinates.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle given in local coordinates.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let target = self.to_surface(rect).to_pixel_rect();
        self.surface.fill_rect(target, color);
    }

    /// Draw a drawable stretched to a rectangle in local coordinates.
    pub fn draw_drawable(&mut self, drawable: &Drawable, bounds: Rect) {
        let target = self.to_surface(bounds).to_pixel_rect();
        drawable.draw(self.surface, target);
    }

    /// Draw a surface with its top-left at a local point.
    pub fn draw_surface(&mut self, source: &PixelSurface, at: Point) {
        let target = self.to_surface(Rect::new(at.x, at.y, 0.0, 0.0)).to_pixel_rect();
        self.surface.draw_surface(source, target.x, target.y);
    }

    fn to_surface(&self, rect: Rect) -> Rect {
        rect.offset(self.origin.x, self.origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_translation() {
        let mut surface = PixelSurface::new(50, 50);
        let mut canvas = Canvas::new(&mut surface);
        canvas.translate(10.0, 10.0);
        canvas.with_translation(5.0, 5.0, |canvas| {
            assert_eq!(canvas.origin(), Point::new(15.0, 15.0));
            canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        });
        assert_eq!(canvas.origin(), Point::new(10.0, 10.0));
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLUE);

        assert_eq!(surface.get_rgba8(15, 15), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_rgba8(10, 10), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut surface = PixelSurface::new(1, 1);
        let mut canvas = Canvas::new(&mut surface);
        canvas.translate(3.0, 4.0);
        canvas.restore();
        assert_eq!(canvas.origin(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_draw_drawable_and_surface() {
        let mut surface = PixelSurface::new(20, 20);
        let mut canvas = Canvas::new(&mut surface);
        canvas.translate(2.0, 2.0);
        canvas.draw_drawable(&Drawable::Color(Color::GREEN), Rect::new(0.0, 0.0, 4.0, 4.0));
        canvas.draw_surface(&PixelSurface::from_color(2, 2, Color::RED), Point::new(10.0, 10.0));

        assert_eq!(surface.get_rgba8(2, 2), Some([0, 255, 0, 255]));
        assert_eq!(surface.get_rgba8(6, 6), Some([0, 0, 0, 0]));
        assert_eq!(surface.get_rgba8(12, 12), Some([255, 0, 0, 255]));
    }
}
