//! Backgrounds that can be drawn into arbitrary bounds.
//!
//! A [`Drawable`] is what a view carries as its background. It has no fixed
//! position; the caller supplies the bounds each time it is drawn, and the
//! drawable stretches itself to fill them.
//!
//! Two bitmap-backed variants exist. [`BitmapDrawable`] draws its pixels
//! unclipped. [`RoundedBitmapDrawable`] clips them to a rounded rectangle
//! with antialiased corners.

use crate::pixel_surface::PixelSurface;
use crate::types::{Color, CornerRadii, PixelRect, Point, Rect, RoundedRect};

/// A background that fills whatever bounds it is drawn into.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// A solid color fill.
    Color(Color),
    /// A bitmap stretched to the bounds.
    Bitmap(BitmapDrawable),
    /// A bitmap stretched to the bounds and clipped to rounded corners.
    RoundedBitmap(RoundedBitmapDrawable),
}

impl Drawable {
    /// Draw into `surface`, filling `bounds`.
    pub fn draw(&self, surface: &mut PixelSurface, bounds: PixelRect) {
        if bounds.is_empty() {
            return;
        }
        match self {
            Drawable::Color(color) => surface.fill_rect(bounds, *color),
            Drawable::Bitmap(bitmap) => bitmap.draw(surface, bounds),
            Drawable::RoundedBitmap(rounded) => rounded.draw(surface, bounds),
        }
    }

    /// The backing bitmap, if this drawable has one.
    pub fn bitmap(&self) -> Option<&PixelSurface> {
        match self {
            Drawable::Color(_) => None,
            Drawable::Bitmap(bitmap) => Some(bitmap.bitmap()),
            Drawable::RoundedBitmap(rounded) => Some(rounded.bitmap()),
        }
    }

    /// The clip radii applied when drawing. Zero for unclipped drawables.
    pub fn corner_radii(&self) -> CornerRadii {
        match self {
            Drawable::RoundedBitmap(rounded) => rounded.corner_radii(),
            _ => CornerRadii::ZERO,
        }
    }

    /// Whether drawing clips to rounded corners.
    #[inline]
    pub fn is_rounded(&self) -> bool {
        !self.corner_radii().is_zero()
    }
}

impl From<Color> for Drawable {
    fn from(color: Color) -> Self {
        Drawable::Color(color)
    }
}

impl From<BitmapDrawable> for Drawable {
    fn from(bitmap: BitmapDrawable) -> Self {
        Drawable::Bitmap(bitmap)
    }
}

impl From<RoundedBitmapDrawable> for Drawable {
    fn from(rounded: RoundedBitmapDrawable) -> Self {
        Drawable::RoundedBitmap(rounded)
    }
}

/// A bitmap-backed drawable without clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapDrawable {
    bitmap: PixelSurface,
}

impl BitmapDrawable {
    /// Wrap a surface. The drawable takes ownership of the pixels.
    #[inline]
    pub fn new(bitmap: PixelSurface) -> Self {
        Self { bitmap }
    }

    /// The backing pixels.
    #[inline]
    pub fn bitmap(&self) -> &PixelSurface {
        &self.bitmap
    }

    fn draw(&self, surface: &mut PixelSurface, bounds: PixelRect) {
        surface.draw_surface_scaled(&self.bitmap, bounds);
    }
}

/// A bitmap-backed drawable clipped to a rounded rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedBitmapDrawable {
    bitmap: PixelSurface,
    corner_radii: CornerRadii,
}

impl RoundedBitmapDrawable {
    /// Wrap a surface with the same clip radius on all four corners.
    pub fn new(bitmap: PixelSurface, corner_radius: f32) -> Self {
        Self {
            bitmap,
            corner_radii: CornerRadii::uniform(corner_radius.max(0.0)),
        }
    }

    /// The backing pixels.
    #[inline]
    pub fn bitmap(&self) -> &PixelSurface {
        &self.bitmap
    }

    /// The clip radii.
    #[inline]
    pub fn corner_radii(&self) -> CornerRadii {
        self.corner_radii
    }

    /// The uniform corner radius.
    #[inline]
    pub fn corner_radius(&self) -> f32 {
        self.corner_radii.top_left
    }

    fn draw(&self, surface: &mut PixelSurface, bounds: PixelRect) {
        let scaled;
        let source = if self.bitmap.dimensions() == (bounds.width, bounds.height) {
            &self.bitmap
        } else {
            let Ok(resized) = self.bitmap.resized(bounds.width, bounds.height) else {
                return;
            };
            scaled = resized;
            &scaled
        };

        let shape = RoundedRect {
            rect: Rect::new(0.0, 0.0, bounds.width as f32, bounds.height as f32),
            radii: self.corner_radii,
        };
        surface.draw_surface_with_coverage(source, bounds.x, bounds.y, |x, y| {
            shape.coverage(Point::new(x as f32 + 0.5, y as f32 + 0.5))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_drawable_fills_bounds() {
        let mut surface = PixelSurface::new(10, 10);
        Drawable::from(Color::RED).draw(&mut surface, PixelRect::new(2, 2, 3, 3));
        assert_eq!(surface.get_rgba8(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_rgba8(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_bitmap_drawable_stretches() {
        let mut surface = PixelSurface::new(10, 10);
        let drawable = Drawable::from(BitmapDrawable::new(PixelSurface::from_color(
            1,
            1,
            Color::BLUE,
        )));
        drawable.draw(&mut surface, PixelRect::new(0, 0, 10, 10));
        assert_eq!(surface.get_rgba8(9, 9), Some([0, 0, 255, 255]));
        assert!(!drawable.is_rounded());
        assert_eq!(drawable.corner_radii(), CornerRadii::ZERO);
    }

    #[test]
    fn test_rounded_bitmap_clips_corners() {
        let mut surface = PixelSurface::new(40, 40);
        let rounded = RoundedBitmapDrawable::new(PixelSurface::from_color(40, 40, Color::RED), 12.0);
        let drawable = Drawable::from(rounded);
        drawable.draw(&mut surface, PixelRect::new(0, 0, 40, 40));

        assert_eq!(surface.get_rgba8(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.get_rgba8(39, 0).map(|p| p[3]), Some(0));
        assert_eq!(surface.get_rgba8(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(surface.get_rgba8(20, 0), Some([255, 0, 0, 255]));
        assert_eq!(drawable.corner_radii(), CornerRadii::uniform(12.0));
        assert!(drawable.is_rounded());
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let rounded = RoundedBitmapDrawable::new(PixelSurface::new(1, 1), -3.0);
        assert_eq!(rounded.corner_radius(), 0.0);
        assert!(rounded.corner_radii().is_zero());
    }

    #[test]
    fn test_unallocatable_bounds_skip_bitmaps() {
        let mut surface = PixelSurface::new(4, 4);
        let bounds = PixelRect::new(0, 0, u32::MAX, u32::MAX);
        let bitmap = PixelSurface::from_color(2, 2, Color::RED);
        Drawable::from(BitmapDrawable::new(bitmap.clone())).draw(&mut surface, bounds);
        Drawable::from(RoundedBitmapDrawable::new(bitmap, 4.0)).draw(&mut surface, bounds);
        assert_eq!(surface.get_rgba8(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_empty_bounds_is_noop() {
        let mut surface = PixelSurface::new(4, 4);
        Drawable::from(Color::RED).draw(&mut surface, PixelRect::new(0, 0, 0, 4));
        assert_eq!(surface.get_rgba8(0, 0), Some([0, 0, 0, 0]));
    }
}
