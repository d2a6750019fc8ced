//! CPU-side pixel buffer.
//!
//! This module provides [`PixelSurface`], an owned RGBA8 buffer built on
//! `image::RgbaImage`. It is the raster that snapshots are composed into, the
//! buffer handed to the injected blur transform, and the backing store of
//! bitmap drawables.
//!
//! Pixels are stored non-premultiplied, four bytes per pixel, row-major.
//! Drawing operations blend source-over in place; cropping produces a new
//! surface.
//!
//! # Example
//!
//! ```
//! use frostpane_render::{Color, PixelRect, PixelSurface};
//!
//! let mut surface = PixelSurface::new(64, 64);
//! surface.fill_rect(PixelRect::new(8, 8, 16, 16), Color::RED);
//!
//! let crop = surface.crop(PixelRect::new(8, 8, 16, 16))?;
//! assert_eq!(crop.dimensions(), (16, 16));
//! # Ok::<(), frostpane_render::RenderError>(())
//! ```

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, PixelRect, Size};

/// Largest buffer, in bytes, that [`PixelSurface::try_new`] will allocate.
pub const MAX_SURFACE_BYTES: u64 = i32::MAX as u64;

/// An owned, mutable RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelSurface {
    inner: RgbaImage,
}

impl PixelSurface {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a new transparent surface with the specified dimensions.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: RgbaImage::new(width, height),
        }
    }

    /// Create a new transparent surface, rejecting sizes that would exceed
    /// [`MAX_SURFACE_BYTES`].
    pub fn try_new(width: u32, height: u32) -> RenderResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self::new(width, height))
    }

    /// Create a surface filled with a solid color.
    pub fn from_color(width: u32, height: u32, color: Color) -> Self {
        Self {
            inner: RgbaImage::from_pixel(width, height, Rgba(color.to_rgba8())),
        }
    }

    /// Create a surface from raw non-premultiplied RGBA pixel data.
    ///
    /// The data must be exactly `width * height * 4` bytes, row-major.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(|inner| Self { inner })
            .ok_or(RenderError::InvalidPixelData { expected, actual })
    }

    /// Wrap an existing `image::RgbaImage`.
    #[inline]
    pub fn from_image(inner: RgbaImage) -> Self {
        Self { inner }
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    /// Get the width of the surface in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the height of the surface in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the dimensions as a (width, height) tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Get the size as a `Size` struct.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    /// Check whether the surface holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The full extent of the surface as a pixel rectangle.
    #[inline]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width(), self.height())
    }

    // ========================================================================
    // PIXEL ACCESS
    // ========================================================================

    /// Get the color of a pixel at the specified coordinates.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.inner
            .get_pixel_checked(x, y)
            .map(|p| Color::from_rgba8(p.0[0], p.0[1], p.0[2], p.0[3]))
    }

    /// Get the raw RGBA8 value of a pixel.
    pub fn get_rgba8(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.inner.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Set the color of a pixel, replacing what was there.
    ///
    /// Does nothing if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(pixel) = self.inner.get_pixel_mut_checked(x, y) {
            *pixel = Rgba(color.to_rgba8());
        }
    }

    /// Get a reference to the underlying `RgbaImage`.
    #[inline]
    pub fn as_image(&self) -> &RgbaImage {
        &self.inner
    }

    // ========================================================================
    // DRAWING
    // ========================================================================

    /// Blend a solid color over a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let src = Rgba(color.to_rgba8());
        let Some(clip) = self.clip(rect) else {
            return;
        };
        for y in clip.y0..clip.y1 {
            for x in clip.x0..clip.x1 {
                let dst = self.inner.get_pixel_mut(x, y);
                *dst = blend_over(*dst, src);
            }
        }
    }

    /// Blend another surface over this one with its top-left at (x, y).
    ///
    /// Parts of `source` falling outside this surface are skipped.
    pub fn draw_surface(&mut self, source: &PixelSurface, x: i32, y: i32) {
        self.draw_surface_with_coverage(source, x, y, |_, _| 1.0);
    }

    /// Draw `source` stretched to fill `dest`.
    ///
    /// When sizes match the source is drawn as-is; otherwise it is resampled
    /// with a triangle (bilinear) filter first.
    pub fn draw_surface_scaled(&mut self, source: &PixelSurface, dest: PixelRect) {
        if dest.is_empty() || source.is_empty() {
            return;
        }
        if source.dimensions() == (dest.width, dest.height) {
            self.draw_surface(source, dest.x, dest.y);
        } else if let Ok(scaled) = source.resized(dest.width, dest.height) {
            self.draw_surface(&scaled, dest.x, dest.y);
        }
    }

    /// Blend `source` at (x, y), scaling each source pixel's alpha by
    /// `coverage(sx, sy)` where (sx, sy) are source-local coordinates.
    pub fn draw_surface_with_coverage<F>(&mut self, source: &PixelSurface, x: i32, y: i32, coverage: F)
    where
        F: Fn(u32, u32) -> f32,
    {
        let dest = PixelRect::new(x, y, source.width(), source.height());
        let Some(clip) = self.clip(dest) else {
            return;
        };
        for dy in clip.y0..clip.y1 {
            for dx in clip.x0..clip.x1 {
                // clip guarantees these are inside `source`
                let sx = (i64::from(dx) - i64::from(x)) as u32;
                let sy = (i64::from(dy) - i64::from(y)) as u32;
                let mut src = *source.inner.get_pixel(sx, sy);
                let cov = coverage(sx, sy).clamp(0.0, 1.0);
                if cov < 1.0 {
                    src.0[3] = (f32::from(src.0[3]) * cov).round() as u8;
                }
                let dst = self.inner.get_pixel_mut(dx, dy);
                *dst = blend_over(*dst, src);
            }
        }
    }

    /// Copy the pixels under `rect` into a new surface of exactly
    /// `rect.width` x `rect.height`.
    ///
    /// Pixels are copied verbatim (no blending). Any part of `rect` outside
    /// this surface is transparent in the result. Fails like
    /// [`try_new`](Self::try_new) when `rect` is too large to allocate.
    pub fn crop(&self, rect: PixelRect) -> RenderResult<PixelSurface> {
        let mut out = PixelSurface::try_new(rect.width, rect.height)?;
        let Some(clip) = self.clip(rect) else {
            return Ok(out);
        };
        for sy in clip.y0..clip.y1 {
            for sx in clip.x0..clip.x1 {
                let ox = (i64::from(sx) - i64::from(rect.x)) as u32;
                let oy = (i64::from(sy) - i64::from(rect.y)) as u32;
                out.inner.put_pixel(ox, oy, *self.inner.get_pixel(sx, sy));
            }
        }
        Ok(out)
    }

    /// Resample to exact dimensions with a triangle filter.
    pub fn resized(&self, width: u32, height: u32) -> RenderResult<PixelSurface> {
        check_dimensions(width, height)?;
        Ok(Self {
            inner: image::imageops::resize(
                &self.inner,
                width,
                height,
                image::imageops::FilterType::Triangle,
            ),
        })
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Save the surface to a file. The format is taken from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.inner.save(path.as_ref())?;
        Ok(())
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.inner.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Intersect `rect` with this surface's bounds.
    fn clip(&self, rect: PixelRect) -> Option<Span> {
        let x0 = i64::from(rect.x).max(0);
        let y0 = i64::from(rect.y).max(0);
        let x1 = rect.right().min(i64::from(self.width()));
        let y1 = rect.bottom().min(i64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Span {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }
}

/// A clipped, in-bounds pixel range (exclusive upper bounds).
struct Span {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Source-over blend of two non-premultiplied pixels.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let [sr, sg, sb, sa] = src.0;
    let [dr, dg, db, da] = dst.0;

    let src_a = f32::from(sa) / 255.0;
    let dst_a = f32::from(da) / 255.0;

    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = f32::from(s) / 255.0;
        let df = f32::from(d) / 255.0;
        let result = (sf * src_a + df * dst_a * (1.0 - src_a)) / out_a;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(sr, dr),
        blend(sg, dg),
        blend(sb, db),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Reject sizes whose RGBA8 buffer would exceed [`MAX_SURFACE_BYTES`].
fn check_dimensions(width: u32, height: u32) -> RenderResult<()> {
    let bytes = (u64::from(width) * u64::from(height)).saturating_mul(4);
    if bytes > MAX_SURFACE_BYTES {
        tracing::warn!(target: "frostpane_render", width, height, "refusing oversized surface");
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_new() {
        let surface = PixelSurface::new(100, 50);
        assert_eq!(surface.dimensions(), (100, 50));
        assert_eq!(surface.get_rgba8(0, 0), Some([0, 0, 0, 0]));
        assert!(!surface.is_empty());
        assert!(PixelSurface::new(0, 10).is_empty());
    }

    #[test]
    fn test_try_new_rejects_huge() {
        assert!(PixelSurface::try_new(64, 64).is_ok());
        let err = PixelSurface::try_new(100_000, 100_000).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { width: 100_000, .. }));
    }

    #[test]
    fn test_from_color() {
        let surface = PixelSurface::from_color(10, 10, Color::RED);
        let pixel = surface.get_pixel(5, 5).unwrap();
        assert!((pixel.r - 1.0).abs() < 0.01);
        assert!(pixel.g.abs() < 0.01);
        assert!((pixel.a - 1.0).abs() < 0.01);
        assert!(surface.get_pixel(10, 0).is_none());
    }

    #[test]
    fn test_from_rgba_invalid_size() {
        let err = PixelSurface::from_rgba(vec![0; 15], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidPixelData {
                expected: 16,
                actual: 15
            }
        ));
        assert!(PixelSurface::from_rgba(vec![255; 16], 2, 2).is_ok());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_rect(PixelRect::new(-5, -5, 8, 8), Color::BLUE);
        assert_eq!(surface.get_rgba8(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(surface.get_rgba8(2, 2), Some([0, 0, 255, 255]));
        assert_eq!(surface.get_rgba8(3, 3), Some([0, 0, 0, 0]));

        // Entirely outside is a no-op.
        surface.fill_rect(PixelRect::new(20, 20, 5, 5), Color::RED);
    }

    #[test]
    fn test_draw_surface_overlays() {
        let mut base = PixelSurface::from_color(20, 20, Color::BLUE);
        let overlay = PixelSurface::from_color(10, 10, Color::RED);

        base.draw_surface(&overlay, 5, 5);

        assert_eq!(base.get_rgba8(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(base.get_rgba8(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(base.get_rgba8(15, 15), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_translucent_blend() {
        let mut base = PixelSurface::from_color(4, 4, Color::WHITE);
        let half_black = PixelSurface::from_color(4, 4, Color::BLACK.with_alpha(0.5));
        base.draw_surface(&half_black, 0, 0);
        let [r, g, b, a] = base.get_rgba8(1, 1).unwrap();
        assert_eq!(a, 255);
        assert!((i32::from(r) - 127).abs() <= 1);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_draw_surface_scaled() {
        let mut base = PixelSurface::new(20, 20);
        let red = PixelSurface::from_color(2, 2, Color::RED);
        base.draw_surface_scaled(&red, PixelRect::new(4, 4, 10, 10));
        assert_eq!(base.get_rgba8(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(base.get_rgba8(13, 13), Some([255, 0, 0, 255]));
        assert_eq!(base.get_rgba8(14, 14), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_coverage_masks_alpha() {
        let mut base = PixelSurface::new(4, 1);
        let red = PixelSurface::from_color(4, 1, Color::RED);
        base.draw_surface_with_coverage(&red, 0, 0, |x, _| if x < 2 { 0.0 } else { 1.0 });
        assert_eq!(base.get_rgba8(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(base.get_rgba8(3, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_crop_exact_region() {
        let mut surface = PixelSurface::new(30, 30);
        surface.set_pixel(10, 12, Color::GREEN);
        let crop = surface.crop(PixelRect::new(10, 12, 5, 4)).unwrap();
        assert_eq!(crop.dimensions(), (5, 4));
        assert_eq!(crop.get_rgba8(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(crop.get_rgba8(1, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_crop_outside_is_transparent() {
        let surface = PixelSurface::from_color(10, 10, Color::RED);
        let crop = surface.crop(PixelRect::new(8, -2, 4, 4)).unwrap();
        assert_eq!(crop.dimensions(), (4, 4));
        assert_eq!(crop.get_rgba8(0, 2), Some([255, 0, 0, 255]));
        assert_eq!(crop.get_rgba8(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(crop.get_rgba8(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_oversized_crop_is_rejected() {
        let surface = PixelSurface::from_color(10, 10, Color::RED);
        let result = surface.crop(PixelRect::new(0, 0, u32::MAX, u32::MAX));
        assert!(matches!(
            result,
            Err(RenderError::InvalidDimensions { width: u32::MAX, height: u32::MAX })
        ));
    }

    #[test]
    fn test_encode_png() {
        let surface = PixelSurface::from_color(3, 3, Color::YELLOW);
        let png = surface.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
