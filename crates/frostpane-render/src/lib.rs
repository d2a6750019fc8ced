//! Software rendering layer for Frostpane.
//!
//! This crate provides the raster types that compositing works with:
//!
//! - [`PixelSurface`]: an owned RGBA8 buffer with blending, scaling and
//!   cropping primitives
//! - [`Canvas`]: a translated drawing context views paint into
//! - [`Drawable`]: backgrounds (solid colors, plain and rounded bitmaps)
//!   that stretch to whatever bounds they are drawn in
//!
//! # Example
//!
//! ```
//! use frostpane_render::{Canvas, Color, Drawable, PixelSurface, Rect};
//!
//! let mut surface = PixelSurface::new(200, 100);
//! let mut canvas = Canvas::new(&mut surface);
//!
//! canvas.draw_drawable(&Drawable::Color(Color::WHITE), Rect::new(0.0, 0.0, 200.0, 100.0));
//! canvas.with_translation(50.0, 25.0, |canvas| {
//!     canvas.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLUE);
//! });
//!
//! let png = surface.to_png()?;
//! # Ok::<(), frostpane_render::RenderError>(())
//! ```

mod canvas;
mod drawable;
mod error;
mod pixel_surface;
mod types;

pub use canvas::Canvas;
pub use drawable::{BitmapDrawable, Drawable, RoundedBitmapDrawable};
pub use error::{RenderError, RenderResult};
pub use pixel_surface::{MAX_SURFACE_BYTES, PixelSurface};
pub use types::{Color, CornerRadii, PixelRect, Point, Rect, RoundedRect, Size};
