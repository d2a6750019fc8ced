//! Frostpane - frosted-glass backgrounds for ordinary views.
//!
//! A [`BlurLayout`] stacks its children like a frame and gives one of them,
//! the target, a background made from everything drawn behind it, blurred
//! by a transform the host supplies. The result reads as frosted glass
//! over the container's content.
//!
//! This is the umbrella crate. It re-exports the core crate at the root and
//! the pixel layer under [`render`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use frostpane::{BlurLayout, BlurTransform, Panel};
//! use frostpane::render::{Color, PixelSurface, Rect, Size};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transform: Arc<dyn BlurTransform> = Arc::new(|input: &PixelSurface, radius: u32| {
//!         PixelSurface::from_image(image::imageops::blur(input.as_image(), radius as f32 / 2.0))
//!     });
//!
//!     let mut layout = BlurLayout::from_toml_str(transform, "blur-radius = 12")?;
//!     layout.set_background(Some(Color::from_rgb8(30, 90, 160).into()));
//!     let stripe = layout.add_view(Panel::new().with_background(Color::YELLOW))?;
//!     let card = layout.add_view(Panel::new())?;
//!     layout.set_blurred_background_for_target_child(Some(card), Some(12), 16.0)?;
//!
//!     layout.layout(
//!         Size::new(120.0, 80.0),
//!         &[
//!             (stripe, Rect::new(0.0, 30.0, 120.0, 20.0)),
//!             (card, Rect::new(10.0, 10.0, 100.0, 60.0)),
//!         ],
//!     )?;
//!     assert!(layout.view(card).and_then(|card| card.background()).is_some());
//!     Ok(())
//! }
//! ```

pub use frostpane_core::*;

/// Pixel surfaces, drawables and geometry.
pub mod render {
    pub use frostpane_render::*;
}

mod blur_layout;
pub mod compositor;
pub mod config;
pub mod error;
pub mod materializer;
pub mod transform;
pub mod view;

pub use blur_layout::{BlurLayout, CompositionState, TargetResolution};
pub use compositor::CompositeScene;
pub use config::{AttributeError, BlurConfiguration, BlurLayoutAttributes};
pub use error::{BlurError, BlurResult};
pub use materializer::materialize;
pub use transform::BlurTransform;
pub use view::{BlurRadiusProvider, CornerRadiusProvider, Panel, View, ViewBase};
