//! The injected blur transform.
//!
//! The container never blurs pixels itself. Hosts hand it a
//! [`BlurTransform`], typically wrapped in an `Arc` so several containers can
//! share one GPU or SIMD backend. Any `Fn(&PixelSurface, u32) -> PixelSurface`
//! closure qualifies:
//!
//! ```
//! use std::sync::Arc;
//! use frostpane::{BlurLayout, BlurTransform};
//! use frostpane::render::PixelSurface;
//!
//! let transform: Arc<dyn BlurTransform> = Arc::new(|input: &PixelSurface, radius: u32| {
//!     PixelSurface::from_image(image::imageops::blur(input.as_image(), radius as f32 / 2.0))
//! });
//! let layout = BlurLayout::new(transform);
//! ```

use frostpane_core::logging::targets;
use frostpane_render::PixelSurface;

use crate::error::{BlurError, BlurResult};

/// A function from (pixels, radius) to blurred pixels.
///
/// Implementations must return a non-empty surface with the same
/// dimensions as the input. The input is borrowed for the duration of the
/// call only.
pub trait BlurTransform: Send + Sync {
    /// Blur `input` with the given radius.
    fn blur(&self, input: &PixelSurface, radius: u32) -> PixelSurface;
}

impl<F> BlurTransform for F
where
    F: Fn(&PixelSurface, u32) -> PixelSurface + Send + Sync,
{
    fn blur(&self, input: &PixelSurface, radius: u32) -> PixelSurface {
        self(input, radius)
    }
}

/// Run the transform and check its output contract.
pub(crate) fn apply_blur(
    transform: &dyn BlurTransform,
    input: &PixelSurface,
    radius: u32,
) -> BlurResult<PixelSurface> {
    tracing::trace!(
        target: targets::COMPOSITOR,
        width = input.width(),
        height = input.height(),
        radius,
        "invoking blur transform"
    );

    let output = transform.blur(input, radius);
    if output.is_empty() || output.dimensions() != input.dimensions() {
        return Err(BlurError::CollaboratorContract {
            expected: input.dimensions(),
            actual: output.dimensions(),
        });
    }
    Ok(output)
}
