//! View traits.
//!
//! This module defines the [`View`] trait implemented by every child of a
//! [`BlurLayout`](crate::BlurLayout), and the two optional capabilities a
//! view can expose to steer the blur applied behind it.

use frostpane_render::{Canvas, Drawable, Rect};
use frostpane_core::ViewTag;

use super::ViewBase;

/// A capability a target view can implement to supply its own blur radius.
///
/// When present, the provided value wins over any radius configured on the
/// container. It is consulted at the start of every composite pass, so a
/// view may return a different value each time.
pub trait BlurRadiusProvider {
    /// The blur radius to use for the next pass.
    fn provide_blur_radius(&self) -> u32;
}

/// A capability a target view can implement to supply its own corner radius.
///
/// When present, the provided value wins over the configured corner radius.
pub trait CornerRadiusProvider {
    /// The corner radius, in pixels, to clip the blurred background to.
    fn provide_corner_radius(&self) -> f32;
}

/// The trait every view implements.
///
/// Implementations hold a [`ViewBase`] and return it from
/// [`view_base`](Self::view_base); everything else has a default.
///
/// # Drawing
///
/// A view's full rendered output is its background stretched to its local
/// rectangle, followed by [`paint_content`](Self::paint_content). Both draw
/// in local coordinates; the caller translates the canvas to the view's
/// origin first.
///
/// # Example
///
/// ```
/// use frostpane::{View, ViewBase};
/// use frostpane::render::{Canvas, Color, Rect};
///
/// struct Swatch {
///     base: ViewBase,
///     color: Color,
/// }
///
/// impl View for Swatch {
///     fn view_base(&self) -> &ViewBase {
///         &self.base
///     }
///
///     fn view_base_mut(&mut self) -> &mut ViewBase {
///         &mut self.base
///     }
///
///     fn paint_content(&self, canvas: &mut Canvas<'_>) {
///         let size = self.base.size();
///         canvas.fill_rect(Rect::new(4.0, 4.0, size.width - 8.0, size.height - 8.0), self.color);
///     }
/// }
/// ```
pub trait View {
    /// Get a reference to the view's base.
    fn view_base(&self) -> &ViewBase;

    /// Get a mutable reference to the view's base.
    fn view_base_mut(&mut self) -> &mut ViewBase;

    /// Paint the view's foreground content in local coordinates.
    ///
    /// The background has already been drawn when this is called.
    fn paint_content(&self, canvas: &mut Canvas<'_>) {
        let _ = canvas;
    }

    /// Draw the view's full output: background, then content.
    fn draw(&self, canvas: &mut Canvas<'_>) {
        if let Some(background) = self.background() {
            canvas.draw_drawable(background, self.view_base().rect());
        }
        self.paint_content(canvas);
    }

    /// The blur radius capability, if this view implements it.
    fn blur_radius_provider(&self) -> Option<&dyn BlurRadiusProvider> {
        None
    }

    /// The corner radius capability, if this view implements it.
    fn corner_radius_provider(&self) -> Option<&dyn CornerRadiusProvider> {
        None
    }

    // =========================================================================
    // Convenience Methods (delegating to ViewBase)
    // =========================================================================

    /// Get the view's geometry in parent coordinates.
    fn geometry(&self) -> Rect {
        self.view_base().geometry()
    }

    /// The view's tag.
    fn tag(&self) -> Option<ViewTag> {
        self.view_base().tag()
    }

    /// The view's current background.
    fn background(&self) -> Option<&Drawable> {
        self.view_base().background()
    }

    /// Check if the view is visible.
    fn is_visible(&self) -> bool {
        self.view_base().is_visible()
    }
}
