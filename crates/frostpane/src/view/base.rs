//! View base implementation.
//!
//! This module provides `ViewBase`, the state every view carries: geometry
//! within its parent, the background drawable, an optional author tag,
//! visibility, and the layout-completion flags the host drives.

use frostpane_core::logging::targets;
use frostpane_core::{Signal, ViewTag, frost_trace};
use frostpane_render::{Drawable, Rect, Size};

/// The base implementation for all views.
///
/// View implementations include this as a field and hand it out through
/// [`View::view_base`](super::View::view_base).
///
/// # Layout state
///
/// A view starts out not laid out. Changing its geometry requests a layout;
/// the host clears the request when it finishes a layout pass. Only a view
/// that is laid out with no request outstanding has final geometry.
pub struct ViewBase {
    /// Position relative to the parent and size.
    geometry: Rect,

    /// Background drawn behind the view's content.
    background: Option<Drawable>,

    /// Author-assigned identifier.
    tag: Option<ViewTag>,

    /// Whether the view draws at all.
    visible: bool,

    /// Whether the view has completed at least one layout pass.
    laid_out: bool,

    /// Whether a new layout has been requested since the last pass.
    layout_requested: bool,

    /// Signal emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,

    /// Signal emitted when the background is replaced.
    pub background_changed: Signal<()>,
}

impl ViewBase {
    /// Create a new view base with empty geometry and no background.
    pub fn new() -> Self {
        Self {
            geometry: Rect::ZERO,
            background: None,
            tag: None,
            visible: true,
            laid_out: false,
            layout_requested: true,
            geometry_changed: Signal::new(),
            background_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The author-assigned tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<ViewTag> {
        self.tag
    }

    /// Assign or clear the tag.
    pub fn set_tag(&mut self, tag: Option<ViewTag>) {
        self.tag = tag;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the view's geometry (position and size) in parent coordinates.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the view's geometry.
    ///
    /// A real change requests a new layout and emits `geometry_changed`.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.request_layout();
            self.geometry_changed.emit(rect);
        }
    }

    /// Get the view's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// The view's local rectangle, always positioned at (0, 0).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.geometry.size)
    }

    // =========================================================================
    // Background
    // =========================================================================

    /// The current background.
    #[inline]
    pub fn background(&self) -> Option<&Drawable> {
        self.background.as_ref()
    }

    /// Replace the background, returning the previous one.
    pub fn set_background(&mut self, background: Option<Drawable>) -> Option<Drawable> {
        let previous = std::mem::replace(&mut self.background, background);
        self.background_changed.emit(());
        previous
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the view is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the view is visible.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // =========================================================================
    // Layout State
    // =========================================================================

    /// Whether the geometry is final: laid out at least once and no layout
    /// requested since.
    #[inline]
    pub fn is_laid_out(&self) -> bool {
        self.laid_out && !self.layout_requested
    }

    /// Whether a layout has been requested and not yet completed.
    #[inline]
    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Mark the geometry as stale until the next layout pass.
    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    /// Mark a layout pass as completed for this view.
    pub fn finish_layout(&mut self) {
        frost_trace!(target: targets::LAYOUT, geometry = ?self.geometry, "view layout finished");
        self.laid_out = true;
        self.layout_requested = false;
    }
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBase")
            .field("geometry", &self.geometry)
            .field("tag", &self.tag)
            .field("has_background", &self.background.is_some())
            .field("visible", &self.visible)
            .field("laid_out", &self.is_laid_out())
            .finish()
    }
}
