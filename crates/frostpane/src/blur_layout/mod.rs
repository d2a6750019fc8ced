//! The blur container.
//!
//! [`BlurLayout`] stacks its children in insertion order, like a frame, and
//! gives one of them, the *target*, a background made of everything drawn
//! behind it, blurred.
//!
//! # Driving the container
//!
//! The container does not measure or position children. The host does, and
//! reports the result:
//!
//! ```
//! use std::sync::Arc;
//! use frostpane::{BlurLayout, BlurTransform, Panel};
//! use frostpane::render::{Color, PixelSurface, Rect, Size};
//!
//! let transform: Arc<dyn BlurTransform> =
//!     Arc::new(|input: &PixelSurface, _radius: u32| input.clone());
//! let mut layout = BlurLayout::new(transform);
//! layout.set_background(Some(Color::BLUE.into()));
//!
//! let card = layout.add_view(Panel::new()).unwrap();
//! layout.set_blurred_background_for_target_child(Some(card), Some(8), 12.0).unwrap();
//!
//! // Nothing happens until the target has final geometry.
//! assert!(layout.view(card).unwrap().background().is_none());
//!
//! layout.layout(Size::new(200.0, 100.0), &[(card, Rect::new(20.0, 20.0, 160.0, 60.0))]).unwrap();
//! assert!(layout.view(card).unwrap().background().is_some());
//! ```
//!
//! Later resizes do not recomposite. Request a new pass to refresh the
//! background.

mod controller;


use std::collections::VecDeque;
use std::sync::Arc;

use frostpane_core::logging::{span_names, targets};
use frostpane_core::{PerfSpan, Signal, ViewId, ViewTag};
use frostpane_render::{Canvas, Drawable, Rect, Size};
use slotmap::SlotMap;

pub use controller::{CompositionState, TargetResolution};
use controller::LayoutHook;

use crate::config::{BlurConfiguration, BlurLayoutAttributes};
use crate::error::{BlurError, BlurResult};
use crate::transform::BlurTransform;
use crate::view::{View, ViewBase};

/// A frame-style container that blurs what lies behind one of its children.
///
/// # Signals
///
/// - `children_changed()`: Emitted after a child is added or removed
/// - `background_applied(ViewId)`: Emitted after a pass assigns a blurred
///   background to its target
pub struct BlurLayout {
    /// Container geometry, background and layout state.
    base: ViewBase,

    /// Attached children.
    views: SlotMap<ViewId, Box<dyn View>>,

    /// Draw order, back to front.
    order: Vec<ViewId>,

    /// Injected blur function.
    transform: Arc<dyn BlurTransform>,

    /// Radii captured by the next requested pass.
    config: BlurConfiguration,

    /// Tag from the construction attributes, matched on every attach.
    target_tag: Option<ViewTag>,

    resolution: TargetResolution,
    state: CompositionState,

    /// Child whose background came from the latest successful pass.
    composited: Option<ViewId>,

    /// One-shot work waiting for layout completion, in registration order.
    hooks: VecDeque<LayoutHook>,

    /// Signal emitted when children are added or removed.
    pub children_changed: Signal<()>,

    /// Signal emitted when a target receives a blurred background.
    pub background_applied: Signal<ViewId>,
}

impl BlurLayout {
    /// Create a container with no attributes.
    pub fn new(transform: Arc<dyn BlurTransform>) -> Self {
        Self::build(transform, &BlurLayoutAttributes::default())
    }

    /// Create a container configured by declarative attributes.
    pub fn with_attributes(
        transform: Arc<dyn BlurTransform>,
        attributes: &BlurLayoutAttributes,
    ) -> BlurResult<Self> {
        attributes.validate()?;
        Ok(Self::build(transform, attributes))
    }

    /// Create a container from a TOML attribute document.
    pub fn from_toml_str(transform: Arc<dyn BlurTransform>, source: &str) -> BlurResult<Self> {
        let attributes = BlurLayoutAttributes::from_toml_str(source)?;
        Ok(Self::build(transform, &attributes))
    }

    fn build(transform: Arc<dyn BlurTransform>, attributes: &BlurLayoutAttributes) -> Self {
        let target_tag = attributes.target_child_tag;
        let config = attributes.to_configuration();
        tracing::debug!(
            target: targets::CONTROLLER,
            ?target_tag,
            ?config,
            "blur layout created"
        );

        let (resolution, state) = match target_tag {
            Some(tag) => (TargetResolution::ByTag(tag), CompositionState::AwaitingTarget),
            None => (TargetResolution::Unresolved, CompositionState::Uninitialized),
        };

        Self {
            base: ViewBase::new(),
            views: SlotMap::with_key(),
            order: Vec::new(),
            transform,
            config,
            target_tag,
            resolution,
            state,
            composited: None,
            hooks: VecDeque::from([LayoutHook::InferSingleChild]),
            children_changed: Signal::new(),
            background_applied: Signal::new(),
        }
    }

    /// The tag from the construction attributes.
    #[inline]
    pub fn target_tag(&self) -> Option<ViewTag> {
        self.target_tag
    }

    /// The injected blur transform.
    #[inline]
    pub fn transform(&self) -> &Arc<dyn BlurTransform> {
        &self.transform
    }

    // =========================================================================
    // Background
    // =========================================================================

    /// The container's own background.
    #[inline]
    pub fn background(&self) -> Option<&Drawable> {
        self.base.background()
    }

    /// Replace the container's background. Does not recomposite.
    pub fn set_background(&mut self, background: Option<Drawable>) {
        self.base.set_background(background);
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Append a child on top of the existing ones.
    ///
    /// If the child carries the configured target tag it becomes the target
    /// and a pass is requested.
    pub fn add_view(&mut self, view: impl View + 'static) -> BlurResult<ViewId> {
        self.attach(self.order.len(), Box::new(view))
    }

    /// Insert a child at `index` in draw order. Indices past the end append.
    pub fn insert_view(&mut self, index: usize, view: impl View + 'static) -> BlurResult<ViewId> {
        self.attach(index, Box::new(view))
    }

    /// Append an already boxed child.
    pub fn add_boxed_view(&mut self, view: Box<dyn View>) -> BlurResult<ViewId> {
        self.attach(self.order.len(), view)
    }

    fn attach(&mut self, index: usize, view: Box<dyn View>) -> BlurResult<ViewId> {
        let id = self.views.insert(view);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.base.request_layout();

        tracing::trace!(target: targets::LAYOUT, ?id, index, "child attached");
        self.children_changed.emit(());
        self.on_child_attached(id)?;
        Ok(id)
    }

    /// Detach a child and hand it back.
    ///
    /// Removing the target drops any pass still waiting for it.
    pub fn remove_view(&mut self, id: ViewId) -> Option<Box<dyn View>> {
        let view = self.views.remove(id)?;
        self.order.retain(|&child| child != id);
        self.base.request_layout();

        tracing::trace!(target: targets::LAYOUT, ?id, "child detached");
        self.on_child_detached(id);
        self.children_changed.emit(());
        Some(view)
    }

    /// Get a child by id.
    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.views.get(id).map(|view| view.as_ref() as &dyn View)
    }

    /// Get a child by id, mutably.
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut (dyn View + 'static)> {
        self.views.get_mut(id).map(|view| view.as_mut())
    }

    /// Children in draw order, back to front.
    #[inline]
    pub fn children(&self) -> &[ViewId] {
        &self.order
    }

    /// Number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.order.len()
    }

    /// The first child, in draw order, carrying `tag`.
    pub fn find_view_by_tag(&self, tag: ViewTag) -> Option<ViewId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.views.get(id).is_some_and(|view| view.tag() == Some(tag)))
    }

    // =========================================================================
    // Host Layout
    // =========================================================================

    /// The container size.
    #[inline]
    pub fn size(&self) -> Size {
        self.base.size()
    }

    /// Set the container size. A change requests layout.
    pub fn set_size(&mut self, size: Size) {
        let origin = self.base.geometry().origin;
        self.base.set_geometry(Rect { origin, size });
    }

    /// Position a child within the container.
    pub fn set_child_geometry(&mut self, id: ViewId, geometry: Rect) -> BlurResult<()> {
        let view = self.views.get_mut(id).ok_or(BlurError::UnknownView(id))?;
        view.view_base_mut().set_geometry(geometry);
        Ok(())
    }

    /// Apply a size and child geometries, then complete the layout.
    pub fn layout(&mut self, size: Size, geometries: &[(ViewId, Rect)]) -> BlurResult<()> {
        self.set_size(size);
        for &(id, geometry) in geometries {
            self.set_child_geometry(id, geometry)?;
        }
        self.dispatch_layout_complete()
    }

    /// Mark layout as complete for the container and every child, then run
    /// the work that was waiting for it.
    ///
    /// All waiting passes run even if one fails; the first failure is
    /// returned.
    pub fn dispatch_layout_complete(&mut self) -> BlurResult<()> {
        let _span = PerfSpan::new(span_names::LAYOUT);
        self.base.finish_layout();
        for view in self.views.values_mut() {
            view.view_base_mut().finish_layout();
        }

        tracing::debug!(
            target: targets::LAYOUT,
            size = ?self.base.size(),
            hooks = self.hooks.len(),
            "layout complete"
        );
        self.run_layout_hooks()
    }
}

impl View for BlurLayout {
    fn view_base(&self) -> &ViewBase {
        &self.base
    }

    fn view_base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn paint_content(&self, canvas: &mut Canvas<'_>) {
        for &id in &self.order {
            let Some(child) = self.views.get(id) else {
                continue;
            };
            if !child.is_visible() {
                continue;
            }
            let geometry = child.geometry();
            canvas.with_translation(geometry.left(), geometry.top(), |canvas| {
                child.draw(canvas);
            });
        }
    }
}

impl std::fmt::Debug for BlurLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlurLayout")
            .field("size", &self.base.size())
            .field("children", &self.order.len())
            .field("config", &self.config)
            .field("resolution", &self.resolution)
            .field("state", &self.state)
            .field("pending_passes", &self.pending_pass_count())
            .finish_non_exhaustive()
    }
}
