//! Target selection and composite pass scheduling.
//!
//! A composite pass is requested whenever a target becomes known: on an
//! explicit call, when a child carrying the configured tag is attached, or
//! at the container's first layout when it holds exactly one child. The
//! request runs at once if the target already has final geometry, and
//! otherwise waits for the next [`BlurLayout::dispatch_layout_complete`].
//!
//! Every request yields its own pass. Requests are never merged, and each
//! one captures the configuration in effect when it was made.

use std::num::NonZeroU32;

use frostpane_core::logging::{span_names, targets};
use frostpane_core::{PerfSpan, ViewId, ViewTag, frost_debug, frost_warn};
use frostpane_render::PixelSurface;

use super::BlurLayout;
use crate::compositor::CompositeScene;
use crate::config::BlurConfiguration;
use crate::error::{BlurError, BlurResult};
use crate::materializer::materialize;
use crate::transform::apply_blur;
use crate::view::View;

/// Lifecycle of the container's blur effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionState {
    /// No target known and nothing configured to find one.
    Uninitialized,
    /// A tag is configured but unmatched, or several children exist and
    /// none was designated.
    AwaitingTarget,
    /// A pass has been requested and has not yet applied a background.
    AwaitingLayout,
    /// The current target carries a blurred background and no further pass
    /// is queued for it.
    Composited,
}

/// How the target child is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    /// No target.
    Unresolved,
    /// The first attached child carrying this tag.
    ByTag(ViewTag),
    /// A specific attached child.
    Explicit(ViewId),
}

/// A composite pass waiting for layout to complete.
#[derive(Debug, Clone, Copy)]
pub(super) struct PendingPass {
    pub(super) target: ViewId,
    pub(super) config: BlurConfiguration,
}

/// One-shot work run when layout completes.
#[derive(Debug, Clone, Copy)]
pub(super) enum LayoutHook {
    /// Adopt the sole child as target if none was resolved.
    InferSingleChild,
    /// Run a deferred composite pass.
    Composite(PendingPass),
}

impl BlurLayout {
    // =========================================================================
    // Targeting
    // =========================================================================

    /// Blur the background behind `target`.
    ///
    /// With `target` omitted the container must have exactly one child,
    /// which becomes the target. The configuration is replaced: an omitted
    /// or zero `blur_radius` clears any radius set before, leaving the target
    /// to provide one through [`BlurRadiusProvider`](crate::BlurRadiusProvider).
    ///
    /// The pass runs now if the target is already laid out and otherwise
    /// after the next layout. Errors from an immediate pass are returned
    /// here; errors from a deferred pass are returned by
    /// [`dispatch_layout_complete`](Self::dispatch_layout_complete).
    pub fn set_blurred_background_for_target_child(
        &mut self,
        target: Option<ViewId>,
        blur_radius: Option<u32>,
        corner_radius: f32,
    ) -> BlurResult<()> {
        let target = match target {
            Some(id) if self.views.contains_key(id) => id,
            Some(id) => return Err(BlurError::UnknownView(id)),
            None => match self.order.as_slice() {
                [only] => *only,
                children => {
                    return Err(BlurError::AmbiguousTarget {
                        child_count: children.len(),
                    });
                }
            },
        };

        self.config = BlurConfiguration {
            blur_radius: blur_radius.and_then(NonZeroU32::new),
            corner_radius,
        };
        self.retarget(target)
    }

    /// Blur the background behind the first child carrying `tag`.
    ///
    /// Fails with [`BlurError::UnknownTag`] if no direct child carries it.
    pub fn set_blurred_background_for_target_child_by_tag(
        &mut self,
        tag: ViewTag,
        blur_radius: Option<u32>,
        corner_radius: f32,
    ) -> BlurResult<()> {
        let target = self.find_view_by_tag(tag).ok_or(BlurError::UnknownTag(tag))?;
        self.set_blurred_background_for_target_child(Some(target), blur_radius, corner_radius)
    }

    /// The current target, if one is resolved and still attached.
    pub fn target(&self) -> Option<ViewId> {
        match self.resolution {
            TargetResolution::Unresolved => None,
            TargetResolution::ByTag(tag) => self.find_view_by_tag(tag),
            TargetResolution::Explicit(id) => self.views.contains_key(id).then_some(id),
        }
    }

    /// How the target is currently identified.
    #[inline]
    pub fn resolution(&self) -> TargetResolution {
        self.resolution
    }

    /// The current state of the blur effect.
    #[inline]
    pub fn state(&self) -> CompositionState {
        self.state
    }

    /// The configuration the next requested pass will capture.
    #[inline]
    pub fn configuration(&self) -> BlurConfiguration {
        self.config
    }

    /// Number of passes waiting for layout.
    pub fn pending_pass_count(&self) -> usize {
        self.hooks
            .iter()
            .filter(|hook| matches!(hook, LayoutHook::Composite(_)))
            .count()
    }

    fn retarget(&mut self, target: ViewId) -> BlurResult<()> {
        tracing::debug!(target: targets::CONTROLLER, ?target, "target resolved");
        self.resolution = TargetResolution::Explicit(target);
        self.request_pass(target)
    }

    fn request_pass(&mut self, target: ViewId) -> BlurResult<()> {
        let pass = PendingPass {
            target,
            config: self.config,
        };
        self.state = CompositionState::AwaitingLayout;

        if self.is_ready_for(target) {
            self.run_pass(pass)
        } else {
            frost_debug!(
                target: targets::CONTROLLER,
                ?target,
                "deferring composite pass until layout"
            );
            self.hooks.push_back(LayoutHook::Composite(pass));
            Ok(())
        }
    }

    fn is_ready_for(&self, target: ViewId) -> bool {
        self.base.is_laid_out()
            && self
                .views
                .get(target)
                .is_some_and(|view| view.view_base().is_laid_out())
    }

    // =========================================================================
    // Attach / Detach
    // =========================================================================

    pub(super) fn on_child_attached(&mut self, id: ViewId) -> BlurResult<()> {
        let tag = self.views.get(id).and_then(|view| view.tag());
        if let Some(tag) = tag
            && self.target_tag == Some(tag)
        {
            tracing::debug!(target: targets::CONTROLLER, ?id, %tag, "attached child matches target tag");
            return self.retarget(id);
        }

        if self.state == CompositionState::Uninitialized && self.order.len() > 1 {
            self.state = CompositionState::AwaitingTarget;
        }
        Ok(())
    }

    pub(super) fn on_child_detached(&mut self, id: ViewId) {
        if self.composited == Some(id) {
            self.composited = None;
        }
        if self.resolution != TargetResolution::Explicit(id) {
            return;
        }

        tracing::debug!(target: targets::CONTROLLER, ?id, "target detached");
        self.resolution = self
            .target_tag
            .map_or(TargetResolution::Unresolved, TargetResolution::ByTag);
        self.state = if self.target_tag.is_some() || self.order.len() > 1 {
            CompositionState::AwaitingTarget
        } else {
            CompositionState::Uninitialized
        };
    }

    // =========================================================================
    // Layout Hooks
    // =========================================================================

    pub(super) fn run_layout_hooks(&mut self) -> BlurResult<()> {
        let hooks: Vec<LayoutHook> = self.hooks.drain(..).collect();
        let mut first_error = None;

        for hook in hooks {
            let result = match hook {
                LayoutHook::InferSingleChild => self.infer_single_child(),
                LayoutHook::Composite(pass) => self.run_pass(pass),
            };
            if let Err(err) = result {
                tracing::warn!(target: targets::CONTROLLER, error = %err, "composite pass failed");
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn infer_single_child(&mut self) -> BlurResult<()> {
        if self.target().is_some() {
            return Ok(());
        }
        match self.order.as_slice() {
            [only] => {
                let only = *only;
                tracing::debug!(target: targets::CONTROLLER, target = ?only, "adopting sole child as target");
                self.retarget(only)
            }
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Composite Pass
    // =========================================================================

    /// Render what lies behind `target`, cropped to its bounds.
    ///
    /// This is the exact input a composite pass hands to the blur
    /// transform. Returns `Ok(None)` for a zero-area target.
    pub fn snapshot_behind(&self, target: ViewId) -> BlurResult<Option<PixelSurface>> {
        let children: Vec<(ViewId, &dyn View)> = self
            .order
            .iter()
            .filter_map(|&id| self.views.get(id).map(|view| (id, view.as_ref() as &dyn View)))
            .collect();
        let scene = CompositeScene {
            size: self.base.size(),
            background: self.base.background(),
            children: &children,
        };
        scene.compose(target)
    }

    fn run_pass(&mut self, pass: PendingPass) -> BlurResult<()> {
        let PendingPass { target, config } = pass;
        let Some(view) = self.views.get(target) else {
            frost_warn!(
                target: targets::CONTROLLER,
                ?target,
                "target detached before layout, dropping composite pass"
            );
            return Ok(());
        };

        let _span = PerfSpan::new(span_names::COMPOSITE_PASS);
        let blur_radius = config
            .effective_blur_radius(view.blur_radius_provider())
            .ok_or(BlurError::Configuration { target })?;
        let corner_radius = config.effective_corner_radius(view.corner_radius_provider());

        let Some(snapshot) = self.snapshot_behind(target)? else {
            self.settle(target);
            return Ok(());
        };
        let blurred = apply_blur(self.transform.as_ref(), &snapshot, blur_radius)?;
        drop(snapshot);

        let background = materialize(blurred, corner_radius);
        if let Some(view) = self.views.get_mut(target) {
            view.view_base_mut().set_background(Some(background));
        }

        self.composited = Some(target);
        self.settle(target);
        tracing::debug!(
            target: targets::CONTROLLER,
            ?target,
            blur_radius,
            corner_radius,
            "blurred background applied"
        );
        self.background_applied.emit(target);
        Ok(())
    }

    /// Enter `Composited` once the current target carries a blurred
    /// background and has no pass left in the queue.
    fn settle(&mut self, target: ViewId) {
        if self.target() == Some(target)
            && self.composited == Some(target)
            && !self.has_pending_pass_for(target)
        {
            self.state = CompositionState::Composited;
        }
    }

    fn has_pending_pass_for(&self, target: ViewId) -> bool {
        self.hooks
            .iter()
            .any(|hook| matches!(hook, LayoutHook::Composite(pass) if pass.target == target))
    }
}
