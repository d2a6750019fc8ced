//! Snapshot construction for a composite pass.
//!
//! The snapshot is what the container looks like *behind* the target: the
//! container background, every child that precedes the target in draw order,
//! and the target's own background, with nothing from the target's content
//! or any later sibling. The result is cropped to the target's rectangle.

use frostpane_core::ViewId;
use frostpane_core::logging::targets;
use frostpane_render::{Canvas, Drawable, PixelSurface, Rect, Size};

use crate::error::{BlurError, BlurResult};
use crate::view::View;

/// The parts of a container the compositing engine reads.
#[derive(Clone, Copy)]
pub struct CompositeScene<'a> {
    /// Container size.
    pub size: Size,
    /// Container background, stretched to the container bounds.
    pub background: Option<&'a Drawable>,
    /// Children in draw order.
    pub children: &'a [(ViewId, &'a dyn View)],
}

impl CompositeScene<'_> {
    /// Render everything behind `target` into a container-sized surface.
    ///
    /// Fails with [`BlurError::UnknownView`] if `target` is not one of the
    /// scene's children.
    pub fn render_behind(&self, target: ViewId) -> BlurResult<PixelSurface> {
        let index = self
            .children
            .iter()
            .position(|(id, _)| *id == target)
            .ok_or(BlurError::UnknownView(target))?;

        let bounds = Rect::from_size(self.size).to_pixel_rect();
        let mut surface = PixelSurface::try_new(bounds.width, bounds.height)?;
        let mut canvas = Canvas::new(&mut surface);

        if let Some(background) = self.background {
            canvas.draw_drawable(background, bounds.to_rect());
        }

        for (_, child) in &self.children[..index] {
            if !child.is_visible() {
                continue;
            }
            let geometry = child.geometry();
            canvas.with_translation(geometry.left(), geometry.top(), |canvas| {
                child.draw(canvas);
            });
        }

        let (_, target_view) = self.children[index];
        if let Some(background) = target_view.background() {
            let geometry = target_view.geometry();
            canvas.with_translation(geometry.left(), geometry.top(), |canvas| {
                canvas.draw_drawable(background, target_view.view_base().rect());
            });
        }

        Ok(surface)
    }

    /// Build the cropped snapshot for `target`.
    ///
    /// Returns `Ok(None)` when the target's pixel rectangle has zero area.
    /// The snapshot always has exactly the target's pixel size; any part of
    /// the target outside the container is transparent.
    pub fn compose(&self, target: ViewId) -> BlurResult<Option<PixelSurface>> {
        let target_view = self
            .children
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, view)| *view)
            .ok_or(BlurError::UnknownView(target))?;

        let crop = target_view.geometry().to_pixel_rect();
        if crop.is_empty() {
            tracing::debug!(
                target: targets::COMPOSITOR,
                ?target,
                "target has zero area, skipping snapshot"
            );
            return Ok(None);
        }

        let full = self.render_behind(target)?;
        tracing::trace!(
            target: targets::COMPOSITOR,
            ?target,
            x = crop.x,
            y = crop.y,
            width = crop.width,
            height = crop.height,
            "cropping snapshot"
        );
        Ok(Some(full.crop(crop)?))
    }
}

#[cfg(test)]
mod tests {
    use frostpane_render::{Color, PixelRect};
    use slotmap::SlotMap;

    use super::*;
    use crate::view::Panel;

    fn ids(count: usize) -> Vec<ViewId> {
        let mut map = SlotMap::<ViewId, ()>::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_render_behind_excludes_target_content_and_later_siblings() {
        let ids = ids(3);
        let before = Panel::new()
            .with_geometry(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_background(Color::RED);
        let target = Panel::new()
            .with_geometry(Rect::new(5.0, 5.0, 10.0, 10.0))
            .with_content(Rect::new(0.0, 0.0, 10.0, 10.0), Color::YELLOW);
        let after = Panel::new()
            .with_geometry(Rect::new(0.0, 0.0, 20.0, 20.0))
            .with_background(Color::WHITE);

        let children: Vec<(ViewId, &dyn View)> =
            vec![(ids[0], &before), (ids[1], &target), (ids[2], &after)];
        let background = Drawable::Color(Color::BLUE);
        let scene = CompositeScene {
            size: Size::new(20.0, 20.0),
            background: Some(&background),
            children: &children,
        };

        let full = scene.render_behind(ids[1]).unwrap();
        assert_eq!(full.dimensions(), (20, 20));
        assert_eq!(full.get_rgba8(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(full.get_rgba8(12, 12), Some([0, 0, 255, 255]));
        assert_eq!(full.get_rgba8(19, 19), Some([0, 0, 255, 255]));

        let snapshot = scene.compose(ids[1]).unwrap().unwrap();
        assert_eq!(snapshot.dimensions(), (10, 10));
        assert_eq!(snapshot, full.crop(PixelRect::new(5, 5, 10, 10)).unwrap());
        assert_eq!(snapshot.get_rgba8(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(snapshot.get_rgba8(5, 5), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_target_background_is_drawn_last() {
        let ids = ids(1);
        let target = Panel::new()
            .with_geometry(Rect::new(2.0, 2.0, 4.0, 4.0))
            .with_background(Color::GREEN);
        let children: Vec<(ViewId, &dyn View)> = vec![(ids[0], &target)];
        let background = Drawable::Color(Color::BLUE);
        let scene = CompositeScene {
            size: Size::new(8.0, 8.0),
            background: Some(&background),
            children: &children,
        };

        let snapshot = scene.compose(ids[0]).unwrap().unwrap();
        assert_eq!(snapshot.get_rgba8(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(snapshot.get_rgba8(3, 3), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_invisible_children_are_skipped() {
        let ids = ids(2);
        let mut hidden = Panel::new()
            .with_geometry(Rect::new(0.0, 0.0, 4.0, 4.0))
            .with_background(Color::RED);
        hidden.view_base_mut().set_visible(false);
        let target = Panel::new().with_geometry(Rect::new(0.0, 0.0, 4.0, 4.0));
        let children: Vec<(ViewId, &dyn View)> = vec![(ids[0], &hidden), (ids[1], &target)];
        let scene = CompositeScene {
            size: Size::new(4.0, 4.0),
            background: None,
            children: &children,
        };

        let snapshot = scene.compose(ids[1]).unwrap().unwrap();
        assert_eq!(snapshot.get_rgba8(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_target_outside_container_is_transparent() {
        let ids = ids(1);
        let target = Panel::new().with_geometry(Rect::new(6.0, 6.0, 4.0, 4.0));
        let children: Vec<(ViewId, &dyn View)> = vec![(ids[0], &target)];
        let background = Drawable::Color(Color::BLUE);
        let scene = CompositeScene {
            size: Size::new(8.0, 8.0),
            background: Some(&background),
            children: &children,
        };

        let snapshot = scene.compose(ids[0]).unwrap().unwrap();
        assert_eq!(snapshot.dimensions(), (4, 4));
        assert_eq!(snapshot.get_rgba8(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(snapshot.get_rgba8(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_zero_area_target_has_no_snapshot() {
        let ids = ids(1);
        let target = Panel::new().with_geometry(Rect::new(1.0, 1.0, 0.0, 5.0));
        let children: Vec<(ViewId, &dyn View)> = vec![(ids[0], &target)];
        let scene = CompositeScene {
            size: Size::new(8.0, 8.0),
            background: None,
            children: &children,
        };
        assert!(scene.compose(ids[0]).unwrap().is_none());
    }

    #[test]
    fn test_unknown_target() {
        let ids = ids(2);
        let scene = CompositeScene {
            size: Size::new(8.0, 8.0),
            background: None,
            children: &[],
        };
        assert!(matches!(scene.compose(ids[1]), Err(BlurError::UnknownView(_))));
        assert!(matches!(scene.render_behind(ids[0]), Err(BlurError::UnknownView(_))));
    }

    #[test]
    fn test_target_too_large_to_snapshot() {
        let ids = ids(1);
        let target = Panel::new().with_geometry(Rect::new(0.0, 0.0, 1.0e10, 1.0e10));
        let children: Vec<(ViewId, &dyn View)> = vec![(ids[0], &target)];
        let scene = CompositeScene {
            size: Size::new(10.0, 10.0),
            background: None,
            children: &children,
        };
        assert!(matches!(scene.compose(ids[0]), Err(BlurError::Render(_))));
    }
}
