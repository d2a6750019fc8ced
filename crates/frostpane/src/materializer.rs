//! Wrap blurred pixels in the drawable assigned to the target.

use frostpane_render::{BitmapDrawable, Drawable, PixelSurface, RoundedBitmapDrawable};

/// Turn a blurred surface into a background drawable.
///
/// A positive corner radius produces a drawable clipped to that radius on
/// all four corners; anything else (zero, negative, NaN) produces a plain
/// bitmap. The drawable takes ownership of the pixels.
pub fn materialize(blurred: PixelSurface, corner_radius: f32) -> Drawable {
    if corner_radius > 0.0 {
        Drawable::RoundedBitmap(RoundedBitmapDrawable::new(blurred, corner_radius))
    } else {
        Drawable::Bitmap(BitmapDrawable::new(blurred))
    }
}

#[cfg(test)]
mod tests {
    use frostpane_render::{Color, CornerRadii};

    use super::*;

    #[test]
    fn test_square_corners() {
        for radius in [0.0, -4.0, f32::NAN] {
            let drawable = materialize(PixelSurface::from_color(4, 4, Color::RED), radius);
            assert!(matches!(drawable, Drawable::Bitmap(_)));
            assert!(!drawable.is_rounded());
        }
    }

    #[test]
    fn test_rounded_corners() {
        let drawable = materialize(PixelSurface::from_color(4, 4, Color::RED), 6.0);
        assert!(matches!(drawable, Drawable::RoundedBitmap(_)));
        assert_eq!(drawable.corner_radii(), CornerRadii::uniform(6.0));
        assert_eq!(drawable.bitmap().map(PixelSurface::dimensions), Some((4, 4)));
    }
}
