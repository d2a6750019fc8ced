//! Renders a frosted-glass card over a striped backdrop and saves it as PNG.
//!
//! Run with: cargo run -p frostpane --example frosted_card [output.png]
//!
//! Set `RUST_LOG=frostpane=debug` to watch the composite pass.

use std::sync::Arc;

use frostpane::render::{Canvas, Color, PixelSurface, Rect, Size};
use frostpane::{BlurLayout, BlurTransform, Panel, View, ViewTag};
use tracing_subscriber::EnvFilter;

const WIDTH: f32 = 360.0;
const HEIGHT: f32 = 240.0;
const CARD_TAG: u32 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frostpane=info")))
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "frosted_card.png".to_string());

    let transform: Arc<dyn BlurTransform> = Arc::new(|input: &PixelSurface, radius: u32| {
        PixelSurface::from_image(image::imageops::blur(input.as_image(), radius as f32 / 2.0))
    });

    let mut layout = BlurLayout::from_toml_str(
        transform,
        &format!(
            "target-child-tag = {CARD_TAG}\n\
             blur-radius = 24\n\
             target-child-background-corner-radius = 18.0\n"
        ),
    )?;
    layout.set_background(Some(Color::from_rgb8(24, 32, 48).into()));

    // Backdrop: diagonal-ish bands of color for the blur to smear.
    let palette = [
        Color::from_rgb8(231, 76, 60),
        Color::from_rgb8(241, 196, 15),
        Color::from_rgb8(46, 204, 113),
        Color::from_rgb8(52, 152, 219),
        Color::from_rgb8(155, 89, 182),
    ];
    let mut geometries = Vec::new();
    for (index, color) in palette.iter().enumerate() {
        let band = layout.add_view(Panel::new().with_background(*color))?;
        let x = index as f32 * 72.0;
        geometries.push((band, Rect::new(x, index as f32 * 24.0, 56.0, HEIGHT)));
    }

    let label = Panel::new()
        .with_tag(ViewTag::new(CARD_TAG).ok_or("card tag must be non-zero")?)
        .with_content(Rect::new(24.0, 28.0, 120.0, 12.0), Color::WHITE.with_alpha(0.9))
        .with_content(Rect::new(24.0, 52.0, 180.0, 8.0), Color::WHITE.with_alpha(0.6))
        .with_content(Rect::new(24.0, 68.0, 150.0, 8.0), Color::WHITE.with_alpha(0.6));
    let card = layout.add_view(label)?;
    geometries.push((card, Rect::new(60.0, 60.0, 240.0, 120.0)));

    layout.layout(Size::new(WIDTH, HEIGHT), &geometries)?;
    tracing::info!(state = ?layout.state(), "layout complete");

    let mut surface = PixelSurface::try_new(WIDTH as u32, HEIGHT as u32)?;
    layout.draw(&mut Canvas::new(&mut surface));
    surface.save(&output)?;
    println!("wrote {output}");

    Ok(())
}
