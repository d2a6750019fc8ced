//! Views placed inside a blur container.
//!
//! - [`View`]: the trait every child implements
//! - [`ViewBase`]: geometry, background, tag and layout state
//! - [`BlurRadiusProvider`] / [`CornerRadiusProvider`]: optional capabilities
//!   a target view exposes to override the configured radii
//! - [`Panel`]: a ready-made view with a background and painted content

mod base;
mod panel;
mod traits;

pub use base::ViewBase;
pub use panel::Panel;
pub use traits::{BlurRadiusProvider, CornerRadiusProvider, View};
