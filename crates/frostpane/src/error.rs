//! Error types for the blur container.

use frostpane_core::{ViewId, ViewTag};
use frostpane_render::RenderError;
use thiserror::Error;

use crate::config::AttributeError;

/// Errors raised while configuring or running a composite pass.
///
/// A failed pass never touches the target's background: whatever it showed
/// before the pass keeps showing.
#[derive(Error, Debug)]
pub enum BlurError {
    /// Neither the target nor the container supplied a blur radius.
    #[error("no blur radius for {target:?}: set one on the container or implement BlurRadiusProvider")]
    Configuration { target: ViewId },

    /// The target was omitted but the container does not have exactly one child.
    #[error("target child may only be omitted with exactly one child, container has {child_count}")]
    AmbiguousTarget { child_count: usize },

    /// The injected blur transform broke its output contract.
    #[error(
        "blur transform returned a {}x{} buffer for a {}x{} input",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    CollaboratorContract {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The view is not a direct child of this container.
    #[error("{0:?} is not a child of this container")]
    UnknownView(ViewId),

    /// No direct child carries the tag.
    #[error("no child tagged {0}")]
    UnknownTag(ViewTag),

    /// The snapshot surface could not be allocated.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Declarative attributes were malformed.
    #[error("attribute error: {0}")]
    Attributes(#[from] AttributeError),
}

/// Result type for blur container operations.
pub type BlurResult<T> = Result<T, BlurError>;
