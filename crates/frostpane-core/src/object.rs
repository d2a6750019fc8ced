//! View identity.
//!
//! Two kinds of identity exist for a child view:
//!
//! - [`ViewId`] is the handle a container hands out when a view is attached.
//!   It is the "explicit reference" form of targeting a child.
//! - [`ViewTag`] is a stable, author-chosen identifier that a view carries
//!   before it is attached. Declarative configuration refers to children by
//!   tag because handles do not exist yet at parse time.

use std::fmt;

use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// A handle to a view attached to a container.
    ///
    /// `ViewId`s remain valid until the view is removed from its container.
    pub struct ViewId;
}

/// A stable identifier assigned to a view by its author.
///
/// Tags are resolved against children as they are attached. Zero is not a
/// valid tag, matching hosts that use zero as "no identifier".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u32")]
pub struct ViewTag(u32);

impl ViewTag {
    /// Create a tag, returning `None` for zero.
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// The raw numeric value of this tag.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ViewTag {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "view tag must be non-zero".to_string())
    }
}

impl fmt::Display for ViewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
