//! Blur configuration and declarative container attributes.
//!
//! A [`BlurConfiguration`] is what a composite pass reads: the blur radius
//! and the corner radius. It is set either programmatically through
//! [`BlurLayout::set_blurred_background_for_target_child`] or
//! declaratively from [`BlurLayoutAttributes`], usually loaded from TOML:
//!
//! ```toml
//! target-child-tag = 3
//! blur-radius = 16
//! target-child-background-corner-radius = 12.0
//! ```
//!
//! [`BlurLayout::set_blurred_background_for_target_child`]: crate::BlurLayout::set_blurred_background_for_target_child

use std::num::NonZeroU32;

use frostpane_core::ViewTag;
use serde::Deserialize;
use thiserror::Error;

use crate::view::{BlurRadiusProvider, CornerRadiusProvider};

/// The radii a composite pass runs with, before per-view overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlurConfiguration {
    /// Blur radius. `None` means the target must provide one.
    pub blur_radius: Option<NonZeroU32>,
    /// Corner radius of the materialized background. Zero or less means
    /// square corners.
    pub corner_radius: f32,
}

impl BlurConfiguration {
    /// Create a configuration with no blur radius and square corners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blur radius using builder pattern. Zero clears it.
    pub fn with_blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = NonZeroU32::new(radius);
        self
    }

    /// Set the corner radius using builder pattern.
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// The blur radius to use, given the target's optional capability.
    ///
    /// A provided value always wins over the configured one.
    pub fn effective_blur_radius(&self, provider: Option<&dyn BlurRadiusProvider>) -> Option<u32> {
        match provider {
            Some(provider) => Some(provider.provide_blur_radius()),
            None => self.blur_radius.map(NonZeroU32::get),
        }
    }

    /// The corner radius to use, given the target's optional capability.
    pub fn effective_corner_radius(&self, provider: Option<&dyn CornerRadiusProvider>) -> f32 {
        provider.map_or(self.corner_radius, |provider| provider.provide_corner_radius())
    }
}

/// Errors from parsing or validating [`BlurLayoutAttributes`].
#[derive(Error, Debug)]
pub enum AttributeError {
    /// The attribute source was not valid TOML for this schema.
    #[error("failed to parse attributes: {0}")]
    Parse(#[from] toml::de::Error),

    /// A blur radius was given but is zero.
    #[error("blur-radius must be positive")]
    ZeroBlurRadius,

    /// The corner radius is negative or not a number.
    #[error("target-child-background-corner-radius must be a non-negative number, got {0}")]
    InvalidCornerRadius(f32),
}

/// Declarative configuration applied when a container is constructed.
///
/// All three attributes are optional. An absent tag leaves the target to be
/// chosen later, or inferred when the container ends up with one child.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BlurLayoutAttributes {
    /// Tag of the child to blur behind.
    pub target_child_tag: Option<ViewTag>,
    /// Blur radius.
    pub blur_radius: Option<u32>,
    /// Corner radius of the blurred background.
    pub target_child_background_corner_radius: Option<f32>,
}

impl BlurLayoutAttributes {
    /// Parse and validate attributes from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AttributeError> {
        let attributes: Self = toml::from_str(source)?;
        attributes.validate()?;
        Ok(attributes)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), AttributeError> {
        if self.blur_radius == Some(0) {
            return Err(AttributeError::ZeroBlurRadius);
        }
        if let Some(radius) = self.target_child_background_corner_radius
            && (radius.is_nan() || radius < 0.0)
        {
            return Err(AttributeError::InvalidCornerRadius(radius));
        }
        Ok(())
    }

    /// The configuration these attributes describe.
    pub fn to_configuration(&self) -> BlurConfiguration {
        BlurConfiguration {
            blur_radius: self.blur_radius.and_then(NonZeroU32::new),
            corner_radius: self.target_child_background_corner_radius.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRadius(u32);

    impl BlurRadiusProvider for FixedRadius {
        fn provide_blur_radius(&self) -> u32 {
            self.0
        }
    }

    struct FixedCorner(f32);

    impl CornerRadiusProvider for FixedCorner {
        fn provide_corner_radius(&self) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_provider_wins_over_configuration() {
        let config = BlurConfiguration::new().with_blur_radius(10).with_corner_radius(4.0);
        assert_eq!(config.effective_blur_radius(None), Some(10));
        assert_eq!(config.effective_blur_radius(Some(&FixedRadius(25))), Some(25));
        assert_eq!(config.effective_corner_radius(None), 4.0);
        assert_eq!(config.effective_corner_radius(Some(&FixedCorner(9.0))), 9.0);
    }

    #[test]
    fn test_missing_radius_is_unresolved() {
        let config = BlurConfiguration::new();
        assert_eq!(config.effective_blur_radius(None), None);
        assert_eq!(config.with_blur_radius(0).blur_radius, None);
    }

    #[test]
    fn test_parse_attributes() {
        let attributes = BlurLayoutAttributes::from_toml_str(
            r#"
            target-child-tag = 3
            blur-radius = 16
            target-child-background-corner-radius = 12.5
            "#,
        )
        .unwrap();

        assert_eq!(attributes.target_child_tag, ViewTag::new(3));
        let config = attributes.to_configuration();
        assert_eq!(config.blur_radius.map(NonZeroU32::get), Some(16));
        assert_eq!(config.corner_radius, 12.5);
    }

    #[test]
    fn test_empty_attributes() {
        let attributes = BlurLayoutAttributes::from_toml_str("").unwrap();
        assert_eq!(attributes, BlurLayoutAttributes::default());
        assert_eq!(attributes.to_configuration(), BlurConfiguration::new());
    }

    #[test]
    fn test_invalid_attributes() {
        assert!(matches!(
            BlurLayoutAttributes::from_toml_str("blur-radius = 0"),
            Err(AttributeError::ZeroBlurRadius)
        ));
        assert!(matches!(
            BlurLayoutAttributes::from_toml_str("target-child-background-corner-radius = -1.0"),
            Err(AttributeError::InvalidCornerRadius(_))
        ));
        assert!(matches!(
            BlurLayoutAttributes::from_toml_str("target-child-tag = 0"),
            Err(AttributeError::Parse(_))
        ));
        assert!(matches!(
            BlurLayoutAttributes::from_toml_str("blur = 3"),
            Err(AttributeError::Parse(_))
        ));
    }
}
