//! Logging and tracing facilities for Frostpane.
//!
//! Frostpane uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("frostpane=debug")
//!     .init();
//! ```
//!
//! Every composite pass runs inside a [`PerfSpan`], so a subscriber that
//! records span timings can profile snapshot construction and the injected
//! blur call.

/// Span names used throughout Frostpane for tracing.
pub mod span_names {
    /// A full compose, blur, materialize cycle.
    pub const COMPOSITE_PASS: &str = "frostpane::composite_pass";
    /// Layout-completion dispatch.
    pub const LAYOUT: &str = "frostpane::layout";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "frostpane_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "frostpane_core::signal";
    /// Host layout and view tree target.
    pub const LAYOUT: &str = "frostpane::layout";
    /// Compositing engine target.
    pub const COMPOSITOR: &str = "frostpane::compositor";
    /// Composition controller target.
    pub const CONTROLLER: &str = "frostpane::controller";
    /// Pixel surface and drawable target.
    pub const RENDER: &str = "frostpane_render";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code, reason = "held only for its drop")]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "frostpane::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros. Without a leading
/// `target:` they log to [`targets::CORE`].
#[macro_export]
macro_rules! frost_trace {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::trace!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! frost_debug {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::debug!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! frost_warn {
    (target: $target:expr, $($arg:tt)*) => {
        tracing::warn!(target: $target, $($arg)*)
    };
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
