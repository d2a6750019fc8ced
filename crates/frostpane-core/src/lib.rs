//! Core systems for Frostpane.
//!
//! This crate provides the pieces shared by the rendering layer and the
//! blur container:
//!
//! - **View identity**: [`ViewId`] handles and author-assigned [`ViewTag`]s
//! - **Signals**: [`Signal`] notifications invoked on the UI thread
//! - **Logging**: tracing targets, span names and [`PerfSpan`]
//!
//! # Signal Example
//!
//! ```
//! use frostpane_core::Signal;
//!
//! let children_changed = Signal::<()>::new();
//! children_changed.connect(|_| println!("children changed"));
//! children_changed.emit(());
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::PerfSpan;
pub use object::{ViewId, ViewTag};
pub use signal::{ConnectionId, Signal};
