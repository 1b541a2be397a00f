//! The live layer of the AR crates: everything that holds state while a
//! tracking engine is running.
//!
//! The division of labor with its sibling crates is strict. `ar-core` names
//! the types, `ar-registration` computes with them, and this crate moves
//! them around at runtime:
//!
//! - [`TrackingEngine`] is the boundary trait an external feature-tracking
//!   engine implements.
//! - [`TrackingSession`] owns an engine, performs the startup sequence, and
//!   pumps the engine's pose updates into an [`AnchorStore`].
//! - [`AnchorStore`] holds the live per-target anchor state with one writer
//!   and any number of render-thread readers, none of which can ever see a
//!   torn matrix.
//! - [`AnchorBinding`] drives one scene node from one store slot each render
//!   tick and reports found/lost edges.
//! - [`ViewportController`] re-registers the virtual camera and the video
//!   placement whenever the container, video, or engine input changes.

mod binding;
mod engine;
mod session;
mod store;
mod viewport;

pub use binding::*;
pub use engine::*;
pub use session::*;
pub use store::*;
pub use viewport::*;
