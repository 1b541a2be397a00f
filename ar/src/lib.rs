//! # `ar`
//!
//! Batteries-included pure-Rust planar-target AR registration crate
//!
//! This crate should only be used for documentation/reference and for quickly
//! standing up an AR sample. It stores the pieces of the `ar-*` ecosystem in
//! one place for discoverability. If you are making a production application,
//! import the dependencies from this crate individually so that you only pay
//! for what you use.
//!
//! The vocabulary types everything speaks are included in the root of the
//! crate. Modules hold the functionality layers, all of which come from
//! optional libraries.
//!
//! ## Modules
//! * [`registration`] - pure math: projection interpretation, cover-fit video
//!   placement, per-target post-transforms
//! * [`session`] - the live layer: engine boundary, anchor store, scene-node
//!   bindings, viewport control, session lifecycle

#![no_std]

pub use ar_core::*;

/// Registration math over the core types
pub mod registration {
    #[cfg(feature = "ar-registration")]
    pub use ar_registration::*;
}

/// Everything that holds state while an engine is running
pub mod session {
    #[cfg(feature = "ar-session")]
    pub use ar_session::*;
}
