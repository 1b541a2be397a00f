//! This crate seamlessly plugs into `ar-core` and provides the registration math for
//! planar-target AR. It interprets the raw projection matrix handed over by a tracking
//! engine, derives the vertical field of view and clip planes a virtual render camera
//! must adopt, cover-fits the raw video frame into its on-screen container, and
//! resolves the fixed per-target post-transform that converts the engine's unit-marker
//! poses into physically sized world transforms.
//!
//! Everything here is pure arithmetic over small `Copy` types. State, threads, and the
//! live tracking session live in `ar-session`.

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod placement;
mod post;
mod projection;

pub use error::*;
pub use placement::*;
pub use post::*;
pub use projection::*;
