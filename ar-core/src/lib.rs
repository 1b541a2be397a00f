//! # Rust AR Core
//!
//! This library provides the common vocabulary for planar-target augmented
//! reality in Rust: target descriptors, tracker poses, anchor states, the
//! tracking-engine configuration, and the seam to the render host's scene
//! nodes. All the AR crates that produce or consume tracked poses depend on
//! this crate so that they can interoperate. The crate is designed to be very
//! small so that it adds negligible build time.
//!
//! The crate works with `#![no_std]`. It deliberately contains no algorithms:
//! deriving camera parameters and video placement from tracker data lives in
//! `ar-registration`, and the live session layer (pose store, bindings,
//! engine lifecycle) lives in `ar-session`.
//!
//! ## The shape of the pipeline
//!
//! An external feature-tracking engine watches a video stream and reports,
//! per recognized target, either a pose for a *unit marker quad* or the fact
//! that the target is not currently detected. Everything downstream is plain
//! geometry:
//!
//! ```text
//!  video frame ──▶ tracking engine ──▶ PoseUpdate ──▶ anchor store ──▶ scene node
//!                        │
//!                        └─ raw projection ──▶ virtual camera + video placement
//! ```
//!
//! The pose for a target is a 4×4 matrix in the same element order that
//! scene-graph libraries use for their flat-array constructors (column
//! major). This crate neither smooths nor reinterprets poses; it only gives
//! them types.

#![no_std]

mod anchor;
mod node;
mod pose;
mod target;
mod tracker;

pub use anchor::*;
pub use nalgebra;
pub use node::*;
pub use pose::*;
pub use target::*;
pub use tracker::*;
