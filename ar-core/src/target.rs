#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The physical footprint of one planar reference image the tracking engine
/// recognizes.
///
/// Descriptors are produced when a target bundle is installed into the
/// engine and are immutable from then on. A target is referred to everywhere
/// by its index: position in the installed list, assigned by the engine in
/// bundle order.
///
/// `width` and `height` are in whatever physical unit the bundle was
/// authored in; the unit cancels out everywhere except the final scale of
/// anchored content, so consistency across the bundle is all that matters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TargetDescriptor {
    pub width: f64,
    pub height: f64,
}

impl TargetDescriptor {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
