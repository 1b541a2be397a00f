use derive_more::{AsMut, AsRef, From, Into};
use nalgebra::Matrix4;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A pose reported by the tracking engine for one target.
///
/// The engine estimates poses for a *unit marker quad* anchored at a corner,
/// regardless of the target's physical size. A `TrackerPose` therefore still
/// needs the per-target post-transform (see `ar-registration`) applied
/// before it can position real content; the composed result is an
/// [`AnchorPose`].
///
/// The matrix is a 4×4 world transform. It is near-rigid but not guaranteed
/// rigid, so it is kept as a general homogeneous matrix rather than an
/// isometry.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TrackerPose(pub Matrix4<f64>);

impl TrackerPose {
    /// Builds the pose from the engine's flat 16-element array.
    ///
    /// The element order is column major, the same layout scene-graph
    /// libraries consume in their `fromArray` constructors.
    pub fn from_column_major(elements: &[f64; 16]) -> Self {
        Self(Matrix4::from_column_slice(elements))
    }

    /// Retrieve the homogeneous matrix.
    pub fn homogeneous(self) -> Matrix4<f64> {
        self.0
    }
}

/// The world transform an anchored scene node should adopt: the engine's
/// unit-marker pose composed with the target's post-transform.
///
/// An `AnchorPose` only exists for a visible target. "Not visible" is an
/// explicit state ([`AnchorState`](crate::AnchorState)), not a reserved
/// matrix value, so consumers cannot confuse geometry with visibility. The
/// historical degenerate matrix is still available through
/// [`AnchorPose::collapsed`] for consumers that can only apply a transform.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AnchorPose(pub Matrix4<f64>);

impl AnchorPose {
    /// The all-zero-scale matrix conventionally used to park undetected
    /// anchors.
    ///
    /// Geometry under such a transform collapses to a point at the origin:
    /// it cannot rasterize to any pixel and cannot be hit by a raycast. Only
    /// the homogeneous `(3, 3)` element is 1 so the matrix stays a valid
    /// (if degenerate) homogeneous transform.
    pub fn collapsed() -> Self {
        let mut m = Matrix4::zeros();
        m[(3, 3)] = 1.0;
        Self(m)
    }

    /// Whether this is the [`collapsed`](Self::collapsed) sentinel.
    pub fn is_collapsed(&self) -> bool {
        *self == Self::collapsed()
    }

    /// Retrieve the homogeneous matrix.
    pub fn homogeneous(self) -> Matrix4<f64> {
        self.0
    }
}
