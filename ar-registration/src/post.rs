use ar_core::nalgebra::{Matrix4, Vector3};
use ar_core::TargetDescriptor;
use derive_more::{AsMut, AsRef, From, Into};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The fixed correction from a unit-marker pose to the marker's physical
/// footprint.
///
/// The tracking engine estimates poses for a unit square anchored at the
/// marker's corner. Scene content is authored against the marker's physical
/// size with the origin at its center, so every pose the engine reports gets
/// one translation and one uniform scale multiplied onto its right. The
/// correction has no rotation component, depends only on the descriptor, and
/// is resolved once when the target set is installed, never after.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PostTransform(pub Matrix4<f64>);

impl PostTransform {
    /// Builds the correction for one target: translate to the marker center,
    /// then scale the unit quad up to the marker width on all three axes.
    /// A non-square marker gets its vertical recentering from the `height`
    /// term of the translation.
    ///
    /// ```
    /// use ar_core::TargetDescriptor;
    /// use ar_registration::PostTransform;
    ///
    /// let post = PostTransform::from_descriptor(TargetDescriptor::new(1.0, 0.55));
    /// let m = post.homogeneous();
    /// assert_eq!(m[(0, 3)], 0.5);
    /// assert!((m[(1, 3)] - 0.275).abs() < 1e-12);
    /// assert_eq!(m[(2, 3)], 0.0);
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(2, 2)], 1.0);
    /// ```
    pub fn from_descriptor(descriptor: TargetDescriptor) -> Self {
        let width = descriptor.width;
        let height = descriptor.height;
        let translation = Matrix4::new_translation(&Vector3::new(
            width / 2.0,
            width / 2.0 + (height - width) / 2.0,
            0.0,
        ));
        let scale = Matrix4::new_scaling(width);
        Self(translation * scale)
    }

    /// The composed homogeneous matrix.
    pub fn homogeneous(self) -> Matrix4<f64> {
        self.0
    }
}

/// Resolves the post-transform for every target in an installed set. The
/// output order matches the input order, which is also the target index
/// order the engine reports poses with.
#[cfg(feature = "alloc")]
pub fn resolve_targets(descriptors: &[TargetDescriptor]) -> Vec<PostTransform> {
    descriptors
        .iter()
        .copied()
        .map(PostTransform::from_descriptor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_marker_translates_to_its_center() {
        let post = PostTransform::from_descriptor(TargetDescriptor::new(2.0, 2.0));
        let m = post.homogeneous();
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 1.0);
        assert_eq!(m[(2, 3)], 0.0);
        assert_eq!(m[(0, 0)], 2.0);
        assert_eq!(m[(1, 1)], 2.0);
        assert_eq!(m[(2, 2)], 2.0);
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn resolution_is_stable() {
        let descriptor = TargetDescriptor::new(1.3, 0.9);
        let first = PostTransform::from_descriptor(descriptor);
        let second = PostTransform::from_descriptor(descriptor);
        assert_eq!(first, second);
    }

    #[test]
    fn scale_does_not_disturb_the_translation() {
        // T * S with uniform S keeps the translation column intact.
        let post = PostTransform::from_descriptor(TargetDescriptor::new(0.5, 1.5));
        let m = post.homogeneous();
        assert_eq!(m[(0, 3)], 0.25);
        assert_eq!(m[(1, 3)], 0.75);
        assert_eq!(m[(0, 0)], 0.5);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_resolution_preserves_order() {
        let descriptors = [
            TargetDescriptor::new(1.0, 0.55),
            TargetDescriptor::new(2.0, 2.0),
        ];
        let posts = resolve_targets(&descriptors);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], PostTransform::from_descriptor(descriptors[0]));
        assert_eq!(posts[1], PostTransform::from_descriptor(descriptors[1]));
    }
}
