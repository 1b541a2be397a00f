use crate::AnchorPose;
use nalgebra::Matrix4;

/// The current tracking state of one target's anchor.
///
/// The distinction between [`Untracked`](Self::Untracked) and
/// [`Lost`](Self::Lost) is informational: `Untracked` means the engine has
/// never said anything about the target (startup, or before the first frame
/// containing it), `Lost` means the engine actively reported it as not
/// detected. Consumers render both identically (anchor hidden).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnchorState {
    /// No update has been received for this target yet.
    #[default]
    Untracked,
    /// The engine reported the target as not currently detected.
    Lost,
    /// The target is detected; contains the transform for anchored content.
    Tracked(AnchorPose),
}

impl AnchorState {
    /// Whether anchored content should be shown.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Tracked(_))
    }

    /// The pose, if the target is currently tracked.
    pub fn pose(self) -> Option<AnchorPose> {
        match self {
            Self::Tracked(pose) => Some(pose),
            _ => None,
        }
    }

    /// Matrix form of the state, for consumers that can only apply a
    /// transform and have no visibility switch.
    ///
    /// Non-visible states map onto [`AnchorPose::collapsed`], which
    /// guarantees attached geometry neither renders nor intercepts
    /// raycasts. Consumers with a real visibility flag should prefer
    /// [`is_visible`](Self::is_visible) + [`pose`](Self::pose) and never
    /// apply the collapsed matrix at all.
    pub fn matrix(self) -> Matrix4<f64> {
        match self {
            Self::Tracked(pose) => pose.homogeneous(),
            _ => AnchorPose::collapsed().homogeneous(),
        }
    }
}
