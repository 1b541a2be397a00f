use ar_core::{AnchorPose, AnchorState, PoseUpdate};
use ar_registration::PostTransform;
use log::*;
use parking_lot::RwLock;
use std::sync::Arc;

/// The live pose state for every installed target.
///
/// One slot per target, created all at once when targets are installed and
/// sized for the whole session. The session's event pump is the only
/// intended writer; any number of [`AnchorBinding`](crate::AnchorBinding)s
/// read concurrently from the render thread. A write replaces the whole
/// slot, so a reader sees either the previous state or the next one and
/// never a matrix mixing two updates.
///
/// Cloning is cheap and shares the slots.
#[derive(Debug, Clone)]
pub struct AnchorStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    posts: Box<[PostTransform]>,
    slots: Box<[RwLock<AnchorState>]>,
}

impl AnchorStore {
    /// Creates a store with one `Untracked` slot per resolved target.
    pub fn new(posts: Vec<PostTransform>) -> Self {
        let slots = posts
            .iter()
            .map(|_| RwLock::new(AnchorState::Untracked))
            .collect();
        Self {
            inner: Arc::new(Inner {
                posts: posts.into_boxed_slice(),
                slots,
            }),
        }
    }

    /// Number of installed targets.
    pub fn len(&self) -> usize {
        self.inner.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.slots.is_empty()
    }

    /// Applies one engine update: a pose becomes `Tracked` with the
    /// target's post-transform multiplied on, no pose becomes `Lost`.
    /// Last writer wins; intermediate poses are meant to be dropped when
    /// the engine outpaces the render loop. An unknown target index is
    /// logged and dropped.
    pub fn apply(&self, update: PoseUpdate) {
        let slot = match self.inner.slots.get(update.target) {
            Some(slot) => slot,
            None => {
                warn!(
                    "pose update for unknown target {} dropped ({} installed)",
                    update.target,
                    self.len()
                );
                return;
            }
        };
        let state = match update.world {
            Some(raw) => {
                let post = self.inner.posts[update.target];
                AnchorState::Tracked(AnchorPose(raw.homogeneous() * post.homogeneous()))
            }
            None => AnchorState::Lost,
        };
        *slot.write() = state;
    }

    /// Snapshot of one target's state. Out-of-range targets read as
    /// `Untracked`, which consumers treat as invisible.
    pub fn state(&self, target: usize) -> AnchorState {
        match self.inner.slots.get(target) {
            Some(slot) => *slot.read(),
            None => AnchorState::Untracked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::nalgebra::{Matrix4, Vector3};
    use ar_core::{TargetDescriptor, TrackerPose};
    use ar_registration::resolve_targets;

    fn identity_store(targets: usize) -> AnchorStore {
        AnchorStore::new(vec![PostTransform(Matrix4::identity()); targets])
    }

    #[test]
    fn slots_start_untracked() {
        let store = identity_store(3);
        assert_eq!(store.len(), 3);
        for target in 0..3 {
            assert_eq!(store.state(target), AnchorState::Untracked);
        }
    }

    #[test]
    fn missing_pose_marks_the_target_lost() {
        let store = identity_store(2);
        store.apply(PoseUpdate {
            target: 1,
            world: None,
        });
        assert_eq!(store.state(1), AnchorState::Lost);
        assert_eq!(store.state(0), AnchorState::Untracked);
    }

    #[test]
    fn pose_composes_with_the_post_transform() {
        let store = AnchorStore::new(resolve_targets(&[TargetDescriptor::new(2.0, 1.0)]));
        let raw = TrackerPose(Matrix4::new_translation(&Vector3::new(3.0, 4.0, 5.0)));
        store.apply(PoseUpdate {
            target: 0,
            world: Some(raw),
        });

        let expected = raw.homogeneous()
            * PostTransform::from_descriptor(TargetDescriptor::new(2.0, 1.0)).homogeneous();
        assert_eq!(store.state(0), AnchorState::Tracked(AnchorPose(expected)));
        // Pin the multiplication order: the post-transform is applied in the
        // marker's local space, so the raw translation stays dominant.
        let m = store.state(0).matrix();
        assert_eq!(m[(0, 3)], 4.0);
        assert_eq!(m[(1, 3)], 4.5);
        assert_eq!(m[(2, 3)], 5.0);
        assert_eq!(m[(0, 0)], 2.0);
    }

    #[test]
    fn last_writer_wins() {
        let store = identity_store(1);
        store.apply(PoseUpdate {
            target: 0,
            world: Some(TrackerPose(Matrix4::from_element(1.0))),
        });
        store.apply(PoseUpdate {
            target: 0,
            world: Some(TrackerPose(Matrix4::from_element(2.0))),
        });
        match store.state(0) {
            AnchorState::Tracked(pose) => {
                assert!(pose.homogeneous().iter().all(|&e| e == 2.0));
            }
            state => panic!("expected a tracked pose, got {:?}", state),
        }
    }

    #[test]
    fn unknown_target_is_dropped() {
        let store = identity_store(2);
        store.apply(PoseUpdate {
            target: 7,
            world: Some(TrackerPose(Matrix4::identity())),
        });
        assert_eq!(store.state(7), AnchorState::Untracked);
        assert_eq!(store.state(0), AnchorState::Untracked);
        assert_eq!(store.state(1), AnchorState::Untracked);
    }
}
