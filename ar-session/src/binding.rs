use crate::AnchorStore;
use ar_core::AnchorNode;

/// A visibility edge reported by [`AnchorBinding::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTransition {
    /// The target just became visible.
    Found,
    /// The target just stopped being visible.
    Lost,
}

/// Drives one scene node from one target's anchor state.
///
/// Call [`update`](AnchorBinding::update) once per render tick. Ticks run at
/// render cadence, not tracker cadence: if the engine emitted several poses
/// since the last tick only the latest lands on the node, and the pose is
/// applied verbatim with no smoothing, so tracker jitter passes through.
pub struct AnchorBinding {
    store: AnchorStore,
    target: usize,
    visible: bool,
}

impl AnchorBinding {
    pub fn new(store: AnchorStore, target: usize) -> Self {
        Self {
            store,
            target,
            visible: false,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Whether the node was visible after the last update.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Snapshots the target's state and drives the node: a tracked pose sets
    /// the transform and shows the node, anything else hides it and leaves
    /// the transform untouched. Returns the edge when visibility flipped
    /// since the previous tick.
    pub fn update<N: AnchorNode>(&mut self, node: &mut N) -> Option<AnchorTransition> {
        let state = self.store.state(self.target);
        if let Some(pose) = state.pose() {
            node.set_transform(pose.homogeneous());
        }
        let now_visible = state.is_visible();
        node.set_visible(now_visible);

        let transition = match (self.visible, now_visible) {
            (false, true) => Some(AnchorTransition::Found),
            (true, false) => Some(AnchorTransition::Lost),
            _ => None,
        };
        self.visible = now_visible;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::nalgebra::Matrix4;
    use ar_core::{PoseUpdate, TrackerPose};
    use ar_registration::PostTransform;

    struct FakeNode {
        visible: bool,
        transform: Matrix4<f64>,
        transforms_applied: usize,
    }

    impl FakeNode {
        fn new() -> Self {
            Self {
                visible: true,
                transform: Matrix4::identity(),
                transforms_applied: 0,
            }
        }
    }

    impl AnchorNode for FakeNode {
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn set_transform(&mut self, world: Matrix4<f64>) {
            self.transform = world;
            self.transforms_applied += 1;
        }
    }

    fn store() -> AnchorStore {
        AnchorStore::new(vec![PostTransform(Matrix4::identity())])
    }

    #[test]
    fn untracked_target_hides_the_node() {
        let mut binding = AnchorBinding::new(store(), 0);
        let mut node = FakeNode::new();
        assert_eq!(binding.update(&mut node), None);
        assert!(!node.visible);
        assert_eq!(node.transforms_applied, 0);
    }

    #[test]
    fn tracked_pose_lands_on_the_node_verbatim() {
        let store = store();
        let raw = Matrix4::from_element(0.25);
        store.apply(PoseUpdate {
            target: 0,
            world: Some(TrackerPose(raw)),
        });

        let mut binding = AnchorBinding::new(store, 0);
        let mut node = FakeNode::new();
        assert_eq!(binding.update(&mut node), Some(AnchorTransition::Found));
        assert!(node.visible);
        assert_eq!(node.transform, raw);
    }

    #[test]
    fn losing_the_target_hides_without_touching_the_transform() {
        let store = store();
        store.apply(PoseUpdate {
            target: 0,
            world: Some(TrackerPose(Matrix4::from_element(0.25))),
        });
        let mut binding = AnchorBinding::new(store.clone(), 0);
        let mut node = FakeNode::new();
        binding.update(&mut node);
        let held = node.transform;

        store.apply(PoseUpdate {
            target: 0,
            world: None,
        });
        assert_eq!(binding.update(&mut node), Some(AnchorTransition::Lost));
        assert!(!node.visible);
        assert_eq!(node.transform, held);
        assert_eq!(node.transforms_applied, 1);
    }

    #[test]
    fn steady_states_report_no_transition() {
        let store = store();
        store.apply(PoseUpdate {
            target: 0,
            world: Some(TrackerPose(Matrix4::identity())),
        });
        let mut binding = AnchorBinding::new(store.clone(), 0);
        let mut node = FakeNode::new();

        assert_eq!(binding.update(&mut node), Some(AnchorTransition::Found));
        assert_eq!(binding.update(&mut node), None);
        assert_eq!(binding.update(&mut node), None);

        store.apply(PoseUpdate {
            target: 0,
            world: None,
        });
        assert_eq!(binding.update(&mut node), Some(AnchorTransition::Lost));
        assert_eq!(binding.update(&mut node), None);
    }

    #[test]
    fn out_of_range_binding_stays_hidden() {
        let mut binding = AnchorBinding::new(store(), 9);
        let mut node = FakeNode::new();
        assert_eq!(binding.update(&mut node), None);
        assert!(!node.visible);
    }
}
