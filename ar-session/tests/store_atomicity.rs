use ar_core::nalgebra::Matrix4;
use ar_core::{AnchorState, PoseUpdate, TrackerPose};
use ar_registration::PostTransform;
use ar_session::AnchorStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const TARGETS: usize = 4;
const READS_PER_READER: usize = 20_000;

/// Writers hammer each target with uniform matrices (every element equal)
/// while readers snapshot concurrently. A reader observing a matrix whose
/// elements differ would prove a torn write.
#[test]
fn concurrent_reads_never_observe_a_torn_matrix() {
    let store = AnchorStore::new(vec![PostTransform(Matrix4::identity()); TARGETS]);
    let done = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..TARGETS)
        .map(|target| {
            let store = store.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut value = 1.0f64;
                while !done.load(Ordering::Relaxed) {
                    store.apply(PoseUpdate {
                        target,
                        world: Some(TrackerPose(Matrix4::from_element(value))),
                    });
                    // Interleave loss events so readers also race against
                    // state-kind changes, not only element changes.
                    if value as u64 % 7 == 0 {
                        store.apply(PoseUpdate {
                            target,
                            world: None,
                        });
                    }
                    value += 1.0;
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..READS_PER_READER {
                    let target = i % TARGETS;
                    match store.state(target) {
                        AnchorState::Tracked(pose) => {
                            let m = pose.homogeneous();
                            let first = m[(0, 0)];
                            assert!(
                                m.iter().all(|&e| e == first),
                                "torn matrix read on target {}: {:?}",
                                target,
                                m
                            );
                        }
                        AnchorState::Lost | AnchorState::Untracked => {}
                    }
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().expect("reader panicked");
    }
    done.store(true, Ordering::Relaxed);
    for writer in writers {
        writer.join().expect("writer panicked");
    }

    // After the dust settles every target holds the last thing its writer
    // wrote, still uniform.
    for target in 0..TARGETS {
        if let AnchorState::Tracked(pose) = store.state(target) {
            let m = pose.homogeneous();
            let first = m[(0, 0)];
            assert!(m.iter().all(|&e| e == first));
        }
    }
}
