use crate::TrackerPose;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Configuration handed to the tracking engine when it is created.
///
/// The input dimensions are the pixel size of the frames the engine will be
/// fed and must be known up front (a session cannot start without them).
/// Every other parameter is an optional passthrough: `None` means "use the
/// engine's default", and this layer never interprets the values.
///
/// The optional knobs follow the conventions of one-euro-filtered trackers:
/// `filter_min_cf`/`filter_beta` shape the pose filter, `warmup_tolerance`
/// is how many consecutive detections promote a target to tracked,
/// `miss_tolerance` how many consecutive misses demote it, and `max_track`
/// bounds how many targets are tracked simultaneously.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TrackerConfig {
    pub input_width: u32,
    pub input_height: u32,
    pub filter_min_cf: Option<f64>,
    pub filter_beta: Option<f64>,
    pub warmup_tolerance: Option<u32>,
    pub miss_tolerance: Option<u32>,
    pub max_track: Option<usize>,
}

impl TrackerConfig {
    /// Creates a configuration with the given input dimensions and engine
    /// defaults for everything else.
    pub fn new(input_width: u32, input_height: u32) -> Self {
        Self {
            input_width,
            input_height,
            filter_min_cf: None,
            filter_beta: None,
            warmup_tolerance: None,
            miss_tolerance: None,
            max_track: None,
        }
    }

    /// Set the pose filter's minimum cutoff frequency.
    #[must_use]
    pub fn filter_min_cf(self, filter_min_cf: f64) -> Self {
        Self {
            filter_min_cf: Some(filter_min_cf),
            ..self
        }
    }

    /// Set the pose filter's beta (speed coefficient).
    #[must_use]
    pub fn filter_beta(self, filter_beta: f64) -> Self {
        Self {
            filter_beta: Some(filter_beta),
            ..self
        }
    }

    /// Set how many consecutive detections promote a target to tracked.
    #[must_use]
    pub fn warmup_tolerance(self, warmup_tolerance: u32) -> Self {
        Self {
            warmup_tolerance: Some(warmup_tolerance),
            ..self
        }
    }

    /// Set how many consecutive misses demote a target to lost.
    #[must_use]
    pub fn miss_tolerance(self, miss_tolerance: u32) -> Self {
        Self {
            miss_tolerance: Some(miss_tolerance),
            ..self
        }
    }

    /// Set the maximum number of simultaneously tracked targets.
    #[must_use]
    pub fn max_track(self, max_track: usize) -> Self {
        Self {
            max_track: Some(max_track),
            ..self
        }
    }
}

/// One pose event from the tracking engine.
///
/// `world: None` means the target is not currently detected; that is the
/// ordinary tracking-lost path, not an error. Updates carry no timestamp
/// because only the latest one per target matters: anything downstream that
/// reads slower than the engine emits is meant to drop intermediates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PoseUpdate {
    /// Index of the target this update is about.
    pub target: usize,
    /// The unit-marker pose, or `None` when the target is lost.
    pub world: Option<TrackerPose>,
}
