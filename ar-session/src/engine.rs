use ar_core::{PoseUpdate, TargetDescriptor, TrackerConfig};
use ar_registration::RawProjection;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Errors a tracking engine can report across the session boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The target bundle could not be read or decoded. Target installation
    /// is all-or-nothing, so nothing was installed.
    #[error("target bundle rejected: {0}")]
    BadTargetBundle(String),
    /// The warm-up run did not complete.
    #[error("warm-up failed: {0}")]
    WarmUpFailed(String),
    /// The engine could not begin streaming pose updates.
    #[error("processing could not start: {0}")]
    StartFailed(String),
}

/// The boundary to an external feature-tracking engine.
///
/// The engine owns its frame source (camera, file, synthetic generator);
/// frames never pass through this layer. Detection runs wherever the engine
/// likes, but two contracts must hold: pose updates use the target index
/// order established by [`add_targets`](TrackingEngine::add_targets), and
/// [`stop_processing`](TrackingEngine::stop_processing) does not return
/// until the processing loop has fully halted. An update sent after
/// `stop_processing` returns would race a later session restart.
pub trait TrackingEngine {
    /// An engine-specific reference to a compiled target bundle, typically a
    /// path or an in-memory blob.
    type Bundle: ?Sized;

    /// The configuration the engine was built with. The input dimensions in
    /// it are the frame size all projection math is registered against.
    fn config(&self) -> TrackerConfig;

    /// The projection matrix the engine derived for its configured input
    /// frame. Fixed until the engine is reconfigured.
    fn projection_matrix(&self) -> RawProjection;

    /// Install the bundle's targets, replacing any previously installed set.
    /// The returned descriptor order defines the target index every
    /// subsequent pose update refers to.
    fn add_targets(&mut self, bundle: &Self::Bundle)
        -> Result<Vec<TargetDescriptor>, EngineError>;

    /// One throwaway detection pass so that lazy initialization inside the
    /// engine happens before the first real frame. Must complete before
    /// streaming starts.
    fn warm_up(&mut self) -> Result<(), EngineError>;

    /// Begin continuous asynchronous pose emission into `updates`. The
    /// engine takes ownership of the sender and drops it when processing
    /// halts.
    fn start_processing(&mut self, updates: Sender<PoseUpdate>) -> Result<(), EngineError>;

    /// Halt pose emission. Blocks until the processing loop has stopped and
    /// the update sender is dropped; a no-op when not processing.
    fn stop_processing(&mut self);
}
