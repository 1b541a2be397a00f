use crate::{AnchorStore, EngineError, TrackingEngine};
use ar_core::PoseUpdate;
use ar_registration::resolve_targets;
use log::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors from driving a tracking session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Target installation failed. Installation is all-or-nothing, so the
    /// session holds no targets and can be started again.
    #[error("target installation failed: {0}")]
    TargetLoad(#[source] EngineError),
    /// The engine failed while warming up or starting its processing loop.
    #[error("engine startup failed: {0}")]
    Engine(#[source] EngineError),
    /// `start` was called while the session was already running.
    #[error("session is already running")]
    AlreadyRunning,
}

/// Owns a tracking engine and runs its update stream into an anchor store.
///
/// [`start`](TrackingSession::start) performs the whole startup sequence in
/// order: install targets, resolve their post-transforms, build the store,
/// run the engine warm-up, begin processing, and spawn the event pump that
/// applies updates. [`stop`](TrackingSession::stop) tears down in the
/// reverse direction with one hard guarantee: once it returns, no store
/// write can ever happen again from that run, even for updates that were
/// still queued. That makes a subsequent `start` safe from stale poses.
///
/// Dropping the session stops it.
pub struct TrackingSession<E: TrackingEngine> {
    engine: E,
    running: Option<Running>,
}

struct Running {
    store: AnchorStore,
    stop: Arc<AtomicBool>,
    pump: JoinHandle<()>,
}

impl<E: TrackingEngine> TrackingSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            running: None,
        }
    }

    /// The engine, for reading configuration and the projection matrix.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// The store of the current run, if the session is running.
    pub fn store(&self) -> Option<AnchorStore> {
        self.running.as_ref().map(|running| running.store.clone())
    }

    /// Installs the bundle's targets and starts tracking. Returns the store
    /// readers should bind against; it is valid for this run only.
    ///
    /// # Panics
    ///
    /// Panics when the engine was configured with zero input dimensions;
    /// an engine cannot be ready without knowing its input frame.
    pub fn start(&mut self, bundle: &E::Bundle) -> Result<AnchorStore, SessionError> {
        if self.running.is_some() {
            return Err(SessionError::AlreadyRunning);
        }
        let config = self.engine.config();
        assert!(
            config.input_width > 0 && config.input_height > 0,
            "tracking engine configured without input dimensions"
        );

        let descriptors = self
            .engine
            .add_targets(bundle)
            .map_err(SessionError::TargetLoad)?;
        info!("installed {} tracking targets", descriptors.len());
        let store = AnchorStore::new(resolve_targets(&descriptors));

        self.engine.warm_up().map_err(SessionError::Engine)?;

        let (sender, receiver) = mpsc::channel();
        self.engine
            .start_processing(sender)
            .map_err(SessionError::Engine)?;

        let stop = Arc::new(AtomicBool::new(false));
        let pump = {
            let store = store.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || pump_loop(receiver, store, stop))
        };

        self.running = Some(Running {
            store: store.clone(),
            stop,
            pump,
        });
        Ok(store)
    }

    /// Stops tracking. Blocking: the engine's processing loop is fully
    /// halted and the pump thread joined before this returns. A no-op when
    /// the session is not running.
    pub fn stop(&mut self) {
        let Running { stop, pump, .. } = match self.running.take() {
            Some(running) => running,
            None => return,
        };
        // Raise the flag before halting the engine so updates still queued
        // in the channel are discarded instead of applied during teardown.
        stop.store(true, Ordering::SeqCst);
        self.engine.stop_processing();
        if pump.join().is_err() {
            error!("anchor pump panicked during shutdown");
        }
        debug!("tracking session stopped");
    }
}

impl<E: TrackingEngine> Drop for TrackingSession<E> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Applies engine updates to the store until the engine halts or the stop
/// flag is raised. The engine dropping its sender ends the loop, so the
/// pump can never outlive a stopped engine.
fn pump_loop(updates: Receiver<PoseUpdate>, store: AnchorStore, stop: Arc<AtomicBool>) {
    for update in updates {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        store.apply(update);
    }
}
