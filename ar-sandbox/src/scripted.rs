use ar::nalgebra::{Matrix4, Vector3};
use ar::registration::{CameraParams, RawProjection, VideoPlacement};
use ar::session::{EngineError, PerspectiveCamera, TrackingEngine, VideoSurface};
use ar::{AnchorNode, PoseUpdate, TargetDescriptor, TrackerConfig, TrackerPose};
use log::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Parameters of the canned marker motion the engine plays back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionScript {
    /// Radius of the circle the markers sweep, in marker units.
    pub orbit_radius: f64,
    /// Ticks per full revolution.
    pub orbit_period: u32,
    /// Every this many ticks a marker drops out for a quarter of the period.
    pub blink_period: u32,
    /// Amplitude of the per-axis noise added to each pose.
    pub jitter: f64,
}

impl Default for MotionScript {
    fn default() -> Self {
        Self {
            orbit_radius: 0.1,
            orbit_period: 240,
            blink_period: 180,
            jitter: 0.002,
        }
    }
}

/// An engine that emits poses from a [`MotionScript`] instead of running detection.
///
/// The worker thread stands in for the frame-processing loop of a real
/// tracker, so the rest of the pipeline (session, store, bindings, viewport)
/// runs exactly as it would in production.
pub struct ScriptedEngine {
    config: TrackerConfig,
    script: MotionScript,
    installed: Vec<TargetDescriptor>,
    halt: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ScriptedEngine {
    pub fn new(config: TrackerConfig, script: MotionScript) -> Self {
        Self {
            config,
            script,
            installed: Vec::new(),
            halt: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl TrackingEngine for ScriptedEngine {
    type Bundle = [TargetDescriptor];

    fn config(&self) -> TrackerConfig {
        self.config
    }

    fn projection_matrix(&self) -> RawProjection {
        synthetic_projection(self.config.input_width, self.config.input_height)
    }

    fn add_targets(&mut self, bundle: &Self::Bundle) -> Result<Vec<TargetDescriptor>, EngineError> {
        if bundle.is_empty() {
            return Err(EngineError::BadTargetBundle(
                "the bundle contains no targets".into(),
            ));
        }
        self.installed = bundle.to_vec();
        Ok(self.installed.clone())
    }

    fn warm_up(&mut self) -> Result<(), EngineError> {
        debug!("ran a warm-up pass over a synthetic frame");
        Ok(())
    }

    fn start_processing(&mut self, updates: Sender<PoseUpdate>) -> Result<(), EngineError> {
        let script = self.script;
        let targets = self.installed.len();
        let halt = Arc::clone(&self.halt);
        halt.store(false, Ordering::SeqCst);
        self.worker = Some(thread::spawn(move || {
            let mut rng = Pcg64::from_seed([5; 32]);
            let mut tick = 0u32;
            while !halt.load(Ordering::SeqCst) {
                for target in 0..targets {
                    let update = scripted_update(target, tick, script, &mut rng);
                    if updates.send(update).is_err() {
                        return;
                    }
                }
                tick = tick.wrapping_add(1);
                thread::sleep(Duration::from_millis(16));
            }
        }));
        Ok(())
    }

    fn stop_processing(&mut self) {
        self.halt.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("scripted worker panicked");
            }
        }
    }
}

fn scripted_update(
    target: usize,
    tick: u32,
    script: MotionScript,
    rng: &mut Pcg64,
) -> PoseUpdate {
    let blink = script.blink_period.max(1);
    let phase = tick.wrapping_add(target as u32 * blink / 2);
    if phase % blink < blink / 4 {
        return PoseUpdate {
            target,
            world: None,
        };
    }
    let period = script.orbit_period.max(1);
    let angle = 2.0 * std::f64::consts::PI * f64::from(tick % period) / f64::from(period);
    let mut jitter = || (rng.gen::<f64>() - 0.5) * script.jitter;
    let world = Matrix4::new_translation(&Vector3::new(
        script.orbit_radius * angle.cos() + jitter(),
        script.orbit_radius * angle.sin() + jitter(),
        -0.5 + jitter(),
    ));
    PoseUpdate {
        target,
        world: Some(TrackerPose(world)),
    }
}

/// Builds the GL-style projection a real engine would derive from its
/// calibration: 45 degree vertical fov, clip planes at 0.1 and 1000.
pub fn synthetic_projection(input_width: u32, input_height: u32) -> RawProjection {
    let fov_y = 45.0f64.to_radians();
    let focal = 1.0 / (fov_y / 2.0).tan();
    let aspect = f64::from(input_width) / f64::from(input_height);
    let (near, far) = (0.1, 1000.0);
    RawProjection::from_column_major(&[
        focal / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        focal,
        0.0,
        0.0,
        0.0,
        0.0,
        -(far + near) / (far - near),
        -1.0,
        0.0,
        0.0,
        -2.0 * far * near / (far - near),
        0.0,
    ])
}

/// A stand-in scene node; a real integration would forward these calls to its
/// scene graph.
pub struct DemoNode {
    visible: bool,
    world: Matrix4<f64>,
}

impl DemoNode {
    pub fn new() -> Self {
        Self {
            visible: false,
            world: Matrix4::identity(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.world[(0, 3)], self.world[(1, 3)], self.world[(2, 3)])
    }
}

impl AnchorNode for DemoNode {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_transform(&mut self, world: Matrix4<f64>) {
        self.world = world;
    }
}

/// Logs the camera parameters a renderer would adopt.
pub struct ConsoleCamera {
    params: Option<CameraParams>,
}

impl ConsoleCamera {
    pub fn new() -> Self {
        Self { params: None }
    }

    pub fn params(&self) -> Option<CameraParams> {
        self.params
    }
}

impl PerspectiveCamera for ConsoleCamera {
    fn apply_params(&mut self, params: CameraParams) {
        info!(
            "camera adopts fov {:.2} deg, near {:.3}, far {:.1}, aspect {:.4}",
            params.fov_y_degrees, params.near, params.far, params.aspect
        );
        self.params = Some(params);
    }
}

/// Logs the CSS-style rectangle a video element would adopt.
pub struct ConsoleSurface {
    placement: Option<VideoPlacement>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self { placement: None }
    }

    pub fn placement(&self) -> Option<VideoPlacement> {
        self.placement
    }
}

impl VideoSurface for ConsoleSurface {
    fn apply_placement(&mut self, placement: VideoPlacement) {
        info!(
            "video placed at ({:.1}, {:.1}) sized {:.1} x {:.1}",
            placement.left, placement.top, placement.width, placement.height
        );
        self.placement = Some(placement);
    }
}
