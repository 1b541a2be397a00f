mod scripted;

use ar::registration::Dimensions;
use ar::session::{
    AnchorBinding, AnchorTransition, TrackingEngine, TrackingSession, ViewportController,
};
use ar::{TargetDescriptor, TrackerConfig};
use log::*;
use scripted::{ConsoleCamera, ConsoleSurface, DemoNode, MotionScript, ScriptedEngine};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "ar-sandbox",
    about = "A tool for exercising the registration and anchor pipeline with a scripted engine"
)]
struct Opt {
    /// The file where the target bundle is specified.
    ///
    /// A JSON list of physical marker sizes, e.g. [{"width": 1.0, "height": 0.55}].
    /// If the file cannot be read, a built-in two-target bundle is used.
    #[structopt(short, long, default_value = "targets.json")]
    targets: PathBuf,
    /// The file where the scripted marker motion is specified.
    #[structopt(short, long, default_value = "motion.json")]
    script: PathBuf,
    /// The engine input width in pixels
    #[structopt(long, default_value = "1280")]
    input_width: u32,
    /// The engine input height in pixels
    #[structopt(long, default_value = "720")]
    input_height: u32,
    /// The container width in pixels
    #[structopt(long, default_value = "800")]
    container_width: f64,
    /// The container height in pixels
    #[structopt(long, default_value = "600")]
    container_height: f64,
    /// The number of render ticks to run before stopping
    #[structopt(long, default_value = "240")]
    ticks: u32,
    /// Simulate a device rotation at this tick
    #[structopt(long)]
    rotate_at: Option<u32>,
    /// One-euro filter minimum cutoff frequency passed through to the engine
    #[structopt(long)]
    filter_min_cf: Option<f64>,
    /// One-euro filter beta passed through to the engine
    #[structopt(long)]
    filter_beta: Option<f64>,
    /// Consecutive detections before a target counts as tracked
    #[structopt(long)]
    warmup_tolerance: Option<u32>,
    /// Consecutive misses before a target counts as lost
    #[structopt(long)]
    miss_tolerance: Option<u32>,
    /// Maximum number of targets tracked simultaneously
    #[structopt(long)]
    max_track: Option<usize>,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let targets: Vec<TargetDescriptor> = match std::fs::File::open(&opt.targets)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok())
    {
        Some(targets) => {
            info!("loaded target bundle from {}", opt.targets.display());
            targets
        }
        None => {
            info!("used the built-in demo targets");
            vec![
                TargetDescriptor::new(1.0, 0.55),
                TargetDescriptor::new(1.0, 1.0),
            ]
        }
    };

    let script: MotionScript = match std::fs::File::open(&opt.script)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok())
    {
        Some(script) => {
            info!("loaded motion script from {}", opt.script.display());
            script
        }
        None => {
            info!("used the default motion script");
            MotionScript::default()
        }
    };

    let mut config = TrackerConfig::new(opt.input_width, opt.input_height);
    if let Some(min_cf) = opt.filter_min_cf {
        config = config.filter_min_cf(min_cf);
    }
    if let Some(beta) = opt.filter_beta {
        config = config.filter_beta(beta);
    }
    if let Some(tolerance) = opt.warmup_tolerance {
        config = config.warmup_tolerance(tolerance);
    }
    if let Some(tolerance) = opt.miss_tolerance {
        config = config.miss_tolerance(tolerance);
    }
    if let Some(max_track) = opt.max_track {
        config = config.max_track(max_track);
    }

    let engine = ScriptedEngine::new(config, script);
    let mut session = TrackingSession::new(engine);
    let store = session
        .start(&targets)
        .expect("failed to start the tracking session");
    info!("tracking {} targets", store.len());

    // The engine input doubles as the native video size, the same way a real
    // integration adopts the camera feed's dimensions.
    let input = Dimensions::new(f64::from(opt.input_width), f64::from(opt.input_height));
    let mut video = input;
    let mut container = Dimensions::new(opt.container_width, opt.container_height);
    let mut controller = ViewportController::new(
        session.engine().projection_matrix(),
        input,
        ConsoleCamera::new(),
        ConsoleSurface::new(),
    );
    controller.video_ready(video);
    controller.container_resized(container);

    let mut nodes: Vec<DemoNode> = (0..store.len()).map(|_| DemoNode::new()).collect();
    let mut bindings: Vec<AnchorBinding> = (0..store.len())
        .map(|target| AnchorBinding::new(store.clone(), target))
        .collect();

    for tick in 0..opt.ticks {
        if opt.rotate_at == Some(tick) {
            info!("rotating the device");
            video = video.transpose();
            container = container.transpose();
            controller.video_ready(video);
            controller.container_resized(container);
        }
        for (binding, node) in bindings.iter_mut().zip(nodes.iter_mut()) {
            match binding.update(node) {
                Some(AnchorTransition::Found) => info!("target {} found", binding.target()),
                Some(AnchorTransition::Lost) => info!("target {} lost", binding.target()),
                None => {}
            }
        }
        thread::sleep(Duration::from_millis(16));
    }

    session.stop();

    if let Some(params) = controller.camera().params() {
        info!(
            "final camera registration: fov {:.2} deg, aspect {:.4}",
            params.fov_y_degrees, params.aspect
        );
    }
    if let Some(placement) = controller.surface().placement() {
        info!(
            "final video placement: ({:.1}, {:.1}) sized {:.1} x {:.1}",
            placement.left, placement.top, placement.width, placement.height
        );
    }
    for (target, node) in nodes.iter().enumerate() {
        if node.is_visible() {
            let position = node.position();
            info!(
                "target {} ended visible at ({:.3}, {:.3}, {:.3})",
                target, position.x, position.y, position.z
            );
        } else {
            info!("target {} ended hidden", target);
        }
    }
}
