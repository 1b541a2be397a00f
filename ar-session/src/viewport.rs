use ar_registration::{
    register_view, CameraParams, Dimensions, RawProjection, VideoPlacement, ViewFrames,
    ViewRegistration,
};
use log::*;

/// A perspective render camera the controller keeps registered.
///
/// Implementations adopt all four parameters together and recompute their
/// projection before returning; parameters are never patched one at a time.
pub trait PerspectiveCamera {
    fn apply_params(&mut self, params: CameraParams);
}

/// The on-screen surface the raw video is drawn into, positioned with a
/// top/left/width/height pixel box.
pub trait VideoSurface {
    fn apply_placement(&mut self, placement: VideoPlacement);
}

/// Re-derives the view registration whenever a governing dimension changes
/// and pushes the result to the camera and the video surface.
///
/// Three events feed it: the container resized, the video's native
/// dimensions became known (metadata) or changed (stream swap on device
/// rotation), and the engine was reconfigured with a new input frame. The
/// first registration happens once both the video and container dimensions
/// have been seen. Degenerate dimensions never tear down a valid
/// registration: the update is skipped and the previous camera state stays
/// in place.
pub struct ViewportController<C, S> {
    raw: RawProjection,
    input: Dimensions,
    video: Option<Dimensions>,
    container: Option<Dimensions>,
    last: Option<ViewRegistration>,
    camera: C,
    surface: S,
}

impl<C: PerspectiveCamera, S: VideoSurface> ViewportController<C, S> {
    /// Creates a controller for an engine with the given projection and
    /// input frame. Nothing is pushed until dimensions arrive.
    pub fn new(raw: RawProjection, input: Dimensions, camera: C, surface: S) -> Self {
        Self {
            raw,
            input,
            video: None,
            container: None,
            last: None,
            camera,
            surface,
        }
    }

    /// The container the video is displayed in was resized.
    pub fn container_resized(&mut self, container: Dimensions) {
        self.container = Some(container);
        self.refresh();
    }

    /// The video's native dimensions became known or changed.
    pub fn video_ready(&mut self, video: Dimensions) {
        self.video = Some(video);
        self.refresh();
    }

    /// The engine was reconfigured with a new input frame, which also means
    /// a new projection matrix derived for it.
    pub fn input_changed(&mut self, input: Dimensions, raw: RawProjection) {
        self.input = input;
        self.raw = raw;
        self.refresh();
    }

    /// The registration currently applied to the camera and surface, if any
    /// valid one has been derived yet.
    pub fn registration(&self) -> Option<ViewRegistration> {
        self.last
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn refresh(&mut self) {
        let (video, container) = match (self.video, self.container) {
            (Some(video), Some(container)) => (video, container),
            _ => return,
        };
        match register_view(self.raw, ViewFrames::new(self.input, video, container)) {
            Ok(registration) => {
                self.camera.apply_params(registration.camera);
                self.surface.apply_placement(registration.placement);
                self.last = Some(registration);
            }
            Err(err) => {
                debug!("viewport refresh skipped: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        applied: Vec<CameraParams>,
    }

    impl PerspectiveCamera for RecordingCamera {
        fn apply_params(&mut self, params: CameraParams) {
            self.applied.push(params);
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        applied: Vec<VideoPlacement>,
    }

    impl VideoSurface for RecordingSurface {
        fn apply_placement(&mut self, placement: VideoPlacement) {
            self.applied.push(placement);
        }
    }

    fn gl_projection(focal_y: f64, near: f64, far: f64) -> RawProjection {
        let depth_scale = -(far + near) / (far - near);
        let depth_offset = -2.0 * far * near / (far - near);
        RawProjection::from_column_major(&[
            focal_y, 0.0, 0.0, 0.0, //
            0.0, focal_y, 0.0, 0.0, //
            0.0, 0.0, depth_scale, -1.0, //
            0.0, 0.0, depth_offset, 0.0, //
        ])
    }

    fn controller() -> ViewportController<RecordingCamera, RecordingSurface> {
        ViewportController::new(
            gl_projection(1.5, 0.1, 1000.0),
            Dimensions::new(640.0, 480.0),
            RecordingCamera::default(),
            RecordingSurface::default(),
        )
    }

    #[test]
    fn nothing_is_pushed_before_both_dimensions_arrive() {
        let mut controller = controller();
        controller.container_resized(Dimensions::new(800.0, 600.0));
        assert!(controller.camera().applied.is_empty());
        assert!(controller.registration().is_none());

        controller.video_ready(Dimensions::new(640.0, 480.0));
        assert_eq!(controller.camera().applied.len(), 1);
        assert_eq!(controller.surface().applied.len(), 1);
        assert!(controller.registration().is_some());
    }

    #[test]
    fn repeated_triggers_are_idempotent() {
        let mut controller = controller();
        controller.video_ready(Dimensions::new(640.0, 480.0));
        controller.container_resized(Dimensions::new(800.0, 600.0));
        controller.container_resized(Dimensions::new(800.0, 600.0));

        let applied = &controller.camera().applied;
        assert_eq!(applied.len(), 2);
        assert_eq!(
            applied[0].fov_y_degrees.to_bits(),
            applied[1].fov_y_degrees.to_bits()
        );
        assert_eq!(applied[0].near.to_bits(), applied[1].near.to_bits());
        assert_eq!(applied[0].far.to_bits(), applied[1].far.to_bits());
        assert_eq!(applied[0].aspect.to_bits(), applied[1].aspect.to_bits());
        assert_eq!(controller.surface().applied[0], controller.surface().applied[1]);
    }

    #[test]
    fn degenerate_resize_keeps_the_previous_registration() {
        let mut controller = controller();
        controller.video_ready(Dimensions::new(640.0, 480.0));
        controller.container_resized(Dimensions::new(800.0, 600.0));
        let registration = controller.registration().unwrap();

        controller.container_resized(Dimensions::new(0.0, 0.0));
        assert_eq!(controller.registration(), Some(registration));
        assert_eq!(controller.camera().applied.len(), 1);

        // A good resize afterwards recovers.
        controller.container_resized(Dimensions::new(1024.0, 768.0));
        assert_eq!(controller.camera().applied.len(), 2);
        assert_eq!(controller.camera().applied[1].aspect, 1024.0 / 768.0);
    }

    #[test]
    fn reconfigured_input_rederives_the_fov() {
        let mut controller = controller();
        controller.video_ready(Dimensions::new(640.0, 480.0));
        controller.container_resized(Dimensions::new(800.0, 600.0));
        let level = controller.registration().unwrap().camera.fov_y_degrees;
        assert!((level - 67.380_135_051_959_57).abs() < 1e-9);

        // The engine now ingests portrait frames while the video stays
        // landscape, as happens when the device rotates under a fixed
        // camera stream.
        controller.input_changed(
            Dimensions::new(480.0, 640.0),
            gl_projection(1.5, 0.1, 1000.0),
        );
        let rotated = controller.registration().unwrap().camera.fov_y_degrees;
        assert!((rotated - 53.130_102_354_155_98).abs() < 1e-9);
    }
}
