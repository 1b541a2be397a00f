use crate::{Dimensions, RegistrationError, VideoPlacement};
use ar_core::nalgebra::Matrix4;
use derive_more::{AsMut, AsRef, From, Into};
use num_traits::Float;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The projection matrix a tracking engine derives from its input frame and
/// camera intrinsics, exactly as the engine hands it over.
///
/// The matrix is fixed for a given engine configuration and only changes when
/// the engine is reconfigured with new input dimensions. Elements are stored
/// column major, matching the flat-array order scene-graph libraries use, and
/// only the y focal scale and the two depth-range elements are consulted by
/// [`register_view`].
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RawProjection(pub Matrix4<f64>);

impl RawProjection {
    /// Wraps a flat 16-element array in the engine's column-major element
    /// order.
    pub fn from_column_major(elements: &[f64; 16]) -> Self {
        Self(Matrix4::from_column_slice(elements))
    }

    /// The y focal scale, flat element 5. This is the cotangent of half the
    /// vertical field of view the engine assumed for its input frame.
    pub fn focal_scale_y(&self) -> f64 {
        self.0[(1, 1)]
    }

    /// The depth scale term, flat element 10.
    pub fn depth_scale(&self) -> f64 {
        self.0[(2, 2)]
    }

    /// The depth offset term, flat element 14.
    pub fn depth_offset(&self) -> f64 {
        self.0[(2, 3)]
    }
}

/// The parameters a perspective render camera adopts wholesale on every
/// registration. Nothing here is ever patched field by field; a new
/// registration replaces all four values together.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Near clip plane distance.
    pub near: f64,
    /// Far clip plane distance.
    pub far: f64,
    /// Container width divided by container height.
    pub aspect: f64,
}

/// The three frames that govern a registration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ViewFrames {
    /// The frame size the engine was configured to ingest.
    pub input: Dimensions,
    /// The native frame size of the video stream.
    pub video: Dimensions,
    /// The on-screen box the video is displayed in.
    pub container: Dimensions,
}

impl ViewFrames {
    pub fn new(input: Dimensions, video: Dimensions, container: Dimensions) -> Self {
        Self {
            input,
            video,
            container,
        }
    }
}

/// A complete view registration: what the camera adopts and where the video
/// goes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ViewRegistration {
    pub camera: CameraParams,
    pub placement: VideoPlacement,
}

/// Derives the virtual camera parameters and video placement for one view
/// state.
///
/// The video is cover-fit into the container. The field of view is recovered
/// from the raw projection's y focal scale and then corrected for the ratio
/// between the container height and the height the engine's input frame
/// occupies on screen; when the device rotates, the input frame's width and
/// height are swapped relative to the video and this correction is what keeps
/// rendered content registered to the image. Near and far are read out of the
/// projection's depth row, and the aspect ratio is the container's, exactly.
///
/// Any frame with a zero, negative, or non-finite dimension is rejected, as
/// is a projection whose derived parameters are non-finite. Callers treat an
/// error as "skip this update and keep the previous registration".
///
/// ```
/// use ar_registration::{register_view, Dimensions, RawProjection, ViewFrames};
///
/// // A symmetric frustum with y focal scale 1.5 and depth range 0.1..1000,
/// // in column-major order.
/// let near = 0.1;
/// let far = 1000.0;
/// let depth_scale = -(far + near) / (far - near);
/// let depth_offset = -2.0 * far * near / (far - near);
/// let raw = RawProjection::from_column_major(&[
///     1.5, 0.0, 0.0, 0.0,
///     0.0, 1.5, 0.0, 0.0,
///     0.0, 0.0, depth_scale, -1.0,
///     0.0, 0.0, depth_offset, 0.0,
/// ]);
/// let frames = ViewFrames {
///     input: Dimensions::new(640.0, 480.0),
///     video: Dimensions::new(640.0, 480.0),
///     container: Dimensions::new(800.0, 600.0),
/// };
/// let registration = register_view(raw, frames).unwrap();
/// // Matching ratios mean no correction: fov = 2 atan(1/1.5).
/// assert!((registration.camera.fov_y_degrees - 67.380_135_051_959_57).abs() < 1e-9);
/// assert!((registration.camera.near - near).abs() < 1e-9);
/// assert!((registration.camera.far - far).abs() < 1e-6);
/// assert_eq!(registration.camera.aspect, 800.0 / 600.0);
/// assert_eq!(registration.placement.width, 800.0);
/// assert_eq!(registration.placement.height, 600.0);
/// ```
pub fn register_view(
    raw: RawProjection,
    frames: ViewFrames,
) -> Result<ViewRegistration, RegistrationError> {
    if !frames.input.is_well_formed() {
        return Err(RegistrationError::DegenerateInputFrame);
    }
    if !frames.video.is_well_formed() {
        return Err(RegistrationError::DegenerateVideoFrame);
    }
    if !frames.container.is_well_formed() {
        return Err(RegistrationError::DegenerateContainerFrame);
    }

    let placement = VideoPlacement::cover(frames.video, frames.container);

    // The constrained axis is chosen by comparing the input ratio, not the
    // video ratio, to the container: after a rotation the input frame stays
    // fixed while the video frame swaps.
    let container_ratio = frames.container.ratio();
    let constrained_height = if frames.input.ratio() > container_ratio {
        let input_adjust = frames.video.width / frames.input.width;
        frames.container.height * input_adjust
    } else {
        let input_adjust = frames.video.height / frames.input.height;
        frames.container.width / frames.input.width * frames.input.height * input_adjust
    };
    let fov_adjust = frames.container.height / constrained_height;

    let fov_y_degrees =
        2.0 * Float::atan(fov_adjust / raw.focal_scale_y()) * 180.0 / core::f64::consts::PI;
    let near = raw.depth_offset() / (raw.depth_scale() - 1.0);
    let far = raw.depth_offset() / (raw.depth_scale() + 1.0);

    if !fov_y_degrees.is_finite() || !near.is_finite() || !far.is_finite() {
        return Err(RegistrationError::DegenerateProjection);
    }

    Ok(ViewRegistration {
        camera: CameraParams {
            fov_y_degrees,
            near,
            far,
            aspect: frames.container.width / frames.container.height,
        },
        placement,
    })
}
