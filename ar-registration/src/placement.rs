#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A width and height in pixels.
///
/// Three of these describe a view at any moment: the frame size the tracking
/// engine was configured to ingest, the native frame size of the video
/// stream, and the on-screen container the video is displayed in. They are
/// kept as floats because container sizes come from layout engines that
/// report fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        self.width / self.height
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_well_formed(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The same frame with width and height exchanged, as happens to the
    /// engine input when the device rotates between landscape and portrait.
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Where and how large the raw video is drawn inside its container.
///
/// This is the box a video element adopts to fill the container while
/// preserving the video's aspect ratio. Along the overflowing axis the video
/// extends past the container and is re-centered, so `top` and `left` are
/// zero or negative, never positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VideoPlacement {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl VideoPlacement {
    /// Cover-fits `video` into `container`.
    ///
    /// If the video is wider than the container it is scaled to the container
    /// height and overflows horizontally; otherwise it is scaled to the
    /// container width and overflows vertically. The overflow is split evenly
    /// between the two sides.
    ///
    /// Degenerate dimensions are the caller's responsibility;
    /// [`register_view`](crate::register_view) validates all frames before
    /// computing a placement.
    ///
    /// ```
    /// use ar_registration::{Dimensions, VideoPlacement};
    /// // Equal aspect ratios: the video exactly fills the container.
    /// let placement = VideoPlacement::cover(
    ///     Dimensions::new(640.0, 480.0),
    ///     Dimensions::new(800.0, 600.0),
    /// );
    /// assert_eq!(placement.top, 0.0);
    /// assert_eq!(placement.left, 0.0);
    /// assert_eq!(placement.width, 800.0);
    /// assert_eq!(placement.height, 600.0);
    /// ```
    pub fn cover(video: Dimensions, container: Dimensions) -> Self {
        let (width, height) = if video.ratio() > container.ratio() {
            let height = container.height;
            (height * video.ratio(), height)
        } else {
            let width = container.width;
            (width, width / video.ratio())
        };
        Self {
            top: -(height - container.height) / 2.0,
            left: -(width - container.width) / 2.0,
            width,
            height,
        }
    }
}
