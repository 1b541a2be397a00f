use core::fmt;

/// The reason a view registration could not be derived.
///
/// Registration errors are recoverable: the caller keeps whatever camera
/// parameters and placement it derived last and retries on the next
/// dimension change. They exist so that a transient zero-sized container or a
/// video element without metadata can never push NaN or infinity into the
/// render camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// The engine's configured input frame has a zero, negative, or
    /// non-finite dimension.
    DegenerateInputFrame,
    /// The video's native frame has a zero, negative, or non-finite
    /// dimension.
    DegenerateVideoFrame,
    /// The container frame has a zero, negative, or non-finite dimension.
    DegenerateContainerFrame,
    /// The raw projection yields a non-finite field of view or clip plane.
    DegenerateProjection,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInputFrame => write!(f, "engine input dimensions are degenerate"),
            Self::DegenerateVideoFrame => write!(f, "video dimensions are degenerate"),
            Self::DegenerateContainerFrame => write!(f, "container dimensions are degenerate"),
            Self::DegenerateProjection => {
                write!(f, "raw projection yields non-finite camera parameters")
            }
        }
    }
}
