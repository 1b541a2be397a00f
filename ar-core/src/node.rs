use nalgebra::Matrix4;

/// A scene-graph node driven by anchor state.
///
/// This is the seam between tracking and rendering. The scene side supplies
/// something that can be hidden and repositioned; the tracking side calls
/// these two methods once per tick and nothing else. Implementations must
/// apply the transform verbatim: no smoothing, interpolation, or
/// decomposition into translation/rotation/scale. The matrix handed to
/// [`set_transform`](AnchorNode::set_transform) is already the complete
/// world transform for the node.
pub trait AnchorNode {
    /// Show or hide the node.
    fn set_visible(&mut self, visible: bool);

    /// Replace the node's world transform wholesale.
    fn set_transform(&mut self, world: Matrix4<f64>);
}
