mod frame;
mod null_renderer;
mod primitives;

pub use frame::{RenderFrame, SeriesLayer};
pub use null_renderer::NullRenderer;
pub use primitives::{AxisPrimitive, GridLines, LineSegment, ReferenceLinePrimitive};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully composed `RenderFrame`, so drawing code stays
/// isolated from scale synthesis and interaction routing.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()>;
}
