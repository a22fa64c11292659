use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is plugged in.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_series_count: usize,
    pub last_crosshair_count: usize,
    pub last_reference_line_count: usize,
    pub last_voronoi_site_count: Option<usize>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_series_count = frame.series.len();
        self.last_crosshair_count = frame.crosshairs.placements().len();
        self.last_reference_line_count = frame.reference_lines.len();
        self.last_voronoi_site_count = frame.voronoi_sites.as_ref().map(Vec::len);
        Ok(())
    }
}
