use crate::core::{
    ChildKind, Dimensions, OverlayDescriptor, ScaleSet, ScreenPoint, SeriesCatalog, SeriesKey,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::CrosshairPlan;
use crate::render::{AxisPrimitive, GridLines, ReferenceLinePrimitive};

/// Series layer in declaration order; shapes are drawn by the renderer from
/// the catalog entry with the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    pub key: SeriesKey,
    pub kind: ChildKind,
}

/// Backend-agnostic composition for one draw pass.
///
/// Layer order, bottom to top: grid, series, reference lines, axes,
/// overlays, Voronoi cells, crosshairs. Coordinates are relative to the
/// plotting group, which the renderer translates by `dimensions.margin`.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub width: f64,
    pub height: f64,
    pub aria_label: &'a str,
    pub dimensions: Dimensions,
    pub catalog: &'a SeriesCatalog,
    pub scales: &'a ScaleSet,
    pub grid: GridLines,
    pub series: Vec<SeriesLayer>,
    pub reference_lines: Vec<ReferenceLinePrimitive>,
    pub axes: Vec<AxisPrimitive>,
    pub overlays: Vec<&'a OverlayDescriptor>,
    /// Present when the spatial index is asked to be visualized.
    pub voronoi_sites: Option<Vec<ScreenPoint>>,
    pub crosshairs: CrosshairPlan,
}

impl RenderFrame<'_> {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.dimensions.is_renderable() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        for line in &self.reference_lines {
            line.segment.validate()?;
        }
        for placement in self.crosshairs.placements() {
            if !placement.position.is_finite() {
                return Err(ChartError::InvalidData(
                    "crosshair position must be finite".to_owned(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.reference_lines.is_empty()
            && self.axes.is_empty()
            && self.overlays.is_empty()
            && self.grid.is_empty()
            && self.crosshairs.is_empty()
    }
}
