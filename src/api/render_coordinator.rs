use tracing::trace;

use crate::core::{
    AxisOrientation, ChartChild, ChildKind, DatumValue, ReferenceLineDescriptor,
    ReferenceOrientation, ScaleSet, ScreenPoint,
};
use crate::core::ticks::DEFAULT_TICK_COUNT;
use crate::error::ChartResult;
use crate::interaction::{CrosshairPlan, InteractionMode};
use crate::render::{
    AxisPrimitive, GridLines, LineSegment, ReferenceLinePrimitive, RenderFrame, Renderer,
    SeriesLayer,
};

use super::ChartSurface;
use super::surface_core::SurfaceCore;

fn project_reference_line(
    line: &ReferenceLineDescriptor,
    scales: &ScaleSet,
    inner_width: f64,
    inner_height: f64,
) -> Option<ReferenceLinePrimitive> {
    let value = DatumValue::Number(line.reference);
    let segment = match line.orientation {
        ReferenceOrientation::Horizontal => {
            let y = scales.y.map_value(&value)?;
            LineSegment::new(ScreenPoint::new(0.0, y), ScreenPoint::new(inner_width, y))
        }
        ReferenceOrientation::Vertical => {
            let x = scales.x.map_value(&value)?;
            LineSegment::new(ScreenPoint::new(x, 0.0), ScreenPoint::new(x, inner_height))
        }
    };
    Some(ReferenceLinePrimitive {
        segment,
        label: line.label.clone(),
    })
}

/// Builds the frame for the current state, or `None` when the surface has
/// no drawable area.
///
/// Children are folded in declaration order; each crosshair child extends
/// one accumulated plan, so overlays never talk to each other directly.
pub(super) fn compose_frame(core: &SurfaceCore) -> Option<RenderFrame<'_>> {
    let layout = &core.layout;
    let dimensions = layout.dimensions;
    if !dimensions.is_renderable() {
        trace!("composition skipped on degenerate surface");
        return None;
    }
    let scales = &layout.scales;
    let tooltip = core.interaction.tooltip();

    let grid = GridLines {
        x: if core.config.show_x_grid {
            scales.x.tick_positions(core.config.grid_tick_count)
        } else {
            Vec::new()
        },
        y: if core.config.show_y_grid {
            scales.y.tick_positions(core.config.grid_tick_count)
        } else {
            Vec::new()
        },
    };

    let mut frame = RenderFrame {
        width: core.config.width,
        height: core.config.height,
        aria_label: &core.config.aria_label,
        dimensions,
        catalog: &core.catalog,
        scales,
        grid,
        series: core
            .catalog
            .series()
            .map(|series| SeriesLayer {
                key: series.key.clone(),
                kind: ChildKind::from(series.descriptor.kind),
            })
            .collect(),
        reference_lines: Vec::new(),
        axes: Vec::new(),
        overlays: Vec::new(),
        voronoi_sites: None,
        crosshairs: CrosshairPlan::new(),
    };

    let mut crosshairs = CrosshairPlan::new();
    for child in core.catalog.children() {
        match child {
            ChartChild::Series(_) => {}
            ChartChild::ReferenceLine(line) => {
                if let Some(primitive) = project_reference_line(
                    line,
                    scales,
                    dimensions.inner_width,
                    dimensions.inner_height,
                ) {
                    frame.reference_lines.push(primitive);
                }
            }
            ChartChild::Axis(axis) => {
                let scale = match axis.orientation {
                    AxisOrientation::Top | AxisOrientation::Bottom => &scales.x,
                    AxisOrientation::Left | AxisOrientation::Right => &scales.y,
                };
                frame.axes.push(AxisPrimitive {
                    descriptor: axis.clone(),
                    tick_positions: scale.tick_positions(axis.tick_count.unwrap_or(DEFAULT_TICK_COUNT)),
                });
            }
            ChartChild::Crosshair(style) => {
                crosshairs = crosshairs.accumulate(*style, tooltip, &core.catalog, scales);
            }
            ChartChild::Overlay(overlay) => frame.overlays.push(overlay),
        }
    }
    frame.crosshairs = crosshairs;

    if core.config.show_voronoi && core.interaction.mode() == InteractionMode::SpatialIndex {
        frame.voronoi_sites = Some(core.spatial.sites().to_vec());
    }

    Some(frame)
}

impl<R: Renderer> ChartSurface<R> {
    #[must_use]
    pub fn compose(&self) -> Option<RenderFrame<'_>> {
        compose_frame(&self.core)
    }

    /// Composes and renders one frame. Returns `false` without calling the
    /// renderer when the surface has no drawable area.
    pub fn render(&mut self) -> ChartResult<bool> {
        let Some(frame) = compose_frame(&self.core) else {
            return Ok(false);
        };
        self.renderer.render(&frame)?;
        trace!(
            series = frame.series.len(),
            crosshairs = frame.crosshairs.placements().len(),
            "frame rendered"
        );
        Ok(true)
    }
}
