use serde::{Deserialize, Serialize};

use crate::core::{AxisDescriptor, ScreenPoint};
use crate::error::{ChartError, ChartResult};

/// Straight segment in plotting-group coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

impl LineSegment {
    #[must_use]
    pub const fn new(from: ScreenPoint, to: ScreenPoint) -> Self {
        Self { from, to }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(ChartError::InvalidData(
                "line segment endpoints must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Reference line resolved against the current scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLinePrimitive {
    pub segment: LineSegment,
    pub label: Option<String>,
}

/// Axis placement handed to the external axis renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPrimitive {
    pub descriptor: AxisDescriptor,
    /// Tick positions along the axis in plotting-group pixels.
    pub tick_positions: Vec<f64>,
}

/// Grid line positions; `x` holds vertical lines, `y` horizontal ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLines {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl GridLines {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }
}
