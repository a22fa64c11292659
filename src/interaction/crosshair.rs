use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Accessors, ChartScale, CrosshairDescriptor, Datum, ScaleSet, ScreenPoint, SeriesCatalog,
    SeriesKey,
};

use super::TooltipState;

/// Projects a resolved datum into plotting-group coordinates.
///
/// Band scales place the marker at the band center. Returns `None` when a
/// coordinate is missing or cannot be projected.
#[must_use]
pub fn project_datum(
    datum: &Datum,
    accessors: &Accessors,
    x_scale: &ChartScale,
    y_scale: &ChartScale,
) -> Option<ScreenPoint> {
    let band_center = x_scale.bandwidth().map_or(0.0, |width| width / 2.0);
    let left = x_scale.map_value(&accessors.x(datum)?)? + band_center;
    let top = y_scale.map_value(&accessors.y(datum)?)?;
    Some(ScreenPoint::new(left, top))
}

/// One crosshair marker placed over a resolved series match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairPlacement {
    pub series: SeriesKey,
    /// Marker center in plotting-group coordinates.
    pub position: ScreenPoint,
    pub style: CrosshairDescriptor,
}

/// Crosshair markers gathered during one composition pass.
///
/// Placements are drawn above all series content, so composition folds
/// every crosshair child into this value and hands it to the renderer once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairPlan {
    placements: SmallVec<[CrosshairPlacement; 4]>,
}

impl CrosshairPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one placement per projectable series match of `tooltip`.
    /// A missing tooltip leaves the plan unchanged.
    #[must_use]
    pub fn accumulate(
        mut self,
        style: CrosshairDescriptor,
        tooltip: Option<&TooltipState>,
        catalog: &SeriesCatalog,
        scales: &ScaleSet,
    ) -> Self {
        let Some(tooltip) = tooltip else {
            return self;
        };
        for (key, datum) in &tooltip.series {
            let Some(series) = catalog.series_by_key(key) else {
                continue;
            };
            let accessors = &series.descriptor.accessors;
            if let Some(position) = project_datum(datum, accessors, &scales.x, &scales.y) {
                self.placements.push(CrosshairPlacement {
                    series: key.clone(),
                    position,
                    style,
                });
            }
        }
        self
    }

    #[must_use]
    pub fn placements(&self) -> &[CrosshairPlacement] {
        &self.placements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
