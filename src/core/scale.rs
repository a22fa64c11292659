use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::datum::DatumValue;
use crate::core::primitives::epoch_millis_to_datetime;
use crate::core::scale_config::ScaleType;
use crate::core::ticks::{nice_domain, ticks};

/// Linear domain-to-range mapping used by linear, time and fallback axes.
///
/// A zero-span domain maps everything to the middle of the range and a NaN
/// domain maps everything to NaN; neither is an error here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl ContinuousScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            round: false,
        }
    }

    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let t = normalize(self.domain_start, self.domain_end, value);
        let pixel = self.range_start + t * (self.range_end - self.range_start);
        if self.round { pixel.round() } else { pixel }
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    pub fn nice(&mut self, count: usize) {
        let (start, end) = nice_domain(self.domain_start, self.domain_end, count);
        self.domain_start = start;
        self.domain_end = end;
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

fn normalize(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span.is_nan() {
        f64::NAN
    } else if span == 0.0 {
        0.5
    } else {
        (value - start) / span
    }
}

/// Domain of a finished scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScaleDomain {
    Continuous(f64, f64),
    Categories(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
enum ScaleFunction {
    Continuous(ContinuousScale),
    Band(BandScale),
}

/// Finished axis scale shared by every series on the surface.
///
/// Besides the mapping itself it carries the bar adjustment metadata
/// (`bar_width`, `offset`) attached when bars are drawn on a non-band axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    scale_type: ScaleType,
    function: ScaleFunction,
    bar_width: Option<f64>,
    offset: Option<f64>,
}

impl ChartScale {
    #[must_use]
    pub fn continuous(scale_type: ScaleType, scale: ContinuousScale) -> Self {
        Self {
            scale_type,
            function: ScaleFunction::Continuous(scale),
            bar_width: None,
            offset: None,
        }
    }

    /// Wraps a band or point scale; `scale_type` tells which.
    #[must_use]
    pub fn categorical(scale_type: ScaleType, scale: BandScale) -> Self {
        Self {
            scale_type,
            function: ScaleFunction::Band(scale),
            bar_width: None,
            offset: None,
        }
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn is_band(&self) -> bool {
        self.scale_type == ScaleType::Band
    }

    /// Continuous scales invert pixels back to data space.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        matches!(self.function, ScaleFunction::Continuous(_))
    }

    /// Screen position for `value`, `None` when the value has no place on
    /// this axis or projects to a non-finite coordinate.
    #[must_use]
    pub fn map_value(&self, value: &DatumValue) -> Option<f64> {
        let pixel = match &self.function {
            ScaleFunction::Continuous(scale) => scale.apply(value.as_continuous()?),
            ScaleFunction::Band(scale) => scale.position(&value.category_key())?,
        };
        pixel.is_finite().then_some(pixel)
    }

    /// Data-space value for a pixel; only continuous scales invert.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<f64> {
        match &self.function {
            ScaleFunction::Continuous(scale) => {
                let value = scale.invert(pixel);
                value.is_finite().then_some(value)
            }
            ScaleFunction::Band(_) => None,
        }
    }

    /// Data value under `pixel`; time scales yield timestamps.
    #[must_use]
    pub fn invert_value(&self, pixel: f64) -> Option<DatumValue> {
        let value = self.invert(pixel)?;
        match self.scale_type {
            ScaleType::Time => epoch_millis_to_datetime(value).map(DatumValue::Time),
            _ => Some(DatumValue::Number(value)),
        }
    }

    /// Band width; present only on band scales.
    #[must_use]
    pub fn bandwidth(&self) -> Option<f64> {
        match (&self.function, self.scale_type) {
            (ScaleFunction::Band(scale), ScaleType::Band) => Some(scale.bandwidth()),
            _ => None,
        }
    }

    #[must_use]
    pub fn step(&self) -> Option<f64> {
        match &self.function {
            ScaleFunction::Band(scale) => Some(scale.step()),
            ScaleFunction::Continuous(_) => None,
        }
    }

    #[must_use]
    pub fn domain(&self) -> ScaleDomain {
        match &self.function {
            ScaleFunction::Continuous(scale) => {
                let (start, end) = scale.domain();
                ScaleDomain::Continuous(start, end)
            }
            ScaleFunction::Band(scale) => ScaleDomain::Categories(scale.domain()),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match &self.function {
            ScaleFunction::Continuous(scale) => scale.range(),
            ScaleFunction::Band(scale) => scale.range(),
        }
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        match &mut self.function {
            ScaleFunction::Continuous(scale) => scale.set_range(range),
            ScaleFunction::Band(scale) => scale.set_range(range),
        }
    }

    /// Replaces the domain with numeric bounds, turning a categorical scale
    /// into a linear one over the same range.
    pub fn force_continuous_domain(&mut self, domain: (f64, f64)) {
        match &mut self.function {
            ScaleFunction::Continuous(scale) => scale.set_domain(domain),
            ScaleFunction::Band(scale) => {
                let range = scale.range();
                let round = scale.tuning().round;
                self.function =
                    ScaleFunction::Continuous(ContinuousScale::new(domain, range).with_round(round));
                self.scale_type = ScaleType::Linear;
            }
        }
    }

    #[must_use]
    pub fn bar_width(&self) -> Option<f64> {
        self.bar_width
    }

    #[must_use]
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn set_bar_metadata(&mut self, bar_width: f64, offset: f64) {
        self.bar_width = Some(bar_width);
        self.offset = Some(offset);
    }

    /// Screen positions for grid lines: tick values on continuous axes,
    /// band centers on categorical ones.
    #[must_use]
    pub fn tick_positions(&self, count: usize) -> Vec<f64> {
        match &self.function {
            ScaleFunction::Continuous(scale) => scale
                .ticks(count)
                .into_iter()
                .map(|value| scale.apply(value))
                .filter(|pixel| pixel.is_finite())
                .collect(),
            ScaleFunction::Band(scale) => {
                let half = scale.bandwidth() * 0.5;
                scale.starts().iter().map(|start| start + half).collect()
            }
        }
    }
}
