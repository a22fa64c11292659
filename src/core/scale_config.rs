use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandTuning;

/// Scale family requested for one axis.
///
/// Unknown names deserialize to `Other`, which is laid out like `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    #[default]
    Linear,
    Band,
    Time,
    Ordinal,
    #[serde(other)]
    Other,
}

impl ScaleType {
    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Band | Self::Ordinal)
    }
}

/// Explicit domain supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainHint {
    /// Numeric bounds; time axes use epoch milliseconds.
    Continuous(f64, f64),
    Categories(Vec<String>),
}

/// Per-axis scale configuration. Explicit fields always override what
/// would otherwise be derived from data and inner dimensions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleConfig {
    #[serde(rename = "type", default)]
    pub scale_type: ScaleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
    /// Like `range`, with rounded output positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_round: Option<(f64, f64)>,
    /// Shorthand for equal inner and outer padding on band scales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,
    #[serde(default)]
    pub nice: bool,
    #[serde(default)]
    pub include_zero: bool,
}

impl ScaleConfig {
    #[must_use]
    pub fn new(scale_type: ScaleType) -> Self {
        Self {
            scale_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new(ScaleType::Linear)
    }

    #[must_use]
    pub fn band() -> Self {
        Self::new(ScaleType::Band)
    }

    #[must_use]
    pub fn time() -> Self {
        Self::new(ScaleType::Time)
    }

    #[must_use]
    pub fn ordinal() -> Self {
        Self::new(ScaleType::Ordinal)
    }

    #[must_use]
    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain = Some(DomainHint::Continuous(start, end));
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = Some(DomainHint::Categories(
            categories.into_iter().map(Into::into).collect(),
        ));
        self
    }

    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_range_round(mut self, start: f64, end: f64) -> Self {
        self.range_round = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_padding_inner(mut self, padding_inner: f64) -> Self {
        self.padding_inner = Some(padding_inner);
        self
    }

    #[must_use]
    pub fn with_padding_outer(mut self, padding_outer: f64) -> Self {
        self.padding_outer = Some(padding_outer);
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    #[must_use]
    pub fn with_include_zero(mut self, include_zero: bool) -> Self {
        self.include_zero = include_zero;
        self
    }

    /// Resolves the output range and whether positions are rounded.
    #[must_use]
    pub fn resolve_range(&self, default_range: (f64, f64)) -> ((f64, f64), bool) {
        match (self.range_round, self.range) {
            (Some(range), _) => (range, true),
            (None, Some(range)) => (range, false),
            (None, None) => (default_range, false),
        }
    }

    /// Band/point tuning after applying the padding shorthands.
    #[must_use]
    pub fn band_tuning(&self, round: bool) -> BandTuning {
        let base = match self.scale_type {
            ScaleType::Ordinal => BandTuning::point(),
            _ => BandTuning::default(),
        };
        let padding_inner = match self.scale_type {
            ScaleType::Ordinal => base.padding_inner,
            _ => self
                .padding_inner
                .or(self.padding)
                .unwrap_or(base.padding_inner),
        };
        BandTuning {
            padding_inner,
            padding_outer: self
                .padding_outer
                .or(self.padding)
                .unwrap_or(base.padding_outer),
            round,
            ..base
        }
    }
}
