use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_epoch_millis, decimal_to_f64, number_category};
use crate::error::ChartResult;

/// Value carried by a datum on either axis.
///
/// Deserialization tries numbers, then RFC 3339 timestamps, then plain
/// strings, so `"2024-01-01T00:00:00Z"` becomes a time and `"apples"` a
/// category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatumValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl DatumValue {
    /// Position on a continuous axis. Time maps to epoch milliseconds;
    /// categories and non-finite numbers have none.
    #[must_use]
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) => None,
            Self::Time(time) => Some(datetime_to_epoch_millis(*time)),
            Self::Category(_) => None,
        }
    }

    /// Key on a band or ordinal axis.
    #[must_use]
    pub fn category_key(&self) -> String {
        match self {
            Self::Number(value) => number_category(*value),
            Self::Time(time) => time.to_rfc3339(),
            Self::Category(name) => name.clone(),
        }
    }

    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        Ok(Self::Number(decimal_to_f64(value, "datum value")?))
    }
}

impl From<f64> for DatumValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for DatumValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for DatumValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DatumValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// One plotted record. Owned by the caller's series data; never mutated by
/// the layout or interaction code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Datum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<DatumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<DatumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Pass-through fields for series renderers (size, color, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Datum {
    #[must_use]
    pub fn new(x: impl Into<DatumValue>, y: impl Into<DatumValue>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y)
    }

    /// Histogram-style bin spanning `[x0, x1]` on the x axis.
    #[must_use]
    pub fn with_x_extent(mut self, x0: f64, x1: f64) -> Self {
        self.x0 = Some(x0);
        self.x1 = Some(x1);
        self
    }

    #[must_use]
    pub fn with_y_extent(mut self, y0: f64, y1: f64) -> Self {
        self.y0 = Some(y0);
        self.y1 = Some(y1);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}
