use serde::{Deserialize, Serialize};

/// Resolved plot margins in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(64.0)
    }
}

impl Margin {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|side| side.is_finite() && *side >= 0.0)
    }
}

/// Partial margin override supplied by the caller.
///
/// Unset sides fall back to [`Margin::default`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl MarginConfig {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: Some(value),
            right: Some(value),
            bottom: Some(value),
            left: Some(value),
        }
    }

    #[must_use]
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: f64) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    #[must_use]
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    /// Merges this override over `base`; set fields win per side.
    #[must_use]
    pub fn merge_over(self, base: Margin) -> Margin {
        Margin {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }
}

impl From<Margin> for MarginConfig {
    fn from(margin: Margin) -> Self {
        Self {
            top: Some(margin.top),
            right: Some(margin.right),
            bottom: Some(margin.bottom),
            left: Some(margin.left),
        }
    }
}

/// Outer size split into margins and the inner plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Dimensions {
    /// Both inner sides must be strictly positive for anything to be drawn
    /// or hit tested.
    #[must_use]
    pub fn is_renderable(self) -> bool {
        self.inner_width > 0.0 && self.inner_height > 0.0
    }
}

/// Computes the inner plotting rectangle.
///
/// Results are not clamped: a negative inner side is a valid output that
/// callers treat as "do not render". NaN input propagates.
#[must_use]
pub fn compute_dimensions(outer_width: f64, outer_height: f64, margin: MarginConfig) -> Dimensions {
    let margin = margin.merge_over(Margin::default());
    Dimensions {
        margin,
        inner_width: outer_width - margin.left - margin.right,
        inner_height: outer_height - margin.top - margin.bottom,
    }
}
