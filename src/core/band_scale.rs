use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Padding and rounding options for categorical scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTuning {
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub align: f64,
    pub round: bool,
}

impl Default for BandTuning {
    fn default() -> Self {
        Self {
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        }
    }
}

impl BandTuning {
    /// Point-scale tuning: zero-width bands centered in their step.
    #[must_use]
    pub fn point() -> Self {
        Self {
            padding_inner: 1.0,
            ..Self::default()
        }
    }
}

/// Discrete scale laying categories out as contiguous equal-width bands.
///
/// The domain keeps first-seen order and drops duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    tuning: BandTuning,
    step: f64,
    bandwidth: f64,
    starts: Vec<f64>,
}

impl BandScale {
    #[must_use]
    pub fn new<I, S>(domain: I, range: (f64, f64), tuning: BandTuning) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            tuning: BandTuning {
                padding_inner: tuning.padding_inner.clamp(0.0, 1.0),
                ..tuning
            },
            step: 0.0,
            bandwidth: 0.0,
            starts: Vec::new(),
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let BandTuning {
            padding_inner,
            padding_outer,
            align,
            round,
        } = self.tuning;

        let mut step = (stop - start) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        if round {
            step = step.floor();
        }
        start += (stop - start - step * (n - padding_inner)) * align;
        let mut bandwidth = step * (1.0 - padding_inner);
        if round {
            start = start.round();
            bandwidth = bandwidth.round();
        }

        let mut starts: Vec<f64> = (0..self.domain.len())
            .map(|i| start + step * i as f64)
            .collect();
        if reverse {
            starts.reverse();
        }

        self.step = step;
        self.bandwidth = bandwidth;
        self.starts = starts;
    }

    /// Band start for `category`, `None` when it is not in the domain.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .get_index_of(category)
            .and_then(|idx| self.starts.get(idx).copied())
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn domain(&self) -> Vec<String> {
        self.domain.iter().cloned().collect()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn tuning(&self) -> BandTuning {
        self.tuning
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
        self.rescale();
    }

    /// Band starts in domain order.
    #[must_use]
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }
}
