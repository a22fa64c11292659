use serde::{Deserialize, Serialize};

use crate::core::{MarginConfig, ScaleConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionMode;

use super::validation::validate_chart_config;

/// Container properties of one chart surface.
///
/// This type is serializable so host applications can persist and reload
/// chart setup without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: MarginConfig,
    #[serde(default)]
    pub x_scale: ScaleConfig,
    #[serde(default)]
    pub y_scale: ScaleConfig,
    /// Routes pointer events through the spatial index instead of the
    /// per-series linear scan.
    #[serde(default)]
    pub use_voronoi: bool,
    /// Exposes spatial index sites to the renderer.
    #[serde(default)]
    pub show_voronoi: bool,
    #[serde(default)]
    pub show_x_grid: bool,
    #[serde(default)]
    pub show_y_grid: bool,
    #[serde(default = "default_grid_tick_count")]
    pub grid_tick_count: usize,
    #[serde(default)]
    pub aria_label: String,
}

fn default_grid_tick_count() -> usize {
    5
}

impl ChartConfig {
    /// Creates a config with default margins and linear scales.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: MarginConfig::default(),
            x_scale: ScaleConfig::default(),
            y_scale: ScaleConfig::default(),
            use_voronoi: false,
            show_voronoi: false,
            show_x_grid: false,
            show_y_grid: false,
            grid_tick_count: default_grid_tick_count(),
            aria_label: String::new(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginConfig) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_x_scale(mut self, config: ScaleConfig) -> Self {
        self.x_scale = config;
        self
    }

    #[must_use]
    pub fn with_y_scale(mut self, config: ScaleConfig) -> Self {
        self.y_scale = config;
        self
    }

    #[must_use]
    pub fn with_voronoi(mut self, use_voronoi: bool, show_voronoi: bool) -> Self {
        self.use_voronoi = use_voronoi;
        self.show_voronoi = show_voronoi;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_x_grid: bool, show_y_grid: bool) -> Self {
        self.show_x_grid = show_x_grid;
        self.show_y_grid = show_y_grid;
        self
    }

    #[must_use]
    pub fn with_grid_tick_count(mut self, count: usize) -> Self {
        self.grid_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }

    /// Rejects non-finite or negative sizes, margins and paddings.
    pub fn validate(&self) -> ChartResult<()> {
        validate_chart_config(self)
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        InteractionMode::from_use_voronoi(self.use_voronoi)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))
    }
}
