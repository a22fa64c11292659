mod chart_config;
mod chart_surface;
mod interaction_controller;
mod json_contract;
mod render_coordinator;
mod scale_coordinator;
mod surface_core;
mod validation;

pub use chart_config::ChartConfig;
pub use chart_surface::ChartSurface;
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
