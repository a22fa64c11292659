//! xychart-rs: shared-axis XY chart layout core.
//!
//! Computes inner dimensions and shared x/y scales for every child of a
//! chart surface, resolves pointer positions to the nearest data across
//! series, and projects crosshair placements. Drawing is left to a
//! [`render::Renderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartSurface};
pub use error::{ChartError, ChartResult};
