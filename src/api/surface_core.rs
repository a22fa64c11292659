use crate::core::{Dimensions, Margin, ScaleConfig, ScaleSet, SeriesCatalog};
use crate::interaction::{InteractionHandlers, InteractionState, SpatialRouter};

use super::ChartConfig;

/// Inputs that fully determine dimensions and scales.
///
/// Two equal keys always yield the same `ScaleSet`, so the surface only
/// recomputes when one of these fields changes.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ScaleMemoKey {
    pub(super) width: f64,
    pub(super) height: f64,
    pub(super) margin: Margin,
    pub(super) x_scale: ScaleConfig,
    pub(super) y_scale: ScaleConfig,
    pub(super) catalog_revision: u64,
}

impl ScaleMemoKey {
    pub(super) fn new(config: &ChartConfig, catalog_revision: u64) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin.merge_over(Margin::default()),
            x_scale: config.x_scale.clone(),
            y_scale: config.y_scale.clone(),
            catalog_revision,
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct LayoutCache {
    pub(super) key: ScaleMemoKey,
    pub(super) dimensions: Dimensions,
    pub(super) scales: ScaleSet,
}

/// Internal surface state used by the public facade (`ChartSurface`).
pub(super) struct SurfaceCore {
    pub(super) config: ChartConfig,
    pub(super) catalog: SeriesCatalog,
    pub(super) catalog_revision: u64,
    pub(super) default_handlers: InteractionHandlers,
    pub(super) layout: LayoutCache,
    pub(super) layout_recomputes: u64,
    pub(super) interaction: InteractionState,
    pub(super) spatial: SpatialRouter,
    /// Layout key the spatial index was last synced against.
    pub(super) spatial_key: Option<ScaleMemoKey>,
}
