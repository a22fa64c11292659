use tracing::debug;

use crate::core::{ChartChild, SeriesCatalog};
use crate::error::ChartResult;
use crate::interaction::{InteractionHandlers, InteractionState, SpatialRouter};
use crate::render::Renderer;

use super::scale_coordinator::compute_layout;
use super::surface_core::{ScaleMemoKey, SurfaceCore};
use super::validation::validate_chart_config;
use super::ChartConfig;

/// Main orchestration facade consumed by host applications.
///
/// `ChartSurface` owns one chart's configuration and series catalog, keeps
/// the shared scales memoized, routes pointer events to handlers and
/// composes frames for its renderer.
pub struct ChartSurface<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: SurfaceCore,
}

impl<R: Renderer> ChartSurface<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        validate_chart_config(&config)?;

        let key = ScaleMemoKey::new(&config, 0);
        let catalog = SeriesCatalog::default();
        let layout = compute_layout(key, &catalog);
        let mode = config.interaction_mode();
        debug!(
            width = config.width,
            height = config.height,
            ?mode,
            "chart surface created"
        );

        Ok(Self {
            renderer,
            core: SurfaceCore {
                config,
                catalog,
                catalog_revision: 0,
                default_handlers: InteractionHandlers::default(),
                layout,
                layout_recomputes: 1,
                interaction: InteractionState::new(mode),
                spatial: SpatialRouter::default(),
                spatial_key: None,
            },
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.core.config
    }

    /// Replaces the container configuration. Scales are recomputed only when
    /// a field that feeds them changed.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        validate_chart_config(&config)?;
        let mode = config.interaction_mode();
        if mode != self.core.interaction.mode() {
            debug!(?mode, "interaction mode changed");
            self.core.interaction.set_mode(mode);
            self.core.interaction.on_pointer_leave();
        }
        self.core.config = config;
        self.refresh_layout();
        Ok(())
    }

    #[must_use]
    pub fn catalog(&self) -> &SeriesCatalog {
        &self.core.catalog
    }

    /// Rebuilds the series catalog from declarative children.
    pub fn set_children(&mut self, children: Vec<ChartChild>) {
        let catalog = SeriesCatalog::build(children, &self.core.default_handlers);
        self.set_catalog(catalog);
    }

    /// Installs a prebuilt catalog; effective handlers are re-resolved
    /// against the surface defaults.
    pub fn set_catalog(&mut self, mut catalog: SeriesCatalog) {
        catalog.resolve_handlers(&self.core.default_handlers);
        self.core.catalog = catalog;
        self.core.catalog_revision += 1;
        self.core.interaction.on_pointer_leave();
        self.refresh_layout();
    }

    #[must_use]
    pub fn default_handlers(&self) -> &InteractionHandlers {
        &self.core.default_handlers
    }

    /// Sets the surface-level handlers used by series without their own.
    pub fn set_default_handlers(&mut self, handlers: InteractionHandlers) {
        self.core.catalog.resolve_handlers(&handlers);
        self.core.default_handlers = handlers;
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.core.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
