use tracing::{debug, trace};

use crate::core::{Dimensions, ScaleSet, SeriesCatalog, compute_dimensions, synthesize};
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::ChartSurface;
use super::surface_core::{LayoutCache, ScaleMemoKey};

pub(super) fn compute_layout(key: ScaleMemoKey, catalog: &SeriesCatalog) -> LayoutCache {
    let dimensions = compute_dimensions(key.width, key.height, key.margin.into());
    let scales = synthesize(
        catalog,
        &key.x_scale,
        &key.y_scale,
        dimensions.inner_width,
        dimensions.inner_height,
    );
    LayoutCache {
        key,
        dimensions,
        scales,
    }
}

impl<R: Renderer> ChartSurface<R> {
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.core.layout.dimensions
    }

    /// Shared scales for every child of the surface.
    #[must_use]
    pub fn scales(&self) -> &ScaleSet {
        &self.core.layout.scales
    }

    /// Number of times dimensions and scales were computed, including the
    /// initial build.
    #[must_use]
    pub fn layout_recompute_count(&self) -> u64 {
        self.core.layout_recomputes
    }

    #[must_use]
    pub fn spatial_index_rebuild_count(&self) -> u64 {
        self.core.spatial.rebuild_count()
    }

    pub(super) fn refresh_layout(&mut self) {
        let key = ScaleMemoKey::new(&self.core.config, self.core.catalog_revision);
        if key == self.core.layout.key {
            trace!("scale memo hit");
        } else {
            self.core.layout = compute_layout(key, &self.core.catalog);
            self.core.layout_recomputes += 1;
            debug!(
                inner_width = self.core.layout.dimensions.inner_width,
                inner_height = self.core.layout.dimensions.inner_height,
                x_type = ?self.core.layout.scales.x.scale_type(),
                y_type = ?self.core.layout.scales.y.scale_type(),
                "scales recomputed"
            );
        }
        self.sync_spatial_index();
    }

    fn sync_spatial_index(&mut self) {
        if self.core.interaction.mode() != InteractionMode::SpatialIndex
            || !self.core.layout.dimensions.is_renderable()
        {
            return;
        }
        if self.core.spatial_key.as_ref() == Some(&self.core.layout.key) {
            return;
        }
        self.core
            .spatial
            .sync(&self.core.catalog, &self.core.layout.scales);
        self.core.spatial_key = Some(self.core.layout.key.clone());
    }
}
