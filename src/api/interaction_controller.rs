use tracing::trace;

use crate::core::{SeriesCatalog, SeriesKey};
use crate::interaction::{
    ClickEvent, InteractionEvent, InteractionHandlers, InteractionMode, InteractionResult,
    PointerEvent, TooltipState, data_coords, find_closest_datums,
};
use crate::render::Renderer;

use super::ChartSurface;

/// Handlers that receive an event: the target series' effective handlers
/// when the event names an interactive series, the surface defaults
/// otherwise.
fn handlers_for<'a>(
    catalog: &'a SeriesCatalog,
    defaults: &'a InteractionHandlers,
    target: Option<&SeriesKey>,
) -> &'a InteractionHandlers {
    target
        .and_then(|key| catalog.series_by_key(key))
        .filter(|series| !series.descriptor.disable_mouse_events)
        .map_or(defaults, |series| series.handlers.handlers())
}

impl<R: Renderer> ChartSurface<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    /// Resolves the pointer against the current scales without touching
    /// interaction state or calling handlers.
    #[must_use]
    pub fn resolve_pointer(&self, event: &PointerEvent) -> Option<InteractionEvent> {
        let layout = &self.core.layout;
        if !layout.dimensions.is_renderable() {
            trace!("pointer ignored on degenerate surface");
            return None;
        }

        let margin = layout.dimensions.margin;
        let local = event.position().translate(-margin.left, -margin.top);
        let result: InteractionResult = match self.core.interaction.mode() {
            InteractionMode::Direct => {
                find_closest_datums(&self.core.catalog, local, &layout.scales)?
            }
            InteractionMode::SpatialIndex => self.core.spatial.find(
                &self.core.catalog,
                local,
                layout.dimensions.inner_width,
                layout.dimensions.inner_height,
            )?,
        };

        let coords = self
            .core
            .catalog
            .series_by_key(&result.closest_series)
            .and_then(|series| {
                data_coords(
                    &result.closest_datum,
                    &series.descriptor.accessors,
                    &layout.scales,
                    margin,
                )
            });

        Some(InteractionEvent {
            event: event.clone(),
            datum: result.closest_datum,
            series: result.per_series_matches,
            data_coords: coords,
        })
    }

    /// Routes a pointer move. When a datum is found, the tooltip candidate is
    /// updated and the effective move handler is called with the combined
    /// payload; otherwise nothing is emitted.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<InteractionEvent> {
        let interaction = self.resolve_pointer(&event)?;
        trace!(
            matches = interaction.series.len(),
            x = event.x,
            y = event.y,
            "pointer resolved"
        );
        self.core
            .interaction
            .on_pointer_move(event.position(), Some(TooltipState::from(&interaction)));

        let handlers = handlers_for(
            &self.core.catalog,
            &self.core.default_handlers,
            event.target.as_ref(),
        );
        if let Some(handler) = &handlers.on_mouse_move {
            handler(&interaction);
        }
        Some(interaction)
    }

    /// Clears interaction state and calls the surface-level leave handler.
    pub fn pointer_leave(&mut self) {
        self.core.interaction.on_pointer_leave();
        if let Some(handler) = &self.core.default_handlers.on_mouse_leave {
            handler();
        }
    }

    /// Pointer left one series' shapes: clears state and calls that series'
    /// effective leave handler.
    pub fn pointer_leave_series(&mut self, key: &SeriesKey) {
        self.core.interaction.on_pointer_leave();
        let handlers = handlers_for(&self.core.catalog, &self.core.default_handlers, Some(key));
        if let Some(handler) = &handlers.on_mouse_leave {
            handler();
        }
    }

    /// Dispatches a click. Suppressed entirely on a degenerate surface.
    pub fn click(&mut self, event: PointerEvent) -> Option<ClickEvent> {
        if !self.core.layout.dimensions.is_renderable() {
            trace!("click ignored on degenerate surface");
            return None;
        }

        let click = ClickEvent {
            interaction: self.resolve_pointer(&event),
            event,
        };
        let handlers = handlers_for(
            &self.core.catalog,
            &self.core.default_handlers,
            click.event.target.as_ref(),
        );
        if let Some(handler) = &handlers.on_click {
            handler(&click);
        }
        Some(click)
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.core.interaction.tooltip()
    }

    /// Replaces the tooltip candidate, for hosts that drive tooltip state
    /// from their own handlers.
    pub fn set_tooltip(&mut self, tooltip: Option<TooltipState>) {
        match tooltip {
            Some(tooltip) => {
                let position = tooltip.event.position();
                self.core.interaction.on_pointer_move(position, Some(tooltip));
            }
            None => self.core.interaction.on_pointer_leave(),
        }
    }

    /// Calls `hook` with the current tooltip candidate. The hook never runs
    /// without a resolved datum.
    pub fn render_tooltip<T>(&self, hook: impl FnOnce(&TooltipState) -> T) -> Option<T> {
        self.core.interaction.tooltip().map(hook)
    }
}
