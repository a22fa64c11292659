pub mod crosshair;
pub mod router;
pub mod spatial_index;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Datum, ScreenPoint, SeriesKey};

pub use crosshair::{CrosshairPlacement, CrosshairPlan, project_datum};
pub use router::{SpatialRouter, data_coords, find_closest_datum, find_closest_datums};
pub use spatial_index::{GridSpatialIndex, SpatialIndex};

/// Which backend resolves pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    /// Linear scan over every interactive series.
    #[default]
    Direct,
    /// Nearest-site lookup in a prebuilt spatial index (Voronoi cells).
    SpatialIndex,
}

impl InteractionMode {
    #[must_use]
    pub fn from_use_voronoi(use_voronoi: bool) -> Self {
        if use_voronoi {
            Self::SpatialIndex
        } else {
            Self::Direct
        }
    }
}

/// Pointer position in outer-surface coordinates.
///
/// `target` names the series whose shape is under the pointer when the host
/// knows it; such events go to that series' effective handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SeriesKey>,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, target: None }
    }

    #[must_use]
    pub fn with_target(mut self, target: SeriesKey) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn position(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

/// Outcome of one routing pass. Recomputed per pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    pub closest_datum: Datum,
    pub closest_series: SeriesKey,
    /// Nearest datum per interactive series, in declaration order.
    pub per_series_matches: IndexMap<SeriesKey, Datum>,
}

/// Combined payload delivered to move handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub event: PointerEvent,
    pub datum: Datum,
    pub series: IndexMap<SeriesKey, Datum>,
    /// Closest datum position in outer-surface coordinates.
    pub data_coords: Option<ScreenPoint>,
}

/// Payload delivered to click handlers; `interaction` is `None` when nothing
/// was under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub event: PointerEvent,
    pub interaction: Option<InteractionEvent>,
}

/// Candidate tooltip content. Presentation state belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub datum: Datum,
    pub series: IndexMap<SeriesKey, Datum>,
    pub event: PointerEvent,
}

impl From<&InteractionEvent> for TooltipState {
    fn from(value: &InteractionEvent) -> Self {
        Self {
            datum: value.datum.clone(),
            series: value.series.clone(),
            event: value.event.clone(),
        }
    }
}

pub type MoveHandler = Arc<dyn Fn(&InteractionEvent) + Send + Sync>;
pub type LeaveHandler = Arc<dyn Fn() + Send + Sync>;
pub type ClickHandler = Arc<dyn Fn(&ClickEvent) + Send + Sync>;

/// Optional pointer callbacks, used both as surface defaults and as
/// per-series overrides.
#[derive(Clone, Default)]
pub struct InteractionHandlers {
    pub on_mouse_move: Option<MoveHandler>,
    pub on_mouse_leave: Option<LeaveHandler>,
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for InteractionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionHandlers")
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_mouse_leave", &self.on_mouse_leave.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl InteractionHandlers {
    #[must_use]
    pub fn with_on_mouse_move(
        mut self,
        handler: impl Fn(&InteractionEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_mouse_move = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_on_mouse_leave(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_mouse_leave = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_on_click(mut self, handler: impl Fn(&ClickEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }
}

/// Effective handlers of one series: its own where set, else the surface
/// default.
#[derive(Clone, Default)]
pub struct ResolvedHandlers {
    handlers: InteractionHandlers,
    overrides_move: bool,
    overrides_leave: bool,
    overrides_click: bool,
}

impl fmt::Debug for ResolvedHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedHandlers")
            .field("handlers", &self.handlers)
            .field("overrides_move", &self.overrides_move)
            .field("overrides_leave", &self.overrides_leave)
            .field("overrides_click", &self.overrides_click)
            .finish()
    }
}

impl ResolvedHandlers {
    #[must_use]
    pub fn resolve(own: &InteractionHandlers, defaults: &InteractionHandlers) -> Self {
        Self {
            handlers: InteractionHandlers {
                on_mouse_move: own
                    .on_mouse_move
                    .clone()
                    .or_else(|| defaults.on_mouse_move.clone()),
                on_mouse_leave: own
                    .on_mouse_leave
                    .clone()
                    .or_else(|| defaults.on_mouse_leave.clone()),
                on_click: own.on_click.clone().or_else(|| defaults.on_click.clone()),
            },
            overrides_move: own.on_mouse_move.is_some(),
            overrides_leave: own.on_mouse_leave.is_some(),
            overrides_click: own.on_click.is_some(),
        }
    }

    #[must_use]
    pub fn handlers(&self) -> &InteractionHandlers {
        &self.handlers
    }

    #[must_use]
    pub fn overrides_move(&self) -> bool {
        self.overrides_move
    }

    #[must_use]
    pub fn overrides_leave(&self) -> bool {
        self.overrides_leave
    }

    #[must_use]
    pub fn overrides_click(&self) -> bool {
        self.overrides_click
    }
}

/// Per-surface pointer state: last pointer position and the tooltip
/// candidate produced by the last routed event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    pointer: Option<ScreenPoint>,
    tooltip: Option<TooltipState>,
}

impl InteractionState {
    #[must_use]
    pub fn new(mode: InteractionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn pointer(&self) -> Option<ScreenPoint> {
        self.pointer
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    pub fn on_pointer_move(&mut self, position: ScreenPoint, tooltip: Option<TooltipState>) {
        self.pointer = Some(position);
        self.tooltip = tooltip;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.tooltip = None;
    }
}
