use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::datum::{Datum, DatumValue};
use crate::interaction::{ClickHandler, InteractionHandlers, LeaveHandler, MoveHandler};

/// Extracts one field from a datum.
pub type Accessor = Arc<dyn Fn(&Datum) -> Option<DatumValue> + Send + Sync>;

/// Series family. Drawing is external; the family only matters for scale
/// corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Lines, points, areas and other series with no scale correction.
    #[default]
    Standard,
    Bar,
    CirclePack,
}

/// X/Y accessors for one series.
#[derive(Clone)]
pub struct Accessors {
    pub x: Accessor,
    pub y: Accessor,
}

impl Default for Accessors {
    fn default() -> Self {
        Self {
            x: Arc::new(|datum: &Datum| datum.x.clone()),
            y: Arc::new(|datum: &Datum| datum.y.clone()),
        }
    }
}

impl fmt::Debug for Accessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}

impl Accessors {
    #[must_use]
    pub fn x(&self, datum: &Datum) -> Option<DatumValue> {
        (self.x)(datum)
    }

    #[must_use]
    pub fn y(&self, datum: &Datum) -> Option<DatumValue> {
        (self.y)(datum)
    }

    /// Lower x extent: `x0` when present, otherwise the scalar x.
    #[must_use]
    pub fn x_min(&self, datum: &Datum) -> Option<f64> {
        finite(datum.x0).or_else(|| self.x(datum)?.as_continuous())
    }

    /// Upper x extent: `x1` when present, otherwise the scalar x.
    #[must_use]
    pub fn x_max(&self, datum: &Datum) -> Option<f64> {
        finite(datum.x1).or_else(|| self.x(datum)?.as_continuous())
    }

    #[must_use]
    pub fn y_min(&self, datum: &Datum) -> Option<f64> {
        finite(datum.y0).or_else(|| self.y(datum)?.as_continuous())
    }

    #[must_use]
    pub fn y_max(&self, datum: &Datum) -> Option<f64> {
        finite(datum.y1).or_else(|| self.y(datum)?.as_continuous())
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// One plotted series as declared by the caller.
#[derive(Clone, Default)]
pub struct SeriesDescriptor {
    pub kind: SeriesKind,
    pub data: Vec<Datum>,
    pub accessors: Accessors,
    /// Still contributes to the shared domains; never matched by pointer routing.
    pub disable_mouse_events: bool,
    pub label: Option<String>,
    /// Handlers overriding the surface defaults for this series.
    pub handlers: InteractionHandlers,
}

impl fmt::Debug for SeriesDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesDescriptor")
            .field("kind", &self.kind)
            .field("data_len", &self.data.len())
            .field("disable_mouse_events", &self.disable_mouse_events)
            .field("label", &self.label)
            .field("handlers", &self.handlers)
            .finish()
    }
}

impl SeriesDescriptor {
    #[must_use]
    pub fn new(kind: SeriesKind, data: Vec<Datum>) -> Self {
        Self {
            kind,
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn standard(data: Vec<Datum>) -> Self {
        Self::new(SeriesKind::Standard, data)
    }

    #[must_use]
    pub fn bar(data: Vec<Datum>) -> Self {
        Self::new(SeriesKind::Bar, data)
    }

    #[must_use]
    pub fn circle_pack(data: Vec<Datum>) -> Self {
        Self::new(SeriesKind::CirclePack, data)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_accessors(mut self, accessors: Accessors) -> Self {
        self.accessors = accessors;
        self
    }

    #[must_use]
    pub fn with_x_accessor(
        mut self,
        accessor: impl Fn(&Datum) -> Option<DatumValue> + Send + Sync + 'static,
    ) -> Self {
        self.accessors.x = Arc::new(accessor);
        self
    }

    #[must_use]
    pub fn with_y_accessor(
        mut self,
        accessor: impl Fn(&Datum) -> Option<DatumValue> + Send + Sync + 'static,
    ) -> Self {
        self.accessors.y = Arc::new(accessor);
        self
    }

    #[must_use]
    pub fn with_mouse_events_disabled(mut self, disabled: bool) -> Self {
        self.disable_mouse_events = disabled;
        self
    }

    #[must_use]
    pub fn with_on_mouse_move(mut self, handler: MoveHandler) -> Self {
        self.handlers.on_mouse_move = Some(handler);
        self
    }

    #[must_use]
    pub fn with_on_mouse_leave(mut self, handler: LeaveHandler) -> Self {
        self.handlers.on_mouse_leave = Some(handler);
        self
    }

    #[must_use]
    pub fn with_on_click(mut self, handler: ClickHandler) -> Self {
        self.handlers.on_click = Some(handler);
        self
    }
}
