use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::series::{SeriesDescriptor, SeriesKind};
use crate::core::types::SeriesKey;
use crate::interaction::{InteractionHandlers, ResolvedHandlers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Axis child. Drawing is delegated to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    pub orientation: AxisOrientation,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub tick_count: Option<usize>,
}

impl AxisDescriptor {
    #[must_use]
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            label: None,
            tick_count: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = Some(tick_count);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOrientation {
    /// Constant y value across the plot width.
    Horizontal,
    /// Constant x value across the plot height.
    Vertical,
}

/// Straight line at a fixed data value. Does not widen any domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLineDescriptor {
    pub reference: f64,
    pub orientation: ReferenceOrientation,
    #[serde(default)]
    pub label: Option<String>,
}

impl ReferenceLineDescriptor {
    #[must_use]
    pub fn horizontal(reference: f64) -> Self {
        Self {
            reference,
            orientation: ReferenceOrientation::Horizontal,
            label: None,
        }
    }

    #[must_use]
    pub fn vertical(reference: f64) -> Self {
        Self {
            reference,
            orientation: ReferenceOrientation::Vertical,
            label: None,
        }
    }
}

/// Crosshair overlay drawn at each resolved tooltip match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairDescriptor {
    #[serde(default = "default_true")]
    pub show_horizontal_line: bool,
    #[serde(default = "default_true")]
    pub show_vertical_line: bool,
    #[serde(default = "default_true")]
    pub show_circle: bool,
    #[serde(default)]
    pub full_width: bool,
    #[serde(default)]
    pub full_height: bool,
    #[serde(default = "default_circle_size")]
    pub circle_size: f64,
}

fn default_true() -> bool {
    true
}

fn default_circle_size() -> f64 {
    4.0
}

impl Default for CrosshairDescriptor {
    fn default() -> Self {
        Self {
            show_horizontal_line: true,
            show_vertical_line: true,
            show_circle: true,
            full_width: false,
            full_height: false,
            circle_size: default_circle_size(),
        }
    }
}

/// Anything else: passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDescriptor {
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// One declarative child of the chart surface.
#[derive(Debug, Clone)]
pub enum ChartChild {
    Series(SeriesDescriptor),
    Axis(AxisDescriptor),
    ReferenceLine(ReferenceLineDescriptor),
    Crosshair(CrosshairDescriptor),
    Overlay(OverlayDescriptor),
}

/// Closed set of child kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildKind {
    Standard,
    Bar,
    CirclePack,
    ReferenceLine,
    Axis,
    Crosshair,
    OtherOverlay,
}

impl From<SeriesKind> for ChildKind {
    fn from(value: SeriesKind) -> Self {
        match value {
            SeriesKind::Standard => Self::Standard,
            SeriesKind::Bar => Self::Bar,
            SeriesKind::CirclePack => Self::CirclePack,
        }
    }
}

impl ChartChild {
    #[must_use]
    pub fn kind(&self) -> ChildKind {
        match self {
            Self::Series(series) => series.kind.into(),
            Self::Axis(_) => ChildKind::Axis,
            Self::ReferenceLine(_) => ChildKind::ReferenceLine,
            Self::Crosshair(_) => ChildKind::Crosshair,
            Self::Overlay(_) => ChildKind::OtherOverlay,
        }
    }
}

impl From<SeriesDescriptor> for ChartChild {
    fn from(value: SeriesDescriptor) -> Self {
        Self::Series(value)
    }
}

impl From<AxisDescriptor> for ChartChild {
    fn from(value: AxisDescriptor) -> Self {
        Self::Axis(value)
    }
}

impl From<ReferenceLineDescriptor> for ChartChild {
    fn from(value: ReferenceLineDescriptor) -> Self {
        Self::ReferenceLine(value)
    }
}

impl From<CrosshairDescriptor> for ChartChild {
    fn from(value: CrosshairDescriptor) -> Self {
        Self::Crosshair(value)
    }
}

impl From<OverlayDescriptor> for ChartChild {
    fn from(value: OverlayDescriptor) -> Self {
        Self::Overlay(value)
    }
}

#[derive(Debug, Clone)]
struct SeriesEntry {
    key: SeriesKey,
    child_index: usize,
    handlers: ResolvedHandlers,
}

/// Series view handed to synthesis, routing and composition.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSeries<'a> {
    pub key: &'a SeriesKey,
    pub descriptor: &'a SeriesDescriptor,
    pub handlers: &'a ResolvedHandlers,
}

/// Read-only, resolved list of chart children.
///
/// Built once from the caller's declarative input: series keys are assigned
/// and every series' effective handlers (`own ?? default`) are resolved here,
/// never re-inspected during routing.
#[derive(Debug, Clone, Default)]
pub struct SeriesCatalog {
    children: Vec<ChartChild>,
    series: Vec<SeriesEntry>,
}

/// `label` itself when free, otherwise `label#child_index`, then
/// `label#child_index#2` and up until nothing already taken matches.
fn unique_key(used: &IndexSet<String>, label: String, child_index: usize) -> String {
    if !used.contains(&label) {
        return label;
    }
    let mut candidate = format!("{label}#{child_index}");
    let mut suffix = 2_usize;
    while used.contains(&candidate) {
        candidate = format!("{label}#{child_index}#{suffix}");
        suffix += 1;
    }
    warn!(label = %label, key = %candidate, "duplicate series label, assigning unique key");
    candidate
}

impl SeriesCatalog {
    #[must_use]
    pub fn build(children: Vec<ChartChild>, defaults: &InteractionHandlers) -> Self {
        let mut used_keys = IndexSet::new();
        let mut series = Vec::new();

        for (child_index, child) in children.iter().enumerate() {
            let ChartChild::Series(descriptor) = child else {
                continue;
            };
            let label = descriptor
                .label
                .clone()
                .unwrap_or_else(|| format!("series-{child_index}"));
            let key = unique_key(&used_keys, label, child_index);
            used_keys.insert(key.clone());
            series.push(SeriesEntry {
                key: SeriesKey::new(key),
                child_index,
                handlers: ResolvedHandlers::resolve(&descriptor.handlers, defaults),
            });
        }

        debug!(
            children = children.len(),
            series = series.len(),
            "series catalog built"
        );
        Self { children, series }
    }

    /// Re-resolves effective handlers against new surface defaults.
    pub fn resolve_handlers(&mut self, defaults: &InteractionHandlers) {
        for entry in &mut self.series {
            if let Some(ChartChild::Series(descriptor)) = self.children.get(entry.child_index) {
                entry.handlers = ResolvedHandlers::resolve(&descriptor.handlers, defaults);
            }
        }
    }

    #[must_use]
    pub fn children(&self) -> &[ChartChild] {
        &self.children
    }

    /// Series in declaration order.
    pub fn series(&self) -> impl Iterator<Item = CatalogSeries<'_>> + '_ {
        self.series.iter().filter_map(|entry| match &self.children[entry.child_index] {
            ChartChild::Series(descriptor) => Some(CatalogSeries {
                key: &entry.key,
                descriptor,
                handlers: &entry.handlers,
            }),
            _ => None,
        })
    }

    /// Series that take part in pointer routing.
    pub fn interactive_series(&self) -> impl Iterator<Item = CatalogSeries<'_>> + '_ {
        self.series()
            .filter(|series| !series.descriptor.disable_mouse_events)
    }

    #[must_use]
    pub fn series_by_key(&self, key: &SeriesKey) -> Option<CatalogSeries<'_>> {
        self.series().find(|series| series.key == key)
    }

    #[must_use]
    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn has_kind(&self, kind: ChildKind) -> bool {
        self.children.iter().any(|child| child.kind() == kind)
    }
}
