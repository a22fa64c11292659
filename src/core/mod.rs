pub mod band_scale;
pub mod catalog;
pub mod datum;
pub mod dimensions;
pub mod primitives;
pub mod scale;
pub mod scale_config;
pub mod scale_synthesizer;
pub mod series;
pub mod ticks;
pub mod types;

pub use band_scale::{BandScale, BandTuning};
pub use catalog::{
    AxisDescriptor, AxisOrientation, CatalogSeries, ChartChild, ChildKind, CrosshairDescriptor,
    OverlayDescriptor, ReferenceLineDescriptor, ReferenceOrientation, SeriesCatalog,
};
pub use datum::{Datum, DatumValue};
pub use dimensions::{Dimensions, Margin, MarginConfig, compute_dimensions};
pub use scale::{ChartScale, ContinuousScale, ScaleDomain};
pub use scale_config::{DomainHint, ScaleConfig, ScaleType};
pub use scale_synthesizer::{ScaleSet, synthesize};
pub use series::{Accessor, Accessors, SeriesDescriptor, SeriesKind};
pub use types::{ScreenPoint, SeriesKey};
