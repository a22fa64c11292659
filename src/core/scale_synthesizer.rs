use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::core::band_scale::{BandScale, BandTuning};
use crate::core::catalog::SeriesCatalog;
use crate::core::datum::{Datum, DatumValue};
use crate::core::scale::{ChartScale, ContinuousScale};
use crate::core::scale_config::{DomainHint, ScaleConfig, ScaleType};
use crate::core::series::{Accessors, SeriesDescriptor, SeriesKind};
use crate::core::ticks::DEFAULT_TICK_COUNT;

/// The pair of scales shared by every series on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    pub x: ChartScale,
    pub y: ChartScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn value(self, accessors: &Accessors, datum: &Datum) -> Option<DatumValue> {
        match self {
            Self::X => accessors.x(datum),
            Self::Y => accessors.y(datum),
        }
    }

    fn extent(self, accessors: &Accessors, datum: &Datum) -> (Option<f64>, Option<f64>) {
        match self {
            Self::X => (accessors.x_min(datum), accessors.x_max(datum)),
            Self::Y => (accessors.y_min(datum), accessors.y_max(datum)),
        }
    }

    /// Finite ranged pair `(x0, x1)` or `(y0, y1)`, each side optional.
    fn ranged(self, datum: &Datum) -> (Option<f64>, Option<f64>) {
        let (low, high) = match self {
            Self::X => (datum.x0, datum.x1),
            Self::Y => (datum.y0, datum.y1),
        };
        (low.filter(|v| v.is_finite()), high.filter(|v| v.is_finite()))
    }
}

/// Derives the shared x/y scales from all series data.
///
/// Every series contributes to the domains, including those with mouse
/// events disabled. Explicit config wins over anything derived. Bar and
/// circle-pack corrections run afterwards in declaration order.
#[must_use]
pub fn synthesize(
    catalog: &SeriesCatalog,
    x_config: &ScaleConfig,
    y_config: &ScaleConfig,
    inner_width: f64,
    inner_height: f64,
) -> ScaleSet {
    let mut x = build_scale(catalog, Axis::X, x_config, (0.0, inner_width));
    let mut y = build_scale(catalog, Axis::Y, y_config, (inner_height, 0.0));

    for series in catalog.series() {
        match series.descriptor.kind {
            SeriesKind::Bar if !x.is_band() => {
                apply_bar_offset(&mut x, series.descriptor, inner_width);
                trace!(
                    series = %series.key,
                    bar_width = ?x.bar_width(),
                    offset = ?x.offset(),
                    "bar offset applied to x scale"
                );
            }
            SeriesKind::CirclePack => {
                let half = inner_height / 2.0;
                y.force_continuous_domain((-half, half));
                trace!(series = %series.key, half, "circle-pack y domain centered");
            }
            SeriesKind::Bar | SeriesKind::Standard => {}
        }
    }

    debug!(
        x_type = ?x.scale_type(),
        y_type = ?y.scale_type(),
        x_domain = ?x.domain(),
        y_domain = ?y.domain(),
        "scales synthesized"
    );
    ScaleSet { x, y }
}

fn build_scale(
    catalog: &SeriesCatalog,
    axis: Axis,
    config: &ScaleConfig,
    default_range: (f64, f64),
) -> ChartScale {
    let (range, round) = config.resolve_range(default_range);

    if config.scale_type.is_categorical() {
        let categories = match &config.domain {
            Some(DomainHint::Categories(categories)) => categories.clone(),
            Some(DomainHint::Continuous(..)) => {
                warn!(?axis, "numeric domain ignored on categorical scale");
                collect_categories(catalog, axis)
            }
            None => collect_categories(catalog, axis),
        };
        let band = BandScale::new(categories, range, config.band_tuning(round));
        return ChartScale::categorical(config.scale_type, band);
    }

    if config.scale_type == ScaleType::Other {
        debug!(?axis, "unrecognized scale type, using linear layout");
    }

    let mut domain = match &config.domain {
        Some(DomainHint::Continuous(start, end)) => (*start, *end),
        Some(DomainHint::Categories(_)) => {
            warn!(?axis, "category domain ignored on continuous scale");
            continuous_extent(catalog, axis)
        }
        None => continuous_extent(catalog, axis),
    };
    if config.include_zero && domain.0.is_finite() && domain.1.is_finite() {
        domain = (domain.0.min(0.0), domain.1.max(0.0));
    }

    let mut scale = ContinuousScale::new(domain, range).with_round(round);
    if config.nice {
        scale.nice(DEFAULT_TICK_COUNT);
    }
    ChartScale::continuous(config.scale_type, scale)
}

/// `[min(min extent), max(max extent)]` over all data, `(NaN, NaN)` when no
/// datum has a usable value.
fn continuous_extent(catalog: &SeriesCatalog, axis: Axis) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in catalog.series() {
        let accessors = &series.descriptor.accessors;
        for datum in &series.descriptor.data {
            let (lo, hi) = axis.extent(accessors, datum);
            if let Some(lo) = lo {
                min = min.min(lo);
            }
            if let Some(hi) = hi {
                max = max.max(hi);
            }
        }
    }
    if min > max {
        return (f64::NAN, f64::NAN);
    }
    (min, max)
}

/// Category keys in first-seen order. Ranged data contributes its lower
/// bound, scalar value and upper bound, in that order.
fn collect_categories(catalog: &SeriesCatalog, axis: Axis) -> Vec<String> {
    let mut categories = IndexSet::new();
    for series in catalog.series() {
        let accessors = &series.descriptor.accessors;
        for datum in &series.descriptor.data {
            let (low, high) = axis.ranged(datum);
            if let Some(low) = low {
                categories.insert(DatumValue::Number(low).category_key());
            }
            if let Some(value) = axis.value(accessors, datum) {
                categories.insert(value.category_key());
            }
            if let Some(high) = high {
                categories.insert(DatumValue::Number(high).category_key());
            }
        }
    }
    categories.into_iter().collect()
}

/// Centers bar bands on a non-band x axis.
///
/// A throwaway band scale over this series' x categories (outer padding of
/// one band) yields the bar width; the real scale's range shrinks by half a
/// band on each side. Each bar series overwrites the previous result.
fn apply_bar_offset(x: &mut ChartScale, series: &SeriesDescriptor, inner_width: f64) {
    let categories = series
        .data
        .iter()
        .filter_map(|datum| series.accessors.x(datum))
        .map(|value| value.category_key());
    let dummy = BandScale::new(
        categories,
        (0.0, inner_width),
        BandTuning {
            padding_outer: 1.0,
            round: true,
            ..BandTuning::default()
        },
    );
    let bar_width = dummy.bandwidth();
    let offset = bar_width / 2.0;
    x.set_range((offset, inner_width - offset));
    x.set_bar_metadata(bar_width, offset);
}
