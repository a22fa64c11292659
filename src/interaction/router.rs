use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    Accessors, ChartScale, Datum, Margin, ScaleSet, ScreenPoint, SeriesCatalog, SeriesDescriptor,
    SeriesKey,
};

use super::InteractionResult;
use super::crosshair::project_datum;
use super::spatial_index::{GridSpatialIndex, SpatialIndex};

/// Index of the datum nearest to `local_x` along the x axis.
///
/// Continuous scales invert the pointer into data space and compare values.
/// Categorical scales compare screen positions; on band scales the pointer
/// is first shifted back by half a band so it lines up with band starts.
/// The first datum at the minimal distance wins.
#[must_use]
pub fn find_closest_datum(
    series: &SeriesDescriptor,
    local_x: f64,
    x_scale: &ChartScale,
) -> Option<usize> {
    let accessors = &series.accessors;
    let mut best: Option<(OrderedFloat<f64>, usize)> = None;

    if x_scale.is_invertible() {
        let target = x_scale.invert(local_x)?;
        for (idx, datum) in series.data.iter().enumerate() {
            let Some(value) = accessors.x(datum).and_then(|v| v.as_continuous()) else {
                continue;
            };
            keep_nearest(&mut best, (value - target).abs(), idx);
        }
    } else {
        let half_band = x_scale
            .bar_width()
            .or_else(|| x_scale.bandwidth())
            .map_or(0.0, |width| width / 2.0);
        let pointer = local_x - half_band;
        for (idx, datum) in series.data.iter().enumerate() {
            let Some(position) = accessors.x(datum).and_then(|v| x_scale.map_value(&v)) else {
                continue;
            };
            keep_nearest(&mut best, (position - pointer).abs(), idx);
        }
    }

    best.map(|(_, idx)| idx)
}

fn keep_nearest(best: &mut Option<(OrderedFloat<f64>, usize)>, distance: f64, idx: usize) {
    if distance.is_nan() {
        return;
    }
    let distance = OrderedFloat(distance);
    if best.is_none_or(|(current, _)| distance < current) {
        *best = Some((distance, idx));
    }
}

/// Direct-mode routing over every interactive series.
///
/// `local` is relative to the plotting group origin. The global winner is
/// the per-series match whose projected y is closest to the pointer; ties
/// keep the earlier series. Returns `None` when no series matched.
#[must_use]
pub fn find_closest_datums(
    catalog: &SeriesCatalog,
    local: ScreenPoint,
    scales: &ScaleSet,
) -> Option<InteractionResult> {
    let mut matches: SmallVec<[(&SeriesKey, &Datum); 4]> = SmallVec::new();
    let mut closest: Option<(OrderedFloat<f64>, usize)> = None;

    for series in catalog.interactive_series() {
        let Some(idx) = find_closest_datum(series.descriptor, local.x, &scales.x) else {
            continue;
        };
        let datum = &series.descriptor.data[idx];
        let delta_y = series
            .descriptor
            .accessors
            .y(datum)
            .and_then(|y| scales.y.map_value(&y))
            .map_or(f64::INFINITY, |y_px| (y_px - local.y).abs());
        let delta_y = OrderedFloat(delta_y);
        if closest.is_none_or(|(best, _)| delta_y < best) {
            closest = Some((delta_y, matches.len()));
        }
        matches.push((series.key, datum));
    }

    let (delta_y, winner) = closest?;
    let (closest_series, closest_datum) = matches[winner];
    trace!(
        matches = matches.len(),
        winner = %closest_series,
        delta_y = delta_y.0,
        "direct routing resolved"
    );

    Some(InteractionResult {
        closest_datum: closest_datum.clone(),
        closest_series: closest_series.clone(),
        per_series_matches: matches
            .into_iter()
            .map(|(key, datum)| (key.clone(), datum.clone()))
            .collect(),
    })
}

/// Position of `datum` in outer-surface coordinates.
#[must_use]
pub fn data_coords(
    datum: &Datum,
    accessors: &Accessors,
    scales: &ScaleSet,
    margin: Margin,
) -> Option<ScreenPoint> {
    let x = scales.x.map_value(&accessors.x(datum)?)?;
    let y = scales.y.map_value(&accessors.y(datum)?)?;
    Some(ScreenPoint::new(x + margin.left, y + margin.top))
}

#[derive(Debug, Clone)]
struct SiteOwner {
    series: SeriesKey,
    datum_index: usize,
}

/// Wiring between the catalog and a [`SpatialIndex`].
///
/// The index is rebuilt only when the projected interactive dataset
/// changes; lookups translate the single hit back into the same result
/// shape as direct routing.
#[derive(Debug, Clone, Default)]
pub struct SpatialRouter<I: SpatialIndex = GridSpatialIndex> {
    index: I,
    sites: Vec<ScreenPoint>,
    owners: Vec<SiteOwner>,
    fingerprint: Option<u64>,
    rebuild_count: u64,
}

impl<I: SpatialIndex> SpatialRouter<I> {
    #[must_use]
    pub fn with_index(index: I) -> Self {
        Self {
            index,
            sites: Vec::new(),
            owners: Vec::new(),
            fingerprint: None,
            rebuild_count: 0,
        }
    }

    /// Projects every interactive datum and rebuilds the index when the
    /// result or the scale ranges differ from the last build. Returns `true`
    /// on rebuild.
    pub fn sync(&mut self, catalog: &SeriesCatalog, scales: &ScaleSet) -> bool {
        let mut sites = Vec::new();
        let mut owners = Vec::new();
        let mut hasher = DefaultHasher::new();

        for series in catalog.interactive_series() {
            let accessors = &series.descriptor.accessors;
            for (datum_index, datum) in series.descriptor.data.iter().enumerate() {
                let Some(site) = project_datum(datum, accessors, &scales.x, &scales.y) else {
                    continue;
                };
                series.key.hash(&mut hasher);
                datum_index.hash(&mut hasher);
                site.x.to_bits().hash(&mut hasher);
                site.y.to_bits().hash(&mut hasher);
                sites.push(site);
                owners.push(SiteOwner {
                    series: series.key.clone(),
                    datum_index,
                });
            }
        }

        let (x_lo, x_hi) = scales.x.range();
        let (y_lo, y_hi) = scales.y.range();
        let extent_min = ScreenPoint::new(x_lo.min(x_hi), y_lo.min(y_hi));
        let extent_max = ScreenPoint::new(x_lo.max(x_hi), y_lo.max(y_hi));
        for bound in [extent_min.x, extent_min.y, extent_max.x, extent_max.y] {
            bound.to_bits().hash(&mut hasher);
        }

        let fingerprint = hasher.finish();
        if self.fingerprint == Some(fingerprint) {
            trace!(sites = sites.len(), "spatial index unchanged");
            return false;
        }

        self.index.set_extent(extent_min, extent_max);
        self.index.rebuild(&sites);
        self.sites = sites;
        self.owners = owners;
        self.fingerprint = Some(fingerprint);
        self.rebuild_count += 1;
        debug!(
            sites = self.sites.len(),
            rebuilds = self.rebuild_count,
            "spatial index rebuilt"
        );
        true
    }

    /// Resolves `local` to its cell occupant. Positions more than one pixel
    /// outside `[0, inner_width] x [0, inner_height]` have no cell.
    #[must_use]
    pub fn find(
        &self,
        catalog: &SeriesCatalog,
        local: ScreenPoint,
        inner_width: f64,
        inner_height: f64,
    ) -> Option<InteractionResult> {
        let inside = local.x >= -1.0
            && local.x <= inner_width + 1.0
            && local.y >= -1.0
            && local.y <= inner_height + 1.0;
        if !inside {
            return None;
        }

        let owner = self.owners.get(self.index.find(local)?)?;
        let series = catalog.series_by_key(&owner.series)?;
        let datum = series.descriptor.data.get(owner.datum_index)?;

        let mut per_series_matches = IndexMap::with_capacity(1);
        per_series_matches.insert(owner.series.clone(), datum.clone());
        Some(InteractionResult {
            closest_datum: datum.clone(),
            closest_series: owner.series.clone(),
            per_series_matches,
        })
    }

    /// Forces the next [`SpatialRouter::sync`] to rebuild.
    pub fn invalidate(&mut self) {
        self.fingerprint = None;
    }

    /// Site positions in plotting-group coordinates.
    #[must_use]
    pub fn sites(&self) -> &[ScreenPoint] {
        &self.sites
    }

    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}
