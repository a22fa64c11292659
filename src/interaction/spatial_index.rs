//! Nearest-site lookup backing the Voronoi interaction mode.
//!
//! A Voronoi partition assigns every position to the cell of its nearest
//! site, so the query contract is "index of the closest site". Callers build
//! the index once per data change and query it per pointer event.

use ordered_float::OrderedFloat;

use crate::core::ScreenPoint;

/// Query contract for spatial interaction backends.
pub trait SpatialIndex {
    /// Region lookups are expected to fall in. Sites outside it still
    /// resolve; backends may use it to bound their internal layout. Takes
    /// effect on the next [`SpatialIndex::rebuild`].
    fn set_extent(&mut self, _min: ScreenPoint, _max: ScreenPoint) {}

    /// Replaces all sites. Non-finite sites are kept in numbering but never
    /// returned by [`SpatialIndex::find`].
    fn rebuild(&mut self, sites: &[ScreenPoint]);

    /// Index of the site whose cell contains `point`. Ties resolve to the
    /// lowest site index.
    fn find(&self, point: ScreenPoint) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Uniform-grid bucket index with ring search.
///
/// The grid spans the site bounding box clipped to the extent, and holds at
/// most about one cell per site. Sites outside the grid land in its edge
/// cells, so far-off outliers never widen the grid or the ring walk.
#[derive(Debug, Clone, Default)]
pub struct GridSpatialIndex {
    sites: Vec<ScreenPoint>,
    extent: Option<(ScreenPoint, ScreenPoint)>,
    origin: ScreenPoint,
    cell_width: f64,
    cell_height: f64,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
    occupied: usize,
}

impl GridSpatialIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn site(&self, idx: usize) -> Option<ScreenPoint> {
        self.sites.get(idx).copied()
    }

    /// Number of grid cells allocated by the last rebuild.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    fn cell_of(&self, point: ScreenPoint) -> (usize, usize) {
        let col = ((point.x - self.origin.x) / self.cell_width).floor();
        let row = ((point.y - self.origin.y) / self.cell_height).floor();
        (clamp_cell(col, self.cols), clamp_cell(row, self.rows))
    }

    fn bucket(&self, col: usize, row: usize) -> &[usize] {
        &self.buckets[row * self.cols + col]
    }

    /// Calls `visit` with every bucket exactly `ring` cells away from
    /// `(col, row)` in Chebyshev distance, skipping cells off the grid.
    fn visit_ring(&self, col: usize, row: usize, ring: usize, mut visit: impl FnMut(&[usize])) {
        if ring == 0 {
            visit(self.bucket(col, row));
            return;
        }

        let col_lo = col.saturating_sub(ring);
        let col_hi = (col + ring).min(self.cols - 1);
        if let Some(top) = row.checked_sub(ring) {
            for c in col_lo..=col_hi {
                visit(self.bucket(c, top));
            }
        }
        if row + ring < self.rows {
            for c in col_lo..=col_hi {
                visit(self.bucket(c, row + ring));
            }
        }

        let side_lo = (row + 1).saturating_sub(ring);
        let side_hi = (row + ring - 1).min(self.rows - 1);
        if side_lo > side_hi {
            return;
        }
        if let Some(left) = col.checked_sub(ring) {
            for r in side_lo..=side_hi {
                visit(self.bucket(left, r));
            }
        }
        if col + ring < self.cols {
            for r in side_lo..=side_hi {
                visit(self.bucket(col + ring, r));
            }
        }
    }

    /// Distance from `point` to the outside of the block of cells within
    /// `ring` of `(col, row)`; zero when the point is not inside the block.
    fn escape_distance(&self, point: ScreenPoint, col: usize, row: usize, ring: usize) -> f64 {
        let (col, row, ring) = (col as f64, row as f64, ring as f64);
        let min_x = self.origin.x + (col - ring) * self.cell_width;
        let max_x = self.origin.x + (col + ring + 1.0) * self.cell_width;
        let min_y = self.origin.y + (row - ring) * self.cell_height;
        let max_y = self.origin.y + (row + ring + 1.0) * self.cell_height;
        let gaps = [
            point.x - min_x,
            max_x - point.x,
            point.y - min_y,
            max_y - point.y,
        ];
        gaps.into_iter().fold(f64::INFINITY, f64::min).max(0.0)
    }
}

fn clamp_cell(value: f64, count: usize) -> usize {
    if value <= 0.0 || value.is_nan() {
        0
    } else {
        (value as usize).min(count.saturating_sub(1))
    }
}

/// Cells along one axis: about `span / target`, at least one, at most `cap`.
fn cell_span(span: f64, target: f64, cap: usize) -> usize {
    let cells = (span / target).ceil();
    if cells.is_nan() || cells < 1.0 {
        1
    } else {
        (cells.min(cap as f64) as usize).max(1)
    }
}

impl SpatialIndex for GridSpatialIndex {
    fn set_extent(&mut self, min: ScreenPoint, max: ScreenPoint) {
        self.extent = (min.is_finite() && max.is_finite()).then(|| {
            (
                ScreenPoint::new(min.x.min(max.x), min.y.min(max.y)),
                ScreenPoint::new(min.x.max(max.x), min.y.max(max.y)),
            )
        });
    }

    fn rebuild(&mut self, sites: &[ScreenPoint]) {
        self.sites = sites.to_vec();
        self.buckets.clear();
        self.cols = 0;
        self.rows = 0;
        self.occupied = 0;

        let finite: Vec<usize> = (0..sites.len()).filter(|&i| sites[i].is_finite()).collect();
        if finite.is_empty() {
            return;
        }

        let mut min = ScreenPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = ScreenPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &i in &finite {
            min.x = min.x.min(sites[i].x);
            min.y = min.y.min(sites[i].y);
            max.x = max.x.max(sites[i].x);
            max.y = max.y.max(sites[i].y);
        }
        if let Some((lo, hi)) = self.extent {
            min = ScreenPoint::new(min.x.clamp(lo.x, hi.x), min.y.clamp(lo.y, hi.y));
            max = ScreenPoint::new(max.x.clamp(lo.x, hi.x), max.y.clamp(lo.y, hi.y));
        }

        let count = finite.len() as f64;
        let cap = count.sqrt().ceil() as usize;
        let width = (max.x - min.x).max(1.0);
        let height = (max.y - min.y).max(1.0);
        let target = (width / count).sqrt() * height.sqrt();
        self.cols = cell_span(width, target, cap);
        self.rows = cell_span(height, target, cap);
        self.cell_width = width / self.cols as f64;
        self.cell_height = height / self.rows as f64;
        self.origin = min;
        self.buckets = vec![Vec::new(); self.cols * self.rows];

        for i in finite {
            let (col, row) = self.cell_of(sites[i]);
            let bucket = &mut self.buckets[row * self.cols + col];
            if bucket.is_empty() {
                self.occupied += 1;
            }
            bucket.push(i);
        }
    }

    fn find(&self, point: ScreenPoint) -> Option<usize> {
        if self.buckets.is_empty() || !point.is_finite() {
            return None;
        }

        let (col, row) = self.cell_of(point);
        let mut best: Option<(OrderedFloat<f64>, usize)> = None;
        let mut visited = 0;

        for ring in 0..self.cols.max(self.rows) {
            self.visit_ring(col, row, ring, |bucket| {
                if !bucket.is_empty() {
                    visited += 1;
                }
                for &idx in bucket {
                    let candidate = (OrderedFloat(self.sites[idx].distance_sq(point)), idx);
                    if best.is_none_or(|current| candidate < current) {
                        best = Some(candidate);
                    }
                }
            });

            if visited == self.occupied {
                break;
            }
            if let Some((dist_sq, _)) = best {
                let escape = self.escape_distance(point, col, row, ring);
                if escape.is_finite() && dist_sq.0 < escape * escape {
                    break;
                }
            }
        }

        best.map(|(_, idx)| idx)
    }

    fn len(&self) -> usize {
        self.sites.len()
    }
}
