//! Tick generation and domain rounding for continuous scales.
//!
//! Steps are 1, 2 or 5 times a power of ten, chosen so that roughly `count`
//! ticks cover the domain.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

pub const DEFAULT_TICK_COUNT: usize = 10;

/// Signed tick increment for `[start, stop]`.
///
/// Positive values are the step itself. Negative values encode a fractional
/// step as `-1 / step` so that tick values can be produced without
/// accumulating floating-point error.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Evenly spaced, human-friendly tick values within `[start, stop]`.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_increment(lo, hi, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    let mut values: Vec<f64> = if increment > 0.0 {
        let first = (lo / increment).ceil() as i64;
        let last = (hi / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = -increment;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if reverse {
        values.reverse();
    }
    values
}

/// Extends `[start, stop]` outward so both ends land on tick boundaries.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop {
        return (start, stop);
    }

    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step = f64::NAN;

    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if step == previous_step {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = step;
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}
