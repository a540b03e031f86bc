//! Numeric helpers for shaping musical material: deltas, quantization,
//! rhythm to time conversion and range rescaling.
//!
//! ```
//! use pcmatrix::music_math;
//!
//! assert_eq!(music_math::compute_deltas(&[60, 64, 67]), vec![-4, -3]);
//! assert_eq!(music_math::quantize(32.4546, 25.0), 44.0);
//! assert_eq!(music_math::rescale(50.0, 0.0..=100.0, 0.0..=1.0, 1.0), 0.5);
//! ```

use std::ops::{RangeInclusive, Sub};

/// Seconds in the minute a metronome mark is counted against.
pub const MINUTE: f64 = 60.0;

/// Differences between neighbours, each element subtracted from the one
/// before it. One shorter than `values`; empty for fewer than two.
pub fn compute_deltas<T>(values: &[T]) -> Vec<T>
where
    T: Copy + Sub<Output = T>,
{
    values.windows(2).map(|pair| pair[0] - pair[1]).collect()
}

/// Mid-riser uniform quantization of `input` with step size `step`.
pub fn quantize(input: f64, step: f64) -> f64 {
    (step * ((input / step) + 0.5)).floor()
}

/// Duration in seconds of `rhythm` (a fraction of a whole note) when
/// `beat` takes the pulse at `tempo` beats per minute.
pub fn convert_rhythm(rhythm: f64, beat: f64, tempo: f64) -> f64 {
    convert_rhythm_in(rhythm, beat, tempo, MINUTE)
}

/// As `convert_rhythm`, with `tempo` counted per `unit_of_time` seconds.
pub fn convert_rhythm_in(rhythm: f64, beat: f64, tempo: f64, unit_of_time: f64) -> f64 {
    (rhythm / beat) * (unit_of_time / tempo)
}

/// Map `value` from `old_scale` into `new_scale`.
///
/// A `base` of 1 is linear. Any other base bends the curve exponentially,
/// `base` being the ratio of the slopes at either end. Values at or outside
/// the ends of `old_scale` land on the matching end of `new_scale`.
pub fn rescale(
    value: f64,
    old_scale: RangeInclusive<f64>,
    new_scale: RangeInclusive<f64>,
    base: f64,
) -> f64 {
    let (old_start, old_end) = old_scale.into_inner();
    let (new_start, new_end) = new_scale.into_inner();

    if value >= old_end {
        return new_end;
    }
    if value <= old_start {
        return new_start;
    }

    let position = (value - old_start) / (old_end - old_start);
    if base == 1.0 {
        return (new_end - new_start) * position + new_start;
    }
    ((new_end - new_start) / (base - 1.0)) * (base.powf(position) - 1.0) + new_start
}
