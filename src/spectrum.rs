//! Frequency helpers for working in sonic space.
//!
//! Frequencies are in hertz. A *pitch id* counts equal-tempered semitones
//! from the A above middle C, so A440 is `0`, the C above it `3` and the E
//! below it `-5`.

use crate::pitch::PitchClass;

/// The A above middle C, in hertz.
pub const MIDDLE_A: f64 = 440.0;

/// Lower bound of audible (or at least felt) frequencies.
pub const MIN_HUMAN_HEARING: f64 = 4.0;

/// Upper bound of audible frequencies, half the CD sample rate.
pub const MAX_HUMAN_HEARING: f64 = 22_050.0;

/// Most partials any series will hold, one per hertz of hearing.
pub const MAX_PARTIALS: usize = 22_050;

const MIDI_A440: i32 = 69;

/// The sum and difference tones sounded by two frequencies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TartiniTones {
    pub difference: f64,
    pub sum: f64,
}

/// The harmonic series of `fundamental` up to the limit of hearing.
///
/// Element `n` is partial `n + 1`, so the fundamental comes first.
pub fn harmonics(fundamental: f64) -> Vec<f64> {
    harmonic_series(fundamental, MAX_HUMAN_HEARING)
}

/// The harmonic series of `fundamental`, stopping before the first partial
/// above `ceiling` or after `MAX_PARTIALS` partials.
pub fn harmonic_series(fundamental: f64, ceiling: f64) -> Vec<f64> {
    let mut series = Vec::new();
    if !(fundamental > 0.0) {
        return series;
    }

    for n in 1..=MAX_PARTIALS {
        let partial = n as f64 * fundamental;
        if partial > ceiling {
            break;
        }
        series.push(partial);
    }
    series
}

/// The subharmonic series of `fundamental` down to the limit of hearing.
pub fn subharmonics(fundamental: f64) -> Vec<f64> {
    subharmonic_series(fundamental, MIN_HUMAN_HEARING)
}

/// The subharmonic series of `fundamental`, stopping before the first
/// member below `floor` or after `MAX_PARTIALS` members. Empty unless both
/// are positive.
pub fn subharmonic_series(fundamental: f64, floor: f64) -> Vec<f64> {
    let mut series = Vec::new();
    if !(fundamental > 0.0 && floor > 0.0) {
        return series;
    }

    for n in 1..=MAX_PARTIALS {
        let partial = fundamental / n as f64;
        if partial < floor {
            break;
        }
        series.push(partial);
    }
    series
}

pub fn tartini(first: f64, second: f64) -> TartiniTones {
    TartiniTones {
        difference: (first - second).abs(),
        sum: first + second,
    }
}

/// `fundamental` raised by `octaves` octaves; fractional and negative
/// values are allowed.
pub fn octave(fundamental: f64, octaves: f64) -> f64 {
    fundamental * octaves.exp2()
}

/// The twelve-tone equal-tempered frequency of `pitch_id`, tuned to A440.
pub fn equal_frequency(pitch_id: i32) -> f64 {
    octave(MIDDLE_A, f64::from(pitch_id) / 12.0)
}

/// `fundamental` followed by `fundamental * ratio` for each ratio in turn,
/// stopping at the first frequency above the limit of hearing.
pub fn tuning_frequencies(fundamental: f64, ratios: &[f64]) -> Vec<f64> {
    let mut spectrum = vec![fundamental];
    for ratio in ratios {
        let frequency = fundamental * ratio;
        if frequency > MAX_HUMAN_HEARING {
            break;
        }
        spectrum.push(frequency);
    }
    spectrum
}

pub fn pitch_id_to_midi(pitch_id: i32) -> i32 {
    pitch_id + MIDI_A440
}

pub fn midi_to_pitch_id(midi_note: i32) -> i32 {
    midi_note - MIDI_A440
}

pub fn pitch_id_to_pitch_class(pitch_id: i32) -> PitchClass {
    PitchClass::wrapping(i64::from(pitch_id) + 9)
}

pub fn midi_to_pitch_class(midi_note: i32) -> PitchClass {
    pitch_id_to_pitch_class(midi_to_pitch_id(midi_note))
}

/// Convert an interval in cents to a frequency ratio.
pub fn cents_to_ratio(cents: f64) -> f64 {
    (cents / 1200.0).exp2()
}

/// Convert a frequency ratio to an interval in cents.
pub fn ratio_to_cents(ratio: f64) -> f64 {
    1200.0 * ratio.log2()
}
