//! Envelope & gain engine
//!
//! Two nested rates drive the gain. Once per chunk the engine compares the
//! current compressor gain with the gain the detector asks for and picks an
//! envelope rate: below 1 means attack (interpolate down toward the target),
//! 1 or above means release (multiply back up). Every sample then updates the
//! peak detector and moves the compressor gain at that rate.

use std::f32::consts::{FRAC_2_PI, FRAC_PI_2};

use super::compressor::Compressor;
use crate::convert::{db_to_linear, linear_to_db};
use sndcomp_core::StereoSample;

/// Inputs below this peak are treated as silence by the detector
const DETECTOR_FLOOR: f32 = 0.0001;

/// Spacing between release steps, in dB
const RELEASE_SPACING_DB: f32 = 5.0;

/// Minimum effective attack correction, in dB
const MIN_ATTACK_DIFF_DB: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeMode {
    Attack,
    Release,
}

/// Per-call running state of the compressor
pub struct GainEngine<'a> {
    compressor: &'a Compressor,
    detector_avg: f32,
    comp_gain: f32,
    /// Largest correction seen since the last release, `None` once released
    max_comp_diff_db: Option<f32>,
    envelope_rate: f32,
    scaled_desired_gain: f32,
    meter_db: f32,
}

impl<'a> GainEngine<'a> {
    pub fn new(compressor: &'a Compressor) -> Self {
        Self {
            compressor,
            detector_avg: 0.0,
            comp_gain: 1.0,
            max_comp_diff_db: None,
            envelope_rate: 1.0,
            scaled_desired_gain: 0.0,
            meter_db: 1.0,
        }
    }

    pub fn detector_avg(&self) -> f32 {
        self.detector_avg
    }

    pub fn comp_gain(&self) -> f32 {
        self.comp_gain
    }

    pub fn envelope_rate(&self) -> f32 {
        self.envelope_rate
    }

    /// Smoothed gain for metering, in dB
    pub fn meter_db(&self) -> f32 {
        self.meter_db
    }

    /// Pick the envelope rate for the next chunk from the detector state left
    /// by the previous one
    pub fn begin_chunk(&mut self) -> EnvelopeMode {
        let resolved = self.compressor.resolved();

        let desired_gain = self.detector_avg;
        let scaled_desired_gain = desired_gain.asin() * FRAC_2_PI;
        let comp_diff_db = finite_comp_diff_db(linear_to_db(self.comp_gain / scaled_desired_gain));

        let mode = if comp_diff_db < 0.0 {
            // gain is below target, release toward it
            self.max_comp_diff_db = None;

            // -12..0 dB onto 0..3
            let x = (comp_diff_db.clamp(-12.0, 0.0) + 12.0) * 0.25;
            let release_samples = self.compressor.release_curve().eval(x);
            self.envelope_rate = db_to_linear(RELEASE_SPACING_DB / release_samples);
            EnvelopeMode::Release
        } else {
            let max_diff = match self.max_comp_diff_db {
                Some(max) if max >= comp_diff_db => max,
                _ => comp_diff_db,
            };
            self.max_comp_diff_db = Some(max_diff);

            let attenuate = max_diff.max(MIN_ATTACK_DIFF_DB);
            self.envelope_rate = 1.0 - (0.25 / attenuate).powf(resolved.attack_samples_inv);
            EnvelopeMode::Attack
        };
        self.scaled_desired_gain = scaled_desired_gain;

        tracing::trace!(
            ?mode,
            comp_diff_db,
            envelope_rate = self.envelope_rate,
            detector_avg = self.detector_avg,
            comp_gain = self.comp_gain,
            "chunk envelope"
        );
        mode
    }

    /// Run the detector on `input` and return the gain for the matching
    /// delayed output sample
    #[inline]
    pub fn next_gain(&mut self, input: StereoSample) -> f32 {
        let compressor = self.compressor;
        let resolved = compressor.resolved();

        // linked sidechain: one detector for both channels
        let input_max = input.peak();
        let attenuation = if input_max < DETECTOR_FLOOR {
            1.0
        } else {
            compressor.curve().eval(input_max) / input_max
        };

        let rate = if attenuation > self.detector_avg {
            let attenuation_db = (-linear_to_db(attenuation)).max(2.0);
            db_to_linear(attenuation_db * resolved.sat_release_samples_inv) - 1.0
        } else {
            1.0
        };
        self.detector_avg += (attenuation - self.detector_avg) * rate;
        self.detector_avg = self.detector_avg.min(1.0);

        if self.envelope_rate < 1.0 {
            self.comp_gain += (self.scaled_desired_gain - self.comp_gain) * self.envelope_rate;
        } else {
            self.comp_gain = (self.comp_gain * self.envelope_rate).min(1.0);
        }

        let premix_gain = (FRAC_PI_2 * self.comp_gain).sin();
        self.update_meter(linear_to_db(premix_gain), resolved.meter_release);

        resolved.dry + resolved.wet * compressor.master_gain() * premix_gain
    }

    /// Fall instantly, recover slowly
    #[inline]
    fn update_meter(&mut self, premix_gain_db: f32, meter_release: f32) {
        if premix_gain_db < self.meter_db {
            self.meter_db = premix_gain_db;
        } else {
            self.meter_db += (premix_gain_db - self.meter_db) * meter_release;
        }
    }
}

/// The very first chunk divides by a zero target gain. An infinite or NaN
/// difference is replaced by +/-1 dB so the attack maximum never latches at
/// infinity.
#[inline]
fn finite_comp_diff_db(db: f32) -> f32 {
    if db == f32::NEG_INFINITY {
        -1.0
    } else if db.is_finite() {
        db
    } else {
        1.0
    }
}
