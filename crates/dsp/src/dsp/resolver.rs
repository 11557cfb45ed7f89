use crate::convert::db_to_linear;
use sndcomp_core::CompressorParams;

/// Saturating release time of the detector, in seconds
pub const SAT_RELEASE_SECS: f32 = 0.0025;

/// Falloff time of the gain meter, in seconds
pub const METER_FALLOFF_SECS: f32 = 0.325;

/// Parameters converted from human units (dB, seconds) into the linear and
/// per-sample values the compressor runs on. Computed once per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedParams {
    pub threshold_db: f32,
    pub knee_db: f32,
    pub linear_threshold: f32,
    /// Inverse ratio
    pub slope: f32,
    pub attack_samples: f32,
    pub attack_samples_inv: f32,
    pub release_samples: f32,
    pub sat_release_samples_inv: f32,
    pub release_zones: [f32; 4],
    pub postgain_db: f32,
    pub wet: f32,
    pub dry: f32,
    /// Per-sample smoothing factor for the meter's slow fall
    pub meter_release: f32,
}

impl ResolvedParams {
    /// No validation: out-of-range params resolve to whatever the arithmetic
    /// gives (e.g. `ratio = 0` yields an infinite slope).
    pub fn new(rate: u32, params: &CompressorParams) -> Self {
        let rate = rate as f32;
        let attack_samples = rate * params.attack;

        Self {
            threshold_db: params.threshold,
            knee_db: params.knee,
            linear_threshold: db_to_linear(params.threshold),
            slope: 1.0 / params.ratio,
            attack_samples,
            attack_samples_inv: 1.0 / attack_samples,
            release_samples: rate * params.release,
            sat_release_samples_inv: 1.0 / (rate * SAT_RELEASE_SECS),
            release_zones: params.release_zones(),
            postgain_db: params.postgain,
            wet: params.wet,
            dry: 1.0 - params.wet,
            meter_release: 1.0 - (-1.0 / (rate * METER_FALLOFF_SECS)).exp(),
        }
    }
}
