//! Level conversions shared by every compressor stage

/// Convert dB to linear gain
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(0.05 * db)
}

/// Convert linear gain to dB. Zero maps to negative infinity.
#[inline]
pub fn linear_to_db(lin: f32) -> f32 {
    20.0 * lin.log10()
}
