//! Soft knee - exponential transition between the linear region and the
//! ratio region of the compression curve
//!
//! The curve is anchored at the linear threshold with unit slope there and
//! approaches `threshold + 1/k` asymptotically. `k` is chosen so that the
//! slope at the top of the knee matches the compressor's `1/ratio`.

use crate::convert::{db_to_linear, linear_to_db};

const K_MIN: f32 = 0.1;
const K_MAX: f32 = 10000.0;
const K_INITIAL: f32 = 5.0;
const SEARCH_ITERATIONS: usize = 15;

/// Knee curve value at linear amplitude `x`
#[inline]
pub fn knee_curve(x: f32, k: f32, linear_threshold: f32) -> f32 {
    linear_threshold + (1.0 - (-k * (x - linear_threshold)).exp()) / k
}

/// Local slope of the knee curve at `x`, in dB per dB
#[inline]
pub fn knee_slope(x: f32, k: f32, linear_threshold: f32) -> f32 {
    k * x / ((k * linear_threshold + 1.0) * (k * (x - linear_threshold)).exp() - 1.0)
}

/// Solved knee shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KneeShape {
    pub k: f32,
    /// Curve output at the top of the knee, in dB
    pub db_offset: f32,
    /// Top of the knee as a linear amplitude
    pub linear_threshold_knee: f32,
}

impl KneeShape {
    /// Search for `k` by log-space bisection. Always runs the full 15 steps.
    ///
    /// Returns `None` when there is no knee (`knee_db <= 0`), in which case
    /// the curve is a hard threshold.
    pub fn solve(threshold_db: f32, knee_db: f32, slope: f32) -> Option<Self> {
        if knee_db <= 0.0 {
            return None;
        }

        let linear_threshold = db_to_linear(threshold_db);
        let xknee = db_to_linear(threshold_db + knee_db);

        let mut k = K_INITIAL;
        let mut min_k = K_MIN;
        let mut max_k = K_MAX;
        for _ in 0..SEARCH_ITERATIONS {
            if knee_slope(xknee, k, linear_threshold) < slope {
                max_k = k;
            } else {
                min_k = k;
            }
            k = (min_k * max_k).sqrt();
        }

        Some(Self {
            k,
            db_offset: linear_to_db(knee_curve(xknee, k, linear_threshold)),
            linear_threshold_knee: xknee,
        })
    }
}
