use super::knee::{knee_curve, KneeShape};
use super::resolver::ResolvedParams;
use crate::convert::{db_to_linear, linear_to_db};

/// Empirical exponent for the full-scale makeup gain
const MASTER_GAIN_EXPONENT: f32 = 0.6;

/// Static compression curve: instantaneous input level to output level
///
/// Identity below the threshold, then either the soft knee followed by the
/// ratio region, or (without a knee) the ratio region straight away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressorCurve {
    threshold_db: f32,
    knee_db: f32,
    linear_threshold: f32,
    slope: f32,
    knee: Option<KneeShape>,
}

impl CompressorCurve {
    pub fn new(resolved: &ResolvedParams) -> Self {
        Self {
            threshold_db: resolved.threshold_db,
            knee_db: resolved.knee_db,
            linear_threshold: resolved.linear_threshold,
            slope: resolved.slope,
            knee: KneeShape::solve(resolved.threshold_db, resolved.knee_db, resolved.slope),
        }
    }

    /// The solved knee, if the curve has one
    pub fn knee(&self) -> Option<&KneeShape> {
        self.knee.as_ref()
    }

    /// Output amplitude for a linear input amplitude `x >= 0`
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        if x < self.linear_threshold {
            return x;
        }
        match &self.knee {
            None => db_to_linear(self.threshold_db + self.slope * (linear_to_db(x) - self.threshold_db)),
            Some(knee) if x < knee.linear_threshold_knee => knee_curve(x, knee.k, self.linear_threshold),
            Some(knee) => db_to_linear(
                knee.db_offset + self.slope * (linear_to_db(x) - self.threshold_db - self.knee_db),
            ),
        }
    }

    /// Same curve with input and output in dB
    pub fn eval_db(&self, db: f32) -> f32 {
        linear_to_db(self.eval(db_to_linear(db)))
    }

    /// Makeup gain compensating the curve's reduction at full scale, with the
    /// post gain folded in
    pub fn master_gain(&self, postgain_db: f32) -> f32 {
        let full_level = self.eval(1.0);
        db_to_linear(postgain_db) * (1.0 / full_level).powf(MASTER_GAIN_EXPONENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sndcomp_core::CompressorParams;

    fn curve_for(params: &CompressorParams) -> CompressorCurve {
        CompressorCurve::new(&ResolvedParams::new(44100, params))
    }

    #[test]
    fn test_identity_below_threshold() {
        let curve = curve_for(&CompressorParams::DEFAULT);
        for x in [0.0, 0.001, 0.03, 0.063] {
            assert_eq!(curve.eval(x), x);
        }
    }

    #[test]
    fn test_curve_is_continuous_at_knee_top() {
        let curve = curve_for(&CompressorParams::DEFAULT);
        let top = curve.knee().unwrap().linear_threshold_knee;
        let below = curve.eval(top * 0.9999);
        let above = curve.eval(top);
        assert!((below - above).abs() < 1e-3, "{} vs {}", below, above);
    }

    #[test]
    fn test_curve_is_monotonic_and_compressive() {
        let curve = curve_for(&CompressorParams::DEFAULT);
        let mut last = 0.0;
        for i in 1..=200 {
            let x = i as f32 / 100.0;
            let y = curve.eval(x);
            assert!(y >= last, "not monotonic at {}", x);
            assert!(y <= x + 1e-6);
            last = y;
        }
    }

    #[test]
    fn test_ratio_region_slope() {
        let curve = curve_for(&CompressorParams::DEFAULT);
        // above threshold + knee every 12 dB in gives 1 dB out
        let a = curve.eval_db(12.0);
        let b = curve.eval_db(24.0);
        assert!((b - a - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_hard_knee() {
        let params = CompressorParams {
            threshold: -20.0,
            knee: 0.0,
            ratio: 4.0,
            ..Default::default()
        };
        let curve = curve_for(&params);
        assert!(curve.knee().is_none());
        // 20 dB over the threshold comes out 5 dB over
        assert!((curve.eval_db(0.0) + 15.0).abs() < 1e-3);
        assert!((curve.eval_db(-20.0) + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_master_gain() {
        let curve = curve_for(&CompressorParams::DEFAULT);
        let full = curve.eval(1.0);
        assert!((full - 0.4953).abs() < 1e-3);

        let gain = curve.master_gain(0.0);
        assert!((gain - 1.5244).abs() < 1e-3);
        assert!((gain * full - full.powf(0.4)).abs() < 1e-5);

        let boosted = curve.master_gain(6.0);
        assert!((boosted / gain - db_to_linear(6.0)).abs() < 1e-5);
    }
}
