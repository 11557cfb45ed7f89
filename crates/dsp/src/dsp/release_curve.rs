/// Adaptive release curve
///
/// Cubic through the four release zones placed at x = 0, 1, 2, 3, giving a
/// release time in samples for how far the gain is from its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseCurve {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl ReleaseCurve {
    /// Solve `y = a*x^3 + b*x^2 + c*x + d` through
    /// `(0, y1), (1, y2), (2, y3), (3, y4)` with `yi = release_samples * zone_i`.
    pub fn fit(release_samples: f32, zones: [f32; 4]) -> Self {
        let [y1, y2, y3, y4] = zones.map(|zone| release_samples * zone);
        Self {
            a: (-y1 + 3.0 * y2 - 3.0 * y3 + y4) / 6.0,
            b: y1 - 2.5 * y2 + 2.0 * y3 - 0.5 * y4,
            c: (-11.0 * y1 + 18.0 * y2 - 9.0 * y3 + 2.0 * y4) / 6.0,
            d: y1,
        }
    }

    /// Release time in samples at `x` (normally within [0, 3])
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        let x2 = x * x;
        self.a * x2 * x + self.b * x2 + self.c * x + self.d
    }
}
