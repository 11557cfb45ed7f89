/// Observer for the compressor's gain meter
///
/// Receives the smoothed gain in dB (0 dB = no reduction, negative values are
/// reduction). Purely diagnostic: nothing a meter does can change the audio.
pub trait GainMeter {
    fn update(&mut self, gain_db: f32);
}

/// Meter that discards every reading
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMeter;

impl GainMeter for NoMeter {
    #[inline]
    fn update(&mut self, _gain_db: f32) {}
}

impl<F> GainMeter for F
where
    F: FnMut(f32),
{
    #[inline]
    fn update(&mut self, gain_db: f32) {
        self(gain_db)
    }
}
