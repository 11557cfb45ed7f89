use serde::{Deserialize, Serialize};

/// One stereo frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StereoSample {
    pub l: f32,
    pub r: f32,
}

impl StereoSample {
    pub const SILENCE: StereoSample = StereoSample { l: 0.0, r: 0.0 };

    pub fn new(l: f32, r: f32) -> Self {
        Self { l, r }
    }

    /// Same value on both channels
    pub fn mono(v: f32) -> Self {
        Self { l: v, r: v }
    }

    /// Peak magnitude across both channels
    #[inline]
    pub fn peak(&self) -> f32 {
        self.l.abs().max(self.r.abs())
    }

    #[inline]
    pub fn scaled(&self, gain: f32) -> Self {
        Self {
            l: self.l * gain,
            r: self.r * gain,
        }
    }
}

/// A finite buffer of stereo audio
///
/// The sample count is the length of `samples`. Ownership of a `Sound` passes
/// to whoever holds it; processors borrow their input and hand back a freshly
/// allocated output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    /// Sample rate in Hz (e.g., 44100, 48000)
    pub rate: u32,
    pub samples: Vec<StereoSample>,
}

impl Sound {
    pub fn new(rate: u32, samples: Vec<StereoSample>) -> Self {
        Self { rate, samples }
    }

    /// `len` frames of digital silence
    pub fn silence(rate: u32, len: usize) -> Self {
        Self {
            rate,
            samples: vec![StereoSample::SILENCE; len],
        }
    }

    /// Build from interleaved LRLR... data. A trailing odd value is ignored.
    pub fn from_interleaved(rate: u32, frames: &[f32]) -> Self {
        let samples = frames
            .chunks_exact(2)
            .map(|pair| StereoSample::new(pair[0], pair[1]))
            .collect();
        Self { rate, samples }
    }

    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.samples.len() * 2);
        for s in &self.samples {
            out.push(s.l);
            out.push(s.r);
        }
        out
    }

    /// Number of stereo frames
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.rate as f64
    }

    /// Largest absolute value over both channels
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.peak()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_conversion() {
        let frames = vec![0.1, -0.2, 0.3, -0.4, 0.5];
        let sound = Sound::from_interleaved(48000, &frames);

        assert_eq!(sound.len(), 2);
        assert_eq!(sound.samples[1], StereoSample::new(0.3, -0.4));
        assert_eq!(sound.to_interleaved(), vec![0.1, -0.2, 0.3, -0.4]);
    }

    #[test]
    fn test_silence_and_duration() {
        let sound = Sound::silence(44100, 22050);
        assert_eq!(sound.len(), 22050);
        assert_eq!(sound.peak(), 0.0);
        assert!((sound.duration_secs() - 0.5).abs() < 1e-9);
        assert_eq!(Sound::silence(0, 10).duration_secs(), 0.0);
    }

    #[test]
    fn test_peak_uses_both_channels() {
        let sound = Sound::new(
            48000,
            vec![StereoSample::new(0.2, -0.7), StereoSample::new(-0.5, 0.1)],
        );
        assert_eq!(sound.peak(), 0.7);
        assert_eq!(StereoSample::new(-0.9, 0.3).peak(), 0.9);
    }

    #[test]
    fn test_scaled() {
        let s = StereoSample::new(0.5, -0.25).scaled(2.0);
        assert_eq!(s, StereoSample::new(1.0, -0.5));
    }
}
