//! Compressor - Dynamic range compression with soft knee, adaptive release and
//! predelay
//!
//! Works on a whole buffer at once in chunks of 32 samples. The envelope rate
//! is chosen once per chunk; detection and gain run per sample on a linked
//! (peak of both channels) sidechain. Trailing samples that do not fill a
//! chunk are dropped from the output.

use super::curve::CompressorCurve;
use super::delay_line::{predelay_len, DelayLine};
use super::envelope::GainEngine;
use super::knee::KneeShape;
use super::release_curve::ReleaseCurve;
use super::resolver::ResolvedParams;
use crate::error::{CompressError, Result};
use sndcomp_core::{
    CompressorParams, CompressorSettings, GainMeter, MeterMode, NoMeter, Sound, StereoSample,
};

/// Samples per envelope update
pub const CHUNK_SIZE: usize = 32;

/// Output length for an input of `len` samples: whole chunks only
pub fn output_len(len: usize) -> usize {
    (len / CHUNK_SIZE) * CHUNK_SIZE
}

/// Constants derived once from the parameters and sample rate
#[derive(Clone, Copy, Debug)]
pub struct Compressor {
    resolved: ResolvedParams,
    curve: CompressorCurve,
    master_gain: f32,
    release_curve: ReleaseCurve,
}

impl Compressor {
    pub fn new(rate: u32, params: &CompressorParams) -> Self {
        let resolved = ResolvedParams::new(rate, params);
        let curve = CompressorCurve::new(&resolved);
        let master_gain = curve.master_gain(resolved.postgain_db);
        let release_curve = ReleaseCurve::fit(resolved.release_samples, resolved.release_zones);

        Self {
            resolved,
            curve,
            master_gain,
            release_curve,
        }
    }

    pub fn resolved(&self) -> &ResolvedParams {
        &self.resolved
    }

    pub fn curve(&self) -> &CompressorCurve {
        &self.curve
    }

    pub fn knee(&self) -> Option<&KneeShape> {
        self.curve.knee()
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn release_curve(&self) -> &ReleaseCurve {
        &self.release_curve
    }

    /// Compress `sound` into a newly allocated buffer, reporting the gain
    /// meter at the given cadence
    pub fn process<M>(
        &self,
        sound: &Sound,
        predelay_secs: f32,
        meter: &mut M,
        meter_mode: MeterMode,
    ) -> Result<Sound>
    where
        M: GainMeter + ?Sized,
    {
        let mut delay = DelayLine::new(predelay_len(sound.rate, predelay_secs))
            .inspect_err(|e| tracing::warn!("Compressor setup failed: {}", e))?;

        let len = output_len(sound.len());
        let mut samples: Vec<StereoSample> = Vec::new();
        if samples.try_reserve_exact(len).is_err() {
            // delay line is dropped on return
            let err = CompressError::Allocation {
                what: "output buffer",
                len,
            };
            tracing::warn!("Compressor setup failed: {}", err);
            return Err(err);
        }

        tracing::debug!(
            rate = sound.rate,
            input_len = sound.len(),
            output_len = len,
            predelay_len = delay.len(),
            k = ?self.knee().map(|knee| knee.k),
            master_gain = self.master_gain,
            release = ?self.release_curve,
            "Compressing"
        );

        let mut engine = GainEngine::new(self);
        for chunk in sound.samples.chunks_exact(CHUNK_SIZE) {
            engine.begin_chunk();
            for &input in chunk {
                let delayed = delay.process(input);
                let gain = engine.next_gain(input);
                samples.push(delayed.scaled(gain));

                if meter_mode == MeterMode::PerSample {
                    meter.update(engine.meter_db());
                }
            }
            if meter_mode == MeterMode::PerChunk {
                meter.update(engine.meter_db());
            }
        }

        Ok(Sound::new(sound.rate, samples))
    }
}

/// Compress `sound` with `params`
///
/// Returns a new buffer at the same rate holding `floor(len / 32) * 32`
/// samples. Parameters are used as given, without range checks.
pub fn compress(sound: &Sound, params: &CompressorParams) -> Result<Sound> {
    compress_with_meter(sound, &CompressorSettings::from(*params), &mut NoMeter)
}

/// Same as [`compress`], also feeding the gain meter (dB) to `meter`
pub fn compress_with_meter<M>(
    sound: &Sound,
    settings: &CompressorSettings,
    meter: &mut M,
) -> Result<Sound>
where
    M: GainMeter + ?Sized,
{
    let params = &settings.params;
    Compressor::new(sound.rate, params).process(
        sound,
        params.predelay,
        meter,
        settings.meter_mode,
    )
}
