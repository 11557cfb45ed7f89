//! DSP (Digital Signal Processing) modules
//!
//! The compressor, split by stage:
//! - Resolver: parameters in dB/seconds to linear and per-sample constants
//! - Knee: soft-knee shape search
//! - Curve: static compression curve and full-scale makeup gain
//! - Release curve: cubic fit of the adaptive release time
//! - Delay line: predelay ring buffer for the dry signal
//! - Envelope: per-chunk envelope rate and per-sample detector/gain

pub mod compressor;
pub mod curve;
pub mod delay_line;
pub mod envelope;
pub mod knee;
pub mod release_curve;
pub mod resolver;

// Re-export commonly used types for convenience
pub use compressor::{compress, compress_with_meter, output_len, Compressor, CHUNK_SIZE};
pub use curve::CompressorCurve;
pub use delay_line::{predelay_len, DelayLine};
pub use envelope::{EnvelopeMode, GainEngine};
pub use knee::KneeShape;
pub use release_curve::ReleaseCurve;
pub use resolver::ResolvedParams;
