pub mod convert;
pub mod dsp;
pub mod error;

pub use convert::*;
pub use dsp::*;
pub use error::CompressError;

pub use sndcomp_core::{
    CompressorParams, CompressorSettings, GainMeter, MeterMode, NoMeter, Sound, StereoSample,
};
