use thiserror::Error;

/// Errors raised while loading or checking compressor settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse compressor settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("parameter `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("release zones must be increasing: {0:?}")]
    ReleaseZonesNotIncreasing([f32; 4]),
}
