use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Compressor parameters
///
/// Human-facing units: dB for levels, seconds for times. Every field has a
/// recommended range, but the compressor does not enforce any of them; call
/// [`CompressorParams::validate`] first if the values come from somewhere
/// untrusted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorParams {
    /// [-100, 0] dB
    pub threshold: f32,
    /// [0, 40] dB
    pub knee: f32,
    /// [1, 20]
    pub ratio: f32,
    /// [0, 1] seconds
    pub attack: f32,
    /// [0, 1] seconds
    pub release: f32,
    /// seconds
    pub predelay: f32,
    // release zones range from 0 to 1, increasing
    pub releasezone1: f32,
    pub releasezone2: f32,
    pub releasezone3: f32,
    pub releasezone4: f32,
    /// dB
    pub postgain: f32,
    /// [0, 1]
    pub wet: f32,
}

impl CompressorParams {
    pub const DEFAULT: CompressorParams = CompressorParams {
        threshold: -24.0,
        knee: 30.0,
        ratio: 12.0,
        attack: 0.003,
        release: 0.25,
        predelay: 0.006,
        releasezone1: 0.09,
        releasezone2: 0.16,
        releasezone3: 0.42,
        releasezone4: 0.98,
        postgain: 0.0,
        wet: 1.0,
    };

    /// Parse parameters from a TOML document. Missing keys take their
    /// default values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let params: CompressorParams = toml::from_str(input)?;
        tracing::debug!("Loaded compressor params: {:?}", params);
        Ok(params)
    }

    pub fn release_zones(&self) -> [f32; 4] {
        [
            self.releasezone1,
            self.releasezone2,
            self.releasezone3,
            self.releasezone4,
        ]
    }

    /// Check every field against its recommended range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, f32); 12] = [
            ("threshold", self.threshold),
            ("knee", self.knee),
            ("ratio", self.ratio),
            ("attack", self.attack),
            ("release", self.release),
            ("predelay", self.predelay),
            ("releasezone1", self.releasezone1),
            ("releasezone2", self.releasezone2),
            ("releasezone3", self.releasezone3),
            ("releasezone4", self.releasezone4),
            ("postgain", self.postgain),
            ("wet", self.wet),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        check_range("threshold", self.threshold, -100.0, 0.0)?;
        check_range("knee", self.knee, 0.0, 40.0)?;
        check_range("ratio", self.ratio, 1.0, 20.0)?;
        check_range("attack", self.attack, 0.0, 1.0)?;
        check_range("release", self.release, 0.0, 1.0)?;
        check_range("predelay", self.predelay, 0.0, 1.0)?;
        check_range("wet", self.wet, 0.0, 1.0)?;

        let zones = self.release_zones();
        for (i, zone) in zones.iter().enumerate() {
            check_range(ZONE_NAMES[i], *zone, 0.0, 1.0)?;
        }
        if zones.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::ReleaseZonesNotIncreasing(zones));
        }
        Ok(())
    }
}

const ZONE_NAMES: [&str; 4] = ["releasezone1", "releasezone2", "releasezone3", "releasezone4"];

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How often the gain meter is reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterMode {
    /// Once after every 32-sample chunk
    #[default]
    PerChunk,
    /// After every sample
    PerSample,
}

/// Parameters plus meter cadence for one compressor run
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorSettings {
    pub params: CompressorParams,
    pub meter_mode: MeterMode,
}

impl CompressorSettings {
    pub fn new(params: CompressorParams, meter_mode: MeterMode) -> Self {
        Self { params, meter_mode }
    }

    /// Parse settings from TOML, e.g.
    ///
    /// ```toml
    /// meter_mode = "per_sample"
    ///
    /// [params]
    /// ratio = 4.0
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let settings: CompressorSettings = toml::from_str(input)?;
        tracing::debug!("Loaded compressor settings: {:?}", settings);
        Ok(settings)
    }
}

impl From<CompressorParams> for CompressorSettings {
    fn from(params: CompressorParams) -> Self {
        Self {
            params,
            meter_mode: MeterMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = CompressorParams::default();
        assert_eq!(params.threshold, -24.0);
        assert_eq!(params.knee, 30.0);
        assert_eq!(params.ratio, 12.0);
        assert_eq!(params.attack, 0.003);
        assert_eq!(params.release, 0.25);
        assert_eq!(params.predelay, 0.006);
        assert_eq!(params.release_zones(), [0.09, 0.16, 0.42, 0.98]);
        assert_eq!(params.postgain, 0.0);
        assert_eq!(params.wet, 1.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let params = CompressorParams::from_toml_str("ratio = 4.0\nwet = 0.5\n").unwrap();
        assert_eq!(params.ratio, 4.0);
        assert_eq!(params.wet, 0.5);
        assert_eq!(params.threshold, -24.0);
        assert_eq!(params.releasezone4, 0.98);
    }

    #[test]
    fn test_settings_toml() {
        let settings = CompressorSettings::from_toml_str(
            "meter_mode = \"per_sample\"\n[params]\nknee = 0.0\n",
        )
        .unwrap();
        assert_eq!(settings.meter_mode, MeterMode::PerSample);
        assert_eq!(settings.params.knee, 0.0);
        assert_eq!(settings.params.ratio, 12.0);

        let settings = CompressorSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CompressorSettings::default());
        assert_eq!(settings.meter_mode, MeterMode::PerChunk);
    }

    #[test]
    fn test_bad_toml() {
        let err = CompressorParams::from_toml_str("ratio = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = CompressorParams {
            ratio: 0.0,
            ..Default::default()
        };
        match params.validate() {
            Err(ConfigError::OutOfRange { name, .. }) => assert_eq!(name, "ratio"),
            other => panic!("unexpected: {:?}", other),
        }

        let params = CompressorParams {
            knee: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NotFinite { name: "knee", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unordered_zones() {
        let params = CompressorParams {
            releasezone2: 0.5,
            releasezone3: 0.4,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::ReleaseZonesNotIncreasing(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_field_names() {
        let json = serde_json::to_value(CompressorParams::DEFAULT).unwrap();
        assert_eq!(json["releasezone1"], serde_json::json!(0.09f32));
        assert_eq!(json["postgain"], serde_json::json!(0.0));
    }
}
