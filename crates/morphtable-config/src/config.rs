//! Engine configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use morphtable_core::settings::{
    DEFAULT_CHANNELS, DEFAULT_OUTPUT_GAIN, DEFAULT_SAMPLE_RATE, DEFAULT_WAVEFORM_COUNT,
    DEFAULT_WAVEFORM_DURATION_SECS,
};
use morphtable_core::{Note, SynthSettings};

use crate::error::ConfigError;
use crate::validation::{
    CHANNEL_RANGE, MAX_RENDER_SAMPLES, MAX_WAVEFORM_DURATION_SECS, SAMPLE_RATE_RANGE,
    ValidationError, WAVEFORM_COUNT_RANGE, check_range,
};

/// Engine configuration.
///
/// Every field is optional in the file and falls back to the built-in
/// default.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 44100
/// channels = 2
/// waveform_duration_secs = 0.5
/// max_waveform_count = 8
/// output_gain = 0.7
/// default_note = "C3"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of output channels.
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Length of one rendered waveform segment, in seconds.
    #[serde(default = "default_waveform_duration_secs")]
    pub waveform_duration_secs: f32,

    /// Upper bound for a wavetable's segment count.
    #[serde(default = "default_max_waveform_count")]
    pub max_waveform_count: usize,

    /// Gain applied by the playback sink.
    #[serde(default = "default_output_gain")]
    pub output_gain: f32,

    /// Note played when none is given, e.g. `"C3"`.
    #[serde(default = "default_note")]
    pub default_note: String,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

fn default_waveform_duration_secs() -> f32 {
    DEFAULT_WAVEFORM_DURATION_SECS
}

fn default_max_waveform_count() -> usize {
    DEFAULT_WAVEFORM_COUNT
}

fn default_output_gain() -> f32 {
    DEFAULT_OUTPUT_GAIN
}

fn default_note() -> String {
    "C3".to_string()
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            waveform_duration_secs: default_waveform_duration_secs(),
            max_waveform_count: default_max_waveform_count(),
            output_gain: default_output_gain(),
            default_note: default_note(),
        }
    }
}

impl SynthConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))?;
        Ok(())
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range(
            "sample_rate",
            self.sample_rate,
            SAMPLE_RATE_RANGE.0,
            SAMPLE_RATE_RANGE.1,
        )?;
        check_range("channels", self.channels, CHANNEL_RANGE.0, CHANNEL_RANGE.1)?;
        if self.waveform_duration_secs.is_nan() || self.waveform_duration_secs <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: "waveform_duration_secs",
                value: f64::from(self.waveform_duration_secs),
            });
        }
        check_range(
            "waveform_duration_secs",
            self.waveform_duration_secs,
            0.0f32,
            MAX_WAVEFORM_DURATION_SECS,
        )?;
        check_range(
            "max_waveform_count",
            self.max_waveform_count as f64,
            WAVEFORM_COUNT_RANGE.0 as f64,
            WAVEFORM_COUNT_RANGE.1 as f64,
        )?;
        check_range("output_gain", self.output_gain, 0.0f32, 1.0f32)?;
        let samples = self
            .to_settings()
            .max_output_len()
            .saturating_mul(usize::from(self.channels));
        if samples > MAX_RENDER_SAMPLES {
            return Err(ValidationError::RenderTooLarge {
                samples,
                max: MAX_RENDER_SAMPLES,
            });
        }
        self.note()?;
        Ok(())
    }

    /// The configured default note.
    pub fn note(&self) -> Result<Note, ValidationError> {
        Note::from_name(&self.default_note).map_err(|_| ValidationError::InvalidNote {
            field: "default_note",
            value: self.default_note.clone(),
        })
    }

    /// Runtime render settings.
    pub fn to_settings(&self) -> SynthSettings {
        SynthSettings {
            sample_rate: self.sample_rate,
            channels: self.channels,
            waveform_duration_secs: self.waveform_duration_secs,
            max_waveform_count: self.max_waveform_count,
            output_gain: self.output_gain,
        }
    }
}

impl From<&SynthConfig> for SynthSettings {
    fn from(config: &SynthConfig) -> Self {
        config.to_settings()
    }
}
