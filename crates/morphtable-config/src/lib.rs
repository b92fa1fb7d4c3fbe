//! Engine configuration for the morphtable synthesizer.
//!
//! Loads [`SynthConfig`] from TOML, checks every field against its accepted
//! range and converts it into the [`SynthSettings`](morphtable_core::SynthSettings)
//! the synth is built with. Waveform and wavetable contents are not stored
//! here; only engine settings are file-configurable.
//!
//! # Example
//!
//! ```rust
//! use morphtable_config::SynthConfig;
//!
//! let config = SynthConfig::from_toml_str("sample_rate = 48000").unwrap();
//! let settings = config.to_settings();
//! assert_eq!(settings.sample_rate, 48000);
//! assert_eq!(settings.channels, 2);
//! ```

mod config;
mod error;

/// Field range checks.
pub mod validation;

pub use config::SynthConfig;
pub use error::ConfigError;
pub use validation::{ValidationError, ValidationResult};
