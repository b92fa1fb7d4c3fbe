//! Output device discovery via cpal.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};
use morphtable_core::settings::DEFAULT_SAMPLE_RATE;

use crate::{Error, Result};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub default_channels: u16,
}

fn describe(device: &Device) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let (default_sample_rate, default_channels) = device
        .default_output_config()
        .map(|c| (c.sample_rate(), c.channels()))
        .unwrap_or((DEFAULT_SAMPLE_RATE, 2));
    Some(AudioDevice {
        name,
        default_sample_rate,
        default_channels,
    })
}

/// List all output devices of the default host.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(devices.filter_map(|d| describe(&d)).collect())
}

/// Get the default output device info, if any.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().as_ref().and_then(describe))
}

/// Find an output device by exact name, partial name, or index.
///
/// The `name_or_index` can be:
/// - A numeric index (e.g., "0", "1")
/// - An exact device name
/// - A partial device name (case-insensitive fuzzy match)
pub fn find_output_device(name_or_index: &str) -> Result<AudioDevice> {
    let host = cpal::default_host();
    let device = open_output_device(&host, Some(name_or_index))?;
    describe(&device).ok_or_else(|| Error::DeviceNotFound(name_or_index.to_string()))
}

/// Resolve a named output device, or the host default when `name` is `None`.
pub(crate) fn open_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    let Some(name_or_index) = name else {
        return host.default_output_device().ok_or(Error::NoDevice);
    };
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();
    find_device_from_list(&devices, name_or_index)
}

/// Pick a device by index, then exact name, then case-insensitive substring.
fn find_device_from_list(devices: &[Device], query: &str) -> Result<Device> {
    if let Ok(index) = query.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "index {index} (have {} output devices)",
                devices.len()
            ))
        });
    }

    let named: Vec<(&Device, String)> = devices
        .iter()
        .filter_map(|d| device_name(d).ok().map(|name| (d, name)))
        .collect();
    if let Some((device, _)) = named.iter().find(|(_, name)| name == query) {
        return Ok(Device::clone(device));
    }

    let needle = query.to_lowercase();
    let candidates: Vec<&(&Device, String)> = named
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::DeviceNotFound(format!(
            "no output device matching '{query}'"
        ))),
        [(device, _)] => Ok(Device::clone(device)),
        [(device, _), ..] => {
            let names: Vec<&str> = candidates.iter().map(|(_, n)| n.as_str()).collect();
            tracing::warn!(
                query,
                candidates = ?names,
                "several output devices match, using the first"
            );
            Ok(Device::clone(device))
        }
    }
}
