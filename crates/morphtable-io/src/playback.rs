//! Live playback of rendered notes via cpal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, Stream};
use morphtable_synth::{PlaybackSink, RenderBuffer};

use crate::stream::{device_name, open_output_device};
use crate::{Error, Result, playable_frames};

/// Interleave the first `frames` frames of `buffer` for a device with
/// `device_channels` channels, scaled by `gain`.
///
/// Matching layouts are copied through. A mono device gets the mean of all
/// channels, a mono render is copied to every device channel, and otherwise
/// device channels past the render's are filled with silence.
pub fn map_channels(
    buffer: &RenderBuffer,
    device_channels: usize,
    gain: f32,
    frames: usize,
) -> Vec<f32> {
    let frames = frames.min(buffer.frames());
    let channels: Vec<&[f32]> = buffer.channels().collect();
    let source = channels.len();
    let mut out = Vec::with_capacity(frames * device_channels);

    for i in 0..frames {
        if device_channels == 1 && source > 1 {
            let sum: f32 = channels.iter().map(|ch| ch[i]).sum();
            out.push(sum / source as f32 * gain);
            continue;
        }
        for c in 0..device_channels {
            let sample = match source {
                0 => 0.0,
                1 => channels[0][i],
                _ => channels.get(c).map_or(0.0, |ch| ch[i]),
            };
            out.push(sample * gain);
        }
    }
    out
}

/// Sink that plays each note once on an output device.
///
/// A new submission stops whatever is still sounding and starts the new
/// note, matching the synth's one-note-at-a-time model.
pub struct CpalSink {
    device: Device,
    channels: u16,
    stream: Option<Stream>,
    finished: Arc<AtomicBool>,
}

impl CpalSink {
    /// Sink on the named device (index, exact or partial name), or the
    /// default output device when `device` is `None`.
    pub fn new(device: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        let device = open_output_device(&host, device)?;
        let channels = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?
            .channels();
        tracing::debug!(
            device = %device_name(&device).unwrap_or_default(),
            channels,
            "opened output device"
        );
        Ok(Self {
            device,
            channels,
            stream: None,
            finished: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Sink on the default output device.
    pub fn default_device() -> Result<Self> {
        Self::new(None)
    }

    /// Name of the output device.
    pub fn device_name(&self) -> String {
        device_name(&self.device).unwrap_or_default()
    }

    /// True while a submitted note is still sounding.
    pub fn is_playing(&self) -> bool {
        self.stream.is_some() && !self.finished.load(Ordering::SeqCst)
    }

    /// Block until the current note has finished, or `timeout` elapses.
    ///
    /// Returns `true` if playback finished.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while self.is_playing() {
            if std::time::Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        true
    }

    /// Stop playback immediately.
    pub fn stop(&mut self) {
        self.stream = None;
        self.finished.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for CpalSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalSink")
            .field("device", &self.device_name())
            .field("channels", &self.channels)
            .field("playing", &self.is_playing())
            .finish()
    }
}

impl PlaybackSink for CpalSink {
    type Error = Error;

    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<()> {
        self.stop();

        let frames = playable_frames(buffer, sample_rate, duration_secs);
        let samples = map_channels(buffer, usize::from(self.channels), gain, frames);
        let config = cpal::StreamConfig {
            channels: self.channels,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let finished = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&finished);
        let mut position = 0usize;
        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for out in data.iter_mut() {
                        *out = samples.get(position).copied().unwrap_or(0.0);
                        position += 1;
                    }
                    if position >= samples.len() {
                        done.store(true, Ordering::SeqCst);
                    }
                },
                |err| tracing::error!(%err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::debug!(frames, sample_rate, gain, "playing note");

        self.finished = finished;
        self.stream = Some(stream);
        Ok(())
    }
}
