//! Multi-channel output buffer produced by a note-on.

/// Per-channel sample storage for one rendered note.
///
/// Channels are allocated once for the longest render the synth allows and
/// reused across notes; [`frames`](Self::frames) is the length of the current
/// render. The buffer is laid out in segments: segment `k` of every channel
/// covers samples `k * segment_len .. (k + 1) * segment_len`.
///
/// # Example
///
/// ```rust
/// use morphtable_core::SynthSettings;
/// use morphtable_synth::{NullSink, WaveTableSynth};
///
/// let mut synth = WaveTableSynth::new(SynthSettings::default(), NullSink);
/// let buffer = synth.render_note(Default::default()).unwrap();
/// assert_eq!(buffer.channel_count(), 2);
/// assert_eq!(buffer.frames(), 8 * 22050);
/// assert_eq!(buffer.interleaved().len(), 2 * 8 * 22050);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
    segment_len: usize,
    segment_count: usize,
}

impl RenderBuffer {
    /// Empty buffer with `channel_count` channels of `capacity` samples each.
    pub fn with_capacity(channel_count: usize, capacity: usize, sample_rate: u32) -> Self {
        Self {
            channels: vec![vec![0.0; capacity]; channel_count],
            sample_rate,
            segment_len: 0,
            segment_count: 0,
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel in the current render.
    pub fn frames(&self) -> usize {
        self.segment_len * self.segment_count
    }

    /// True before the first render.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Samples per channel the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Sample rate of the render.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples in one segment.
    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// Number of segments in the current render.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Length of the current render in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Rendered samples of channel `index`.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        let frames = self.frames();
        self.channels.get(index).map(|ch| &ch[..frames])
    }

    /// Iterate over every channel's rendered samples.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        let frames = self.frames();
        self.channels.iter().map(move |ch| &ch[..frames])
    }

    /// Samples of segment `segment` in channel `channel`.
    pub fn segment(&self, channel: usize, segment: usize) -> Option<&[f32]> {
        if segment >= self.segment_count {
            return None;
        }
        let start = segment * self.segment_len;
        self.channel(channel)
            .map(|ch| &ch[start..start + self.segment_len])
    }

    /// Frame-interleaved copy of the render (`c0, c1, .., c0, c1, ..`).
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let count = self.channels.len();
        let mut out = Vec::with_capacity(frames * count);
        for i in 0..frames {
            out.extend(self.channels.iter().map(|ch| ch[i]));
        }
        out
    }

    /// Mean of all channels per frame.
    pub fn to_mono(&self) -> Vec<f32> {
        let count = self.channels.len().max(1) as f32;
        (0..self.frames())
            .map(|i| self.channels.iter().map(|ch| ch[i]).sum::<f32>() / count)
            .collect()
    }

    /// Set the layout of the next render. `segment_len * segment_count` must
    /// fit within [`capacity`](Self::capacity).
    pub(crate) fn set_layout(&mut self, segment_len: usize, segment_count: usize) {
        debug_assert!(segment_len * segment_count <= self.capacity());
        self.segment_len = segment_len;
        self.segment_count = segment_count;
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_buffer() -> RenderBuffer {
        let mut buf = RenderBuffer::with_capacity(2, 8, 4);
        buf.set_layout(3, 2);
        for (c, ch) in buf.channels_mut().iter_mut().enumerate() {
            for (i, s) in ch.iter_mut().enumerate() {
                *s = (c * 10 + i) as f32;
            }
        }
        buf
    }

    #[test]
    fn layout_limits_visible_samples() {
        let buf = ramp_buffer();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.frames(), 6);
        assert_eq!(buf.channel(1).unwrap(), &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        assert!(buf.channel(2).is_none());
        assert_eq!(buf.duration_secs(), 1.5);
    }

    #[test]
    fn segments_split_channels() {
        let buf = ramp_buffer();
        assert_eq!(buf.segment(0, 1).unwrap(), &[3.0, 4.0, 5.0]);
        assert!(buf.segment(0, 2).is_none());
    }

    #[test]
    fn interleaving_and_mono() {
        let buf = ramp_buffer();
        let inter = buf.interleaved();
        assert_eq!(&inter[..4], &[0.0, 10.0, 1.0, 11.0]);
        assert_eq!(inter.len(), 12);
        assert_eq!(buf.to_mono()[0], 5.0);
    }

    #[test]
    fn fresh_buffer_is_empty() {
        let buf = RenderBuffer::with_capacity(2, 16, 44100);
        assert!(buf.is_empty());
        assert_eq!(buf.channels().count(), 2);
        assert!(buf.interleaved().is_empty());
    }
}
