//! Playback sink abstraction.
//!
//! The synth renders synchronously and hands the finished buffer to a sink.
//! Submission is fire-and-forget: the synth does not wait for playback to end
//! and cannot cancel a buffer once submitted.

use core::convert::Infallible;

use crate::buffer::RenderBuffer;

/// Destination for rendered notes.
pub trait PlaybackSink {
    /// Error reported when a submission fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Accept a rendered buffer for playback.
    ///
    /// `duration_secs` is the playable length of `buffer`; `gain` is applied
    /// by the sink on output.
    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<(), Self::Error>;
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for &mut S {
    type Error = S::Error;

    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<(), Self::Error> {
        (**self).submit(buffer, sample_rate, gain, duration_secs)
    }
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for Box<S> {
    type Error = S::Error;

    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<(), Self::Error> {
        (**self).submit(buffer, sample_rate, gain, duration_secs)
    }
}

/// Sink that discards every buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PlaybackSink for NullSink {
    type Error = Infallible;

    fn submit(&mut self, _: &RenderBuffer, _: u32, _: f32, _: f32) -> Result<(), Infallible> {
        Ok(())
    }
}

/// One captured call to [`PlaybackSink::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Copy of the submitted buffer.
    pub buffer: RenderBuffer,
    /// Sample rate passed with it.
    pub sample_rate: u32,
    /// Gain passed with it.
    pub gain: f32,
    /// Duration passed with it.
    pub duration_secs: f32,
}

/// Sink that keeps a copy of everything submitted.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    submissions: Vec<Submission>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, oldest first.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Most recent submission.
    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }

    /// Drop all recorded submissions.
    pub fn clear(&mut self) {
        self.submissions.clear();
    }
}

impl PlaybackSink for RecordingSink {
    type Error = Infallible;

    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<(), Infallible> {
        self.submissions.push(Submission {
            buffer: buffer.clone(),
            sample_rate,
            gain,
            duration_secs,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_submissions() {
        let mut sink = RecordingSink::new();
        let buf = RenderBuffer::with_capacity(1, 4, 8000);
        sink.submit(&buf, 8000, 0.5, 0.0).unwrap();
        (&mut sink).submit(&buf, 8000, 0.7, 1.0).unwrap();
        assert_eq!(sink.submissions().len(), 2);
        assert_eq!(sink.last().unwrap().gain, 0.7);
        sink.clear();
        assert!(sink.last().is_none());
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<RecordingSink> = Box::default();
        let buf = RenderBuffer::with_capacity(2, 4, 44100);
        sink.submit(&buf, 44100, 0.7, 4.0).unwrap();
        assert_eq!(sink.submissions()[0].duration_secs, 4.0);
    }
}
