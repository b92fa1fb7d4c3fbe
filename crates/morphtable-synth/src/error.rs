//! Render and note-on errors.

use morphtable_core::ParamError;
use thiserror::Error;

/// A fill request that could not be honoured. Nothing is written when one of
/// these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Destination (or internal scratch) buffer shorter than the request.
    #[error("{buffer} buffer holds {available} samples, {required} required")]
    BufferTooSmall {
        /// Which buffer was too small.
        buffer: &'static str,
        /// Samples needed to satisfy the request.
        required: usize,
        /// Samples actually available.
        available: usize,
    },

    /// `end` precedes `start`.
    #[error("invalid sample range {start}..{end}")]
    InvalidRange {
        /// First index of the request.
        start: usize,
        /// One past the last index of the request.
        end: usize,
    },
}

/// Failure of a note-on request.
///
/// Render state is left as it was before the call for [`SynthError::InvalidNote`];
/// for [`SynthError::Sink`] the freshly rendered buffer stays available.
#[derive(Debug, Error)]
pub enum SynthError<E> {
    /// The requested note failed validation.
    #[error("invalid note: {0}")]
    InvalidNote(#[from] ParamError),

    /// Rendering could not complete.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// The playback sink rejected the buffer.
    #[error("playback sink error: {0}")]
    Sink(E),
}

/// Validate a `start..end` request against a buffer length.
///
/// Logs a warning on rejection.
pub(crate) fn check_fill(
    buffer: &'static str,
    len: usize,
    start: usize,
    end: usize,
) -> Result<usize, RenderError> {
    if end < start {
        tracing::warn!(buffer, start, end, "skipping fill: invalid range");
        return Err(RenderError::InvalidRange { start, end });
    }
    if len < end {
        tracing::warn!(
            buffer,
            required = end,
            available = len,
            "skipping fill: buffer too small"
        );
        return Err(RenderError::BufferTooSmall {
            buffer,
            required: end,
            available: len,
        });
    }
    Ok(end - start)
}
