//! Two-endpoint wavetable with a configurable number of morph steps.

use morphtable_core::ParamError;
use morphtable_core::error::{check_index, check_range};
use morphtable_core::settings::{DEFAULT_WAVEFORM_COUNT, MAIN_WAVEFORM_COUNT};

use crate::waveform::{SingleWaveform, SingleWaveformData};

/// Plain wavetable record.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTableData {
    /// Records for the first and last waveform.
    pub main_waveforms: [SingleWaveformData; MAIN_WAVEFORM_COUNT],
    /// Number of segments a note is rendered with.
    pub total_waveforms_count: usize,
}

impl Default for WaveTableData {
    fn default() -> Self {
        WaveTable::default().data()
    }
}

/// The morph path of a note: a first and a last [`SingleWaveform`] and the
/// number of segments rendered between them.
///
/// Slot `0` is the first waveform, slot `1` the last. Both slots always hold
/// a waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    main_waveforms: [SingleWaveform; MAIN_WAVEFORM_COUNT],
    total_waveforms_count: usize,
    max_waveform_count: usize,
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveTable {
    /// Table of two default waveforms with the default segment count.
    pub fn new() -> Self {
        Self::with_max_waveform_count(DEFAULT_WAVEFORM_COUNT)
    }

    /// Table whose segment count may range over `1..=max_waveform_count`.
    ///
    /// The count starts at the maximum. A zero maximum is raised to one.
    pub fn with_max_waveform_count(max_waveform_count: usize) -> Self {
        let max_waveform_count = max_waveform_count.max(1);
        Self {
            main_waveforms: Default::default(),
            total_waveforms_count: max_waveform_count,
            max_waveform_count,
        }
    }

    /// Both main waveforms, first then last.
    pub fn main_waveforms(&self) -> &[SingleWaveform; MAIN_WAVEFORM_COUNT] {
        &self.main_waveforms
    }

    /// Waveform in slot `index`, or `None` (with a warning) past the last slot.
    pub fn main_waveform(&self, index: usize) -> Option<&SingleWaveform> {
        check_index("main_waveforms", index, MAIN_WAVEFORM_COUNT).ok()?;
        self.main_waveforms.get(index)
    }

    /// Mutable waveform in slot `index`.
    pub fn main_waveform_mut(&mut self, index: usize) -> Option<&mut SingleWaveform> {
        check_index("main_waveforms", index, MAIN_WAVEFORM_COUNT).ok()?;
        self.main_waveforms.get_mut(index)
    }

    /// Replace the waveform in slot `index`. Rejected past the last slot.
    pub fn set_main_waveform(
        &mut self,
        index: usize,
        waveform: SingleWaveform,
    ) -> Result<(), ParamError> {
        check_index("main_waveforms", index, MAIN_WAVEFORM_COUNT)?;
        self.main_waveforms[index] = waveform;
        Ok(())
    }

    /// The waveform a note starts on.
    pub fn first_main_waveform(&self) -> &SingleWaveform {
        &self.main_waveforms[0]
    }

    /// The waveform a note morphs toward.
    pub fn last_main_waveform(&self) -> &SingleWaveform {
        &self.main_waveforms[MAIN_WAVEFORM_COUNT - 1]
    }

    /// Number of rendered segments.
    pub fn total_waveforms_count(&self) -> usize {
        self.total_waveforms_count
    }

    /// Upper bound for [`set_total_waveforms_count`](Self::set_total_waveforms_count).
    pub fn max_waveform_count(&self) -> usize {
        self.max_waveform_count
    }

    /// Set the segment count. Rejected outside `[1, max_waveform_count]`.
    pub fn set_total_waveforms_count(&mut self, count: usize) -> Result<(), ParamError> {
        check_range(
            "total_waveforms_count",
            i64::try_from(count).unwrap_or(i64::MAX),
            1..=i64::try_from(self.max_waveform_count).unwrap_or(i64::MAX),
        )?;
        self.total_waveforms_count = count;
        Ok(())
    }

    /// Copy out the plain record.
    pub fn data(&self) -> WaveTableData {
        WaveTableData {
            main_waveforms: [self.main_waveforms[0].data(), self.main_waveforms[1].data()],
            total_waveforms_count: self.total_waveforms_count,
        }
    }

    /// Apply a record through the validating setters.
    ///
    /// Each waveform and the count are applied independently. Returns the
    /// first rejection.
    pub fn set_data(&mut self, data: &WaveTableData) -> Result<(), ParamError> {
        let first = self.main_waveforms[0].set_data(&data.main_waveforms[0]);
        let last = self.main_waveforms[1].set_data(&data.main_waveforms[1]);
        let count = self.set_total_waveforms_count(data.total_waveforms_count);
        first.and(last).and(count)
    }
}
