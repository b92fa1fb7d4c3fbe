//! Pitch model: semitone index plus octave/semitone detune.
//!
//! Semitones are counted the way a piano keyboard numbers its keys, with A4
//! at index 49 (C3 = 28, C4 = 40, C5 = 52). Frequency follows 12-TET:
//!
//! ```text
//! f = 440 * 2^((semitone + 12 * octave_detune + semitone_detune - 49) / 12)
//! ```

use core::fmt;

use crate::error::{ParamError, check_range};
use crate::settings::{
    OCTAVE_DETUNE_RANGE, PLAYABLE_SEMITONE_RANGE, REFERENCE_FREQUENCY, REFERENCE_SEMITONE,
    SEMITONE_DETUNE_RANGE, SEMITONE_RATIO,
};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Plain note-on record: `{semitone, octave_detune, semitone_detune}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteData {
    /// Semitone index (A4 = 49).
    pub semitone: i32,
    /// Octave offset applied on top of the semitone.
    pub octave_detune: i32,
    /// Semitone offset applied on top of the semitone.
    pub semitone_detune: i32,
}

/// A validated pitch.
///
/// All three fields are range-checked on write. Out-of-range writes are
/// rejected and the previous value is kept.
///
/// # Example
///
/// ```rust
/// use morphtable_core::Note;
///
/// let a4 = Note::from_name("A4").unwrap();
/// assert_eq!(a4.frequency(), 440.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    semitone: i32,
    octave_detune: i32,
    semitone_detune: i32,
}

impl Default for Note {
    fn default() -> Self {
        Self::reference()
    }
}

impl Note {
    /// The reference note, A4 with no detune.
    pub const fn reference() -> Self {
        Self {
            semitone: REFERENCE_SEMITONE,
            octave_detune: 0,
            semitone_detune: 0,
        }
    }

    /// Build a note at `semitone` with no detune.
    pub fn new(semitone: i32) -> Result<Self, ParamError> {
        let mut note = Self::reference();
        note.set_semitone(semitone)?;
        Ok(note)
    }

    /// Parse a note name such as `A4`, `C#3`, `Db5` or `F3sharp`.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        let invalid = || ParamError::InvalidNoteName(name.to_string());
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let mut pitch_class: i32 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (accidental, octave_str) = if let Some(r) = rest.strip_prefix('#') {
            (1, r)
        } else if let Some(r) = rest.strip_prefix('b') {
            (-1, r)
        } else if let Some(r) = rest.strip_suffix("sharp") {
            (1, r)
        } else {
            (0, rest)
        };
        pitch_class += accidental;

        let octave: i32 = octave_str.parse().map_err(|_| invalid())?;
        // C4 sits 9 semitones below A4 (index 49).
        Self::new(12 * octave + pitch_class - 8)
    }

    /// Semitone index.
    pub fn semitone(&self) -> i32 {
        self.semitone
    }

    /// Octave detune.
    pub fn octave_detune(&self) -> i32 {
        self.octave_detune
    }

    /// Semitone detune.
    pub fn semitone_detune(&self) -> i32 {
        self.semitone_detune
    }

    /// Set the semitone index. Rejected outside `[0, 87]`.
    pub fn set_semitone(&mut self, semitone: i32) -> Result<(), ParamError> {
        check_range("semitone", semitone.into(), widen(&PLAYABLE_SEMITONE_RANGE))?;
        self.semitone = semitone;
        Ok(())
    }

    /// Set the octave detune. Rejected outside `[-4, 4]`.
    pub fn set_octave_detune(&mut self, octave_detune: i32) -> Result<(), ParamError> {
        check_range(
            "octave_detune",
            octave_detune.into(),
            widen(&OCTAVE_DETUNE_RANGE),
        )?;
        self.octave_detune = octave_detune;
        Ok(())
    }

    /// Set the semitone detune. Rejected outside `[-12, 12]`.
    pub fn set_semitone_detune(&mut self, semitone_detune: i32) -> Result<(), ParamError> {
        check_range(
            "semitone_detune",
            semitone_detune.into(),
            widen(&SEMITONE_DETUNE_RANGE),
        )?;
        self.semitone_detune = semitone_detune;
        Ok(())
    }

    /// Apply every field of `data` through the validating setters.
    ///
    /// Each field is checked independently; valid fields are written even when
    /// another one is rejected. Returns the first rejection.
    pub fn set_data(&mut self, data: NoteData) -> Result<(), ParamError> {
        let semitone = self.set_semitone(data.semitone);
        let octave = self.set_octave_detune(data.octave_detune);
        let detune = self.set_semitone_detune(data.semitone_detune);
        semitone.and(octave).and(detune)
    }

    /// Copy out the plain record.
    pub fn data(&self) -> NoteData {
        NoteData {
            semitone: self.semitone,
            octave_detune: self.octave_detune,
            semitone_detune: self.semitone_detune,
        }
    }

    /// The same note with a different detune pair.
    ///
    /// Used by oscillators to derive the start/end pitch of a sweep.
    pub fn with_detune(&self, detune: Detune) -> Self {
        Self {
            semitone: self.semitone,
            octave_detune: detune.octave(),
            semitone_detune: detune.semitone(),
        }
    }

    /// Distance to the reference note in semitones, detune included.
    pub fn total_semitones(&self) -> i32 {
        self.semitone + 12 * self.octave_detune + self.semitone_detune - REFERENCE_SEMITONE
    }

    /// Frequency ratio relative to the reference note.
    pub fn relative_freq_factor(&self) -> f64 {
        SEMITONE_RATIO.powi(self.total_semitones())
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f32 {
        (f64::from(REFERENCE_FREQUENCY) * self.relative_freq_factor()) as f32
    }

    /// Scientific pitch name of the undetuned semitone, e.g. `A4`.
    pub fn note_name(&self) -> String {
        let from_c0 = self.semitone + 8;
        let octave = from_c0.div_euclid(12);
        let pitch_class = from_c0.rem_euclid(12) as usize;
        format!("{}{}", NOTE_NAMES[pitch_class], octave)
    }
}

impl TryFrom<NoteData> for Note {
    type Error = ParamError;

    fn try_from(data: NoteData) -> Result<Self, Self::Error> {
        let mut note = Self::reference();
        note.set_semitone(data.semitone)?;
        note.set_octave_detune(data.octave_detune)?;
        note.set_semitone_detune(data.semitone_detune)?;
        Ok(note)
    }
}

impl From<Note> for NoteData {
    fn from(note: Note) -> Self {
        note.data()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} Hz)", self.note_name(), self.frequency())
    }
}

/// An octave + semitone offset, relative to whichever note is played.
///
/// Waveforms carry one detune for the start of their sweep and one for the
/// end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Detune {
    octave: i32,
    semitone: i32,
}

impl Detune {
    /// No offset.
    pub const ZERO: Self = Self {
        octave: 0,
        semitone: 0,
    };

    /// Build a validated detune pair.
    pub fn new(octave: i32, semitone: i32) -> Result<Self, ParamError> {
        let mut detune = Self::ZERO;
        detune.set_octave(octave)?;
        detune.set_semitone(semitone)?;
        Ok(detune)
    }

    /// Octave offset.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Semitone offset.
    pub fn semitone(&self) -> i32 {
        self.semitone
    }

    /// Set the octave offset. Rejected outside `[-4, 4]`.
    pub fn set_octave(&mut self, octave: i32) -> Result<(), ParamError> {
        check_range("octave_detune", octave.into(), widen(&OCTAVE_DETUNE_RANGE))?;
        self.octave = octave;
        Ok(())
    }

    /// Set the semitone offset. Rejected outside `[-12, 12]`.
    pub fn set_semitone(&mut self, semitone: i32) -> Result<(), ParamError> {
        check_range(
            "semitone_detune",
            semitone.into(),
            widen(&SEMITONE_DETUNE_RANGE),
        )?;
        self.semitone = semitone;
        Ok(())
    }

    /// Total offset in semitones.
    pub fn total_semitones(&self) -> i32 {
        12 * self.octave + self.semitone
    }

    /// Frequency multiplier this detune applies, `2^(total / 12)`.
    pub fn freq_factor(&self) -> f64 {
        SEMITONE_RATIO.powi(self.total_semitones())
    }
}

fn widen(range: &core::ops::RangeInclusive<i32>) -> core::ops::RangeInclusive<i64> {
    i64::from(*range.start())..=i64::from(*range.end())
}
