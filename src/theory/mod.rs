pub mod accidentals;
pub mod fretboard;
pub mod note;
pub mod scale;

pub use accidentals::{apply_preference, AccidentalPreference};
pub use fretboard::{
    scale_highlights, Highlight, HighlightKind, OpenString, DEFAULT_FRET_COUNT, STANDARD_TUNING,
    STRING_COUNT,
};
pub use note::{PitchClass, RootNote};
pub use scale::{resolve_scale, ScaleKind, TheoryError};
