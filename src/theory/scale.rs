use rust_music_theory::note::Notes;
use rust_music_theory::scale::Scale;
use std::collections::HashSet;
use thiserror::Error;

use crate::theory::note::{PitchClass, RootNote};

#[derive(Debug, Error)]
pub enum TheoryError {
    #[error("no scale data for '{0}'")]
    ScaleLookup(String),
}

/// The selectable scale types. The theory engine's database covers the
/// diatonic modes and the harmonic/melodic minors; the pentatonic and
/// blues scales are resolved from interval tables instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    Pentatonic,
    MinorPentatonic,
    Blues,
}

enum ScaleSource {
    Engine(&'static str),
    Intervals(&'static [i32]),
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 13] = [
        ScaleKind::Major,
        ScaleKind::Minor,
        ScaleKind::Dorian,
        ScaleKind::Phrygian,
        ScaleKind::Lydian,
        ScaleKind::Mixolydian,
        ScaleKind::Aeolian,
        ScaleKind::Locrian,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
        ScaleKind::Pentatonic,
        ScaleKind::MinorPentatonic,
        ScaleKind::Blues,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScaleKind::Major => "Major",
            ScaleKind::Minor => "Minor",
            ScaleKind::Dorian => "Dorian",
            ScaleKind::Phrygian => "Phrygian",
            ScaleKind::Lydian => "Lydian",
            ScaleKind::Mixolydian => "Mixolydian",
            ScaleKind::Aeolian => "Aeolian",
            ScaleKind::Locrian => "Locrian",
            ScaleKind::HarmonicMinor => "Harmonic Minor",
            ScaleKind::MelodicMinor => "Melodic Minor",
            ScaleKind::Pentatonic => "Pentatonic",
            ScaleKind::MinorPentatonic => "Minor Pentatonic",
            ScaleKind::Blues => "Blues",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::Minor => "minor",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Phrygian => "phrygian",
            ScaleKind::Lydian => "lydian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Aeolian => "aeolian",
            ScaleKind::Locrian => "locrian",
            ScaleKind::HarmonicMinor => "harmonic-minor",
            ScaleKind::MelodicMinor => "melodic-minor",
            ScaleKind::Pentatonic => "pentatonic",
            ScaleKind::MinorPentatonic => "minor-pentatonic",
            ScaleKind::Blues => "blues",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ScaleKind::ALL.iter().copied().find(|k| k.id() == id)
    }

    fn source(self) -> ScaleSource {
        match self {
            ScaleKind::Major => ScaleSource::Engine("major"),
            ScaleKind::Minor => ScaleSource::Engine("minor"),
            ScaleKind::Dorian => ScaleSource::Engine("dorian"),
            ScaleKind::Phrygian => ScaleSource::Engine("phrygian"),
            ScaleKind::Lydian => ScaleSource::Engine("lydian"),
            ScaleKind::Mixolydian => ScaleSource::Engine("mixolydian"),
            ScaleKind::Aeolian => ScaleSource::Engine("aeolian"),
            ScaleKind::Locrian => ScaleSource::Engine("locrian"),
            ScaleKind::HarmonicMinor => ScaleSource::Engine("harmonic minor"),
            ScaleKind::MelodicMinor => ScaleSource::Engine("melodic minor"),
            ScaleKind::Pentatonic => ScaleSource::Intervals(&[0, 2, 4, 7, 9]),
            ScaleKind::MinorPentatonic => ScaleSource::Intervals(&[0, 3, 5, 7, 10]),
            ScaleKind::Blues => ScaleSource::Intervals(&[0, 3, 5, 6, 7, 10]),
        }
    }
}

/// Resolve a root + scale kind into an ordered list of spellings, one per
/// distinct pitch class. Spellings for engine-backed kinds are whatever
/// the engine prefers; interval-table kinds use sharp/natural spellings.
pub fn resolve_scale(root: RootNote, kind: ScaleKind) -> Result<Vec<String>, TheoryError> {
    let spellings = match kind.source() {
        ScaleSource::Engine(query) => {
            let lookup = format!("{} {}", root.name(), query);
            let scale = Scale::from_regex(&lookup)
                .map_err(|_| TheoryError::ScaleLookup(lookup.clone()))?;
            let notes = scale.notes();
            if notes.is_empty() {
                return Err(TheoryError::ScaleLookup(lookup));
            }
            notes
                .iter()
                .map(|note| ascii_accidentals(&note.pitch.to_string()))
                .collect()
        }
        ScaleSource::Intervals(steps) => {
            let tonic = root.pitch_class();
            steps
                .iter()
                .map(|&step| tonic.transpose(step).sharp_name().to_string())
                .collect()
        }
    };

    Ok(dedup_pitch_classes(spellings))
}

fn ascii_accidentals(spelling: &str) -> String {
    spelling.replace('♯', "#").replace('♭', "b")
}

// The engine repeats the tonic at the octave; keep the first spelling
// seen for each identity so order is preserved.
fn dedup_pitch_classes(spellings: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(spellings.len());
    for spelling in spellings {
        if let Some(pc) = PitchClass::parse(&spelling) {
            if !seen.insert(pc) {
                continue;
            }
        }
        out.push(spelling);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(notes: &[String]) -> Vec<u8> {
        notes
            .iter()
            .map(|n| PitchClass::parse(n).expect("spelling should parse").index())
            .collect()
    }

    #[test]
    fn c_major_resolves_to_naturals() {
        let notes = resolve_scale(RootNote::C, ScaleKind::Major).unwrap();
        assert_eq!(notes, vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn a_aeolian_is_the_relative_minor() {
        let notes = resolve_scale(RootNote::A, ScaleKind::Aeolian).unwrap();
        assert_eq!(classes(&notes), vec![9, 11, 0, 2, 4, 5, 7]);
    }

    #[test]
    fn a_harmonic_minor_raises_the_seventh() {
        let notes = resolve_scale(RootNote::A, ScaleKind::HarmonicMinor).unwrap();
        assert_eq!(classes(&notes), vec![9, 11, 0, 2, 4, 5, 8]);
    }

    #[test]
    fn minor_pentatonic_from_the_table() {
        let notes = resolve_scale(RootNote::A, ScaleKind::MinorPentatonic).unwrap();
        assert_eq!(notes, vec!["A", "C", "D", "E", "G"]);
    }

    #[test]
    fn blues_adds_the_flat_five() {
        let notes = resolve_scale(RootNote::E, ScaleKind::Blues).unwrap();
        assert_eq!(notes, vec!["E", "G", "A", "A#", "B", "D"]);
    }

    #[test]
    fn resolved_scales_have_no_duplicate_classes() {
        for kind in ScaleKind::ALL {
            let notes = resolve_scale(RootNote::Fs, kind).unwrap();
            let mut ids = classes(&notes);
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), notes.len(), "{kind:?} repeats a class");
        }
    }

    #[test]
    fn scale_ids_round_trip() {
        for kind in ScaleKind::ALL {
            assert_eq!(ScaleKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ScaleKind::from_id("none"), None);
    }
}
