use std::collections::HashSet;

use crate::theory::accidentals::{apply_preference, AccidentalPreference};
use crate::theory::note::{PitchClass, RootNote};
use crate::theory::scale::{resolve_scale, ScaleKind, TheoryError};

pub const STRING_COUNT: usize = 6;
pub const DEFAULT_FRET_COUNT: usize = 12;

/// An open string: display name and MIDI note of the unfretted pitch.
#[derive(Debug, Clone, Copy)]
pub struct OpenString {
    pub name: &'static str,
    pub midi: u8,
}

/// Standard tuning, low E to high E. String index 0 is the low E string.
pub const STANDARD_TUNING: [OpenString; STRING_COUNT] = [
    OpenString { name: "E2", midi: 40 },
    OpenString { name: "A2", midi: 45 },
    OpenString { name: "D3", midi: 50 },
    OpenString { name: "G3", midi: 55 },
    OpenString { name: "B3", midi: 59 },
    OpenString { name: "E4", midi: 64 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Root,
    Scale,
}

/// A highlighted fretboard cell with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub string_index: usize,
    pub fret: usize,
    pub label: String,
    pub kind: HighlightKind,
}

/// Sounding pitch class at a fretted position: the open string transposed
/// up by one semitone per fret. Fixed for the lifetime of the app.
pub fn sounding_pitch_class(open: OpenString, fret: usize) -> PitchClass {
    PitchClass::from_midi(open.midi as u32 + fret as u32)
}

/// The full selection-to-highlights pipeline. Pure: same inputs always
/// yield the same vector. A `None` scale is the "cleared" state.
pub fn scale_highlights(
    root: RootNote,
    scale: Option<ScaleKind>,
    preference: AccidentalPreference,
    fret_count: usize,
) -> Result<Vec<Highlight>, TheoryError> {
    let Some(kind) = scale else {
        return Ok(Vec::new());
    };

    let notes = resolve_scale(root, kind)?;
    let notes = apply_preference(&notes, preference);
    Ok(map_to_fretboard(&notes, root.pitch_class(), fret_count, &STANDARD_TUNING))
}

/// Walk the grid string-major, fret-minor and emit a highlight for every
/// cell whose pitch-class identity is in the scale. Enharmonic spellings
/// collapse onto one identity, so a sharp-spelled scale note matches a
/// flat-spelled fret and vice versa.
pub fn map_to_fretboard(
    notes: &[String],
    root: PitchClass,
    fret_count: usize,
    tuning: &[OpenString],
) -> Vec<Highlight> {
    let spelled: Vec<(PitchClass, &str)> = notes
        .iter()
        .filter_map(|n| PitchClass::parse(n).map(|pc| (pc, n.as_str())))
        .collect();
    let in_scale: HashSet<PitchClass> = spelled.iter().map(|(pc, _)| *pc).collect();

    let mut highlights = Vec::new();
    for (string_index, open) in tuning.iter().enumerate() {
        for fret in 0..=fret_count {
            let pc = sounding_pitch_class(*open, fret);
            if !in_scale.contains(&pc) {
                continue;
            }

            // First scale spelling with this identity; fall back to the
            // cell's own sharp/natural spelling if none matches.
            let label = spelled
                .iter()
                .find(|(spc, _)| *spc == pc)
                .map(|(_, s)| (*s).to_string())
                .unwrap_or_else(|| pc.sharp_name().to_string());

            let kind = if pc == root {
                HighlightKind::Root
            } else {
                HighlightKind::Scale
            };

            highlights.push(Highlight {
                string_index,
                fret,
                label,
                kind,
            });
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_major_board() -> Vec<Highlight> {
        scale_highlights(
            RootNote::C,
            Some(ScaleKind::Major),
            AccidentalPreference::EngineDefault,
            DEFAULT_FRET_COUNT,
        )
        .unwrap()
    }

    #[test]
    fn cleared_scale_maps_to_nothing() {
        let highlights = scale_highlights(
            RootNote::C,
            None,
            AccidentalPreference::Flats,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        assert!(highlights.is_empty());
    }

    #[test]
    fn c_major_low_e_string_positions() {
        // C major on the low E string: E F G A B C D E at frets
        // 0 1 3 5 7 8 10 12.
        let frets: Vec<usize> = c_major_board()
            .iter()
            .filter(|h| h.string_index == 0)
            .map(|h| h.fret)
            .collect();
        assert_eq!(frets, vec![0, 1, 3, 5, 7, 8, 10, 12]);
    }

    #[test]
    fn c_major_is_complete_per_string() {
        // 7 distinct classes over frets 0..12 plus the fret-12 repeat of
        // the open class: 8 highlights on every string, 48 in all.
        let highlights = c_major_board();
        assert_eq!(highlights.len(), 48);
        for string_index in 0..STRING_COUNT {
            let per_string = highlights
                .iter()
                .filter(|h| h.string_index == string_index)
                .count();
            assert_eq!(per_string, 8, "string {string_index}");
        }
    }

    #[test]
    fn every_in_scale_cell_is_emitted() {
        let highlights = c_major_board();
        let notes = resolve_scale(RootNote::C, ScaleKind::Major).unwrap();
        let in_scale: Vec<PitchClass> = notes
            .iter()
            .map(|n| PitchClass::parse(n).unwrap())
            .collect();

        for (string_index, open) in STANDARD_TUNING.iter().enumerate() {
            for fret in 0..=DEFAULT_FRET_COUNT {
                let expected = in_scale.contains(&sounding_pitch_class(*open, fret));
                let emitted = highlights
                    .iter()
                    .any(|h| h.string_index == string_index && h.fret == fret);
                assert_eq!(expected, emitted, "string {string_index} fret {fret}");
            }
        }
    }

    #[test]
    fn labels_are_members_of_the_scale() {
        let highlights = c_major_board();
        let notes = resolve_scale(RootNote::C, ScaleKind::Major).unwrap();
        let in_scale: HashSet<PitchClass> = notes
            .iter()
            .filter_map(|n| PitchClass::parse(n))
            .collect();

        for highlight in &highlights {
            let pc = PitchClass::parse(&highlight.label).unwrap();
            assert!(in_scale.contains(&pc), "label {}", highlight.label);
        }
    }

    #[test]
    fn root_cells_and_only_root_cells_are_marked() {
        let root = RootNote::C.pitch_class();
        let mut root_cells = 0;
        for highlight in c_major_board() {
            let open = STANDARD_TUNING[highlight.string_index];
            let pc = sounding_pitch_class(open, highlight.fret);
            assert_eq!(highlight.kind == HighlightKind::Root, pc == root);
            if highlight.kind == HighlightKind::Root {
                root_cells += 1;
            }
        }
        // One C per string within frets 0..12, none of the open strings
        // being C itself.
        assert_eq!(root_cells, 6);
    }

    #[test]
    fn mapping_is_deterministic() {
        assert_eq!(c_major_board(), c_major_board());

        let a = scale_highlights(
            RootNote::Fs,
            Some(ScaleKind::Blues),
            AccidentalPreference::Flats,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        let b = scale_highlights(
            RootNote::Fs,
            Some(ScaleKind::Blues),
            AccidentalPreference::Flats,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn enharmonic_scale_notes_match_sharp_spelled_frets() {
        // Spell the scale with flats; frets computed from MIDI still match
        // through the shared identity, and labels follow the flat spelling.
        let highlights = scale_highlights(
            RootNote::A,
            Some(ScaleKind::MinorPentatonic),
            AccidentalPreference::Flats,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        assert!(!highlights.is_empty());

        let flat_board = scale_highlights(
            RootNote::Ds,
            Some(ScaleKind::MinorPentatonic),
            AccidentalPreference::Flats,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        let sharp_board = scale_highlights(
            RootNote::Ds,
            Some(ScaleKind::MinorPentatonic),
            AccidentalPreference::Sharps,
            DEFAULT_FRET_COUNT,
        )
        .unwrap();
        // Same cells either way; only spellings differ.
        let cells = |board: &[Highlight]| -> Vec<(usize, usize)> {
            board.iter().map(|h| (h.string_index, h.fret)).collect()
        };
        assert_eq!(cells(&flat_board), cells(&sharp_board));
        assert!(flat_board.iter().any(|h| h.label == "Eb"));
        assert!(sharp_board.iter().any(|h| h.label == "D#"));
    }

    #[test]
    fn unparseable_spellings_are_ignored() {
        // A garbage entry contributes nothing to the identity set.
        let notes = vec!["C".to_string(), "X".to_string()];
        let highlights = map_to_fretboard(
            &notes,
            PitchClass::parse("C").unwrap(),
            3,
            &[OpenString { name: "C4", midi: 60 }],
        );
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].fret, 0);
        assert_eq!(highlights[0].label, "C");
        assert_eq!(highlights[0].kind, HighlightKind::Root);
    }

    #[test]
    fn fret_zero_only_board() {
        let highlights = scale_highlights(
            RootNote::E,
            Some(ScaleKind::Minor),
            AccidentalPreference::EngineDefault,
            0,
        )
        .unwrap();
        // Open strings E A D G B E are all E-minor tones.
        assert_eq!(highlights.len(), STRING_COUNT);
        assert!(highlights.iter().all(|h| h.fret == 0));
    }
}
