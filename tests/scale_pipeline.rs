use std::collections::HashSet;

use fretboard_app::theory::{
    apply_preference, resolve_scale, scale_highlights, AccidentalPreference, HighlightKind,
    PitchClass, RootNote, ScaleKind, DEFAULT_FRET_COUNT, STANDARD_TUNING, STRING_COUNT,
};

#[test]
fn c_major_matches_the_reference_board() {
    // C major on the low E string: E F G A B C D E at frets
    // 0 1 3 5 7 8 10 12, with C root-colored.
    let highlights = scale_highlights(
        RootNote::C,
        Some(ScaleKind::Major),
        AccidentalPreference::EngineDefault,
        DEFAULT_FRET_COUNT,
    )
    .unwrap();

    let low_e: Vec<(usize, &str, HighlightKind)> = highlights
        .iter()
        .filter(|h| h.string_index == 0)
        .map(|h| (h.fret, h.label.as_str(), h.kind))
        .collect();

    assert_eq!(
        low_e,
        vec![
            (0, "E", HighlightKind::Scale),
            (1, "F", HighlightKind::Scale),
            (3, "G", HighlightKind::Scale),
            (5, "A", HighlightKind::Scale),
            (7, "B", HighlightKind::Scale),
            (8, "C", HighlightKind::Root),
            (10, "D", HighlightKind::Scale),
            (12, "E", HighlightKind::Scale),
        ]
    );
}

#[test]
fn every_root_and_kind_resolves_and_maps() {
    for root in RootNote::ALL {
        for kind in ScaleKind::ALL {
            for preference in AccidentalPreference::ALL {
                let highlights =
                    scale_highlights(root, Some(kind), preference, DEFAULT_FRET_COUNT)
                        .unwrap_or_else(|e| panic!("{} {}: {e}", root.name(), kind.id()));
                assert!(
                    !highlights.is_empty(),
                    "{} {} produced an empty board",
                    root.name(),
                    kind.id()
                );

                // Soundness: every label is a member of the converted set.
                let notes = apply_preference(&resolve_scale(root, kind).unwrap(), preference);
                let in_scale: HashSet<PitchClass> =
                    notes.iter().filter_map(|n| PitchClass::parse(n)).collect();
                for highlight in &highlights {
                    let pc = PitchClass::parse(&highlight.label).unwrap();
                    assert!(in_scale.contains(&pc));
                    assert_eq!(
                        highlight.kind == HighlightKind::Root,
                        pc == root.pitch_class()
                    );
                }
            }
        }
    }
}

#[test]
fn reselecting_the_same_triple_is_idempotent() {
    let select = || {
        scale_highlights(
            RootNote::Gs,
            Some(ScaleKind::Dorian),
            AccidentalPreference::Sharps,
            DEFAULT_FRET_COUNT,
        )
        .unwrap()
    };
    assert_eq!(select(), select());
}

#[test]
fn accidental_preference_changes_spelling_not_cells() {
    let boards: Vec<_> = AccidentalPreference::ALL
        .iter()
        .map(|&preference| {
            scale_highlights(
                RootNote::As,
                Some(ScaleKind::Minor),
                preference,
                DEFAULT_FRET_COUNT,
            )
            .unwrap()
        })
        .collect();

    let cells = |board: &[fretboard_app::theory::Highlight]| -> Vec<(usize, usize)> {
        board.iter().map(|h| (h.string_index, h.fret)).collect()
    };
    for board in &boards[1..] {
        assert_eq!(cells(&boards[0]), cells(board));
    }

    // Same sounding pitch position by position, whatever the spelling.
    for (a, b) in boards[1].iter().zip(&boards[2]) {
        assert_eq!(PitchClass::parse(&a.label), PitchClass::parse(&b.label));
    }
}

#[test]
fn cleared_scale_is_empty_for_any_root_and_preference() {
    for root in RootNote::ALL {
        for preference in AccidentalPreference::ALL {
            let highlights =
                scale_highlights(root, None, preference, DEFAULT_FRET_COUNT).unwrap();
            assert!(highlights.is_empty());
        }
    }
}

#[test]
fn boards_stay_inside_the_grid() {
    let highlights = scale_highlights(
        RootNote::B,
        Some(ScaleKind::Locrian),
        AccidentalPreference::Flats,
        DEFAULT_FRET_COUNT,
    )
    .unwrap();
    for highlight in &highlights {
        assert!(highlight.string_index < STRING_COUNT);
        assert!(highlight.fret <= DEFAULT_FRET_COUNT);
    }
    assert_eq!(STANDARD_TUNING.len(), STRING_COUNT);
}
