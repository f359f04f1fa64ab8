use crate::theory::note::PitchClass;

/// How accidentals are spelled in note labels. `EngineDefault` leaves the
/// resolver's spellings untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccidentalPreference {
    EngineDefault,
    Sharps,
    Flats,
}

impl Default for AccidentalPreference {
    fn default() -> Self {
        AccidentalPreference::EngineDefault
    }
}

impl AccidentalPreference {
    pub const ALL: [AccidentalPreference; 3] = [
        AccidentalPreference::EngineDefault,
        AccidentalPreference::Sharps,
        AccidentalPreference::Flats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccidentalPreference::EngineDefault => "Default",
            AccidentalPreference::Sharps => "Sharps",
            AccidentalPreference::Flats => "Flats",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            AccidentalPreference::EngineDefault => "default",
            AccidentalPreference::Sharps => "sharps",
            AccidentalPreference::Flats => "flats",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        AccidentalPreference::ALL.iter().copied().find(|p| p.id() == id)
    }
}

/// Remap each spelling independently; length and order are preserved.
pub fn apply_preference(notes: &[String], preference: AccidentalPreference) -> Vec<String> {
    match preference {
        AccidentalPreference::EngineDefault => notes.to_vec(),
        AccidentalPreference::Sharps => notes.iter().map(|n| to_sharp(n)).collect(),
        AccidentalPreference::Flats => notes.iter().map(|n| to_flat(n)).collect(),
    }
}

// Canonical sharp/natural form via the pitch-class identity, so flat and
// redundant spellings (Db, E#) both land on the table entry.
fn to_sharp(spelling: &str) -> String {
    match PitchClass::parse(spelling) {
        Some(pc) => pc.sharp_name().to_string(),
        None => spelling.to_string(),
    }
}

// Direct substitution, then the redundant naturals. Spellings outside the
// table pass through unchanged.
fn to_flat(spelling: &str) -> String {
    match spelling {
        "C#" => "Db",
        "D#" => "Eb",
        "F#" => "Gb",
        "G#" => "Ab",
        "A#" => "Bb",
        "E#" => "F",
        "B#" => "C",
        "Cb" => "B",
        "Fb" => "E",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(notes: &[&str]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn default_is_a_passthrough() {
        let notes = strings(&["C", "Eb", "F#"]);
        assert_eq!(
            apply_preference(&notes, AccidentalPreference::EngineDefault),
            notes
        );
    }

    #[test]
    fn sharps_simplify_flat_spellings() {
        let notes = strings(&["Db", "Eb", "Gb", "Ab", "Bb", "F", "E#"]);
        assert_eq!(
            apply_preference(&notes, AccidentalPreference::Sharps),
            strings(&["C#", "D#", "F#", "G#", "A#", "F", "F"])
        );
    }

    #[test]
    fn flats_follow_the_substitution_table() {
        let notes = strings(&["C#", "D#", "F#", "G#", "A#"]);
        assert_eq!(
            apply_preference(&notes, AccidentalPreference::Flats),
            strings(&["Db", "Eb", "Gb", "Ab", "Bb"])
        );
    }

    #[test]
    fn flats_special_case_redundant_naturals() {
        let notes = strings(&["E#", "B#", "Cb", "Fb"]);
        assert_eq!(
            apply_preference(&notes, AccidentalPreference::Flats),
            strings(&["F", "C", "B", "E"])
        );
    }

    #[test]
    fn flats_leave_naturals_and_flats_alone() {
        let notes = strings(&["C", "D", "Gb", "B"]);
        assert_eq!(
            apply_preference(&notes, AccidentalPreference::Flats),
            notes
        );
    }

    #[test]
    fn conversion_preserves_pitch_class_identity() {
        let notes = strings(&["C", "Db", "D#", "E", "F#", "Ab", "Bb", "B#"]);
        for preference in AccidentalPreference::ALL {
            let converted = apply_preference(&notes, preference);
            assert_eq!(converted.len(), notes.len());
            for (before, after) in notes.iter().zip(&converted) {
                assert_eq!(
                    PitchClass::parse(before),
                    PitchClass::parse(after),
                    "{before} -> {after} changed identity"
                );
            }
        }
    }
}
