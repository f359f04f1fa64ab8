use bevy::prelude::*;
use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use crate::file::config::AppConfig;
use std::path::{ Path, PathBuf };
use crate::states::StartupLatch;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    #[serde(with = "srgb_float")]
    pub background: Color,
    #[serde(with = "srgb_float")]
    pub panel: Color,
    #[serde(with = "srgb_float")]
    pub text_primary: Color,
    #[serde(with = "srgb_float")]
    pub text_muted: Color,
    #[serde(with = "srgb_float")]
    pub string_line: Color,
    #[serde(with = "srgb_float")]
    pub fret_wire: Color,
    #[serde(with = "srgb_float")]
    pub nut: Color,
    #[serde(with = "srgb_float")]
    pub note_root: Color,
    #[serde(with = "srgb_float")]
    pub note_scale: Color,
    #[serde(with = "srgb_float")]
    pub note_label: Color,
    #[serde(with = "srgb_float")]
    pub note_preview: Color,
    #[serde(with = "srgb_float")]
    pub button: Color,
    #[serde(with = "srgb_float")]
    pub button_hover: Color,
    #[serde(with = "srgb_float")]
    pub button_press: Color,
    #[serde(with = "srgb_float")]
    pub button_text: Color,
}

#[derive(Debug, Deserialize, Serialize, Resource)]
pub struct Themes {
    pub themes: HashMap<String, Theme>,
}

impl Themes {
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }
}

pub fn setup_theme(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut latch: ResMut<StartupLatch>
) {
    let theme_path = PathBuf::from(&config.saves.directory).join(&config.saves.theme_file);

    if !Path::new(&theme_path).exists() {
        warn!("Theme file not found at '{}', creating default theme file...", theme_path.display());
        let default_themes = create_default_themes();
        let yaml = serde_yaml
            ::to_string(&default_themes)
            .expect("Failed to serialize default themes");
        fs::write(&theme_path, yaml).expect("Failed to write default theme file");
    }

    let content = fs
        ::read_to_string(&theme_path)
        .unwrap_or_else(|_| panic!("Failed to read theme file at: {}", theme_path.display()));

    let parsed: Themes = serde_yaml
        ::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse theme YAML: {e}"));

    commands.insert_resource(parsed);
    latch.theme_loaded = true;
}

fn create_default_themes() -> Themes {
    let mut themes = HashMap::new();

    themes.insert("default".to_string(), Theme {
        background: Color::srgb(0.1098, 0.1137, 0.1294), // #1c1d21
        panel: Color::srgb(0.1608, 0.1255, 0.0902), // #292017
        text_primary: Color::srgb(0.9098, 0.8941, 0.8627), // #e8e4dc
        text_muted: Color::srgb(0.6078, 0.5804, 0.5294), // #9b9487
        string_line: Color::srgb(0.7373, 0.7137, 0.6392), // #bcb6a3
        fret_wire: Color::srgb(0.4039, 0.3725, 0.3176), // #675f51
        nut: Color::srgb(0.8510, 0.8157, 0.7294), // #d9d0ba
        note_root: Color::srgb(0.9569, 0.5255, 0.2118), // #f48636
        note_scale: Color::srgb(0.3647, 0.6510, 0.6235), // #5da69f
        note_label: Color::srgb(0.0863, 0.0863, 0.0784), // #161614
        note_preview: Color::srgb(0.5412, 0.5294, 0.4941), // #8a877e
        button: Color::srgb(0.2078, 0.2157, 0.2431), // #35373e
        button_hover: Color::srgb(0.2980, 0.3098, 0.3490), // #4c4f59
        button_press: Color::srgb(0.1647, 0.1725, 0.1961), // #2a2c32
        button_text: Color::srgb(0.9098, 0.8941, 0.8627), // #e8e4dc
    });

    Themes { themes }
}

mod srgb_float {
    use bevy::prelude::Color;
    use serde::de::{ Deserializer };
    use serde::ser::{ SerializeSeq, Serializer };
    use serde::{ Deserialize };

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let srgba = color.to_srgba();
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&srgba.red)?;
        seq.serialize_element(&srgba.green)?;
        seq.serialize_element(&srgba.blue)?;
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
        where D: Deserializer<'de>
    {
        let rgb: [f32; 3] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Color::srgb(rgb[0], rgb[1], rgb[2]))
    }
}
