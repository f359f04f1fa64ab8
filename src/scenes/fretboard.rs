use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::ui::UiTargetCamera;

use crate::components::FretboardFeed;
use crate::file::settings::Settings;
use crate::file::Theme;
use crate::scenes::MainCamera;
use crate::theory::{
    scale_highlights, AccidentalPreference, RootNote, ScaleKind,
};
use crate::widgets::{
    ButtonStyle, GenericButton, Selectable, SelectableButton, SelectableStyle, SelectableType,
    SelectedEvent, UiBorder, UiContext,
};

const PAGE_PADDING_PX: f32 = 24.0;
const CONTROL_LABEL_WIDTH_PX: f32 = 96.0;
const CONTROL_FONT_SIZE: f32 = 14.0;
const TITLE_FONT_SIZE: f32 = 32.0;
const SUBTITLE_FONT_SIZE: f32 = 16.0;

const SCALE_NONE_ID: &str = "scale:none";

/// The page's only mutable state: what the user currently has selected.
/// The recompute system turns this into a fresh highlight set through the
/// pure theory pipeline.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FretboardSelection {
    pub root: RootNote,
    pub scale: Option<ScaleKind>,
    pub accidentals: AccidentalPreference,
}

impl Default for FretboardSelection {
    fn default() -> Self {
        Self {
            root: RootNote::C,
            scale: None,
            accidentals: AccidentalPreference::EngineDefault,
        }
    }
}

#[derive(Component)]
pub struct FretboardPage;

/// The grid view spawns the string/fret cells under this node.
#[derive(Component)]
pub struct GridHost;

#[derive(Component)]
pub struct ScaleSelectorGroup;

pub fn setup_fretboard_page(
    mut commands: Commands,
    ctx: UiContext,
    main_camera: Res<MainCamera>,
) {
    let theme = ctx
        .themes
        .get(ctx.settings.start_theme.as_str())
        .expect("Start theme not found")
        .clone();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(PAGE_PADDING_PX)),
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(theme.background),
            UiTargetCamera(main_camera.ui_camera),
            FretboardPage,
        ))
        .with_children(|page| {
            page.spawn((
                Text::new("Fretboard"),
                TextFont {
                    font_size: TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(theme.text_primary),
            ));
            page.spawn((
                Text::new("Explore scales on the neck. Hover a fret to preview its note."),
                TextFont {
                    font_size: SUBTITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(theme.text_muted),
            ));

            spawn_control_row(page, &theme, "Root", &root_buttons(), &vec![0], false);
            spawn_control_row(page, &theme, "Scale", &scale_buttons(), &vec![0], true);
            spawn_control_row(page, &theme, "Accidentals", &accidental_buttons(), &vec![0], false);

            page.spawn(Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(10.0),
                margin: UiRect {
                    left: Val::Px(CONTROL_LABEL_WIDTH_PX),
                    ..default()
                },
                ..default()
            })
            .with_children(|row| {
                let clear_entity = GenericButton::builder("Clear")
                    .style(standalone_button_style(&theme))
                    .spawn(row);
                row.commands()
                    .entity(clear_entity)
                    .observe(on_clear_clicked);

                let toggle = vec![SelectableButton {
                    id: "view:names".to_string(),
                    label: "Note names".to_string(),
                }];
                Selectable::builder(SelectableType::Checkbox, &toggle, &vec![])
                    .style(selector_style(&theme))
                    .spawn(row);
            });

            page.spawn((
                Node {
                    width: Val::Percent(100.0),
                    margin: UiRect {
                        top: Val::Px(10.0),
                        ..default()
                    },
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                GridHost,
            ));
        });
}

pub fn teardown_fretboard_page(
    mut commands: Commands,
    pages: Query<Entity, With<FretboardPage>>,
) {
    for entity in &pages {
        commands.entity(entity).despawn();
    }
}

fn spawn_control_row(
    page: &mut ChildSpawnerCommands,
    theme: &Theme,
    label: &str,
    buttons: &Vec<SelectableButton>,
    default_selected: &Vec<usize>,
    is_scale_group: bool,
) {
    page.spawn(Node {
        width: Val::Percent(100.0),
        flex_direction: FlexDirection::Row,
        align_items: AlignItems::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((
            Text::new(label),
            TextFont {
                font_size: CONTROL_FONT_SIZE,
                ..default()
            },
            TextColor(theme.text_muted),
            Node {
                width: Val::Px(CONTROL_LABEL_WIDTH_PX),
                ..default()
            },
        ));

        let group_entity = Selectable::builder(SelectableType::Radio, buttons, default_selected)
            .style(selector_style(theme))
            .spawn(row);
        if is_scale_group {
            row.commands().entity(group_entity).insert(ScaleSelectorGroup);
        }
    });
}

fn root_buttons() -> Vec<SelectableButton> {
    RootNote::ALL
        .iter()
        .map(|root| SelectableButton {
            id: format!("root:{}", root.name()),
            label: root.name().to_string(),
        })
        .collect()
}

fn scale_buttons() -> Vec<SelectableButton> {
    let mut buttons = vec![SelectableButton {
        id: SCALE_NONE_ID.to_string(),
        label: "None".to_string(),
    }];
    buttons.extend(ScaleKind::ALL.iter().map(|kind| SelectableButton {
        id: format!("scale:{}", kind.id()),
        label: kind.label().to_string(),
    }));
    buttons
}

fn accidental_buttons() -> Vec<SelectableButton> {
    AccidentalPreference::ALL
        .iter()
        .map(|preference| SelectableButton {
            id: format!("acc:{}", preference.id()),
            label: preference.label().to_string(),
        })
        .collect()
}

fn selector_style(theme: &Theme) -> SelectableStyle {
    SelectableStyle {
        border: UiBorder {
            color: theme.fret_wire,
            size: UiRect::all(Val::Px(1.0)),
            radius: BorderRadius::all(Val::Px(8.0)),
        },
        flex_direction: FlexDirection::Row,
        width: Val::Auto,
        button_style: control_button_style(theme),
    }
}

fn control_button_style(theme: &Theme) -> ButtonStyle {
    ButtonStyle {
        color: theme.button,
        hover_color: theme.button_hover,
        press_color: theme.button_press,
        label_color: theme.button_text,
        font_size: CONTROL_FONT_SIZE,
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        ..default()
    }
}

fn standalone_button_style(theme: &Theme) -> ButtonStyle {
    ButtonStyle {
        border: Some(UiBorder {
            color: theme.fret_wire,
            size: UiRect::all(Val::Px(1.0)),
            radius: BorderRadius::all(Val::Px(8.0)),
        }),
        ..control_button_style(theme)
    }
}

/// Route selector events into the selection resource. Deselections from
/// radio switching are ignored; the checkbox cares about both edges.
pub fn on_selected(
    trigger: On<SelectedEvent>,
    mut selection: ResMut<FretboardSelection>,
    mut feed: ResMut<FretboardFeed>,
) {
    let Some((group, value)) = trigger.id.split_once(':') else {
        return;
    };
    match group {
        "root" if trigger.selected => {
            if let Some(root) = RootNote::from_name(value) {
                selection.root = root;
            }
        }
        "scale" if trigger.selected => {
            selection.scale = ScaleKind::from_id(value);
        }
        "acc" if trigger.selected => {
            if let Some(preference) = AccidentalPreference::from_id(value) {
                selection.accidentals = preference;
            }
        }
        "view" => {
            feed.show_names = trigger.selected;
        }
        _ => {}
    }
}

// Clearing is the same as selecting "None" in the scale group; routing it
// through the group keeps the radio buttons and the resource in sync.
fn on_clear_clicked(
    _: On<Pointer<Click>>,
    mut groups: Query<&mut Selectable, With<ScaleSelectorGroup>>,
    mut commands: Commands,
) {
    for mut group in &mut groups {
        let Some(&none_entity) = group.button_id_map.get(SCALE_NONE_ID) else {
            continue;
        };

        let selected: Vec<Entity> = group
            .selected
            .iter()
            .filter(|(_, on)| **on)
            .map(|(entity, _)| *entity)
            .collect();
        for entity in selected {
            if entity != none_entity {
                group.selected.insert(entity, false);
                commands.entity(entity).remove::<crate::widgets::Active>();
            }
        }

        if group.selected.get(&none_entity).copied() != Some(true) {
            group.selected.insert(none_entity, true);
            commands.entity(none_entity).insert(crate::widgets::Active);
        }
    }
}

/// Recompute the whole highlight set from the current selection. Failures
/// are logged and rendered as a bare fretboard, never a crash.
pub fn recompute_highlights(
    selection: Res<FretboardSelection>,
    settings: Res<Settings>,
    mut feed: ResMut<FretboardFeed>,
) {
    let highlights = match scale_highlights(
        selection.root,
        selection.scale,
        selection.accidentals,
        settings.fret_count,
    ) {
        Ok(highlights) => highlights,
        Err(err) => {
            warn!("Scale lookup failed: {err}");
            Vec::new()
        }
    };
    feed.highlights = highlights;
}
