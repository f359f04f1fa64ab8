use bevy::picking::prelude::*;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::file::settings::Settings;
use crate::file::theme::Themes;
use crate::scenes::fretboard::{setup_fretboard_page, GridHost};
use crate::states::AppState;
use crate::theory::fretboard::sounding_pitch_class;
use crate::theory::{Highlight, HighlightKind, STANDARD_TUNING, STRING_COUNT};

const STRING_ROW_HEIGHT_PX: f32 = 46.0;
const FRET_NUMBER_ROW_HEIGHT_PX: f32 = 24.0;
const NOTE_DIAMETER_PX: f32 = 30.0;
const NOTE_FONT_SIZE: f32 = 13.0;
const PREVIEW_FONT_SIZE: f32 = 12.0;
const FRET_NUMBER_FONT_SIZE: f32 = 13.0;
const FRET_WIRE_WIDTH_PX: f32 = 2.0;
const NUT_WIDTH_PX: f32 = 7.0;
const BOARD_PADDING_PX: f32 = 14.0;

pub struct FretboardGridPlugin;

impl Plugin for FretboardGridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FretboardFeed>()
            .init_resource::<FretboardGridView>()
            .add_systems(
                OnEnter(AppState::Fretboard),
                setup_fretboard_grid.after(setup_fretboard_page),
            )
            .add_systems(OnExit(AppState::Fretboard), teardown_fretboard_grid)
            .add_systems(
                Update,
                (
                    apply_highlights.run_if(resource_changed::<FretboardFeed>),
                    sync_preview_labels.run_if(resource_changed::<FretboardFeed>),
                )
                    .run_if(in_state(AppState::Fretboard)),
            );
    }
}

/// What the grid should display. Written by the recompute system; the
/// highlight set is always replaced wholesale, never patched.
#[derive(Resource, Default, Clone)]
pub struct FretboardFeed {
    pub highlights: Vec<Highlight>,
    pub show_names: bool,
}

#[derive(Resource, Default)]
struct FretboardGridView {
    cells: HashMap<(usize, usize), Entity>,
    dots: Vec<Entity>,
}

#[derive(Component)]
struct NotePreviewLabel;

fn string_gauge_px(string_index: usize) -> f32 {
    // Low strings are wound heavier.
    1.0 + 0.5 * (STRING_COUNT - 1 - string_index) as f32
}

fn setup_fretboard_grid(
    mut commands: Commands,
    mut view: ResMut<FretboardGridView>,
    settings: Res<Settings>,
    themes: Res<Themes>,
    host_query: Query<Entity, With<GridHost>>,
) {
    let Ok(host) = host_query.single() else {
        warn!("Fretboard grid host missing, nothing to spawn into");
        return;
    };
    let theme = themes
        .get(settings.start_theme.as_str())
        .expect("Start theme not found")
        .clone();
    let fret_count = settings.fret_count;

    view.cells.clear();
    view.dots.clear();

    let mut cells: Vec<((usize, usize), Entity)> = Vec::new();

    commands.entity(host).with_children(|board| {
        board
            .spawn((
                Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(BOARD_PADDING_PX)),
                    ..default()
                },
                BackgroundColor(theme.panel),
                BorderRadius::all(Val::Px(10.0)),
            ))
            .with_children(|grid| {
                spawn_fret_number_row(grid, &theme, fret_count);

                // High E on top, the way a player reads a chart.
                for (string_index, open) in STANDARD_TUNING.iter().enumerate().rev() {
                    grid.spawn(Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(STRING_ROW_HEIGHT_PX),
                        flex_direction: FlexDirection::Row,
                        ..default()
                    })
                    .with_children(|row| {
                        for fret in 0..=fret_count {
                            let cell = spawn_cell(row, &theme, string_index, *open, fret);
                            cells.push(((string_index, fret), cell));
                        }
                    });
                }
            });
    });

    for ((string_index, fret), cell) in cells {
        view.cells.insert((string_index, fret), cell);
        commands
            .entity(cell)
            .observe(show_preview_on_over)
            .observe(hide_preview_on_out);
    }
}

fn spawn_fret_number_row(
    grid: &mut ChildSpawnerCommands,
    theme: &crate::file::Theme,
    fret_count: usize,
) {
    grid.spawn(Node {
        width: Val::Percent(100.0),
        height: Val::Px(FRET_NUMBER_ROW_HEIGHT_PX),
        flex_direction: FlexDirection::Row,
        ..default()
    })
    .with_children(|row| {
        for fret in 0..=fret_count {
            row.spawn(Node {
                flex_grow: 1.0,
                flex_basis: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|cell| {
                // The open-string column carries no number.
                if fret > 0 {
                    cell.spawn((
                        Text::new(fret.to_string()),
                        TextFont {
                            font_size: FRET_NUMBER_FONT_SIZE,
                            ..default()
                        },
                        TextColor(theme.text_muted),
                    ));
                }
            });
        }
    });
}

fn spawn_cell(
    row: &mut ChildSpawnerCommands,
    theme: &crate::file::Theme,
    string_index: usize,
    open: crate::theory::OpenString,
    fret: usize,
) -> Entity {
    let preview = sounding_pitch_class(open, fret).sharp_name();
    let gauge = string_gauge_px(string_index);
    let (wire_width, wire_color) = if fret == 0 {
        (NUT_WIDTH_PX, theme.nut)
    } else {
        (FRET_WIRE_WIDTH_PX, theme.fret_wire)
    };

    row.spawn((
        Node {
            flex_grow: 1.0,
            flex_basis: Val::Px(0.0),
            height: Val::Percent(100.0),
            border: UiRect::right(Val::Px(wire_width)),
            ..default()
        },
        BorderColor::all(wire_color),
    ))
    .with_children(|cell| {
        cell.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Percent(50.0),
                width: Val::Percent(100.0),
                height: Val::Px(gauge),
                margin: UiRect {
                    top: Val::Px(-gauge / 2.0),
                    ..default()
                },
                ..default()
            },
            BackgroundColor(theme.string_line),
        ));

        cell.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            NotePreviewLabel,
        ))
        .with_children(|label| {
            label.spawn((
                Text::new(preview),
                TextFont {
                    font_size: PREVIEW_FONT_SIZE,
                    ..default()
                },
                TextColor(theme.note_preview),
            ));
        });
    })
    .id()
}

fn teardown_fretboard_grid(
    mut view: ResMut<FretboardGridView>,
    mut feed: ResMut<FretboardFeed>,
) {
    // The page root owns the entities; dropping the maps is enough.
    view.cells.clear();
    view.dots.clear();
    feed.highlights.clear();
}

// Rebuild the whole dot layer from the feed.
fn apply_highlights(
    mut commands: Commands,
    feed: Res<FretboardFeed>,
    mut view: ResMut<FretboardGridView>,
    settings: Res<Settings>,
    themes: Res<Themes>,
) {
    if view.cells.is_empty() {
        return;
    }
    let Some(theme) = themes.get(settings.start_theme.as_str()) else {
        return;
    };

    for entity in view.dots.drain(..) {
        commands.entity(entity).despawn();
    }

    let mut dots: Vec<Entity> = Vec::with_capacity(feed.highlights.len());
    for highlight in &feed.highlights {
        let Some(&cell) = view.cells.get(&(highlight.string_index, highlight.fret)) else {
            warn!(
                "Highlight outside the grid: string {} fret {}",
                highlight.string_index, highlight.fret
            );
            continue;
        };

        let color = match highlight.kind {
            HighlightKind::Root => theme.note_root,
            HighlightKind::Scale => theme.note_scale,
        };

        let overlay = commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    top: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                ChildOf(cell),
            ))
            .id();
        let dot = commands
            .spawn((
                Node {
                    width: Val::Px(NOTE_DIAMETER_PX),
                    height: Val::Px(NOTE_DIAMETER_PX),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(color),
                BorderRadius::all(Val::Percent(50.0)),
                ChildOf(overlay),
            ))
            .id();
        commands.spawn((
            Text::new(highlight.label.clone()),
            TextFont {
                font_size: NOTE_FONT_SIZE,
                ..default()
            },
            TextColor(theme.note_label),
            ChildOf(dot),
        ));

        dots.push(overlay);
    }

    view.dots = dots;
}

fn sync_preview_labels(
    feed: Res<FretboardFeed>,
    mut labels: Query<&mut Visibility, With<NotePreviewLabel>>,
) {
    let target = if feed.show_names {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut labels {
        *visibility = target;
    }
}

fn show_preview_on_over(
    trigger: On<Pointer<Over>>,
    children: Query<&Children>,
    mut labels: Query<&mut Visibility, With<NotePreviewLabel>>,
) {
    let Ok(kids) = children.get(trigger.entity) else {
        return;
    };
    for kid in kids.iter() {
        if let Ok(mut visibility) = labels.get_mut(kid) {
            *visibility = Visibility::Visible;
        }
    }
}

fn hide_preview_on_out(
    trigger: On<Pointer<Out>>,
    feed: Res<FretboardFeed>,
    children: Query<&Children>,
    mut labels: Query<&mut Visibility, With<NotePreviewLabel>>,
) {
    if feed.show_names {
        return;
    }
    let Ok(kids) = children.get(trigger.entity) else {
        return;
    };
    for kid in kids.iter() {
        if let Ok(mut visibility) = labels.get_mut(kid) {
            *visibility = Visibility::Hidden;
        }
    }
}
