use bevy::prelude::*;
use bevy::ecs::system::SystemParam;
use crate::file::{ AppConfig, Settings, Themes };

pub mod button;
pub use button::{ UiButton, GenericButton, ButtonStyle, Active };

pub mod selectable;
pub use selectable::{
    Selectable,
    SelectableType,
    SelectableStyle,
    SelectableButton,
    SelectedEvent,
};

#[derive(SystemParam)]
pub struct UiContext<'w, 's> {
    pub themes: Res<'w, Themes>,
    pub settings: Res<'w, Settings>,
    pub config: Res<'w, AppConfig>,
    pub window: Single<'w, 's, Entity, With<Window>>,
}

#[derive(Debug, Clone)]
pub struct UiBorder {
    pub color: Color,
    pub size: UiRect,
    pub radius: BorderRadius,
}

impl Default for UiBorder {
    fn default() -> Self {
        UiBorder {
            color: Color::BLACK,
            size: UiRect::all(Val::Px(1.0)),
            radius: BorderRadius::all(Val::Px(0.0)),
        }
    }
}

pub struct UiWidgetsPlugin;

impl Plugin for UiWidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            button::default_button_setup,
            button::add_active_listener,
            button::remove_active_listener,
            selectable::active_added_listener,
            selectable::active_removed_listener,
        ));
    }
}
