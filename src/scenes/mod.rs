use bevy::prelude::*;

pub mod fretboard;

pub use fretboard::{setup_fretboard_page, FretboardSelection, GridHost};

#[derive(Resource, Debug, Clone, Copy)]
pub struct MainCamera {
    pub ui_camera: Entity,
}

pub fn setup_camera(mut commands: Commands) {
    let camera_entity = commands.spawn(Camera2d).id();
    commands.insert_resource(MainCamera {
        ui_camera: camera_entity,
    });
}
