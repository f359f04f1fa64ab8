pub mod fretboard_grid;

pub use fretboard_grid::{FretboardFeed, FretboardGridPlugin};
