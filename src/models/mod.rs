pub mod grid_model;

pub use grid_model::{Direction, Grid, PullPoint, SurfaceSize};
