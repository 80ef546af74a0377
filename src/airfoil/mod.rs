pub mod contour;
pub mod naca;
pub mod presets;

pub use contour::{
    build_contour, clockwise_loop, close_loop, drop_near_duplicates, signed_area, CLOSURE_TOLERANCE,
};
pub use naca::{generate_airfoil, AirfoilBuilder, AirfoilParams, AirfoilSurface};
