pub mod geometry;
pub mod influence;
pub mod linalg;
pub mod solver;

pub use geometry::{assemble_panels, trailing_edge_panels, Panel};
pub use influence::{panel_influence, Influence};
pub use solver::{solve_panel_method, solve_panels, PanelSolution};
