pub mod airfoil;
pub mod config;
pub mod error;
pub mod flow;
pub mod io;
pub mod panel;
pub mod physics;
pub mod stream;

pub use airfoil::{build_contour, generate_airfoil, presets, AirfoilParams, AirfoilSurface};
pub use config::{AnalysisConfig, FlowSettings};
pub use error::{AirflowError, Result};
pub use flow::{analyze, evaluate_velocity, FlowAnalysis, FlowConditions, VelocityField};
pub use panel::{solve_panel_method, Panel, PanelSolution};
pub use physics::{drag_coefficients, skin_friction_coefficient, wall_shear_stress, FlowRegime};
pub use stream::{integrate_streamline, Streamline, StreamlineConfig};
