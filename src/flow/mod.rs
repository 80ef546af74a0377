pub mod analysis;
pub mod conditions;
pub mod field;

pub use analysis::{analyze, Coefficients, FlowAnalysis};
pub use conditions::{freestream, FlowConditions};
pub use field::{evaluate_velocity, speed_ratio, UniformStream, VelocityField};
