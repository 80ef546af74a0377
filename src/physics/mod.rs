pub mod atmosphere;
pub mod boundary_layer;
pub mod forces;

pub use atmosphere::{isa, sea_level_density, AirProperties, AtmosphereModel};
pub use boundary_layer::{
    drag_coefficients, skin_friction_coefficient, surface_shear_stress, wall_shear_stress,
    DragBreakdown, DragModel, FlowRegime, ShearVelocity,
};
pub use forces::{
    circulation_lift_coefficient, dynamic_pressure, lift_drag_forces, pressure_coefficients,
    reynolds_number, thin_airfoil_lift_coefficient, ForceVectors, PressureCoefficients,
};
