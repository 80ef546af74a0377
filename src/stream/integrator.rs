use nalgebra::{Point2, Vector2};

use crate::flow::field::VelocityField;

/// Floor on local speed before normalizing a stage direction, m/s.
pub const MIN_STAGE_SPEED: f64 = 1e-5;

// ---------------------------------------------------------------------------
// Fixed arc-length RK4 step
// ---------------------------------------------------------------------------

/// Unit direction of the field at `p`. Speeds under the floor are treated as
/// the floor, so a stagnant point yields a short, finite vector.
pub fn unit_direction(field: &impl VelocityField, p: &Point2<f64>) -> Vector2<f64> {
    let v = field.velocity_at(p);
    v / v.norm().max(MIN_STAGE_SPEED)
}

/// Single RK4 step of length `h` along the field direction.
///
/// Every stage is normalized before scaling, so the tracer advances a fixed
/// distance per step whatever the local speed.
pub fn rk4_step(field: &impl VelocityField, p: &Point2<f64>, h: f64) -> Point2<f64> {
    let k1 = unit_direction(field, p);
    let k2 = unit_direction(field, &(p + k1 * (h * 0.5)));
    let k3 = unit_direction(field, &(p + k2 * (h * 0.5)));
    let k4 = unit_direction(field, &(p + k3 * h));

    p + (k1 + 2.0 * k2 + 2.0 * k3 + k4) * (h / 6.0)
}
