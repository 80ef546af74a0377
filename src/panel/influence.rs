use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};

use super::geometry::Panel;

/// Floor on squared distances to the panel end points, m^2.
pub const MIN_DISTANCE_SQ: f64 = 1e-12;

/// Relative distance from the panel line under which a point counts as lying on it.
const ON_PANEL_TOL: f64 = 1e-10;

/// Velocity induced at a point by unit-strength distributions on one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    pub source: Vector2<f64>,
    pub vortex: Vector2<f64>,
}

/// Closed-form constant-strength source and vortex panel influence.
///
/// Worked in the panel frame (origin at `start`, x along the tangent, y along
/// the outward normal):
///
/// ```text
/// log   = 0.5 ln(r1² / r2²)
/// sweep = θ2 − θ1
/// source: u =  log / 2π,  v = sweep / 2π
/// vortex: u = sweep / 2π, v = −log / 2π
/// ```
///
/// Points on the panel itself take the exterior limit (sweep = π), so the
/// self-induced normal source velocity is +½.
pub fn panel_influence(panel: &Panel, point: &Point2<f64>) -> Influence {
    let local = panel.to_local(point);
    let (x, y) = (local.x, local.y);
    let x2 = x - panel.length;

    let r1_sq = (x * x + y * y).max(MIN_DISTANCE_SQ);
    let r2_sq = (x2 * x2 + y * y).max(MIN_DISTANCE_SQ);
    let log_term = 0.5 * (r1_sq / r2_sq).ln();

    let sweep = if y.abs() <= ON_PANEL_TOL * panel.length {
        if x > 0.0 && x < panel.length { PI } else { 0.0 }
    } else {
        y.atan2(x2) - y.atan2(x)
    };

    let inv_2pi = 0.5 / PI;
    let source_local = Vector2::new(log_term * inv_2pi, sweep * inv_2pi);
    let vortex_local = Vector2::new(sweep * inv_2pi, -log_term * inv_2pi);

    Influence {
        source: panel.to_global(&source_local),
        vortex: panel.to_global(&vortex_local),
    }
}
