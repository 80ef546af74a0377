use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::flow::conditions::FlowConditions;
use crate::panel::solver::PanelSolution;

/// Bound on the thin-airfoil reference lift coefficient (stall stand-in).
pub const THIN_AIRFOIL_CL_LIMIT: f64 = 1.6;

/// `½ ρ V²`, Pa.
pub fn dynamic_pressure(density: f64, speed: f64) -> f64 {
    0.5 * density * speed * speed
}

/// `ρ V L / μ`.
pub fn reynolds_number(density: f64, speed: f64, length: f64, viscosity: f64) -> f64 {
    density * speed.abs() * length / viscosity.max(f64::MIN_POSITIVE)
}

/// Thin-airfoil lift slope, clamped to ±1.6.
pub fn thin_airfoil_lift_coefficient(alpha: f64) -> f64 {
    (2.0 * std::f64::consts::PI * alpha).clamp(-THIN_AIRFOIL_CL_LIMIT, THIN_AIRFOIL_CL_LIMIT)
}

/// Kutta–Joukowski lift coefficient `2Γ / (V∞ c)` from the solved circulation.
pub fn circulation_lift_coefficient(solution: &PanelSolution, chord: f64) -> f64 {
    let v = solution.conditions.reference_speed();
    2.0 * solution.total_circulation() / (v * chord.max(f64::MIN_POSITIVE))
}

/// Coefficients from integrating surface pressure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureCoefficients {
    pub cl: f64,
    pub cd: f64, // should vanish in 2D potential flow; a discretization check
    pub cm: f64, // about the quarter chord, nose up positive
}

/// Integrate `-Cp n ds` over the panels and resolve against the freestream.
pub fn pressure_coefficients(solution: &PanelSolution, chord: f64) -> PressureCoefficients {
    let c = chord.max(f64::MIN_POSITIVE);
    let quarter = Vector2::new(0.25 * c, 0.0);

    let mut force = Vector2::zeros();
    let mut moment = 0.0;
    for (panel, cp) in solution.panels.iter().zip(&solution.pressure_coefficient) {
        let df = -cp * panel.length * panel.normal;
        let arm = panel.control.coords - quarter;
        force += df;
        moment += arm.x * df.y - arm.y * df.x;
    }

    let fc = solution.conditions;
    PressureCoefficients {
        cl: force.dot(&fc.lift_direction()) / c,
        cd: force.dot(&fc.direction()) / c,
        cm: -moment / (c * c),
    }
}

/// Lift and drag per unit span as vectors in the airfoil frame, N/m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceVectors {
    pub lift: Vector2<f64>,
    pub drag: Vector2<f64>,
}

impl ForceVectors {
    pub fn resultant(&self) -> Vector2<f64> {
        self.lift + self.drag
    }
}

/// Turn coefficients into forces: lift ⟂ freestream, drag ∥ freestream.
pub fn lift_drag_forces(q: f64, chord: f64, cl: f64, cd: f64, conditions: &FlowConditions) -> ForceVectors {
    let scale = q * chord;
    ForceVectors {
        lift: conditions.lift_direction() * (cl * scale),
        drag: conditions.direction() * (cd * scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{build_contour, generate_airfoil, presets};
    use crate::panel::solver::solve_panel_method;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.05, 0.3142)]
    #[test_case(-0.05, -0.3142)]
    #[test_case(0.0, 0.0)]
    fn thin_airfoil_small_angles(alpha: f64, expected: f64) {
        assert_relative_eq!(thin_airfoil_lift_coefficient(alpha), expected, epsilon = 1e-4);
    }

    #[test_case(0.3, 1.6)]
    #[test_case(-0.5, -1.6)]
    fn thin_airfoil_clamps(alpha: f64, expected: f64) {
        assert_eq!(thin_airfoil_lift_coefficient(alpha), expected);
    }

    #[test]
    fn sea_level_dynamic_pressure() {
        assert_relative_eq!(dynamic_pressure(1.225, 40.0), 980.0);
        assert_relative_eq!(reynolds_number(1.225, 40.0, 1.0, 1.789e-5), 2.739e6, max_relative = 1e-3);
    }

    #[test]
    fn circulation_and_pressure_lift_agree() {
        let contour = build_contour(&generate_airfoil(&presets::naca0012()));
        let sol = solve_panel_method(&contour, 40.0, 4.0_f64.to_radians());
        let cl_gamma = circulation_lift_coefficient(&sol, 1.0);
        let cp = pressure_coefficients(&sol, 1.0);
        assert_relative_eq!(cl_gamma, cp.cl, max_relative = 0.05);
        // near the thin-airfoil value, a bit above it for a 12% section
        let thin = thin_airfoil_lift_coefficient(4.0_f64.to_radians());
        assert!(cl_gamma > 0.9 * thin && cl_gamma < 1.2 * thin, "cl = {}", cl_gamma);
        assert!(cp.cd.abs() < 0.02, "pressure drag = {}", cp.cd);
    }

    #[test]
    fn cambered_section_lifts_at_zero_incidence() {
        let contour = build_contour(&generate_airfoil(&presets::naca2412()));
        let sol = solve_panel_method(&contour, 40.0, 0.0);
        let cp = pressure_coefficients(&sol, 1.0);
        assert!(cp.cl > 0.15);
        assert!(cp.cm < 0.0, "camber gives a nose-down moment, got {}", cp.cm);
    }

    #[test]
    fn forces_align_with_stream() {
        let fc = FlowConditions::from_degrees(40.0, 10.0);
        let f = lift_drag_forces(980.0, 1.0, 1.0, 0.02, &fc);
        assert_relative_eq!(f.lift.dot(&fc.direction()), 0.0, epsilon = 1e-9);
        assert_relative_eq!(f.lift.norm(), 980.0, epsilon = 1e-9);
        assert_relative_eq!(f.drag.norm(), 19.6, epsilon = 1e-9);
        assert!(f.drag.dot(&fc.direction()) > 0.0);

        // lift and drag are perpendicular, so the resultant is their hypotenuse
        assert_relative_eq!(f.resultant().norm(), 980.0_f64.hypot(19.6), epsilon = 1e-9);
        assert_relative_eq!(f.resultant() - f.lift, f.drag, epsilon = 1e-12);
    }
}
