use serde::{Deserialize, Serialize};

use super::atmosphere::AirProperties;
use crate::panel::geometry::leading_edge_x;
use crate::panel::solver::PanelSolution;

/// Stations used by the chord-integrated friction drag.
pub const DEFAULT_FRICTION_SAMPLES: usize = 80;

// ---------------------------------------------------------------------------
// Flat-plate skin-friction correlations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    #[default]
    Laminar,
    Turbulent,
}

/// Local Reynolds number `ρ V x / μ`.
pub fn local_reynolds(density: f64, speed: f64, x: f64, viscosity: f64) -> f64 {
    density * speed.abs() * x.max(0.0) / viscosity.max(f64::MIN_POSITIVE)
}

/// Skin-friction coefficient at a station. Blasius for laminar flow,
/// the 1/5-power law for turbulent flow. `re_x` is floored at 1.
pub fn skin_friction_coefficient(re_x: f64, regime: FlowRegime) -> f64 {
    let re = re_x.max(1.0);
    match regime {
        FlowRegime::Laminar => 0.664 / re.sqrt(),
        FlowRegime::Turbulent => 0.0592 / re.powf(0.2),
    }
}

/// Wall shear stress from local dynamic pressure, Pa.
pub fn wall_shear_stress(dynamic_pressure: f64, cf: f64) -> f64 {
    dynamic_pressure * cf
}

/// Friction drag coefficient of one surface of chord Reynolds number
/// `re_chord`: trapezoidal integral of Cf over x/c in (0, 1].
///
/// Stations sit at x/c = k / samples, k = 1..=samples; the first interval
/// is taken as a rectangle at the first station.
pub fn friction_drag_coefficient(re_chord: f64, regime: FlowRegime, samples: usize) -> f64 {
    let samples = samples.max(1);
    let dx = 1.0 / samples as f64;
    let cf = |k: usize| skin_friction_coefficient(re_chord * k as f64 * dx, regime);

    let mut total = cf(1) * dx;
    for k in 1..samples {
        total += 0.5 * (cf(k) + cf(k + 1)) * dx;
    }
    total
}

// ---------------------------------------------------------------------------
// Drag decomposition
// ---------------------------------------------------------------------------

/// Empirical pressure-drag polar `Cd0 + k Cl²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragModel {
    pub cd0: f64,
    pub k: f64,
}

impl Default for DragModel {
    fn default() -> Self {
        Self { cd0: 0.006, k: 0.0125 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragBreakdown {
    pub friction: f64,
    pub pressure: f64,
    pub total: f64,
}

/// Friction from the chord integral plus the empirical pressure term.
pub fn drag_coefficients(
    re_chord: f64,
    regime: FlowRegime,
    cl: f64,
    model: &DragModel,
) -> DragBreakdown {
    let friction = friction_drag_coefficient(re_chord, regime, DEFAULT_FRICTION_SAMPLES);
    let pressure = model.cd0 + model.k * cl * cl;
    DragBreakdown { friction, pressure, total: friction + pressure }
}

// ---------------------------------------------------------------------------
// Surface shear from a solved flow
// ---------------------------------------------------------------------------

/// Edge velocity used for the local dynamic pressure and Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShearVelocity {
    /// Solved tangential velocity at each panel.
    #[default]
    Surface,
    /// Freestream speed everywhere.
    Freestream,
}

/// Wall shear stress per panel, Pa. The station distance is the control
/// point's x measured from the leading edge.
pub fn surface_shear_stress(
    solution: &PanelSolution,
    air: &AirProperties,
    regime: FlowRegime,
    velocity: ShearVelocity,
) -> Vec<f64> {
    let x_le = leading_edge_x(&solution.panels);
    solution
        .panels
        .iter()
        .zip(&solution.tangential_velocity)
        .map(|(panel, vt)| {
            let v = match velocity {
                ShearVelocity::Surface => vt.abs(),
                ShearVelocity::Freestream => solution.conditions.speed.abs(),
            };
            let x = panel.control.x - x_le;
            let re = local_reynolds(air.density, v, x, air.viscosity);
            let q = 0.5 * air.density * v * v;
            wall_shear_stress(q, skin_friction_coefficient(re, regime))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{build_contour, generate_airfoil, presets};
    use crate::physics::atmosphere::isa;
    use crate::panel::solver::solve_panel_method;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(1e5, 0.0020998)]
    #[test_case(1e6, 0.000664)]
    fn blasius(re: f64, expected: f64) {
        assert_relative_eq!(skin_friction_coefficient(re, FlowRegime::Laminar), expected, max_relative = 1e-4);
    }

    #[test_case(1e6, 0.003735)]
    #[test_case(1e7, 0.002357)]
    fn turbulent_power_law(re: f64, expected: f64) {
        assert_relative_eq!(skin_friction_coefficient(re, FlowRegime::Turbulent), expected, max_relative = 1e-3);
    }

    #[test]
    fn reynolds_floor_keeps_cf_finite() {
        assert_relative_eq!(skin_friction_coefficient(0.0, FlowRegime::Laminar), 0.664);
        assert_relative_eq!(skin_friction_coefficient(-5.0, FlowRegime::Turbulent), 0.0592);
    }

    #[test]
    fn turbulent_friction_exceeds_laminar() {
        let re = 2e6;
        let lam = friction_drag_coefficient(re, FlowRegime::Laminar, DEFAULT_FRICTION_SAMPLES);
        let turb = friction_drag_coefficient(re, FlowRegime::Turbulent, DEFAULT_FRICTION_SAMPLES);
        assert!(turb > lam);
    }

    #[test]
    fn integrated_friction_near_closed_form() {
        // Exact integrals: 1.328/√Re (laminar), 0.074/Re^0.2 (turbulent)
        let re = 1e6;
        let lam = friction_drag_coefficient(re, FlowRegime::Laminar, DEFAULT_FRICTION_SAMPLES);
        let turb = friction_drag_coefficient(re, FlowRegime::Turbulent, DEFAULT_FRICTION_SAMPLES);
        assert!(lam < 1.328e-3 && lam > 0.85 * 1.328e-3, "laminar {}", lam);
        assert_relative_eq!(turb, 0.074 / re.powf(0.2), max_relative = 0.05);
    }

    #[test]
    fn drag_breakdown_adds_up() {
        let model = DragModel::default();
        let d = drag_coefficients(3e6, FlowRegime::Turbulent, 0.5, &model);
        assert_relative_eq!(d.pressure, 0.006 + 0.0125 * 0.25);
        assert_relative_eq!(d.total, d.friction + d.pressure);
    }

    #[test]
    fn shear_is_positive_and_follows_regime() {
        let contour = build_contour(&generate_airfoil(&presets::naca2412()));
        let sol = solve_panel_method(&contour, 40.0, 0.05);
        let air = isa(0.0);
        let lam = surface_shear_stress(&sol, &air, FlowRegime::Laminar, ShearVelocity::Surface);
        let turb = surface_shear_stress(&sol, &air, FlowRegime::Turbulent, ShearVelocity::Surface);
        assert_eq!(lam.len(), sol.len());
        assert!(lam.iter().all(|t| *t >= 0.0 && t.is_finite()));
        let mid = sol.panels.iter().position(|p| p.control.x > 0.5).unwrap();
        assert!(turb[mid] > lam[mid]);
    }

    #[test]
    fn freestream_shear_depends_only_on_x() {
        let contour = build_contour(&generate_airfoil(&presets::naca0012()));
        let sol = solve_panel_method(&contour, 30.0, 0.0);
        let tau = surface_shear_stress(&sol, &isa(0.0), FlowRegime::Laminar, ShearVelocity::Freestream);
        let n = sol.len();
        // mirrored panels share x, hence shear
        assert_relative_eq!(tau[10], tau[n - 11], max_relative = 1e-9);
        // shear falls off downstream
        assert!(tau[5] > tau[60]);
    }
}
