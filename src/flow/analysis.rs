use std::time::Instant;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::airfoil::{build_contour, generate_airfoil, AirfoilParams, AirfoilSurface};
use crate::config::AnalysisConfig;
use crate::flow::conditions::FlowConditions;
use crate::panel::solver::{solve_panel_method, PanelSolution};
use crate::physics::atmosphere::AirProperties;
use crate::physics::boundary_layer::{drag_coefficients, surface_shear_stress, DragBreakdown};
use crate::physics::forces::{
    circulation_lift_coefficient, dynamic_pressure, lift_drag_forces, pressure_coefficients,
    reynolds_number, thin_airfoil_lift_coefficient, ForceVectors,
};
use crate::stream::{integrate_streamlines, seed_rake, Streamline};

// ---------------------------------------------------------------------------
// Result of one analysis
// ---------------------------------------------------------------------------

/// Section coefficients. Lift comes from the solved circulation; the
/// pressure-integrated values are kept alongside as a check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub cl: f64,
    pub cl_pressure: f64,
    pub cl_thin_airfoil: f64,
    pub cm_quarter_chord: f64,
    pub cd_potential: f64,
    pub drag: DragBreakdown,
}

/// Everything the report and the viewer render for one parameter set.
#[derive(Debug, Clone)]
pub struct FlowAnalysis {
    pub params: AirfoilParams,
    pub conditions: FlowConditions,
    pub surface: AirfoilSurface,
    pub contour: Vec<Point2<f64>>,
    pub solution: PanelSolution,
    pub air: AirProperties,
    pub shear_stress: Vec<f64>, // Pa, one per panel
    pub dynamic_pressure: f64,  // Pa
    pub reynolds: f64,          // chord based
    pub coefficients: Coefficients,
    pub forces: ForceVectors, // N per metre of span
    pub streamlines: Vec<Streamline>,
}

impl FlowAnalysis {
    pub fn lift_per_span(&self) -> f64 {
        self.coefficients.cl * self.dynamic_pressure * self.params.chord
    }

    pub fn drag_per_span(&self) -> f64 {
        self.coefficients.drag.total * self.dynamic_pressure * self.params.chord
    }

    pub fn lift_to_drag(&self) -> f64 {
        self.coefficients.cl / self.coefficients.drag.total.max(f64::MIN_POSITIVE)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the whole chain: shape, contour, panel solve, surface shear,
/// coefficients, forces, then streamlines when any are requested.
pub fn analyze(config: &AnalysisConfig) -> FlowAnalysis {
    let started = Instant::now();
    let params = config.airfoil.clamped();
    let conditions = config.flow.conditions();
    let chord = params.chord;

    let surface = generate_airfoil(&params);
    let contour = build_contour(&surface);
    let solution = solve_panel_method(&contour, conditions.speed, conditions.alpha);

    let air = config.atmosphere.properties();
    let shear_stress = surface_shear_stress(&solution, &air, config.regime, config.shear_velocity);
    let q = dynamic_pressure(air.density, conditions.speed);
    let reynolds = reynolds_number(air.density, conditions.speed, chord, air.viscosity);

    let cl = if solution.is_empty() { 0.0 } else { circulation_lift_coefficient(&solution, chord) };
    let pressure = pressure_coefficients(&solution, chord);
    let drag = drag_coefficients(reynolds, config.regime, cl, &config.drag);
    let coefficients = Coefficients {
        cl,
        cl_pressure: pressure.cl,
        cl_thin_airfoil: thin_airfoil_lift_coefficient(conditions.alpha),
        cm_quarter_chord: pressure.cm,
        cd_potential: pressure.cd,
        drag,
    };
    let forces = lift_drag_forces(q, chord, cl, drag.total, &conditions);

    let streamlines = if config.streamline_count > 0 && !solution.is_empty() {
        let seeds = seed_rake(config.streamline_count, chord, &config.streamlines);
        integrate_streamlines(&seeds, &solution, chord, &config.streamlines)
    } else {
        Vec::new()
    };

    log::debug!(
        "analysis NACA {} at {:.1} deg: cl {:.4}, cd {:.5}, {} streamlines in {:?}",
        params.naca_code(),
        conditions.alpha.to_degrees(),
        cl,
        drag.total,
        streamlines.len(),
        started.elapsed()
    );

    FlowAnalysis {
        params,
        conditions,
        surface,
        contour,
        solution,
        air,
        shear_stress,
        dynamic_pressure: q,
        reynolds,
        coefficients,
        forces,
        streamlines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowSettings;
    use crate::physics::boundary_layer::FlowRegime;
    use approx::assert_relative_eq;

    #[test]
    fn default_run_lifts() {
        let config = AnalysisConfig { streamline_count: 3, ..AnalysisConfig::default() };
        let a = analyze(&config);
        assert!(a.coefficients.cl > 0.5 && a.coefficients.cl < 1.1, "cl = {}", a.coefficients.cl);
        assert_eq!(a.shear_stress.len(), a.solution.len());
        assert_eq!(a.streamlines.len(), 3);
        assert!(a.forces.lift.y > 0.0);
        assert!(a.lift_to_drag() > 10.0);
        assert_relative_eq!(a.forces.lift.norm(), a.lift_per_span(), max_relative = 1e-12);
        assert_relative_eq!(a.forces.drag.norm(), a.drag_per_span(), max_relative = 1e-12);
    }

    #[test]
    fn no_streamlines_when_count_is_zero() {
        let config = AnalysisConfig { streamline_count: 0, ..AnalysisConfig::default() };
        assert!(analyze(&config).streamlines.is_empty());
    }

    #[test]
    fn turbulent_regime_raises_friction() {
        let lam = analyze(&AnalysisConfig { streamline_count: 0, ..AnalysisConfig::default() });
        let turb = analyze(&AnalysisConfig {
            streamline_count: 0,
            regime: FlowRegime::Turbulent,
            ..AnalysisConfig::default()
        });
        assert!(turb.coefficients.drag.friction > lam.coefficients.drag.friction);
        assert_relative_eq!(turb.coefficients.cl, lam.coefficients.cl);
    }

    #[test]
    fn zero_speed_gives_zero_forces() {
        let config = AnalysisConfig {
            flow: FlowSettings { speed: 0.0, alpha_deg: 5.0 },
            streamline_count: 0,
            ..AnalysisConfig::default()
        };
        let a = analyze(&config);
        assert_eq!(a.dynamic_pressure, 0.0);
        assert_eq!(a.forces.lift.norm(), 0.0);
        assert!(a.coefficients.cl.is_finite());
    }
}
