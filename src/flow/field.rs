use nalgebra::{Point2, Vector2};

use super::conditions::{freestream, FlowConditions};
use crate::panel::influence::panel_influence;
use crate::panel::solver::PanelSolution;

// ---------------------------------------------------------------------------
// Velocity field abstraction
// ---------------------------------------------------------------------------

/// Anything that can report a velocity at a point in the plane.
pub trait VelocityField {
    fn velocity_at(&self, point: &Point2<f64>) -> Vector2<f64>;
}

impl<F> VelocityField for F
where
    F: Fn(&Point2<f64>) -> Vector2<f64>,
{
    fn velocity_at(&self, point: &Point2<f64>) -> Vector2<f64> {
        self(point)
    }
}

/// Undisturbed stream, no body.
#[derive(Debug, Clone, Copy)]
pub struct UniformStream(pub FlowConditions);

impl VelocityField for UniformStream {
    fn velocity_at(&self, _point: &Point2<f64>) -> Vector2<f64> {
        self.0.velocity()
    }
}

impl VelocityField for PanelSolution {
    fn velocity_at(&self, point: &Point2<f64>) -> Vector2<f64> {
        evaluate_velocity(self, point, self.conditions.speed, self.conditions.alpha)
    }
}

// ---------------------------------------------------------------------------
// Panel-method field
// ---------------------------------------------------------------------------

/// Freestream plus every panel's source and the shared vortex, at `point`.
///
/// No caching: each call walks all panels.
pub fn evaluate_velocity(
    solution: &PanelSolution,
    point: &Point2<f64>,
    speed: f64,
    alpha: f64,
) -> Vector2<f64> {
    let mut source = Vector2::zeros();
    let mut vortex = Vector2::zeros();
    for (panel, sigma) in solution.panels.iter().zip(&solution.source_strengths) {
        let inf = panel_influence(panel, point);
        source += inf.source * *sigma;
        vortex += inf.vortex;
    }
    freestream(speed, alpha) + source + vortex * solution.circulation
}

/// Velocity magnitude relative to freestream, for colouring.
pub fn speed_ratio(solution: &PanelSolution, point: &Point2<f64>) -> f64 {
    let v = solution.velocity_at(point).norm();
    v / solution.conditions.reference_speed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{build_contour, generate_airfoil, presets};
    use crate::panel::solver::solve_panel_method;
    use approx::assert_relative_eq;

    fn naca2412_solution() -> PanelSolution {
        let contour = build_contour(&generate_airfoil(&presets::naca2412()));
        solve_panel_method(&contour, 40.0, 5.0_f64.to_radians())
    }

    #[test]
    fn empty_solution_is_pure_freestream() {
        let sol = PanelSolution::default();
        let v = evaluate_velocity(&sol, &Point2::new(0.3, 0.1), 12.0, 0.2);
        assert_relative_eq!(v, freestream(12.0, 0.2), epsilon = 1e-12);
    }

    #[test]
    fn disturbance_decays_far_away() {
        let sol = naca2412_solution();
        let near = (sol.velocity_at(&Point2::new(0.5, 0.3)) - sol.conditions.velocity()).norm();
        let far = (sol.velocity_at(&Point2::new(0.5, 30.0)) - sol.conditions.velocity()).norm();
        assert!(far < near / 20.0);
        assert!(far / sol.conditions.speed < 0.01);
    }

    #[test]
    fn flow_is_faster_over_the_upper_surface() {
        let sol = naca2412_solution();
        let above = speed_ratio(&sol, &Point2::new(0.3, 0.12));
        let below = speed_ratio(&sol, &Point2::new(0.3, -0.08));
        assert!(above > 1.0);
        assert!(above > below);
    }

    #[test]
    fn closures_are_velocity_fields() {
        let swirl = |p: &Point2<f64>| Vector2::new(-p.y, p.x);
        assert_relative_eq!(swirl.velocity_at(&Point2::new(1.0, 0.0)), Vector2::new(0.0, 1.0));
        let uniform = UniformStream(FlowConditions::new(5.0, 0.0));
        assert_relative_eq!(uniform.velocity_at(&Point2::origin()), Vector2::new(5.0, 0.0));
    }
}
