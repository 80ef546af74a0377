use std::time::Instant;

use nalgebra::{DMatrix, DVector, Point2, Vector2};

use super::geometry::{assemble_panels, trailing_edge_panels, Panel};
use super::influence::{panel_influence, Influence};
use super::linalg::solve_dense;
use crate::flow::conditions::FlowConditions;

// ---------------------------------------------------------------------------
// Solved flow around one contour
// ---------------------------------------------------------------------------

/// Source strengths, shared vortex strength and surface quantities for one
/// (contour, speed, angle of attack) triple.
#[derive(Debug, Clone, Default)]
pub struct PanelSolution {
    pub panels: Vec<Panel>,
    pub source_strengths: Vec<f64>,
    /// Vortex strength per unit length, shared by every panel. Positive is
    /// clockwise, i.e. positive lift for a stream along +x.
    pub circulation: f64,
    pub tangential_velocity: Vec<f64>, // m/s, signed along each panel tangent
    pub pressure_coefficient: Vec<f64>,
    /// Upper and lower trailing panels used by the Kutta row.
    pub kutta_panels: Option<(usize, usize)>,
    pub conditions: FlowConditions,
}

impl PanelSolution {
    fn empty(conditions: FlowConditions) -> Self {
        Self { conditions, ..Self::default() }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Total circulation around the body (vortex strength × perimeter), m^2/s.
    pub fn total_circulation(&self) -> f64 {
        self.circulation * super::geometry::perimeter(&self.panels)
    }

    /// True for panels traversed downstream, i.e. on the upper surface.
    pub fn is_upper(&self, i: usize) -> bool {
        self.panels[i].tangent.x > 0.0
    }
}

// ---------------------------------------------------------------------------
// Influence tables
// ---------------------------------------------------------------------------

/// Pairwise influences, `rows[i][j]` = panel `j` evaluated at control point `i`.
struct InfluenceTable {
    rows: Vec<Vec<Influence>>,
}

impl InfluenceTable {
    fn build(panels: &[Panel]) -> Self {
        let rows = panels
            .iter()
            .map(|target| panels.iter().map(|p| panel_influence(p, &target.control)).collect())
            .collect();
        Self { rows }
    }

    /// Unit-vortex velocity at control point `i`, summed over every panel.
    fn vortex_sum(&self, i: usize) -> Vector2<f64> {
        self.rows[i].iter().fold(Vector2::zeros(), |acc, inf| acc + inf.vortex)
    }
}

// ---------------------------------------------------------------------------
// Solve
// ---------------------------------------------------------------------------

/// Solve the source + vortex panel system around `contour`.
///
/// Unknowns are one source strength per panel and a single vortex strength.
/// Rows `0..n` impose zero normal velocity at each control point; row `n`
/// (Kutta) imposes equal downstream tangential velocity on the two trailing
/// panels. Degenerate contours yield an empty solution.
pub fn solve_panel_method(contour: &[Point2<f64>], speed: f64, alpha: f64) -> PanelSolution {
    let conditions = FlowConditions::new(speed, alpha);
    let panels = assemble_panels(contour);
    solve_panels(panels, conditions)
}

/// Same as [`solve_panel_method`] on pre-built panels.
pub fn solve_panels(panels: Vec<Panel>, conditions: FlowConditions) -> PanelSolution {
    let n = panels.len();
    if n == 0 {
        log::debug!("panel solve skipped: degenerate contour");
        return PanelSolution::empty(conditions);
    }

    let started = Instant::now();
    let v_inf = conditions.velocity();
    let table = InfluenceTable::build(&panels);
    let vortex_sums: Vec<Vector2<f64>> = (0..n).map(|i| table.vortex_sum(i)).collect();

    let mut a = DMatrix::zeros(n + 1, n + 1);
    let mut b = DVector::zeros(n + 1);

    // Flow tangency
    for (i, target) in panels.iter().enumerate() {
        for j in 0..n {
            a[(i, j)] = table.rows[i][j].source.dot(&target.normal);
        }
        a[(i, n)] = vortex_sums[i].dot(&target.normal);
        b[i] = -v_inf.dot(&target.normal);
    }

    // Kutta condition
    let kutta_panels = trailing_edge_panels(&panels);
    match kutta_panels {
        Some((upper, lower)) => {
            let tu = panels[upper].downstream_tangent();
            let tl = panels[lower].downstream_tangent();
            log::trace!("kutta panels: upper {} lower {}", upper, lower);
            for j in 0..n {
                a[(n, j)] = table.rows[upper][j].source.dot(&tu) - table.rows[lower][j].source.dot(&tl);
            }
            a[(n, n)] = vortex_sums[upper].dot(&tu) - vortex_sums[lower].dot(&tl);
            b[n] = -(v_inf.dot(&tu) - v_inf.dot(&tl));
        }
        None => {
            // No identifiable trailing edge: pin the circulation to zero.
            log::debug!("no trailing edge found among {} panels, circulation fixed at 0", n);
            a[(n, n)] = 1.0;
        }
    }

    let solved = solve_dense(a, b);
    if solved.floored_pivots > 0 {
        log::warn!(
            "panel system near singular: {} pivot(s) floored ({} panels)",
            solved.floored_pivots,
            n
        );
    }

    let source_strengths: Vec<f64> = solved.x.iter().take(n).copied().collect();
    let circulation = solved.x[n];

    // Surface velocity and pressure
    let v_ref = conditions.reference_speed();
    let mut tangential_velocity = Vec::with_capacity(n);
    let mut pressure_coefficient = Vec::with_capacity(n);
    for (i, target) in panels.iter().enumerate() {
        let induced = table.rows[i]
            .iter()
            .zip(&source_strengths)
            .fold(Vector2::zeros(), |acc, (inf, sigma)| acc + inf.source * *sigma);
        let vt = v_inf.dot(&target.tangent)
            + induced.dot(&target.tangent)
            + circulation * vortex_sums[i].dot(&target.tangent);
        tangential_velocity.push(vt);
        pressure_coefficient.push(1.0 - (vt / v_ref).powi(2));
    }

    log::debug!(
        "panel solve: {} panels, circulation {:.4}, {:.2?}",
        n,
        circulation,
        started.elapsed()
    );

    PanelSolution {
        panels,
        source_strengths,
        circulation,
        tangential_velocity,
        pressure_coefficient,
        kutta_panels,
        conditions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
