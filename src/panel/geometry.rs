use nalgebra::{Point2, Vector2};

use crate::airfoil::contour::{clockwise_loop, drop_near_duplicates};

/// Segments shorter than this fraction of the loop length are merged into
/// their neighbours instead of becoming panels.
pub const MIN_PANEL_FRACTION: f64 = 1e-10;

// ---------------------------------------------------------------------------
// Straight boundary panel
// ---------------------------------------------------------------------------

/// One straight segment of the body contour carrying uniform singularity strength.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    pub control: Point2<f64>,   // midpoint, where boundary conditions are enforced
    pub tangent: Vector2<f64>,  // unit, start → end
    pub normal: Vector2<f64>,   // unit, away from the body
    pub length: f64,            // m, always > 0
}

impl Panel {
    /// Panel between two points of a clockwise loop. `None` for a zero-length segment.
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Option<Self> {
        let d = end - start;
        let length = d.norm();
        if length <= 0.0 || !length.is_finite() {
            return None;
        }
        let tangent = d / length;
        Some(Self {
            start,
            end,
            control: nalgebra::center(&start, &end),
            tangent,
            normal: outward_normal(&tangent),
            length,
        })
    }

    /// Coordinates of `p` in the panel frame: origin at `start`, x along the
    /// tangent, y along the outward normal.
    pub fn to_local(&self, p: &Point2<f64>) -> Vector2<f64> {
        let d = p - self.start;
        Vector2::new(d.dot(&self.tangent), d.dot(&self.normal))
    }

    /// Rotate a panel-frame vector back to the global frame.
    pub fn to_global(&self, v: &Vector2<f64>) -> Vector2<f64> {
        self.tangent * v.x + self.normal * v.y
    }

    /// Unit tangent flipped, if needed, to point towards +x (downstream).
    pub fn downstream_tangent(&self) -> Vector2<f64> {
        if self.tangent.x < 0.0 { -self.tangent } else { self.tangent }
    }
}

/// For a clockwise traversal the exterior lies to the left of the tangent.
fn outward_normal(tangent: &Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-tangent.y, tangent.x)
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Discretize a loop into clockwise panels.
///
/// The loop is closed if needed and reversed when it runs counter-clockwise.
/// Points closer than `MIN_PANEL_FRACTION` of the loop length to their
/// predecessor are merged, so round-off slivers produce no panel. Panel
/// order follows the final traversal, which trailing-edge detection relies on.
pub fn assemble_panels(points: &[Point2<f64>]) -> Vec<Panel> {
    if points.len() < 3 {
        return Vec::new();
    }
    let loop_points = clockwise_loop(points);
    let loop_length: f64 = loop_points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    drop_near_duplicates(&loop_points, MIN_PANEL_FRACTION * loop_length)
        .windows(2)
        .filter_map(|w| Panel::new(w[0], w[1]))
        .collect()
}

/// Total panel length.
pub fn perimeter(panels: &[Panel]) -> f64 {
    panels.iter().map(|p| p.length).sum()
}

/// Smallest x over the panel end points.
pub fn leading_edge_x(panels: &[Panel]) -> f64 {
    panels
        .iter()
        .map(|p| p.start.x)
        .fold(f64::INFINITY, f64::min)
}

// ---------------------------------------------------------------------------
// Trailing-edge detection
// ---------------------------------------------------------------------------

/// Indices of the last upper-surface and last lower-surface panels.
///
/// A clockwise airfoil loop runs the upper surface downstream (tangent.x > 0)
/// and the lower surface upstream (tangent.x < 0). Within each side the panel
/// with the largest control-point x is the trailing panel. Near-vertical
/// panels, such as the base of a blunt section, belong to neither side.
pub fn trailing_edge_panels(panels: &[Panel]) -> Option<(usize, usize)> {
    let chordwise = |p: &Panel| p.tangent.x.abs() > p.tangent.y.abs();
    let rearmost = |upper: bool| {
        panels
            .iter()
            .enumerate()
            .filter(|(_, p)| chordwise(p))
            .filter(|(_, p)| if upper { p.tangent.x > 0.0 } else { p.tangent.x < 0.0 })
            .max_by(|(_, a), (_, b)| a.control.x.total_cmp(&b.control.x))
            .map(|(i, _)| i)
    };

    match (rearmost(true), rearmost(false)) {
        (Some(u), Some(l)) if u != l => Some((u, l)),
        _ => None,
    }
}
