use nalgebra::Point2;

use super::naca::AirfoilSurface;

/// Distance under which the first and last contour points count as one.
pub const CLOSURE_TOLERANCE: f64 = 1e-6;

/// Upper surface followed by the lower surface reversed: one continuous
/// traversal leading edge → trailing edge → leading edge.
/// Orientation is normalized later by the panel assembler.
pub fn build_contour(surface: &AirfoilSurface) -> Vec<Point2<f64>> {
    let mut contour = Vec::with_capacity(surface.upper.len() + surface.lower.len());
    contour.extend_from_slice(&surface.upper);
    contour.extend(surface.lower.iter().rev().copied());
    contour
}

/// Append the first point when the loop is open.
pub fn close_loop(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut closed = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if (first - last).norm() > CLOSURE_TOLERANCE {
            closed.push(*first);
        }
    }
    closed
}

/// Shoelace signed area. Positive for counter-clockwise loops.
/// The loop is treated as closed whether or not the last point repeats the first.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    0.5 * twice
}

/// Drop points lying within `min_gap` of the previously kept point. The last
/// input point always ends the result, so a closed loop stays closed.
pub fn drop_near_duplicates(points: &[Point2<f64>], min_gap: f64) -> Vec<Point2<f64>> {
    let mut kept: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        match kept.last() {
            Some(last) if (p - last).norm() <= min_gap => {}
            _ => kept.push(*p),
        }
    }
    if kept.len() > 1 {
        if let (Some(end), Some(last)) = (points.last(), kept.last_mut()) {
            *last = *end;
        }
    }
    kept
}

/// Closed copy of `points` traversed clockwise.
pub fn clockwise_loop(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut closed = close_loop(points);
    if signed_area(&closed) > 0.0 {
        closed.reverse();
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::naca::{generate_airfoil, AirfoilParams};
    use approx::assert_relative_eq;

    fn unit_square_ccw() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn contour_runs_upper_then_lower_reversed() {
        let s = generate_airfoil(&AirfoilParams::default());
        let c = build_contour(&s);
        assert_eq!(c.len(), 2 * s.len());
        assert_eq!(c[0], s.upper[0]);
        assert_eq!(c[s.len() - 1], *s.upper.last().unwrap());
        assert_eq!(c[s.len()], *s.lower.last().unwrap());
        assert_eq!(*c.last().unwrap(), s.lower[0]);
    }

    #[test]
    fn airfoil_contour_is_already_closed_and_clockwise() {
        let c = build_contour(&generate_airfoil(&AirfoilParams::default()));
        assert!(signed_area(&c) < 0.0);
        assert_eq!(close_loop(&c).len(), c.len());
    }

    #[test]
    fn shoelace_area_sign() {
        let mut sq = unit_square_ccw();
        assert_relative_eq!(signed_area(&sq), 1.0);
        sq.reverse();
        assert_relative_eq!(signed_area(&sq), -1.0);
    }

    #[test]
    fn open_loop_gets_closed() {
        let closed = close_loop(&unit_square_ccw());
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[0], closed[4]);
    }

    #[test]
    fn nearly_closed_loop_is_left_alone() {
        let mut pts = unit_square_ccw();
        pts.push(Point2::new(0.0, 5e-7));
        assert_eq!(close_loop(&pts).len(), 5);
    }

    #[test]
    fn near_duplicates_are_merged() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1e-14),
            Point2::new(0.0, 1.0),
            Point2::new(1e-14, 1.0),
        ];
        let kept = drop_near_duplicates(&pts, 1e-10);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[1], pts[1]);
        // the final point replaces its near twin
        assert_eq!(kept[2], pts[4]);
    }

    #[test]
    fn counter_clockwise_input_is_reversed() {
        let cw = clockwise_loop(&unit_square_ccw());
        assert!(signed_area(&cw) < 0.0);
        assert_eq!(cw.first(), cw.last());
    }
}
