use std::f64::consts::PI;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NACA 4-digit shape parameters
// ---------------------------------------------------------------------------

pub const MIN_POINT_COUNT: usize = 20;
const MIN_CHORD: f64 = 1e-6; // m

/// Shape of a NACA 4-digit section. Fractions are of the chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfoilParams {
    pub max_camber: f64,      // m, e.g. 0.02 for a 2412
    pub camber_location: f64, // p, e.g. 0.4 for a 2412
    pub thickness: f64,       // t, e.g. 0.12 for a 2412
    pub chord: f64,           // m
    pub point_count: usize,   // chordwise stations per surface (count + 1 points)
}

impl Default for AirfoilParams {
    fn default() -> Self {
        Self {
            max_camber: 0.02,
            camber_location: 0.4,
            thickness: 0.12,
            chord: 1.0,
            point_count: 80,
        }
    }
}

impl AirfoilParams {
    pub fn builder() -> AirfoilBuilder {
        AirfoilBuilder::new()
    }

    /// Parse a four digit designation such as `"2412"` (an optional `NACA`
    /// prefix is accepted). Chord and point count keep their defaults.
    pub fn from_naca_code(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        let digits = trimmed
            .strip_prefix("NACA")
            .or_else(|| trimmed.strip_prefix("naca"))
            .unwrap_or(trimmed)
            .trim();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let m: f64 = digits[0..1].parse().ok()?;
        let p: f64 = digits[1..2].parse().ok()?;
        let t: f64 = digits[2..4].parse().ok()?;
        Some(Self {
            max_camber: m / 100.0,
            camber_location: p / 10.0,
            thickness: t / 100.0,
            ..Self::default()
        })
    }

    /// Four digit designation, rounded to the nearest representable section.
    pub fn naca_code(&self) -> String {
        let p = self.clamped();
        format!(
            "{}{}{:02}",
            (p.max_camber * 100.0).round().min(9.0) as u32,
            (p.camber_location * 10.0).round().min(9.0) as u32,
            (p.thickness * 100.0).round().min(99.0) as u32,
        )
    }

    /// Copy with every field forced into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            max_camber: clamp_unit(self.max_camber),
            camber_location: clamp_unit(self.camber_location),
            thickness: clamp_unit(self.thickness),
            chord: if self.chord.is_finite() { self.chord.max(MIN_CHORD) } else { 1.0 },
            point_count: self.point_count.max(MIN_POINT_COUNT),
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct AirfoilBuilder {
    params: AirfoilParams,
}

impl AirfoilBuilder {
    pub fn new() -> Self {
        Self { params: AirfoilParams::default() }
    }

    pub fn max_camber(mut self, v: f64) -> Self { self.params.max_camber = v; self }
    pub fn camber_location(mut self, v: f64) -> Self { self.params.camber_location = v; self }
    pub fn thickness(mut self, v: f64) -> Self { self.params.thickness = v; self }
    pub fn chord(mut self, v: f64) -> Self { self.params.chord = v; self }
    pub fn point_count(mut self, v: usize) -> Self { self.params.point_count = v; self }

    /// Fractional station counts are floored before use.
    pub fn point_count_f64(mut self, v: f64) -> Self {
        self.params.point_count = if v.is_finite() && v > 0.0 { v.floor() as usize } else { 0 };
        self
    }

    pub fn build(self) -> AirfoilParams {
        self.params.clamped()
    }
}

impl Default for AirfoilBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Surface generation
// ---------------------------------------------------------------------------

/// Upper, lower and mean-line points at cosine-spaced stations.
///
/// Station `i` shares one camber-line angle across the three sequences, not
/// one x coordinate: thickness is applied along the camber normal.
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilSurface {
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
    pub camber: Vec<Point2<f64>>,
}

impl AirfoilSurface {
    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }
}

/// Generate a NACA 4-digit section. Out-of-range parameters are clamped.
pub fn generate_airfoil(params: &AirfoilParams) -> AirfoilSurface {
    let p = params.clamped();
    let count = p.point_count;

    let mut upper = Vec::with_capacity(count + 1);
    let mut lower = Vec::with_capacity(count + 1);
    let mut camber = Vec::with_capacity(count + 1);

    for i in 0..=count {
        let theta = PI * i as f64 / count as f64;
        let x = 0.5 * (1.0 - theta.cos());

        let (yc, slope) = mean_line(x, p.max_camber, p.camber_location);
        let yt = half_thickness(x, p.thickness);
        let (sin, cos) = slope.atan().sin_cos();

        upper.push(Point2::new(x - yt * sin, yc + yt * cos) * p.chord);
        lower.push(Point2::new(x + yt * sin, yc - yt * cos) * p.chord);
        camber.push(Point2::new(x, yc) * p.chord);
    }

    AirfoilSurface { upper, lower, camber }
}

/// Mean-line ordinate and slope at chord fraction `x`.
/// The two parabolic arcs meet at `x = p`; a zero `m` or `p` gives a flat line.
pub fn mean_line(x: f64, m: f64, p: f64) -> (f64, f64) {
    if m <= 0.0 || p <= 0.0 {
        return (0.0, 0.0);
    }
    if x < p || p >= 1.0 {
        let k = m / (p * p);
        (k * (2.0 * p * x - x * x), 2.0 * k * (p - x))
    } else {
        let k = m / ((1.0 - p) * (1.0 - p));
        (k * (1.0 - 2.0 * p + 2.0 * p * x - x * x), 2.0 * k * (p - x))
    }
}

/// Half thickness at chord fraction `x`, closed trailing edge form: the
/// last coefficient is 0.1036 so both surfaces meet at `x = 1`.
pub fn half_thickness(x: f64, t: f64) -> f64 {
    let x = x.max(0.0);
    let yt = 5.0 * t * (0.2969 * x.sqrt() + x * (-0.1260 + x * (-0.3516 + x * (0.2843 - 0.1036 * x))));
    yt.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(1.00, 0.0)]
    #[test_case(0.84, 0.021066)]
    #[test_case(0.52, 0.051543)]
    #[test_case(0.36, 0.059242)]
    #[test_case(0.20, 0.057373)]
    #[test_case(0.04, 0.032277)]
    fn naca_0012_half_thickness(x: f64, expected: f64) {
        assert_relative_eq!(half_thickness(x, 0.12), expected, epsilon = 1e-5);
    }

    #[test]
    fn trailing_edge_is_closed() {
        let s = generate_airfoil(&AirfoilParams::default());
        let gap = (s.upper.last().unwrap() - s.lower.last().unwrap()).norm();
        assert!(gap < 1e-15, "trailing edge gap {}", gap);
        assert!(half_thickness(1.0, 0.3) >= 0.0);
    }

    #[test_case(0.1, 0.0556)]
    #[test_case(0.3, 0.0788)]
    #[test_case(0.5, 0.0723)]
    #[test_case(0.9, 0.0198)]
    fn naca_2412_upper_ordinate(x: f64, expected: f64) {
        let (yc, _) = mean_line(x, 0.02, 0.4);
        assert_relative_eq!(yc + half_thickness(x, 0.12), expected, epsilon = 1e-3);
    }

    #[test]
    fn mean_line_is_continuous_at_max_camber() {
        let (y0, s0) = mean_line(0.4 - 1e-9, 0.02, 0.4);
        let (y1, s1) = mean_line(0.4, 0.02, 0.4);
        assert_relative_eq!(y0, y1, epsilon = 1e-8);
        assert_relative_eq!(y1, 0.02, epsilon = 1e-12);
        assert_relative_eq!(s0, s1, epsilon = 1e-6);
    }

    #[test]
    fn flat_plate_has_coincident_surfaces() {
        let params = AirfoilParams::builder().max_camber(0.0).thickness(0.0).build();
        let s = generate_airfoil(&params);
        assert_eq!(s.upper, s.lower);
        assert!(s.upper.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn surfaces_have_count_plus_one_points() {
        let params = AirfoilParams::builder().point_count(40).build();
        let s = generate_airfoil(&params);
        assert_eq!(s.upper.len(), 41);
        assert_eq!(s.lower.len(), 41);
        assert_eq!(s.camber.len(), 41);
    }

    #[test]
    fn stations_cluster_at_edges() {
        let s = generate_airfoil(&AirfoilParams::default());
        let first_gap = s.camber[1].x - s.camber[0].x;
        let mid = s.len() / 2;
        let mid_gap = s.camber[mid + 1].x - s.camber[mid].x;
        assert!(first_gap < mid_gap / 10.0);
    }

    #[test]
    fn cambered_surfaces_diverge_in_x() {
        let s = generate_airfoil(&AirfoilParams::default());
        let diverging = s.upper.iter().zip(&s.lower).filter(|(u, l)| (u.x - l.x).abs() > 1e-9).count();
        assert!(diverging > 0, "Normal offset should separate upper/lower x");
    }

    #[test]
    fn parameters_are_clamped() {
        let params = AirfoilParams {
            max_camber: -0.5,
            camber_location: 3.0,
            thickness: f64::NAN,
            chord: -2.0,
            point_count: 3,
        }
        .clamped();
        assert_eq!(params.max_camber, 0.0);
        assert_eq!(params.camber_location, 1.0);
        assert_eq!(params.thickness, 0.0);
        assert!(params.chord > 0.0);
        assert_eq!(params.point_count, MIN_POINT_COUNT);
    }

    #[test]
    fn fractional_point_count_is_floored() {
        let params = AirfoilParams::builder().point_count_f64(57.9).build();
        assert_eq!(params.point_count, 57);
    }

    #[test]
    fn chord_scales_geometry() {
        let unit = generate_airfoil(&AirfoilParams::default());
        let big = generate_airfoil(&AirfoilParams { chord: 2.5, ..AirfoilParams::default() });
        assert_relative_eq!(big.upper[10].y, unit.upper[10].y * 2.5, epsilon = 1e-12);
        assert_relative_eq!(big.camber.last().unwrap().x, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn naca_code_round_trip() {
        let p = AirfoilParams::from_naca_code("NACA 4415").unwrap();
        assert_relative_eq!(p.max_camber, 0.04);
        assert_relative_eq!(p.camber_location, 0.4);
        assert_relative_eq!(p.thickness, 0.15);
        assert_eq!(p.naca_code(), "4415");
        assert!(AirfoilParams::from_naca_code("24x2").is_none());
        assert!(AirfoilParams::from_naca_code("23012").is_none());
    }
}
