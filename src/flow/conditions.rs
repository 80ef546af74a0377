use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Numerical floors shared by the solver and the field evaluator
// ---------------------------------------------------------------------------

/// Freestream speed below which Cp normalization is floored, m/s.
pub const MIN_FREESTREAM_SPEED: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Freestream conditions
// ---------------------------------------------------------------------------

/// Uniform onset flow seen by the airfoil.
/// Frame: x along the chord (leading edge to trailing edge), y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConditions {
    pub speed: f64, // m/s
    pub alpha: f64, // rad, positive = nose up relative to the stream
}

impl FlowConditions {
    pub fn new(speed: f64, alpha: f64) -> Self {
        Self { speed, alpha }
    }

    pub fn from_degrees(speed: f64, alpha_deg: f64) -> Self {
        Self::new(speed, alpha_deg.to_radians())
    }

    /// Freestream velocity vector.
    pub fn velocity(&self) -> Vector2<f64> {
        freestream(self.speed, self.alpha)
    }

    /// Unit vector along the freestream (drag direction).
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.alpha.cos(), self.alpha.sin())
    }

    /// Unit vector perpendicular to the freestream (lift direction).
    pub fn lift_direction(&self) -> Vector2<f64> {
        Vector2::new(-self.alpha.sin(), self.alpha.cos())
    }

    /// Speed used to normalize pressure coefficients.
    pub fn reference_speed(&self) -> f64 {
        self.speed.max(MIN_FREESTREAM_SPEED)
    }
}

impl Default for FlowConditions {
    fn default() -> Self {
        Self {
            speed: 40.0,
            alpha: 5.0_f64.to_radians(),
        }
    }
}

pub fn freestream(speed: f64, alpha: f64) -> Vector2<f64> {
    Vector2::new(speed * alpha.cos(), speed * alpha.sin())
}
