use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::flow::field::VelocityField;

// ---------------------------------------------------------------------------
// Why a streamline stopped
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The step budget ran out.
    StepBudget,
    /// The tracer crossed one of the domain bounds.
    LeftDomain,
    /// Local speed fell below the stagnation threshold.
    Stagnation,
}

/// Inspects the tracer position and reports a reason to stop. Conditions
/// that depend on the local flow sample `field` themselves.
pub trait ExitCondition {
    fn check<F: VelocityField>(&self, point: &Point2<f64>, field: &F) -> Option<Termination>;
}

/// Rectangular window scaled by a characteristic length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_abs_max: f64,
}

impl DomainBounds {
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y.abs() <= self.y_abs_max
    }
}

impl ExitCondition for DomainBounds {
    fn check<F: VelocityField>(&self, point: &Point2<f64>, _field: &F) -> Option<Termination> {
        if self.contains(point) { None } else { Some(Termination::LeftDomain) }
    }
}

/// Stops a tracer that has stalled near a stagnation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagnationDetector {
    pub min_speed: f64,
}

impl ExitCondition for StagnationDetector {
    fn check<F: VelocityField>(&self, point: &Point2<f64>, field: &F) -> Option<Termination> {
        let speed = field.velocity_at(point).norm();
        if speed < self.min_speed { Some(Termination::Stagnation) } else { None }
    }
}
