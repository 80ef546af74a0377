use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::integrator::rk4_step;
use super::termination::{DomainBounds, ExitCondition, StagnationDetector, Termination};
use crate::flow::field::VelocityField;

// ---------------------------------------------------------------------------
// Marching policy
// ---------------------------------------------------------------------------

/// Streamline marching parameters. Lengths are fractions of the
/// characteristic length passed to [`integrate_streamline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    pub step_fraction: f64,           // arc length per step
    pub max_steps: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_abs_max: f64,
    pub stagnation_speed: Option<f64>, // m/s; None disables the early exit
    pub include_seed: bool,
}

impl Default for StreamlineConfig {
    /// Panel-method marching: no stagnation exit.
    fn default() -> Self {
        Self {
            step_fraction: 0.03,
            max_steps: 380,
            x_min: -0.8,
            x_max: 1.6,
            y_abs_max: 1.6,
            stagnation_speed: None,
            include_seed: true,
        }
    }
}

impl StreamlineConfig {
    /// Marching through a bare analytic field, stopping near stagnation.
    pub fn simple() -> Self {
        Self {
            stagnation_speed: Some(1e-3),
            ..Self::default()
        }
    }

    pub fn bounds(&self, length: f64) -> DomainBounds {
        DomainBounds {
            x_min: self.x_min * length,
            x_max: self.x_max * length,
            y_abs_max: self.y_abs_max * length,
        }
    }
}

// ---------------------------------------------------------------------------
// Streamline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streamline {
    pub seed: Point2<f64>,
    pub points: Vec<Point2<f64>>,
    pub termination: Termination,
}

impl Streamline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polyline length.
    pub fn arc_length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// March a tracer from `seed` through `field`.
///
/// The point that first leaves the domain is kept as the final point, so a
/// line drawn from the points reaches the boundary.
pub fn integrate_streamline(
    seed: Point2<f64>,
    field: &impl VelocityField,
    length: f64,
    config: &StreamlineConfig,
) -> Streamline {
    let h = config.step_fraction * length;
    let bounds = config.bounds(length);
    let stagnation = config.stagnation_speed.map(|min_speed| StagnationDetector { min_speed });

    let mut points = Vec::with_capacity(config.max_steps + 1);
    if config.include_seed {
        points.push(seed);
    }

    let mut p = seed;
    let mut termination = Termination::StepBudget;

    for _ in 0..config.max_steps {
        if let Some(t) = stagnation.as_ref().and_then(|d| d.check(&p, field)) {
            termination = t;
            break;
        }

        p = rk4_step(field, &p, h);
        points.push(p);

        if let Some(t) = bounds.check(&p, field) {
            termination = t;
            break;
        }
    }

    log::trace!(
        "streamline from ({:.3}, {:.3}): {} points, {:?}",
        seed.x,
        seed.y,
        points.len(),
        termination
    );

    Streamline { seed, points, termination }
}

/// Seeds evenly spread across the stream, upstream of the body.
pub fn seed_rake(count: usize, length: f64, config: &StreamlineConfig) -> Vec<Point2<f64>> {
    if count == 0 {
        return Vec::new();
    }
    let x = (config.x_min + 0.05) * length;
    let half_span = 0.75 * config.y_abs_max * length;
    if count == 1 {
        return vec![Point2::new(x, 0.0)];
    }
    (0..count)
        .map(|i| {
            let f = i as f64 / (count - 1) as f64;
            Point2::new(x, -half_span + 2.0 * half_span * f)
        })
        .collect()
}

/// Integrate one streamline per seed, in seed order.
pub fn integrate_streamlines(
    seeds: &[Point2<f64>],
    field: &impl VelocityField,
    length: f64,
    config: &StreamlineConfig,
) -> Vec<Streamline> {
    seeds
        .iter()
        .map(|&seed| integrate_streamline(seed, field, length, config))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
