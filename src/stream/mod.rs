pub mod integrator;
pub mod runner;
pub mod termination;

pub use integrator::rk4_step;
pub use runner::{integrate_streamline, integrate_streamlines, seed_rake, Streamline, StreamlineConfig};
pub use termination::Termination;
