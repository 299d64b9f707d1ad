//! tennis-pointmass
//!
//! Point-mass flight solver for a struck tennis ball.
//! - Forces come from `tennis_models::ForceModel` (drag, Magnus, gravity),
//!   with wind and spin decay from the environment model.
//! - Explicit Euler or classical RK4 at a fixed `dt`, both behind the
//!   [`Stepper`] trait.
//! - Ground contact runs a small state machine: bounce (restitution +
//!   sliding loss) while bounces remain, otherwise settle.
//! - Metrics over a trajectory prefix: peak height, landing (x, z), and
//!   height at the net plane by linear interpolation on x.
//!
//! Conventions:
//! - x downrange from the hitter's baseline, y up, z to the right.
//! - Angles in degrees at the API, radians internally.
//!
//! ```no_run
//! use tennis_core::{LaunchParameters, SimConfig};
//! use tennis_pointmass::{FlightReport, FlightSimulator, MeasureMode};
//!
//! let cfg = SimConfig::default();
//! let traj = FlightSimulator::new(&cfg).run(&LaunchParameters::default());
//! let report = FlightReport::new(&traj, MeasureMode::Final, &cfg.physical);
//! println!("lands at x = {:.2} m", report.landing_x);
//! ```

pub mod integrator;
pub mod metrics;
pub mod simulator;

pub use integrator::{stepper, Derivative, Dynamics, Euler, Rk4, State, Stepper};
pub use metrics::{height_at_x, landing_point, peak_height, FlightReport, MeasureMode};
pub use simulator::{apply_bounce, FlightSimulator, Phase, Sample, StopReason, Trajectory};

use tennis_core::{LaunchParameters, SimConfig};

/// One-shot convenience: build a simulator for `cfg` and fly `launch`.
#[must_use]
pub fn simulate(cfg: &SimConfig, launch: &LaunchParameters) -> Trajectory {
    FlightSimulator::new(cfg).run(launch)
}
