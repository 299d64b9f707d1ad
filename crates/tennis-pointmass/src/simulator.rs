//! Stepping loop with ground contact, bounce and termination.
//!
//! Per step, in order:
//!   1. advance one `dt` with the configured scheme;
//!   2. on `y <= 0`: remember the first-touch index, then either bounce
//!      (bounces left and moving down) or settle and stop;
//!   3. append the sample;
//!   4. stop if x passed `court_length + overrun_margin_m`;
//!   5. give up at `max_steps` samples, leaving `landed` unset.

use tennis_core::{BounceParameters, LaunchParameters, Limits, SimConfig, Vec3};
use tennis_models::ForceModel;
use tracing::{debug, trace};

use crate::integrator::{stepper, State};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Airborne,
    Bouncing,
    Terminated,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Touched the ground with no bounce left (or while moving up).
    Settled,
    /// Flew past the far end of the court.
    Overrun,
    /// Hit the iteration cap.
    StepCap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub pos: Vec3,
    pub vel: Vec3,
}

impl From<&State> for Sample {
    fn from(s: &State) -> Self {
        Self { t: s.t, pos: s.pos, vel: s.vel }
    }
}

/// Output of one run. Index 0 is the launch state.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub samples: Vec<Sample>,
    /// Index of the final sample when the run settled or overran.
    pub landed: Option<usize>,
    /// Index of the first sample at or below the ground.
    pub first_touch: Option<usize>,
    pub bounced: bool,
    pub phase: Phase,
    pub stop: StopReason,
}

impl Trajectory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Bounce in place: clamp to the ground, reflect and damp, use one bounce.
pub fn apply_bounce(s: &mut State, bounce: &BounceParameters) {
    s.pos.y = 0.0;
    s.vel = bounce.rebound(s.vel);
    s.bounces_left = s.bounces_left.saturating_sub(1);
}

/// Runs launches against one fixed configuration.
#[derive(Clone, Copy, Debug)]
pub struct FlightSimulator {
    forces: ForceModel,
    bounce: BounceParameters,
    limits: Limits,
}

impl FlightSimulator {
    #[must_use]
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            forces: ForceModel::new(&cfg.physical, &cfg.environment),
            bounce: cfg.bounce,
            limits: cfg.limits,
        }
    }

    #[must_use]
    pub fn forces(&self) -> &ForceModel {
        &self.forces
    }

    #[must_use]
    pub fn launch_state(&self, launch: &LaunchParameters) -> State {
        State {
            pos: launch.initial_position(self.forces.physical()),
            vel: launch.initial_velocity(),
            t: 0.0,
            bounces_left: self.bounce.max_bounces,
        }
    }

    #[must_use]
    pub fn run(&self, launch: &LaunchParameters) -> Trajectory {
        let p = self.forces.physical();
        let h = p.dt;
        let step = stepper(launch.scheme);
        let overrun_x = p.court_length + self.limits.overrun_margin_m;

        let mut s = self.launch_state(launch);
        let mut samples = Vec::with_capacity(self.limits.max_steps.min(4096));
        samples.push(Sample::from(&s));

        let mut phase = Phase::Airborne;
        let mut first_touch = None;
        let mut landed = None;
        let mut bounced = false;
        let mut stop = StopReason::StepCap;

        for i in 1..self.limits.max_steps {
            s = step.step(&self.forces, &s, h);

            if s.pos.y <= 0.0 {
                first_touch.get_or_insert(i);

                if s.bounces_left > 0 && s.vel.y < 0.0 {
                    apply_bounce(&mut s, &self.bounce);
                    bounced = true;
                    phase = Phase::Bouncing;
                    trace!(step = i, x = s.pos.x, vy = s.vel.y, left = s.bounces_left, "bounce");
                } else {
                    samples.push(Sample::from(&s));
                    landed = Some(i);
                    phase = Phase::Terminated;
                    stop = StopReason::Settled;
                    break;
                }
            }

            samples.push(Sample::from(&s));

            if s.pos.x > overrun_x {
                landed = Some(i);
                phase = Phase::Terminated;
                stop = StopReason::Overrun;
                break;
            }
        }

        debug!(
            scheme = %launch.scheme,
            ?stop,
            samples = samples.len(),
            x = s.pos.x,
            z = s.pos.z,
            t = s.t,
            "flight finished"
        );

        Trajectory { samples, landed, first_touch, bounced, phase, stop }
    }
}

/* ----------------------------------- tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tennis_core::{EnvironmentParameters, PhysicalParameters, Scheme};

    fn calm(physical: PhysicalParameters, bounce: BounceParameters) -> SimConfig {
        SimConfig {
            physical,
            environment: EnvironmentParameters { spin: Vec3::zero(), ..EnvironmentParameters::default() },
            bounce,
            limits: Limits::default(),
        }
    }

    #[test]
    fn bounce_reflects_damps_and_counts() {
        let bounce = BounceParameters { max_bounces: 2, restitution: 0.65, tangential_loss: 0.10 };
        let mut s = State {
            pos: Vec3::new(15.0, -0.01, 0.2),
            vel: Vec3::new(10.0, -5.0, 0.0),
            t: 1.0,
            bounces_left: 2,
        };
        apply_bounce(&mut s, &bounce);
        assert_eq!(s.pos.y, 0.0);
        assert_relative_eq!(s.vel.y, 3.25, epsilon = 1e-12);
        assert_relative_eq!(s.vel.x, 9.0, epsilon = 1e-12);
        assert_eq!(s.bounces_left, 1);
    }

    #[test]
    fn settles_without_bounce() {
        let sim = FlightSimulator::new(&calm(PhysicalParameters::default(), BounceParameters::default()));
        let traj = sim.run(&LaunchParameters { speed: 20.0, elevation_deg: 5.0, ..LaunchParameters::default() });
        assert_eq!(traj.stop, StopReason::Settled);
        assert_eq!(traj.phase, Phase::Terminated);
        assert_eq!(traj.landed, Some(traj.len() - 1));
        assert_eq!(traj.first_touch, traj.landed);
        assert!(!traj.bounced);
        assert!(traj.samples.last().unwrap().pos.y <= 0.0);
    }

    #[test]
    fn single_bounce_continues_flight() {
        let bounce = BounceParameters { max_bounces: 1, ..BounceParameters::default() };
        let sim = FlightSimulator::new(&calm(PhysicalParameters::default(), bounce));
        let traj = sim.run(&LaunchParameters { speed: 15.0, elevation_deg: 5.0, ..LaunchParameters::default() });
        assert!(traj.bounced);
        let touch = traj.first_touch.unwrap();
        assert_eq!(traj.samples[touch].pos.y, 0.0);
        assert!(traj.samples[touch].vel.y > 0.0);
        let landed = traj.landed.unwrap();
        assert!(landed > touch);
        assert!(traj.samples[touch + 1].pos.y > 0.0);
    }

    #[test]
    fn time_strictly_increases() {
        let bounce = BounceParameters { max_bounces: 3, ..BounceParameters::default() };
        let sim = FlightSimulator::new(&calm(PhysicalParameters::default(), bounce));
        let traj = sim.run(&LaunchParameters { speed: 12.0, scheme: Scheme::Rk4, ..LaunchParameters::default() });
        assert!(traj.samples.windows(2).all(|w| w[1].t > w[0].t));
    }

    #[test]
    fn launched_underground_terminates_immediately() {
        let physical = PhysicalParameters { y0: -0.5, ..PhysicalParameters::default() };
        let sim = FlightSimulator::new(&calm(physical, BounceParameters::default()));
        let traj = sim.run(&LaunchParameters::default());
        assert_eq!(traj.landed, Some(1));
        assert_eq!(traj.first_touch, Some(1));
        assert_eq!(traj.len(), 2);
    }

    #[test]
    fn overrun_stops_past_far_baseline() {
        let physical = PhysicalParameters { cd: 0.0, cl: 0.0, g: 0.0, ..PhysicalParameters::default() };
        let sim = FlightSimulator::new(&calm(physical, BounceParameters::default()));
        let traj = sim.run(&LaunchParameters { speed: 30.0, elevation_deg: 0.0, ..LaunchParameters::default() });
        assert_eq!(traj.stop, StopReason::Overrun);
        assert_eq!(traj.landed, Some(traj.len() - 1));
        let last = traj.samples.last().unwrap();
        assert!(last.pos.x > 23.77 + 5.0);
        assert!(traj.samples[traj.len() - 2].pos.x <= 23.77 + 5.0);
    }

    #[test]
    fn hovering_ball_hits_step_cap() {
        let physical = PhysicalParameters { cd: 0.0, cl: 0.0, g: 0.0, ..PhysicalParameters::default() };
        let mut cfg = calm(physical, BounceParameters::default());
        cfg.limits.max_steps = 500;
        let sim = FlightSimulator::new(&cfg);
        let traj = sim.run(&LaunchParameters { speed: 0.0, ..LaunchParameters::default() });
        assert_eq!(traj.stop, StopReason::StepCap);
        assert_eq!(traj.landed, None);
        assert_eq!(traj.phase, Phase::Airborne);
        assert_eq!(traj.len(), 500);
    }
}
