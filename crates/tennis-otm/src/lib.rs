//! tennis-otm
//!
//! "Optimal trajectory match": exhaustive search over launch speed,
//! elevation and azimuth for the shot that best clears the net and lands
//! near a target point inside the court.
//!
//! Scan order is speed (outer), elevation, azimuth (inner). Ties keep the
//! first candidate in that order. With the `parallel` feature the grid
//! points are flown on the rayon pool, but the reduction still walks them
//! in scan order, so results are identical to the sequential search.

pub mod cost;

use serde::{Deserialize, Serialize};
use tennis_core::{LaunchParameters, PhysicalParameters, SimConfig};
use tennis_pointmass::{height_at_x, landing_point, FlightSimulator, MeasureMode};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use cost::{landing_band, score, CostTerms, Outcome};

/// Slack on the inclusive upper bound of an axis.
const AXIS_TOLERANCE: f64 = 1e-9;

/// One search axis, `min..=max` by `step`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl GridAxis {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Axis values by repeated addition from `min`. Empty when a bound is
    /// not finite or the step is not a positive finite number. Stops early
    /// once adding the step no longer changes the value.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        let mut out = Vec::new();
        if !(self.min.is_finite() && self.max.is_finite()) {
            return out;
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return out;
        }
        let mut v = self.min;
        while v <= self.max + AXIS_TOLERANCE {
            out.push(v);
            let next = v + self.step;
            if next <= v {
                break;
            }
            v = next;
        }
        out
    }
}

/// Search ranges and landing targets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtmConfig {
    pub speed: GridAxis,     // m/s
    pub elevation: GridAxis, // deg
    pub azimuth: GridAxis,   // deg
    /// Required height above the net tape (m).
    pub net_margin_m: f64,
    pub target_x: f64,
    pub target_z: f64,
    /// Weight of the squared lateral miss.
    pub z_weight: f64,
}

impl Default for OtmConfig {
    fn default() -> Self {
        Self {
            speed: GridAxis::new(24.0, 34.0, 0.5),
            elevation: GridAxis::new(3.0, 14.0, 0.5),
            azimuth: GridAxis::new(-6.0, 6.0, 0.5),
            net_margin_m: 0.20,
            target_x: 19.0,
            target_z: 0.0,
            z_weight: 8.0,
        }
    }
}

/// Best shot found by a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub speed: f64,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub score: f64,
    pub landing_x: f64,
    pub landing_z: f64,
    pub net_crossing_y: Option<f64>,
}

impl Candidate {
    /// `base` with this candidate's speed and angles.
    #[must_use]
    pub fn launch(&self, base: &LaunchParameters) -> LaunchParameters {
        LaunchParameters {
            speed: self.speed,
            elevation_deg: self.elevation_deg,
            azimuth_deg: self.azimuth_deg,
            ..*base
        }
    }
}

/// Grid search over one fixed simulation config.
///
/// `base` supplies the lateral offset and integration scheme every
/// candidate is flown with.
#[derive(Clone, Copy, Debug)]
pub struct Optimizer {
    sim: FlightSimulator,
    physical: PhysicalParameters,
    otm: OtmConfig,
    base: LaunchParameters,
}

impl Optimizer {
    #[must_use]
    pub fn new(cfg: &SimConfig, otm: &OtmConfig, base: &LaunchParameters) -> Self {
        Self {
            sim: FlightSimulator::new(cfg),
            physical: cfg.physical,
            otm: *otm,
            base: *base,
        }
    }

    /// All grid points in scan order.
    #[must_use]
    pub fn grid(&self) -> Vec<LaunchParameters> {
        let speeds = self.otm.speed.values();
        let elevations = self.otm.elevation.values();
        let azimuths = self.otm.azimuth.values();

        let mut out = Vec::with_capacity(speeds.len() * elevations.len() * azimuths.len());
        for &speed in &speeds {
            for &elevation_deg in &elevations {
                for &azimuth_deg in &azimuths {
                    out.push(LaunchParameters { speed, elevation_deg, azimuth_deg, ..self.base });
                }
            }
        }
        out
    }

    /// Fly one launch and score where it ends up.
    #[must_use]
    pub fn evaluate(&self, launch: &LaunchParameters) -> Candidate {
        let traj = self.sim.run(launch);
        let n = traj.prefix_len(MeasureMode::Final);
        let (landing_x, landing_z) = landing_point(&traj.samples, n);
        let net_crossing_y = height_at_x(&traj.samples, n, self.physical.net_x);
        let outcome = Outcome { landing_x, landing_z, net_crossing_y, speed: launch.speed };

        Candidate {
            speed: launch.speed,
            elevation_deg: launch.elevation_deg,
            azimuth_deg: launch.azimuth_deg,
            score: score(&outcome, &self.otm, &self.physical),
            landing_x,
            landing_z,
            net_crossing_y,
        }
    }

    /// Best candidate, or `None` for an empty grid.
    #[must_use]
    pub fn run(&self) -> Option<Candidate> {
        #[cfg(feature = "parallel")]
        {
            self.run_parallel()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.run_sequential()
        }
    }

    #[must_use]
    pub fn run_sequential(&self) -> Option<Candidate> {
        let grid = self.grid();
        self.log_start(grid.len());
        let best = pick_best(grid.iter().map(|l| self.evaluate(l)));
        log_done(best.as_ref());
        best
    }

    /// Flies the grid on the rayon pool, then reduces in scan order.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn run_parallel(&self) -> Option<Candidate> {
        let grid = self.grid();
        self.log_start(grid.len());
        let scored: Vec<Candidate> = grid.par_iter().map(|l| self.evaluate(l)).collect();
        let best = pick_best(scored);
        log_done(best.as_ref());
        best
    }

    fn log_start(&self, points: usize) {
        info!(
            points,
            speeds = self.otm.speed.values().len(),
            elevations = self.otm.elevation.values().len(),
            azimuths = self.otm.azimuth.values().len(),
            "otm search started"
        );
    }
}

/// First strictly-lowest score wins.
fn pick_best(candidates: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates {
        if best.map_or(true, |b| c.score < b.score) {
            debug!(v0 = c.speed, elev = c.elevation_deg, azim = c.azimuth_deg, score = c.score, "new best");
            best = Some(c);
        }
    }
    best
}

fn log_done(best: Option<&Candidate>) {
    match best {
        Some(b) => info!(
            v0 = b.speed,
            elev = b.elevation_deg,
            azim = b.azimuth_deg,
            score = b.score,
            "otm search finished"
        ),
        None => info!("otm search finished: empty grid"),
    }
}

/* -------------------------------- tests -------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axis_is_inclusive() {
        assert_eq!(GridAxis::new(24.0, 26.0, 1.0).values(), vec![24.0, 25.0, 26.0]);
        assert_eq!(GridAxis::new(0.0, 0.0, 1.0).values(), vec![0.0]);
        let v = GridAxis::new(0.0, 1.0, 0.1).values();
        assert_eq!(v.len(), 11);
        assert_relative_eq!(*v.last().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_axes_are_empty() {
        assert!(GridAxis::new(5.0, 4.0, 1.0).values().is_empty());
        assert!(GridAxis::new(0.0, 1.0, 0.0).values().is_empty());
        assert!(GridAxis::new(0.0, 1.0, -0.5).values().is_empty());
        assert!(GridAxis::new(0.0, 1.0, f64::NAN).values().is_empty());
        assert!(GridAxis::new(0.0, f64::INFINITY, 1.0).values().is_empty());
        assert!(GridAxis::new(f64::NEG_INFINITY, 0.0, 1.0).values().is_empty());
        assert!(GridAxis::new(f64::NAN, 1.0, 1.0).values().is_empty());
    }

    #[test]
    fn step_below_float_spacing_terminates() {
        // 1.0 is below the spacing of f64 around 1e17, so `min + step == min`.
        assert_eq!(GridAxis::new(1e17, 1e17 + 64.0, 1.0).values(), vec![1e17]);
    }

    #[test]
    fn grid_scans_speed_then_elevation_then_azimuth() {
        let otm = OtmConfig {
            speed: GridAxis::new(20.0, 21.0, 1.0),
            elevation: GridAxis::new(5.0, 6.0, 1.0),
            azimuth: GridAxis::new(-1.0, 1.0, 1.0),
            ..OtmConfig::default()
        };
        let opt = Optimizer::new(&SimConfig::default(), &otm, &LaunchParameters::default());
        let grid = opt.grid();
        assert_eq!(grid.len(), 12);
        assert_eq!((grid[0].speed, grid[0].elevation_deg, grid[0].azimuth_deg), (20.0, 5.0, -1.0));
        assert_eq!((grid[1].speed, grid[1].elevation_deg, grid[1].azimuth_deg), (20.0, 5.0, 0.0));
        assert_eq!((grid[3].speed, grid[3].elevation_deg, grid[3].azimuth_deg), (20.0, 6.0, -1.0));
        assert_eq!((grid[6].speed, grid[6].elevation_deg, grid[6].azimuth_deg), (21.0, 5.0, -1.0));
    }

    #[test]
    fn ties_keep_first_found() {
        let mk = |speed: f64, score: f64| Candidate {
            speed,
            elevation_deg: 0.0,
            azimuth_deg: 0.0,
            score,
            landing_x: 0.0,
            landing_z: 0.0,
            net_crossing_y: None,
        };
        let best = pick_best([mk(1.0, 5.0), mk(2.0, 3.0), mk(3.0, 3.0), mk(4.0, 4.0)]).unwrap();
        assert_relative_eq!(best.speed, 2.0);
        assert!(pick_best(Vec::new()).is_none());
    }

    #[test]
    fn candidate_keeps_base_scheme_and_offset() {
        let base = LaunchParameters {
            lateral_offset: 1.5,
            scheme: tennis_core::Scheme::Rk4,
            ..LaunchParameters::default()
        };
        let c = Candidate {
            speed: 25.0,
            elevation_deg: 6.5,
            azimuth_deg: -2.0,
            score: 0.0,
            landing_x: 0.0,
            landing_z: 0.0,
            net_crossing_y: None,
        };
        let l = c.launch(&base);
        assert_eq!(l.scheme, tennis_core::Scheme::Rk4);
        assert_relative_eq!(l.lateral_offset, 1.5);
        assert_relative_eq!(l.speed, 25.0);
    }
}
