//! Derived metrics over a trajectory prefix `[0, n)`.
//!
//! The prefix is picked by [`MeasureMode`]. Note that with `n = landed` the
//! final, below-ground sample itself is excluded.

use core::fmt;

use tennis_core::PhysicalParameters;

use crate::simulator::{Sample, Trajectory};

/// Which point of the flight the metrics describe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureMode {
    /// First ground contact.
    FirstContact,
    /// Where the run ended.
    #[default]
    Final,
}

impl From<&str> for MeasureMode {
    fn from(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("first") {
            MeasureMode::FirstContact
        } else {
            MeasureMode::Final
        }
    }
}

impl fmt::Display for MeasureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeasureMode::FirstContact => "FIRST CONTACT",
            MeasureMode::Final => "FINAL LANDING",
        })
    }
}

impl Trajectory {
    /// Sample count the metrics are computed over (at least 1).
    #[must_use]
    pub fn prefix_len(&self, mode: MeasureMode) -> usize {
        let pick = match (mode, self.first_touch) {
            (MeasureMode::FirstContact, Some(i)) if i > 0 => i,
            _ => self.landed.filter(|&i| i > 0).unwrap_or(self.samples.len()),
        };
        pick.max(1)
    }
}

/// Highest y over the first `n` samples.
#[must_use]
pub fn peak_height(samples: &[Sample], n: usize) -> f64 {
    samples[..n.min(samples.len())]
        .iter()
        .fold(f64::NEG_INFINITY, |m, s| m.max(s.pos.y))
}

/// `(x, z)` of sample `n - 1`.
///
/// # Panics
/// If `samples` is empty.
#[must_use]
pub fn landing_point(samples: &[Sample], n: usize) -> (f64, f64) {
    let idx = n.saturating_sub(1).min(samples.len() - 1);
    let p = samples[idx].pos;
    (p.x, p.z)
}

/// Height where the path crosses the plane `x = plane_x`, linearly
/// interpolated on x between the first straddling pair of samples.
/// `None` if the first `n` samples never reach the plane.
#[must_use]
pub fn height_at_x(samples: &[Sample], n: usize, plane_x: f64) -> Option<f64> {
    samples[..n.min(samples.len())].windows(2).find_map(|w| {
        let (a, b) = (w[0].pos, w[1].pos);
        if a.x <= plane_x && plane_x <= b.x {
            let dx = b.x - a.x;
            if dx == 0.0 {
                return Some(a.y);
            }
            let u = (plane_x - a.x) / dx;
            Some(a.y + u * (b.y - a.y))
        } else {
            None
        }
    })
}

/// Everything the report layer prints about one flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightReport {
    pub measure: MeasureMode,
    /// Samples the metrics were computed over.
    pub n: usize,
    pub peak_height: f64,
    pub landing_x: f64,
    pub landing_z: f64,
    /// Height at the net plane, `None` if the ball never got there.
    pub net_crossing_y: Option<f64>,
    pub out_long: bool,
    pub out_wide: bool,
    pub bounced: bool,
    /// `(x, z)` of the first ground contact.
    pub first_contact: Option<(f64, f64)>,
}

impl FlightReport {
    #[must_use]
    pub fn new(traj: &Trajectory, mode: MeasureMode, p: &PhysicalParameters) -> Self {
        let n = traj.prefix_len(mode);
        let (landing_x, landing_z) = landing_point(&traj.samples, n);
        let first_contact = traj
            .first_touch
            .filter(|&i| i > 0)
            .and_then(|i| traj.samples.get(i))
            .map(|s| (s.pos.x, s.pos.z));

        Self {
            measure: mode,
            n,
            peak_height: peak_height(&traj.samples, n),
            landing_x,
            landing_z,
            net_crossing_y: height_at_x(&traj.samples, n, p.net_x),
            out_long: landing_x > p.court_length,
            out_wide: landing_z.abs() > p.half_width(),
            bounced: traj.bounced,
            first_contact,
        }
    }

    /// Whether the ball passes above the net tape. `None` if it never
    /// reaches the net plane.
    #[must_use]
    pub fn clears_net(&self, p: &PhysicalParameters) -> Option<bool> {
        self.net_crossing_y.map(|y| y > p.net_height)
    }
}
