//! Landing cost for one candidate shot. Lower is better.
//!
//!   score = 1.0·net + 10.0·landing + 0.5·energy + 1.0·width + 1.0·lateral
//!
//! The weights and penalty magnitudes are fixed; changing them changes which
//! grid point wins.

use tennis_core::PhysicalParameters;

use crate::OtmConfig;

pub const W_NET: f64 = 1.0;
pub const W_LANDING: f64 = 10.0;
pub const W_ENERGY: f64 = 0.5;
pub const W_WIDTH: f64 = 1.0;
pub const W_LATERAL: f64 = 1.0;

const NET_PENALTY: f64 = 1e6;
const WIDTH_BASE: f64 = 5e5;
const WIDTH_PER_M: f64 = 1e4;
const LANDING_BASE: f64 = 1e5;
const LANDING_PER_M: f64 = 100.0;

/// Landing band starts this far past the net.
const BAND_NET_OFFSET: f64 = 0.5;
/// ...and ends this far short of the far baseline, but never past `BAND_MAX_X`.
const BAND_BASELINE_OFFSET: f64 = 0.57;
const BAND_MAX_X: f64 = 23.2;

/// Where a candidate came down and how it passed the net.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub landing_x: f64,
    pub landing_z: f64,
    pub net_crossing_y: Option<f64>,
    pub speed: f64,
}

/// Valid landing x range `[lo, hi]` for a court.
#[must_use]
pub fn landing_band(p: &PhysicalParameters) -> (f64, f64) {
    (p.net_x + BAND_NET_OFFSET, (p.court_length - BAND_BASELINE_OFFSET).min(BAND_MAX_X))
}

/// Unweighted cost terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostTerms {
    pub net: f64,
    pub landing: f64,
    pub energy: f64,
    pub width: f64,
    pub lateral: f64,
}

impl CostTerms {
    #[must_use]
    pub fn evaluate(o: &Outcome, otm: &OtmConfig, p: &PhysicalParameters) -> Self {
        let clears = o.net_crossing_y.is_some_and(|y| y - p.net_height >= otm.net_margin_m);
        let net = if clears { 0.0 } else { NET_PENALTY };

        let half_w = p.half_width();
        let width = if o.landing_z.abs() <= half_w {
            0.0
        } else {
            WIDTH_BASE + (o.landing_z.abs() - half_w) * WIDTH_PER_M
        };

        let (lo, hi) = landing_band(p);
        let landing = if o.landing_x >= lo && o.landing_x <= hi {
            (o.landing_x - otm.target_x).powi(2)
        } else {
            LANDING_BASE + (o.landing_x - otm.target_x).abs() * LANDING_PER_M
        };

        let lateral = otm.z_weight * (o.landing_z - otm.target_z).powi(2);
        let energy = 0.5 * o.speed * o.speed;

        Self { net, landing, energy, width, lateral }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        W_NET * self.net
            + W_LANDING * self.landing
            + W_ENERGY * self.energy
            + W_WIDTH * self.width
            + W_LATERAL * self.lateral
    }
}

/// Weighted score of one outcome.
#[must_use]
pub fn score(o: &Outcome, otm: &OtmConfig, p: &PhysicalParameters) -> f64 {
    CostTerms::evaluate(o, otm, p).total()
}
