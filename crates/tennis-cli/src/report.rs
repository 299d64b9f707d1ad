//! Plain-text flight report printed to stdout.

use core::fmt;

use tennis_core::{LaunchParameters, SimConfig};
use tennis_otm::Candidate;
use tennis_pointmass::{FlightReport, MeasureMode};

/// One simulated shot, ready for printing.
pub struct ShotReport<'a> {
    pub cfg: &'a SimConfig,
    pub launch: &'a LaunchParameters,
    pub flight: &'a FlightReport,
}

impl fmt::Display for ShotReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.cfg.physical;
        let env = &self.cfg.environment;
        let bounce = &self.cfg.bounce;
        let l = self.launch;
        let r = self.flight;

        writeln!(f, "=== Trajectory ({}) 3D ===", l.scheme)?;
        writeln!(
            f,
            "Launch: v0={:.2} m/s @ elev={:.1} deg, azim={:.1} deg, y0={:.2} m, z0={:.2} m",
            l.speed, l.elevation_deg, l.azimuth_deg, p.y0, l.lateral_offset
        )?;
        writeln!(
            f,
            "Wind: (x={:.2}, y={:.2} + gustA={:.2} @ {:.2}Hz, z={:.2})",
            env.wind.x, env.wind.y, env.gust.amplitude, env.gust.frequency_hz, env.wind.z
        )?;
        writeln!(f, "[{}]", r.measure)?;
        writeln!(f, "Peak y ~ {:.2} m", r.peak_height)?;
        writeln!(f, "Landing ~ x:{:.2} m, z:{:.2} m", r.landing_x, r.landing_z)?;

        if r.out_long {
            writeln!(f, "Court out (length): x={:.2} m > {}", r.landing_x, p.court_length)?;
        }
        if r.out_wide {
            writeln!(f, "Court out (width): |z|={:.2} m > {}", r.landing_z.abs(), p.half_width())?;
        }

        match r.net_crossing_y {
            None => writeln!(f, "Net check: ball lands before net plane (x={:.3})", p.net_x)?,
            Some(y) => {
                let rel = if y > p.net_height { ">" } else { "<=" };
                writeln!(f, "Net check: y(x={:.3}) = {y:.2} {rel} {}", p.net_x, p.net_height)?;
            }
        }

        if r.bounced {
            writeln!(
                f,
                "Bounce: e={}, mu={} (max {})",
                bounce.restitution, bounce.tangential_loss, bounce.max_bounces
            )?;
        }
        if let (MeasureMode::Final, Some((x, z))) = (r.measure, r.first_contact) {
            writeln!(f, "First contact at x={x:.2} m, z={z:.2} m (use --measure first to report this point)")?;
        }
        Ok(())
    }
}

/// One-line summary of a search result.
pub struct CandidateSummary<'a>(pub &'a Candidate);

impl fmt::Display for CandidateSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(
            f,
            "OTM result: v0={:.2} m/s, elev={:.1} deg, azim={:.1} deg, land~(x:{:.2}, z:{:.2}), ",
            c.speed, c.elevation_deg, c.azimuth_deg, c.landing_x, c.landing_z
        )?;
        match c.net_crossing_y {
            Some(y) => write!(f, "y_net~{y:.2} m")?,
            None => f.write_str("y_net=none")?,
        }
        write!(f, ", score={:.1}", c.score)
    }
}
