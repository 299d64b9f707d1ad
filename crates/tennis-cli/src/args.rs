//! Command-line flags and how they override the loaded config.
//!
//! Precedence: flag > `--config` file > built-in default. Every physics flag
//! is optional so an absent flag leaves the config value alone.

use std::path::PathBuf;

use clap::{Args, Parser};
use tennis_core::{ConfigError, Scheme};

use crate::config::RunConfig;

/// Tennis ball flight: drag, Magnus, wind/gust, spin decay, bounce, OTM search.
#[derive(Parser, Debug)]
#[command(name = "tennis")]
#[command(author, version, about = "Tennis ball flight simulator (Euler/RK4) with net/court checks and OTM search", long_about = None)]
pub struct Cli {
    /// JSON config file (physical, environment, bounce, limits, launch, otm)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Report point: "first" (first ground contact) or "final"
    #[arg(long, default_value = "final")]
    pub measure: String,

    /// Export the measured trajectory (.csv or .json)
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub launch: LaunchArgs,

    #[command(flatten)]
    pub physics: PhysicsArgs,

    #[command(flatten)]
    pub environment: EnvironmentArgs,

    #[command(flatten)]
    pub bounce: BounceArgs,

    #[command(flatten)]
    pub otm: OtmArgs,
}

#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// Launch speed [m/s] (default 28)
    #[arg(long = "v0")]
    pub v0: Option<f64>,
    /// Elevation angle [deg] (default 6)
    #[arg(long)]
    pub deg: Option<f64>,
    /// Azimuth angle [deg], +z to the right (default 0)
    #[arg(long, allow_negative_numbers = true)]
    pub phi: Option<f64>,
    /// Initial lateral position [m] (default 0)
    #[arg(long = "z0", allow_negative_numbers = true)]
    pub z0: Option<f64>,
    /// Integration scheme: euler | rk4 (unknown names fall back to euler)
    #[arg(long)]
    pub integrator: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PhysicsArgs {
    /// Air density [kg/m^3] (default 1.225)
    #[arg(long)]
    pub rho: Option<f64>,
    /// Ball cross-section [m^2] (default 0.0034)
    #[arg(long)]
    pub area: Option<f64>,
    /// Drag coefficient (default 0.47)
    #[arg(long)]
    pub cd: Option<f64>,
    /// Base lift coefficient (default 0.20)
    #[arg(long)]
    pub cl: Option<f64>,
    /// Ball mass [kg] (default 0.057)
    #[arg(long)]
    pub mass: Option<f64>,
    /// Gravity [m/s^2] (default 9.81)
    #[arg(long = "g")]
    pub g: Option<f64>,
    /// Time step [s] (default 0.005)
    #[arg(long)]
    pub dt: Option<f64>,
    /// Launch height [m] (default 2.5)
    #[arg(long = "y0")]
    pub y0: Option<f64>,
    /// Ball radius [m] (default 0.033)
    #[arg(long)]
    pub radius: Option<f64>,
    /// Net plane x [m] (default 11.885)
    #[arg(long)]
    pub net_x: Option<f64>,
    /// Net height [m] (default 0.914)
    #[arg(long)]
    pub net_h: Option<f64>,
    /// Court width [m]: singles 8.23 (default), doubles 10.97
    #[arg(long)]
    pub court_w: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct EnvironmentArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub spin_x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub spin_y: Option<f64>,
    /// Spin about z (default 100)
    #[arg(long, allow_negative_numbers = true)]
    pub spin_z: Option<f64>,
    /// Shorthand for --spin-z
    #[arg(long, allow_negative_numbers = true)]
    pub spin: Option<f64>,
    /// Spin decay time constant [s] (default 4)
    #[arg(long)]
    pub tau: Option<f64>,
    /// Constant wind x [m/s]
    #[arg(long, alias = "wind", allow_negative_numbers = true)]
    pub wind_x: Option<f64>,
    /// Constant wind y [m/s] (replaced by the gust when --gust-a != 0)
    #[arg(long, allow_negative_numbers = true)]
    pub wind_y: Option<f64>,
    /// Constant wind z [m/s]
    #[arg(long, allow_negative_numbers = true)]
    pub wind_z: Option<f64>,
    /// Vertical gust amplitude [m/s] (default 0 = off)
    #[arg(long, alias = "gust")]
    pub gust_a: Option<f64>,
    /// Gust frequency [Hz] (default 0.8)
    #[arg(long)]
    pub gust_f: Option<f64>,
    /// Gust phase [rad] (default pi/3)
    #[arg(long, allow_negative_numbers = true)]
    pub gust_phi: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct BounceArgs {
    /// Max ground bounces (default 0)
    #[arg(long)]
    pub bounces: Option<u32>,
    /// Restitution coefficient (default 0.65)
    #[arg(long = "e")]
    pub e: Option<f64>,
    /// Tangential loss per bounce (default 0.10)
    #[arg(long)]
    pub mu: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct OtmArgs {
    /// Run the grid search and report the best shot
    #[arg(long)]
    pub optimize: bool,
    #[arg(long)]
    pub vmin: Option<f64>,
    #[arg(long)]
    pub vmax: Option<f64>,
    #[arg(long)]
    pub vstep: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub dmin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub dmax: Option<f64>,
    #[arg(long)]
    pub dstep: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub pmin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub pmax: Option<f64>,
    #[arg(long)]
    pub pstep: Option<f64>,
    /// Required clearance above the net [m] (default 0.20)
    #[arg(long)]
    pub margin: Option<f64>,
    /// Target landing x [m] (default 19)
    #[arg(long)]
    pub target_x: Option<f64>,
    /// Target landing z [m] (default 0)
    #[arg(long, allow_negative_numbers = true)]
    pub target_z: Option<f64>,
    /// Weight of the lateral miss (default 8)
    #[arg(long)]
    pub z_weight: Option<f64>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Cli {
    /// Config file (if any) with all given flags applied on top.
    ///
    /// # Errors
    /// If `--config` names a file that cannot be read or parsed.
    pub fn resolve(&self) -> Result<RunConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };
        self.apply(&mut cfg);
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut RunConfig) {
        let l = &self.launch;
        set(&mut cfg.launch.speed, l.v0);
        set(&mut cfg.launch.elevation_deg, l.deg);
        set(&mut cfg.launch.azimuth_deg, l.phi);
        set(&mut cfg.launch.lateral_offset, l.z0);
        set(&mut cfg.launch.scheme, l.integrator.as_deref().map(Scheme::from));

        let p = &self.physics;
        let phys = &mut cfg.sim.physical;
        set(&mut phys.rho, p.rho);
        set(&mut phys.area, p.area);
        set(&mut phys.cd, p.cd);
        set(&mut phys.cl, p.cl);
        set(&mut phys.mass, p.mass);
        set(&mut phys.g, p.g);
        set(&mut phys.dt, p.dt);
        set(&mut phys.y0, p.y0);
        set(&mut phys.radius, p.radius);
        set(&mut phys.net_x, p.net_x);
        set(&mut phys.net_height, p.net_h);
        set(&mut phys.court_width, p.court_w);

        let e = &self.environment;
        let env = &mut cfg.sim.environment;
        set(&mut env.spin.x, e.spin_x);
        set(&mut env.spin.y, e.spin_y);
        set(&mut env.spin.z, e.spin_z.or(e.spin));
        set(&mut env.spin_decay_s, e.tau);
        set(&mut env.wind.x, e.wind_x);
        set(&mut env.wind.y, e.wind_y);
        set(&mut env.wind.z, e.wind_z);
        set(&mut env.gust.amplitude, e.gust_a);
        set(&mut env.gust.frequency_hz, e.gust_f);
        set(&mut env.gust.phase_rad, e.gust_phi);

        let b = &self.bounce;
        set(&mut cfg.sim.bounce.max_bounces, b.bounces);
        set(&mut cfg.sim.bounce.restitution, b.e);
        set(&mut cfg.sim.bounce.tangential_loss, b.mu);

        let o = &self.otm;
        let otm = &mut cfg.otm;
        set(&mut otm.speed.min, o.vmin);
        set(&mut otm.speed.max, o.vmax);
        set(&mut otm.speed.step, o.vstep);
        set(&mut otm.elevation.min, o.dmin);
        set(&mut otm.elevation.max, o.dmax);
        set(&mut otm.elevation.step, o.dstep);
        set(&mut otm.azimuth.min, o.pmin);
        set(&mut otm.azimuth.max, o.pmax);
        set(&mut otm.azimuth.step, o.pstep);
        set(&mut otm.net_margin_m, o.margin);
        set(&mut otm.target_x, o.target_x);
        set(&mut otm.target_z, o.target_z);
        set(&mut otm.z_weight, o.z_weight);
    }
}
