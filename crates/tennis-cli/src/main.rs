//! Tennis ball flight simulator.
//!
//! # Usage
//!
//! ```bash
//! # Single shot, RK4, exported as CSV
//! tennis --v0 30 --deg 7 --integrator rk4 --out traj.csv
//!
//! # Crosswind, one bounce, report the first contact point
//! tennis --wind-z 2 --bounces 1 --measure first
//!
//! # Search for the best serve-like shot
//! tennis --optimize --vmin 22 --vmax 30 --target-x 20
//! ```

use anyhow::Context;
use clap::Parser;
use tennis_cli::{export, CandidateSummary, Cli, ExportError, ShotReport};
use tennis_otm::Optimizer;
use tennis_pointmass::{FlightReport, FlightSimulator, MeasureMode};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = cli.resolve().context("loading configuration")?;

    let launch = if cli.otm.optimize {
        let otm = &cfg.otm;
        info!(
            speed = ?otm.speed,
            elevation = ?otm.elevation,
            azimuth = ?otm.azimuth,
            margin = otm.net_margin_m,
            target_x = otm.target_x,
            target_z = otm.target_z,
            "starting otm search"
        );
        let Some(best) = Optimizer::new(&cfg.sim, otm, &cfg.launch).run() else {
            println!("OTM: no solution");
            return Ok(());
        };
        println!("{}", CandidateSummary(&best));
        best.launch(&cfg.launch)
    } else {
        cfg.launch
    };

    let traj = FlightSimulator::new(&cfg.sim).run(&launch);
    let flight = FlightReport::new(&traj, MeasureMode::from(cli.measure.as_str()), &cfg.sim.physical);
    print!("{}", ShotReport { cfg: &cfg.sim, launch: &launch, flight: &flight });

    if let Some(path) = &cli.out {
        match export(path, &traj.samples[..flight.n]) {
            Ok(format) => info!(path = %path.display(), ?format, samples = flight.n, "trajectory written"),
            Err(e @ ExportError::UnsupportedFormat { .. }) => warn!("{e}"),
            Err(e) => return Err(e).context("exporting trajectory"),
        }
    }

    Ok(())
}
