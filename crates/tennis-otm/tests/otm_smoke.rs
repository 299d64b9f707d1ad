// Grid searches over small grids, checked against recorded reference results.

use approx::assert_abs_diff_eq;
use tennis_core::{LaunchParameters, SimConfig};
use tennis_otm::{GridAxis, OtmConfig, Optimizer};

fn otm(speed: GridAxis, elevation: GridAxis, azimuth: GridAxis) -> OtmConfig {
    OtmConfig { speed, elevation, azimuth, ..OtmConfig::default() }
}

#[test]
fn nine_point_grid_is_reproducible() {
    let cfg = SimConfig::default();
    let otm = otm(GridAxis::new(24.0, 26.0, 1.0), GridAxis::new(5.0, 7.0, 1.0), GridAxis::new(0.0, 0.0, 1.0));
    let opt = Optimizer::new(&cfg, &otm, &LaunchParameters::default());
    assert_eq!(opt.grid().len(), 9);

    let best = opt.run_sequential().expect("non-empty grid");
    assert_abs_diff_eq!(best.speed, 24.0);
    assert_abs_diff_eq!(best.elevation_deg, 5.0);
    assert_abs_diff_eq!(best.azimuth_deg, 0.0);
    assert_abs_diff_eq!(best.score, 158.445_283_959_454, epsilon = 1e-5);
    assert_abs_diff_eq!(best.landing_x, 20.201_885_350_583, epsilon = 1e-6);
    assert_abs_diff_eq!(best.net_crossing_y.unwrap(), 2.229_823_978_778, epsilon = 1e-6);

    assert_eq!(opt.run_sequential(), Some(best));
    assert_eq!(opt.run(), Some(best));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    let cfg = SimConfig::default();
    let otm = otm(GridAxis::new(20.0, 26.0, 1.0), GridAxis::new(3.0, 9.0, 1.0), GridAxis::new(-2.0, 2.0, 1.0));
    let opt = Optimizer::new(&cfg, &otm, &LaunchParameters::default());
    let seq = opt.run_sequential().expect("non-empty grid");
    let par = opt.run_parallel().expect("non-empty grid");
    assert_eq!(seq, par);

    assert_abs_diff_eq!(seq.speed, 20.0);
    assert_abs_diff_eq!(seq.elevation_deg, 9.0);
    assert_abs_diff_eq!(seq.azimuth_deg, 0.0);
    assert_abs_diff_eq!(seq.score, 100.005_909_660_160, epsilon = 1e-5);
    assert_abs_diff_eq!(seq.landing_x, 19.024_309_794_593, epsilon = 1e-6);
}

#[test]
fn empty_grid_has_no_solution() {
    let cfg = SimConfig::default();
    let otm = otm(GridAxis::new(24.0, 26.0, 1.0), GridAxis::new(7.0, 5.0, 1.0), GridAxis::new(0.0, 0.0, 1.0));
    let opt = Optimizer::new(&cfg, &otm, &LaunchParameters::default());
    assert!(opt.grid().is_empty());
    assert_eq!(opt.run(), None);
    assert_eq!(opt.run_sequential(), None);
}

#[test]
fn infeasible_grid_still_returns_a_candidate() {
    // Every shot dumps into the net; the least-bad one is still reported.
    let cfg = SimConfig::default();
    let otm = otm(GridAxis::new(10.0, 11.0, 1.0), GridAxis::new(-10.0, -10.0, 1.0), GridAxis::new(0.0, 0.0, 1.0));
    let opt = Optimizer::new(&cfg, &otm, &LaunchParameters::default());
    let best = opt.run().expect("non-empty grid");
    assert!(best.score >= 1e6);
    assert_eq!(best.net_crossing_y, None);
}
