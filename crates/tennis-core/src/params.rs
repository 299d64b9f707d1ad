//! Parameter sets consumed by the flight solver.
//!
//! Everything here is plain data: read-only for the whole duration of a run
//! and shared freely between runs (the optimizer evaluates many launches
//! against one `SimConfig`). Defaults are the values of a singles court and a
//! standard ball at sea level.
//!
//! Inputs are not sanitized. Zero mass, a non-positive `dt`, or coefficients
//! outside `[0, 1]` are the caller's problem.

use core::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vector::Vec3;

/// Physical constants, ball and court geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParameters {
    pub rho: f64,          // air density (kg/m^3)
    pub area: f64,         // ball cross-section (m^2)
    pub cd: f64,           // drag coefficient
    pub cl: f64,           // base lift coefficient (scaled by spin factor)
    pub mass: f64,         // kg
    pub g: f64,            // gravity (m/s^2), acts along -y
    pub dt: f64,           // integration time step (s)
    pub y0: f64,           // launch height (m)
    pub radius: f64,       // ball radius (m)
    pub net_x: f64,        // net plane x (m)
    pub net_height: f64,   // tape height (m)
    pub court_length: f64, // baseline to baseline (m)
    pub court_width: f64,  // singles 8.23, doubles 10.97 (m)
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            rho: 1.225,
            area: 0.0034,
            cd: 0.47,
            cl: 0.20,
            mass: 0.057,
            g: 9.81,
            dt: 0.005,
            y0: 2.5,
            radius: 0.033,
            net_x: 11.885,
            net_height: 0.914,
            court_length: 23.77,
            court_width: 8.23,
        }
    }
}

impl PhysicalParameters {
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.court_width / 2.0
    }
}

/// Numerical integration scheme.
///
/// Parsing never fails: `"rk4"` (any case) selects RK4, every other name
/// falls back to Euler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Euler,
    Rk4,
}

impl From<&str> for Scheme {
    fn from(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("rk4") {
            Scheme::Rk4
        } else {
            Scheme::Euler
        }
    }
}

impl From<String> for Scheme {
    fn from(name: String) -> Self {
        Scheme::from(name.as_str())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Euler => "Euler",
            Scheme::Rk4 => "RK4",
        })
    }
}

/// Per-shot input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    pub speed: f64,          // m/s
    pub elevation_deg: f64,  // above horizontal
    pub azimuth_deg: f64,    // +z to the right
    pub lateral_offset: f64, // initial z (m)
    pub scheme: Scheme,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            speed: 28.0,
            elevation_deg: 6.0,
            azimuth_deg: 0.0,
            lateral_offset: 0.0,
            scheme: Scheme::Euler,
        }
    }
}

impl LaunchParameters {
    #[must_use]
    pub fn initial_position(&self, physical: &PhysicalParameters) -> Vec3 {
        Vec3::new(0.0, physical.y0, self.lateral_offset)
    }

    /// Launch velocity from speed, elevation and azimuth.
    #[must_use]
    pub fn initial_velocity(&self) -> Vec3 {
        let el = self.elevation_deg.to_radians();
        let az = self.azimuth_deg.to_radians();
        Vec3::new(
            self.speed * el.cos() * az.cos(),
            self.speed * el.sin(),
            self.speed * el.cos() * az.sin(),
        )
    }
}

/// Sinusoidal vertical gust. Only active when `amplitude != 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GustParameters {
    pub amplitude: f64,    // m/s
    pub frequency_hz: f64,
    pub phase_rad: f64,
}

impl Default for GustParameters {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            frequency_hz: 0.8,
            phase_rad: core::f64::consts::FRAC_PI_3,
        }
    }
}

/// Wind and spin inputs for the environment model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParameters {
    /// Constant wind (m/s). `wind.y` is ignored while a gust is active.
    pub wind: Vec3,
    pub gust: GustParameters,
    /// Initial spin vector; its direction is the spin axis.
    pub spin: Vec3,
    /// Exponential spin-decay time constant (s).
    pub spin_decay_s: f64,
}

impl Default for EnvironmentParameters {
    fn default() -> Self {
        Self {
            wind: Vec3::zero(),
            gust: GustParameters::default(),
            spin: Vec3::new(0.0, 0.0, 100.0),
            spin_decay_s: 4.0,
        }
    }
}

/// Ground contact model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParameters {
    pub max_bounces: u32,
    pub restitution: f64,     // fraction of normal speed kept, sign reversed
    pub tangential_loss: f64, // fraction of horizontal speed lost
}

impl Default for BounceParameters {
    fn default() -> Self {
        Self {
            max_bounces: 0,
            restitution: 0.65,
            tangential_loss: 0.10,
        }
    }
}

impl BounceParameters {
    /// Velocity right after a ground bounce.
    #[must_use]
    pub fn rebound(&self, v: Vec3) -> Vec3 {
        let keep = 1.0 - self.tangential_loss;
        Vec3::new(v.x * keep, -self.restitution * v.y, v.z * keep)
    }
}

/// Safety bounds for a single run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Iteration cap; a run never holds more samples than this.
    pub max_steps: usize,
    /// Stop once x exceeds `court_length + overrun_margin_m`.
    pub overrun_margin_m: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_steps: 120_000,
            overrun_margin_m: 5.0,
        }
    }
}

/// Everything a run reads besides the launch itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physical: PhysicalParameters,
    pub environment: EnvironmentParameters,
    pub bounce: BounceParameters,
    pub limits: Limits,
}

impl SimConfig {
    /// Load a JSON config. Missing fields keep their defaults.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not a valid config document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Parse a JSON config held in memory.
    ///
    /// # Errors
    /// If `text` is not a valid config document.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Read and deserialize any JSON config document.
///
/// # Errors
/// [`ConfigError::Io`] on a read failure, [`ConfigError::Parse`] when the
/// contents do not deserialize into `T`.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scheme_falls_back_to_euler() {
        assert_eq!(Scheme::from("rk4"), Scheme::Rk4);
        assert_eq!(Scheme::from("RK4"), Scheme::Rk4);
        assert_eq!(Scheme::from("euler"), Scheme::Euler);
        assert_eq!(Scheme::from("verlet"), Scheme::Euler);
        assert_eq!(Scheme::from(""), Scheme::Euler);
    }

    #[test]
    fn scheme_deserializes_with_fallback() {
        let s: Scheme = serde_json::from_str("\"rk4\"").unwrap();
        assert_eq!(s, Scheme::Rk4);
        let s: Scheme = serde_json::from_str("\"midpoint\"").unwrap();
        assert_eq!(s, Scheme::Euler);
    }

    #[test]
    fn launch_velocity_components() {
        let launch = LaunchParameters {
            speed: 10.0,
            elevation_deg: 30.0,
            azimuth_deg: 90.0,
            ..LaunchParameters::default()
        };
        let v = launch.initial_velocity();
        assert_relative_eq!(v.y, 5.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 10.0 * 30f64.to_radians().cos(), epsilon = 1e-12);
    }

    #[test]
    fn rebound_reflects_and_damps() {
        let bounce = BounceParameters { max_bounces: 1, restitution: 0.65, tangential_loss: 0.10 };
        let v = bounce.rebound(Vec3::new(10.0, -5.0, 0.0));
        assert_relative_eq!(v.y, 3.25, epsilon = 1e-12);
        assert_relative_eq!(v.x, 9.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = SimConfig::from_json_str(
            r#"{ "physical": { "cd": 0.55 }, "bounce": { "max_bounces": 2 } }"#,
        )
        .unwrap();
        assert_relative_eq!(cfg.physical.cd, 0.55);
        assert_relative_eq!(cfg.physical.net_x, 11.885);
        assert_eq!(cfg.bounce.max_bounces, 2);
        assert_relative_eq!(cfg.bounce.restitution, 0.65);
        assert_eq!(cfg.limits.max_steps, 120_000);
        assert_relative_eq!(cfg.environment.spin.z, 100.0);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = SimConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
