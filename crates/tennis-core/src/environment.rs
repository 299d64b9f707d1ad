//! Time-parameterized wind and spin.
//!
//! Both are pure functions of elapsed flight time `t` (s). The gust/no-gust
//! choice is made once, when the model is built.

use core::f64::consts::PI;

use crate::params::{EnvironmentParameters, GustParameters};
use crate::vector::Vec3;

/// Floor for the spin-decay time constant.
const MIN_DECAY_S: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wind {
    /// Steady wind on all three axes.
    Constant(Vec3),
    /// Steady horizontal wind; the vertical component oscillates.
    Gusting { x: f64, z: f64, gust: GustParameters },
}

impl Wind {
    #[must_use]
    pub fn from_params(env: &EnvironmentParameters) -> Self {
        if env.gust.amplitude == 0.0 {
            Wind::Constant(env.wind)
        } else {
            Wind::Gusting { x: env.wind.x, z: env.wind.z, gust: env.gust }
        }
    }

    #[must_use]
    pub fn at(&self, t: f64) -> Vec3 {
        match *self {
            Wind::Constant(w) => w,
            Wind::Gusting { x, z, gust } => {
                let y = gust.amplitude * (2.0 * PI * gust.frequency_hz * t + gust.phase_rad).sin();
                Vec3::new(x, y, z)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentModel {
    wind: Wind,
    spin0: Vec3,
    decay_s: f64,
}

impl EnvironmentModel {
    #[must_use]
    pub fn new(env: &EnvironmentParameters) -> Self {
        Self {
            wind: Wind::from_params(env),
            spin0: env.spin,
            decay_s: env.spin_decay_s.max(MIN_DECAY_S),
        }
    }

    #[must_use]
    pub fn wind(&self, t: f64) -> Vec3 {
        self.wind.at(t)
    }

    /// Spin vector after `t` seconds of exponential decay.
    #[must_use]
    pub fn spin(&self, t: f64) -> Vec3 {
        self.spin0.scale((-t / self.decay_s).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn env_with(wind: Vec3, amplitude: f64) -> EnvironmentParameters {
        EnvironmentParameters {
            wind,
            gust: GustParameters { amplitude, ..GustParameters::default() },
            ..EnvironmentParameters::default()
        }
    }

    #[test]
    fn constant_wind_ignores_time() {
        let model = EnvironmentModel::new(&env_with(Vec3::new(-1.5, 0.3, 0.7), 0.0));
        assert_eq!(model.wind(0.0), Vec3::new(-1.5, 0.3, 0.7));
        assert_eq!(model.wind(12.3), Vec3::new(-1.5, 0.3, 0.7));
    }

    #[test]
    fn gust_replaces_vertical_wind() {
        let params = env_with(Vec3::new(-1.5, 3.0, 0.7), 0.5);
        let model = EnvironmentModel::new(&params);
        let t = 0.4;
        let w = model.wind(t);
        let expected = 0.5 * (2.0 * PI * 0.8 * t + PI / 3.0).sin();
        assert_relative_eq!(w.x, -1.5);
        assert_relative_eq!(w.y, expected, epsilon = 1e-12);
        assert_relative_eq!(w.z, 0.7);
    }

    #[test]
    fn spin_decays_exponentially() {
        let params = EnvironmentParameters {
            spin: Vec3::new(10.0, -20.0, 100.0),
            spin_decay_s: 4.0,
            ..EnvironmentParameters::default()
        };
        let model = EnvironmentModel::new(&params);
        assert_eq!(model.spin(0.0), params.spin);
        let s = model.spin(4.0);
        let f = (-1.0f64).exp();
        assert_relative_eq!(s.x, 10.0 * f, epsilon = 1e-12);
        assert_relative_eq!(s.y, -20.0 * f, epsilon = 1e-12);
        assert_relative_eq!(s.z, 100.0 * f, epsilon = 1e-12);
    }

    #[test]
    fn zero_decay_constant_is_floored() {
        let params = EnvironmentParameters { spin_decay_s: 0.0, ..EnvironmentParameters::default() };
        let model = EnvironmentModel::new(&params);
        let s = model.spin(0.01);
        assert!(s.z.is_finite());
        assert_relative_eq!(s.z, 0.0);
    }
}
