//! tennis-models
//!
//! Aerodynamic forces on a spinning ball, evaluated against the
//! air-relative velocity `v_rel = v - wind(t)`:
//!
//!   F_drag   = -(½ ρ A C_D |v_rel|) · v_rel
//!   F_magnus =  (½ ρ A C_L,eff |v_rel|) · (ω̂ × v_rel)
//!   C_L,eff  =  C_L · min(1.2, |ω| R / |v_rel|)
//!
//! and the resulting acceleration `a = (0, -g, 0) + (F_drag + F_magnus) / m`.
//!
//! `ForceModel` is the single place forces are computed; both integration
//! schemes call `acceleration` and nothing else.

use tennis_core::{EnvironmentModel, EnvironmentParameters, PhysicalParameters, Vec3};

/// Below this spin magnitude the Magnus force is zero.
const MIN_SPIN: f64 = 1e-8;
/// Floor on |v_rel| in the spin factor and lift magnitude.
const MIN_SPEED: f64 = 1e-6;
/// Cap on the spin factor `|ω| R / |v_rel|`.
const MAX_SPIN_FACTOR: f64 = 1.2;

/* ------------------------------ drag / lift ------------------------------ */

/// Quadratic drag opposing `vrel`.
#[must_use]
pub fn drag(p: &PhysicalParameters, vrel: Vec3) -> Vec3 {
    let s = 0.5 * p.rho * p.area * p.cd * vrel.magnitude();
    -vrel.scale(s)
}

/// Spin-lift, perpendicular to both the spin axis and `vrel`.
#[must_use]
pub fn magnus(p: &PhysicalParameters, vrel: Vec3, omega: Vec3) -> Vec3 {
    let omega_mag = omega.magnitude();
    if omega_mag < MIN_SPIN {
        return Vec3::zero();
    }
    let speed = vrel.magnitude().max(MIN_SPEED);
    let spin_factor = (omega_mag * p.radius / speed).min(MAX_SPIN_FACTOR);
    let cl_eff = p.cl * spin_factor;
    let k = 0.5 * p.rho * p.area * cl_eff * speed;
    let axis = omega.scale(1.0 / omega_mag);
    axis.cross(vrel).scale(k)
}

/* ------------------------------ force model ------------------------------ */

/// Drag + Magnus + gravity for one ball in one environment.
#[derive(Clone, Copy, Debug)]
pub struct ForceModel {
    physical: PhysicalParameters,
    env: EnvironmentModel,
}

impl ForceModel {
    #[must_use]
    pub fn new(physical: &PhysicalParameters, env: &EnvironmentParameters) -> Self {
        Self { physical: *physical, env: EnvironmentModel::new(env) }
    }

    #[must_use]
    pub fn physical(&self) -> &PhysicalParameters {
        &self.physical
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentModel {
        &self.env
    }

    /// Total aerodynamic force at time `t` for ball velocity `v`.
    #[must_use]
    pub fn aero_force(&self, t: f64, v: Vec3) -> Vec3 {
        let vrel = v - self.env.wind(t);
        drag(&self.physical, vrel) + magnus(&self.physical, vrel, self.env.spin(t))
    }

    /// `dv/dt` at time `t` for ball velocity `v`.
    #[must_use]
    pub fn acceleration(&self, t: f64, v: Vec3) -> Vec3 {
        let gravity = Vec3::new(0.0, -self.physical.g, 0.0);
        self.aero_force(t, v) / self.physical.mass + gravity
    }
}

/* -------------------------------- tests -------------------------------- */
