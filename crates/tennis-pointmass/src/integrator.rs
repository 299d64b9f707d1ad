//! State, state derivative, and the two fixed-step schemes.
//!
//! A scheme only sees a [`Dynamics`] (state -> derivative); it never knows
//! about forces, wind or bounces. The bounce counter rides along untouched.

use tennis_core::{Scheme, Vec3};
use tennis_models::ForceModel;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct State {
    pub pos: Vec3,         // m
    pub vel: Vec3,         // m/s
    pub t: f64,            // s
    pub bounces_left: u32,
}

impl State {
    /// `self + h · d`, with time advanced by `h`.
    #[must_use]
    pub fn advanced(&self, d: &Derivative, h: f64) -> Self {
        Self {
            pos: self.pos + d.dpos.scale(h),
            vel: self.vel + d.dvel.scale(h),
            t: self.t + h,
            bounces_left: self.bounces_left,
        }
    }
}

/// `(dx/dt, dv/dt)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivative {
    pub dpos: Vec3,
    pub dvel: Vec3,
}

/// Right-hand side of the equations of motion.
pub trait Dynamics {
    fn derivative(&self, s: &State) -> Derivative;
}

impl Dynamics for ForceModel {
    fn derivative(&self, s: &State) -> Derivative {
        Derivative { dpos: s.vel, dvel: self.acceleration(s.t, s.vel) }
    }
}

/// Advance a state by one fixed step `h`.
pub trait Stepper {
    fn step(&self, f: &dyn Dynamics, s: &State, h: f64) -> State;
}

/// Explicit Euler: one derivative evaluation per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euler;

impl Stepper for Euler {
    fn step(&self, f: &dyn Dynamics, s: &State, h: f64) -> State {
        s.advanced(&f.derivative(s), h)
    }
}

/// Classical RK4, weights 1/6, 1/3, 1/3, 1/6.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Stepper for Rk4 {
    fn step(&self, f: &dyn Dynamics, s: &State, h: f64) -> State {
        let k1 = f.derivative(s);
        let k2 = f.derivative(&s.advanced(&k1, 0.5 * h));
        let k3 = f.derivative(&s.advanced(&k2, 0.5 * h));
        let k4 = f.derivative(&s.advanced(&k3, h));

        // Weighted terms summed innermost-last: k1 + (k2 + (k3 + k4)).
        let (h6, h3) = (h / 6.0, h / 3.0);
        let weighted = |a: Vec3, b: Vec3, c: Vec3, d: Vec3| {
            a.scale(h6) + (b.scale(h3) + (c.scale(h3) + d.scale(h6)))
        };

        State {
            pos: s.pos + weighted(k1.dpos, k2.dpos, k3.dpos, k4.dpos),
            vel: s.vel + weighted(k1.dvel, k2.dvel, k3.dvel, k4.dvel),
            t: s.t + h,
            bounces_left: s.bounces_left,
        }
    }
}

/// The stepper configured by `scheme`.
#[must_use]
pub fn stepper(scheme: Scheme) -> &'static dyn Stepper {
    match scheme {
        Scheme::Euler => &Euler,
        Scheme::Rk4 => &Rk4,
    }
}
