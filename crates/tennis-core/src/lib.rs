//! Core tennis flight math utilities
//!
//! Includes:
//! - 3D vector arithmetic
//! - Physical / launch / environment / bounce parameter sets
//! - JSON config loading
//! - Wind (with optional vertical gust) and spin-decay environment model

pub mod environment;
pub mod error;
pub mod params;
pub mod vector;

pub use environment::{EnvironmentModel, Wind};
pub use error::ConfigError;
pub use params::{
    load_json, BounceParameters, EnvironmentParameters, GustParameters, LaunchParameters, Limits,
    PhysicalParameters, Scheme, SimConfig,
};
pub use vector::Vec3;
