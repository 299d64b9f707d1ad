//! Full run configuration as read from `--config`.
//!
//! The simulation sections sit at the top level of the document next to
//! `launch` and `otm`:
//!
//! ```json
//! { "physical": { "cd": 0.5 }, "launch": { "speed": 30, "scheme": "rk4" }, "otm": { "target_x": 20 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tennis_core::{load_json, ConfigError, LaunchParameters, SimConfig};
use tennis_otm::OtmConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    #[serde(flatten)]
    pub sim: SimConfig,
    pub launch: LaunchParameters,
    pub otm: OtmConfig,
}

impl RunConfig {
    /// # Errors
    /// [`ConfigError::Io`] or [`ConfigError::Parse`] for an unreadable or
    /// malformed file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path)
    }
}
