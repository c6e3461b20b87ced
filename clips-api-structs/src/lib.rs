/// Defines public-facing structures used in the web API
use serde::{Deserialize, Serialize};

mod clip;

pub use clip::{Clip, ClipPatch, ClipStats, ClipUpdated, ClipUpload, Clips};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Status {
    pub db_connections: u32,
}
