//! Config struct definition.

use super::types::{GuardedConfig, PollConfig};
use serde::{Deserialize, Serialize};

/// Configuration for procpoll.
///
/// This struct represents the contents of `procpoll.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Poll wait and retry defaults.
    pub poll: PollConfig,

    /// Guarded run defaults.
    pub guarded: GuardedConfig,
}
