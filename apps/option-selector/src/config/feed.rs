//! Chain snapshot feed configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where chain snapshots are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Directory holding `{UNDERLYING}.json` snapshot files.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}
