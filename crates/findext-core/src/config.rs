/// Walk configuration.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides.
use crate::error::{FindError, Result};
use serde::{Deserialize, Serialize};

/// Initial depth ceiling. Directories at this depth or deeper are not read.
pub const DEFAULT_MAX_DEPTH: i64 = 5;

/// Capacity of the bounded result stream between traversal units and the
/// collector. Units block on `send` while it is full.
pub const DEFAULT_RESULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Starting depth ceiling; the root is depth 0.
    pub max_depth: i64,
    /// Result stream capacity. Must be > 0.
    pub result_capacity: usize,
    /// Upper bound on concurrently live traversal units. `None` spawns one
    /// thread per discovered directory. When the bound is reached, new
    /// subdirectories are walked inline by the discovering unit.
    pub max_units: Option<usize>,
    /// Collapse matches that share a file name (first one seen wins).
    pub dedup_by_name: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            result_capacity: DEFAULT_RESULT_CAPACITY,
            max_units: None,
            dedup_by_name: false,
        }
    }
}

impl WalkConfig {
    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.result_capacity == 0 {
            return Err(FindError::InvalidConfig(
                "result_capacity must be greater than 0".into(),
            ));
        }
        if self.max_units == Some(0) {
            return Err(FindError::InvalidConfig(
                "max_units must be greater than 0 when set".into(),
            ));
        }
        Ok(())
    }
}

const _: () = assert!(DEFAULT_RESULT_CAPACITY > 0);
