use serde::{Deserialize, Serialize};

use crate::Role;

/// One observable output event of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emission {
    /// 1-based index in the emitted sequence.
    pub position: u64,
    /// Emitted integer.
    pub value: u64,
    /// Worker that emitted it.
    pub role: Role,
}

impl Emission {
    pub fn new(role: Role, value: u64) -> Self {
        Self {
            position: value,
            value,
            role,
        }
    }
}
