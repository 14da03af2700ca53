//! Schema and audit descriptors attached to persisted records.

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Who created and last touched a persisted record. The backend stamps
/// created-by on insert and updated-by on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrail {
    /// Username that first saved the record.
    pub created_by: String,
    /// ISO-8601 timestamp of the first save.
    pub created_at: String,
    /// Username of the most recent save.
    pub updated_by: String,
    /// ISO-8601 timestamp of the most recent save.
    pub updated_at: String,
}

impl AuditTrail {
    /// Builds a trail for a record created just now by `user`.
    pub fn created(user: impl Into<String>, at: impl Into<String>) -> Self {
        let user = user.into();
        let at = at.into();
        Self {
            created_by: user.clone(),
            created_at: at.clone(),
            updated_by: user,
            updated_at: at,
        }
    }

    /// Records a subsequent save by `user`.
    pub fn touched(mut self, user: impl Into<String>, at: impl Into<String>) -> Self {
        self.updated_by = user.into();
        self.updated_at = at.into();
        self
    }
}
