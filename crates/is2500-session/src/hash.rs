use std::fmt;
use std::hash::{Hash, Hasher};

use is2500_core::Attribute;
use sha2::{Digest, Sha256};
use siphasher::sip::SipHasher24;

use crate::record::{FieldEntry, PersistedSample, SampleRecordPayload};

/// Deterministic identifier for one (lot, attribute) sampling session.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SessionId(u64);

impl SessionId {
    /// Derives the identifier from the lot number and attribute.
    pub fn derive(lot_no: &str, attribute: Attribute) -> Self {
        let mut hasher = SipHasher24::new_with_keys(0x6973323530306c6f, 0x7473616d706c6573);
        lot_no.hash(&mut hasher);
        attribute.wire_name().hash(&mut hasher);
        SessionId(hasher.finish())
    }

    /// Returns the raw representation.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({:#x})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{:#x}", self.0)
    }
}

fn update_str(hasher: &mut Sha256, text: &str) {
    hasher.update((text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
}

fn update_opt_str(hasher: &mut Sha256, text: Option<&str>) {
    match text {
        Some(text) => {
            hasher.update([1u8]);
            update_str(hasher, text);
        }
        None => hasher.update([0u8]),
    }
}

fn update_field(hasher: &mut Sha256, name: &str, entry: &FieldEntry) {
    update_str(hasher, name);
    update_opt_str(hasher, entry.value.as_deref());
    update_opt_str(hasher, entry.kind.as_deref());
}

fn update_sample(hasher: &mut Sha256, sample: &PersistedSample) {
    hasher.update([sample.sampling_no]);
    hasher.update(u64::from(sample.sample_no).to_le_bytes());
    update_opt_str(hasher, sample.sample_value.as_deref());
    update_opt_str(hasher, sample.sample_type.as_deref());
    match &sample.fields {
        Some(fields) => {
            hasher.update((fields.len() as u64).to_le_bytes());
            for (name, entry) in fields {
                update_field(hasher, name, entry);
            }
        }
        None => hasher.update(0u64.to_le_bytes()),
    }
}

/// Computes the canonical structural digest of a persisted record.
/// Stable across serialization formats; used for change detection and
/// audit trails.
pub fn canonical_record_digest(payload: &SampleRecordPayload) -> String {
    let mut hasher = Sha256::new();
    hasher.update(u64::from(payload.schema_version.major).to_le_bytes());
    hasher.update(u64::from(payload.schema_version.minor).to_le_bytes());
    hasher.update(u64::from(payload.schema_version.patch).to_le_bytes());
    update_str(&mut hasher, &payload.lot_no);
    update_str(&mut hasher, &payload.attribute);
    update_str(&mut hasher, &payload.remarks);
    update_str(&mut hasher, &payload.audit.created_by);
    update_str(&mut hasher, &payload.audit.created_at);
    update_str(&mut hasher, &payload.audit.updated_by);
    update_str(&mut hasher, &payload.audit.updated_at);
    hasher.update((payload.samples.len() as u64).to_le_bytes());
    for sample in &payload.samples {
        update_sample(&mut hasher, sample);
    }
    let digest = hasher.finalize();
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
