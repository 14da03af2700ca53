#![deny(missing_docs)]
#![doc = "The stateful acceptance core: per-(lot, attribute) sampling sessions with pure transitions, stage-two gating with confirmation hysteresis, verdict derivation, and the persisted record round-trip."]

/// Canonical digests and deterministic session identifiers.
pub mod hash;
/// Persisted sample-record wire shape and (de)serialization.
pub mod record;
/// The sampling session state machine.
pub mod session;

pub use hash::{canonical_record_digest, SessionId};
pub use record::{FieldEntry, PersistedSample, SampleRecordPayload};
pub use session::{
    ConfirmationChoice, SamplingSession, SessionTally, Stage, StageTwoConflict,
};
