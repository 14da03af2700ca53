#![deny(missing_docs)]
#![doc = "Lot-level rollups: per-attribute verdict aggregation, the per-lot inspection coordinator that serializes stage-two confirmations, and the call-level summary."]

/// Verdict aggregation over attributes and lots.
pub mod aggregate;
/// Per-lot coordinator owning the attribute sessions.
pub mod inspection;

pub use aggregate::{call_verdict, lot_verdict};
pub use inspection::LotInspection;
