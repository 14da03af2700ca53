#![deny(missing_docs)]
#![doc = "Reject predicates: one pure per-attribute rule mapping a raw sample value to a rejected/not-rejected judgement under the lot's thresholds."]

/// Per-attribute reject rules and the rule registry.
pub mod rules;
/// Threshold context derived from the lot descriptor.
pub mod thresholds;

pub use rules::{rule_for, RejectRule};
pub use thresholds::{
    max_decarb, minimum_weight, toe_load_band, ThresholdContext, ToeLoadBand, HARDNESS_RANGE,
    MAX_INCLUSION_SEVERITY,
};
