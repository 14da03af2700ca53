#![deny(missing_docs)]
#![doc = "IS 2500 sampling plan tables: Table 1 sample sizes and Table 2 double-sampling parameters for both plan families."]

/// Table lookups and the resolved plan type.
pub mod table;

pub use table::{bags_for_sampling, resolve, sample_size, SamplingPlan};
