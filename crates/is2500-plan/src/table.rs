use is2500_core::PlanFamily;
use serde::{Deserialize, Serialize};

/// Resolved sampling parameters for one lot under one plan family.
///
/// For lots of 150 pieces or fewer Table 2 provides no double-sampling
/// row; the plan falls back to single sampling with a zero acceptance
/// number, so the first stage alone decides the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingPlan {
    /// Lot quantity the plan was resolved for.
    pub quantity: i64,
    /// Acceptance-number column in use.
    pub family: PlanFamily,
    /// First-stage sample size.
    pub n1: u32,
    /// First-stage acceptance number.
    pub ac1: u32,
    /// First-stage rejection number.
    pub re1: u32,
    /// Second-stage sample size (zero under single sampling).
    pub n2: u32,
    /// Cumulative rejection number applied to R1+R2.
    pub cumm_rej: u32,
    /// Whether the plan resolves from the first stage alone.
    pub single_sampling: bool,
}

impl SamplingPlan {
    /// Whether `rejected1` falls in the open interval (ac1, re1), i.e.
    /// the first stage is inconclusive and a second stage is required.
    /// Single-sampling plans have re1 = ac1 + 1, so the gap is empty.
    pub fn needs_second_stage(&self, rejected1: u32) -> bool {
        rejected1 > self.ac1 && rejected1 < self.re1
    }
}

/// Table 1 sample size for a lot (or bag count) of the given size.
/// Non-positive sizes yield zero.
pub fn sample_size(lot_size: i64) -> u32 {
    if lot_size <= 0 {
        return 0;
    }
    match lot_size {
        ..=8 => 2,
        ..=15 => 3,
        ..=25 => 5,
        ..=50 => 8,
        ..=90 => 13,
        ..=150 => 20,
        ..=280 => 32,
        ..=500 => 50,
        ..=1200 => 80,
        ..=3200 => 125,
        ..=10000 => 200,
        ..=35000 => 315,
        ..=150000 => 500,
        ..=500000 => 800,
        _ => 1250,
    }
}

/// Number of bags to draw samples from, given the total bag count.
/// Same Table 1 column applied to bags instead of pieces.
pub fn bags_for_sampling(total_bags: i64) -> u32 {
    sample_size(total_bags)
}

/// Shared first/second stage sizes for lots above 150 pieces. Both
/// families use n1 = n2 at every breakpoint.
fn double_sample_size(quantity: i64) -> u32 {
    match quantity {
        ..=280 => 20,
        ..=500 => 32,
        ..=1200 => 50,
        ..=3200 => 80,
        ..=10000 => 125,
        ..=35000 => 200,
        ..=150000 => 315,
        _ => 500,
    }
}

/// (ac1, re1, cumm_rej) for the AQL 2.5 dimension/weight column.
fn dimension_weight_numbers(quantity: i64) -> (u32, u32, u32) {
    match quantity {
        ..=280 => (0, 3, 4),
        ..=500 => (1, 3, 5),
        ..=1200 => (2, 5, 7),
        ..=3200 => (3, 6, 10),
        ..=10000 => (5, 9, 13),
        ..=35000 => (7, 11, 19),
        _ => (11, 16, 27),
    }
}

/// (ac1, re1, cumm_rej) for the hardness/toe-load column.
fn hardness_toe_load_numbers(quantity: i64) -> (u32, u32, u32) {
    match quantity {
        ..=280 => (0, 2, 2),
        ..=500 => (0, 3, 4),
        ..=1200 => (1, 3, 5),
        ..=3200 => (2, 5, 7),
        ..=10000 => (3, 6, 10),
        ..=35000 => (5, 9, 13),
        ..=150000 => (7, 11, 19),
        _ => (11, 16, 27),
    }
}

/// Resolves the sampling plan for a lot quantity under a plan family.
///
/// Total over all inputs: non-positive quantities (including the
/// out-of-domain negatives a caller may produce from unchecked text)
/// degrade to the degenerate zero plan rather than raising.
pub fn resolve(quantity: i64, family: PlanFamily) -> SamplingPlan {
    if quantity <= 150 {
        return SamplingPlan {
            quantity,
            family,
            n1: sample_size(quantity),
            ac1: 0,
            re1: 1,
            n2: 0,
            cumm_rej: 1,
            single_sampling: true,
        };
    }
    let n = double_sample_size(quantity);
    let (ac1, re1, cumm_rej) = match family {
        PlanFamily::DimensionWeight => dimension_weight_numbers(quantity),
        PlanFamily::HardnessToeLoad => hardness_toe_load_numbers(quantity),
    };
    SamplingPlan {
        quantity,
        family,
        n1: n,
        ac1,
        re1,
        n2: n,
        cumm_rej,
        single_sampling: false,
    }
}
