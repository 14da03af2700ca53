use is2500_core::{
    Attribute, DefectFreedom, GaugeFit, Judgement, Microstructure, SampleValue,
};

use crate::thresholds::{ThresholdContext, HARDNESS_RANGE, MAX_INCLUSION_SEVERITY};

/// A pure per-attribute rule deciding whether one entered sample is
/// rejected. Blank values and values of the wrong variant are never
/// rejects; the session excludes them from its counts instead.
pub trait RejectRule: Send + Sync {
    /// Whether the sample is rejected under the lot's thresholds.
    fn is_reject(&self, value: &SampleValue, ctx: &ThresholdContext) -> bool;
}

struct HardnessRule;

impl RejectRule for HardnessRule {
    fn is_reject(&self, value: &SampleValue, _ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Measure(hrc) => !HARDNESS_RANGE.contains(hrc),
            _ => false,
        }
    }
}

struct ToeLoadRule;

impl RejectRule for ToeLoadRule {
    fn is_reject(&self, value: &SampleValue, ctx: &ThresholdContext) -> bool {
        match value.toe_load_average() {
            Some(avg) => !ctx.toe_load_band().contains(avg),
            None => false,
        }
    }
}

struct WeightRule;

impl RejectRule for WeightRule {
    fn is_reject(&self, value: &SampleValue, ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Measure(grams) => *grams < ctx.minimum_weight(),
            _ => false,
        }
    }
}

struct GaugeRule;

impl RejectRule for GaugeRule {
    fn is_reject(&self, value: &SampleValue, _ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Gauge { go, no_go, flat } => {
                // One bad sub-field rejects the whole sample.
                [go, no_go, flat].iter().any(|fit| **fit == GaugeFit::NotOk)
            }
            _ => false,
        }
    }
}

struct InclusionRule;

impl RejectRule for InclusionRule {
    fn is_reject(&self, value: &SampleValue, _ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Inclusion { a, b, c, d } => [a, b, c, d]
                .iter()
                .any(|channel| channel.severity > MAX_INCLUSION_SEVERITY),
            _ => false,
        }
    }
}

struct StructureRule;

impl RejectRule for StructureRule {
    fn is_reject(&self, value: &SampleValue, _ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Structure { micro, defects } => {
                *micro != Microstructure::TemperedMartensite
                    || *defects == DefectFreedom::NotSatisfactory
            }
            _ => false,
        }
    }
}

struct DecarbRule;

impl RejectRule for DecarbRule {
    fn is_reject(&self, value: &SampleValue, ctx: &ThresholdContext) -> bool {
        match value {
            SampleValue::Measure(depth_mm) => *depth_mm > ctx.max_decarb(),
            _ => false,
        }
    }
}

struct JudgedRule;

impl RejectRule for JudgedRule {
    fn is_reject(&self, value: &SampleValue, _ctx: &ThresholdContext) -> bool {
        matches!(value, SampleValue::Judged(Judgement::Fail))
    }
}

static HARDNESS: HardnessRule = HardnessRule;
static TOE_LOAD: ToeLoadRule = ToeLoadRule;
static WEIGHT: WeightRule = WeightRule;
static GAUGE: GaugeRule = GaugeRule;
static INCLUSION: InclusionRule = InclusionRule;
static STRUCTURE: StructureRule = StructureRule;
static DECARB: DecarbRule = DecarbRule;
static JUDGED: JudgedRule = JudgedRule;

/// Returns the reject rule governing an attribute.
pub fn rule_for(attribute: Attribute) -> &'static dyn RejectRule {
    match attribute {
        Attribute::Hardness => &HARDNESS,
        Attribute::ToeLoad => &TOE_LOAD,
        Attribute::Weight => &WEIGHT,
        Attribute::Dimensional => &GAUGE,
        Attribute::InclusionRating => &INCLUSION,
        Attribute::Microstructure => &STRUCTURE,
        Attribute::Decarburization => &DECARB,
        Attribute::Visual | Attribute::Deflection => &JUDGED,
    }
}
