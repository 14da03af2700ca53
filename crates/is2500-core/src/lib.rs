#![deny(missing_docs)]
#![doc = "Shared vocabulary for the IS 2500 double-sampling acceptance engine: test attributes, verdicts, lot descriptors, raw sample values, and structured errors."]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod audit;
pub mod errors;
mod value;

pub use audit::{AuditTrail, SchemaVersion};
pub use errors::{ErrorInfo, InspectError};
pub use value::{
    DefectFreedom, GaugeFit, InclusionChannel, InclusionForm, Judgement, Microstructure,
    SampleValue,
};

/// Test attribute inspected per lot. Each attribute owns one sampling
/// session and one reject rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Attribute {
    /// Visual surface inspection (pass/fail per piece).
    Visual,
    /// Dimensional go / no-go / flat-bearing gauge check.
    Dimensional,
    /// Rockwell hardness.
    Hardness,
    /// Toe load at specified deflection (three readings averaged).
    ToeLoad,
    /// Piece weight.
    Weight,
    /// Four-channel inclusion rating (A/B/C/D).
    InclusionRating,
    /// Microstructure and freedom-from-defects assessment.
    Microstructure,
    /// Depth of decarburization.
    Decarburization,
    /// Application and deflection check (pass/fail per piece).
    Deflection,
}

impl Attribute {
    /// All attributes in canonical report order.
    pub const ALL: [Attribute; 9] = [
        Attribute::Visual,
        Attribute::Dimensional,
        Attribute::Hardness,
        Attribute::ToeLoad,
        Attribute::Weight,
        Attribute::InclusionRating,
        Attribute::Microstructure,
        Attribute::Decarburization,
        Attribute::Deflection,
    ];

    /// Returns the double-sampling plan family governing this attribute.
    pub fn plan_family(&self) -> PlanFamily {
        match self {
            Attribute::Visual
            | Attribute::Dimensional
            | Attribute::Weight
            | Attribute::Deflection => PlanFamily::DimensionWeight,
            Attribute::Hardness
            | Attribute::ToeLoad
            | Attribute::InclusionRating
            | Attribute::Microstructure
            | Attribute::Decarburization => PlanFamily::HardnessToeLoad,
        }
    }

    /// Stable wire name used in persisted records.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Attribute::Visual => "visual",
            Attribute::Dimensional => "dimensional",
            Attribute::Hardness => "hardness",
            Attribute::ToeLoad => "toe-load",
            Attribute::Weight => "weight",
            Attribute::InclusionRating => "inclusion-rating",
            Attribute::Microstructure => "microstructure",
            Attribute::Decarburization => "decarburization",
            Attribute::Deflection => "deflection",
        }
    }

    /// Parses a wire name back into an attribute.
    pub fn from_wire_name(name: &str) -> Option<Attribute> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.wire_name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// IS 2500 Table 2 carries two acceptance-number columns at the same lot
/// size breakpoints; the family selects the column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PlanFamily {
    /// AQL 2.5 column for dimension and weight characteristics.
    DimensionWeight,
    /// Tighter column for hardness and toe-load characteristics.
    HardnessToeLoad,
}

/// Accept/reject/pending outcome for one (lot, attribute) pair. Always
/// recomputed from the sample arrays, never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Verdict {
    /// Required data is not yet complete.
    Pending,
    /// The lot passed this attribute.
    Accepted,
    /// The lot failed this attribute; terminal.
    Rejected,
}

/// Rollup over every attribute verdict of one lot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LotVerdict {
    /// At least one attribute is still pending and none is rejected.
    Pending,
    /// Every attribute accepted.
    Accepted,
    /// Any attribute rejected.
    Rejected,
}

/// Rollup over every lot of one inspection call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CallVerdict {
    /// Some lot is still undecided.
    Pending,
    /// Every lot accepted.
    Accepted,
    /// Some lots accepted and the rest rejected.
    PartiallyAccepted,
    /// Every lot rejected.
    Rejected,
}

/// Declared spring pattern of the inspected clip. Selects the toe-load
/// tolerance band and the minimum piece weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SpringType {
    /// MK-III pattern.
    MkIii,
    /// MK-V pattern.
    MkV,
    /// ERC-J pattern (open-ended toe-load floor).
    ErcJ,
}

impl SpringType {
    /// Canonical display label as used on inspection certificates.
    pub fn label(&self) -> &'static str {
        match self {
            SpringType::MkIii => "MK-III",
            SpringType::MkV => "MK-V",
            SpringType::ErcJ => "ERC-J",
        }
    }
}

impl fmt::Display for SpringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpringType {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MK-III" => Ok(SpringType::MkIii),
            "MK-V" => Ok(SpringType::MkV),
            "ERC-J" => Ok(SpringType::ErcJ),
            other => Err(InspectError::Lot(
                ErrorInfo::new("unknown-spring-type", "unrecognized spring type label")
                    .with_context("label", other.to_string()),
            )),
        }
    }
}

/// Lot metadata consumed by the engine. Quantity is signed so that
/// out-of-domain negative inputs degrade to the zero plan instead of
/// failing upstream of the table lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotDescriptor {
    /// Lot number as printed on the inspection call.
    pub lot_no: String,
    /// Heat number of the source steel.
    pub heat_no: String,
    /// Offered quantity of pieces in the lot.
    pub quantity: i64,
    /// Declared spring pattern.
    pub spring_type: SpringType,
    /// Bar diameter in millimetres (drives the decarburization cap).
    pub bar_dia_mm: f64,
}
