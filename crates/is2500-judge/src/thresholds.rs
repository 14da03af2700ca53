use std::ops::RangeInclusive;

use is2500_core::{LotDescriptor, SpringType};
use serde::{Deserialize, Serialize};

/// Acceptable hardness window in HRC.
pub const HARDNESS_RANGE: RangeInclusive<f64> = 40.0..=44.0;

/// Maximum permissible inclusion severity rating per channel.
pub const MAX_INCLUSION_SEVERITY: f64 = 2.0;

/// Toe-load tolerance band. The ERC-J pattern has no upper bound; its
/// floor is exclusive (a reading exactly at the floor fails).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToeLoadBand {
    /// Closed band: pass iff min <= avg <= max.
    Closed {
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },
    /// Open band: pass iff avg > floor.
    OpenAbove {
        /// Exclusive lower bound.
        floor: f64,
    },
}

impl ToeLoadBand {
    /// Whether an averaged reading passes the band.
    pub fn contains(&self, avg: f64) -> bool {
        match self {
            ToeLoadBand::Closed { min, max } => avg >= *min && avg <= *max,
            ToeLoadBand::OpenAbove { floor } => avg > *floor,
        }
    }
}

/// Toe-load band for a spring pattern.
pub fn toe_load_band(spring: SpringType) -> ToeLoadBand {
    match spring {
        SpringType::MkIii => ToeLoadBand::Closed {
            min: 850.0,
            max: 1100.0,
        },
        SpringType::MkV => ToeLoadBand::Closed {
            min: 1200.0,
            max: 1500.0,
        },
        SpringType::ErcJ => ToeLoadBand::OpenAbove { floor: 650.0 },
    }
}

/// Minimum piece weight in grams for a spring pattern.
pub fn minimum_weight(spring: SpringType) -> f64 {
    match spring {
        SpringType::MkIii | SpringType::ErcJ => 904.0,
        SpringType::MkV => 1068.0,
    }
}

/// Maximum permissible decarburization depth in millimetres:
/// 0.25 mm or d/100, whichever is less.
pub fn max_decarb(bar_dia_mm: f64) -> f64 {
    (bar_dia_mm / 100.0).min(0.25)
}

/// Per-lot threshold inputs extracted once from the lot descriptor and
/// shared by every rule evaluation for that lot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdContext {
    /// Declared spring pattern.
    pub spring_type: SpringType,
    /// Bar diameter in millimetres.
    pub bar_dia_mm: f64,
}

impl ThresholdContext {
    /// Extracts the threshold inputs from a lot descriptor.
    pub fn for_lot(lot: &LotDescriptor) -> Self {
        Self {
            spring_type: lot.spring_type,
            bar_dia_mm: lot.bar_dia_mm,
        }
    }

    /// Toe-load band for this lot.
    pub fn toe_load_band(&self) -> ToeLoadBand {
        toe_load_band(self.spring_type)
    }

    /// Minimum piece weight for this lot.
    pub fn minimum_weight(&self) -> f64 {
        minimum_weight(self.spring_type)
    }

    /// Decarburization cap for this lot.
    pub fn max_decarb(&self) -> f64 {
        max_decarb(self.bar_dia_mm)
    }
}
