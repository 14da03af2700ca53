use serde::{Deserialize, Serialize};

/// Outcome of offering a gauge to one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaugeFit {
    /// Gauge behaved as specified.
    Ok,
    /// Gauge did not behave as specified.
    NotOk,
}

/// Inclusion series per the micrographic chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InclusionForm {
    /// Thin series.
    Thin,
    /// Thick (heavy) series.
    Thick,
}

/// One inclusion channel reading: the series observed plus its severity
/// rating on the chart scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclusionChannel {
    /// Observed series.
    pub form: InclusionForm,
    /// Severity rating; ratings above the permissible maximum reject.
    pub severity: f64,
}

/// Microstructure classification of an etched section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Microstructure {
    /// Fully tempered martensite; the only acceptable structure.
    TemperedMartensite,
    /// Anything else.
    Other,
}

/// Freedom-from-defects assessment of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectFreedom {
    /// No objectionable defects observed.
    Satisfactory,
    /// Objectionable defects observed.
    NotSatisfactory,
}

/// Directly judged per-piece outcome for attributes whose measurement
/// happens off-form (visual surface check, application and deflection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    /// Piece conforms.
    Pass,
    /// Piece does not conform.
    Fail,
}

/// Raw observation entered for one sample slot. The variant in use is
/// fixed by the attribute; reject rules treat a mismatched variant as a
/// non-reject, the same way malformed text input is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SampleValue {
    /// Single numeric measurement (HRC, grams, millimetres).
    Measure(f64),
    /// Toe load: up to three load readings at a recorded deflection.
    ToeLoad {
        /// Deflection at which the readings were taken, when recorded.
        deflection_mm: Option<f64>,
        /// Individual load readings; absent readings are skipped when
        /// averaging.
        readings: [Option<f64>; 3],
    },
    /// Dimensional gauge triple: go, no-go, flat bearing.
    Gauge {
        /// Go gauge outcome.
        go: GaugeFit,
        /// No-go gauge outcome.
        no_go: GaugeFit,
        /// Flat-bearing check outcome.
        flat: GaugeFit,
    },
    /// Four-channel inclusion rating.
    Inclusion {
        /// Channel A.
        a: InclusionChannel,
        /// Channel B.
        b: InclusionChannel,
        /// Channel C.
        c: InclusionChannel,
        /// Channel D.
        d: InclusionChannel,
    },
    /// Microstructure plus freedom-from-defects assessment.
    Structure {
        /// Microstructure classification.
        micro: Microstructure,
        /// Defect-freedom assessment.
        defects: DefectFreedom,
    },
    /// Directly judged pass/fail observation.
    Judged(Judgement),
}

impl SampleValue {
    /// Whether the value carries no usable observation. Blank values are
    /// normalized to unset slots by the sampling session so they count
    /// neither as entered nor as rejected.
    pub fn is_blank(&self) -> bool {
        match self {
            SampleValue::ToeLoad { readings, .. } => readings.iter().all(Option::is_none),
            _ => false,
        }
    }

    /// Average of the present toe-load readings, if this is a toe-load
    /// value with at least one reading.
    pub fn toe_load_average(&self) -> Option<f64> {
        match self {
            SampleValue::ToeLoad { readings, .. } => {
                let present: Vec<f64> = readings.iter().flatten().copied().collect();
                if present.is_empty() {
                    None
                } else {
                    Some(present.iter().sum::<f64>() / present.len() as f64)
                }
            }
            _ => None,
        }
    }
}
