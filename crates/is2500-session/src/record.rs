use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use is2500_core::{
    Attribute, AuditTrail, DefectFreedom, ErrorInfo, GaugeFit, InclusionChannel, InclusionForm,
    InspectError, Judgement, LotDescriptor, Microstructure, SampleValue, SchemaVersion,
};
use serde::{Deserialize, Serialize};

use crate::session::{SamplingSession, Stage};

/// One named sub-field of a multi-field sample: an optional numeric
/// value rendered as text and an optional categorical type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldEntry {
    /// Numeric value rendered as entered.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
    /// Categorical label.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
}

impl FieldEntry {
    fn value(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
            kind: None,
        }
    }

    fn kind(label: impl Into<String>) -> Self {
        Self {
            value: None,
            kind: Some(label.into()),
        }
    }
}

/// One persisted entered sample. Position is identified by the stage
/// (`samplingNo` 1 or 2) and the 1-based `sampleNo` within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSample {
    /// Stage: 1 for first sampling, 2 for second.
    pub sampling_no: u8,
    /// 1-based slot index within the stage.
    pub sample_no: u32,
    /// Scalar numeric observation rendered as text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sample_value: Option<String>,
    /// Scalar categorical observation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sample_type: Option<String>,
    /// Per-field entries for multi-field tests.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fields: Option<BTreeMap<String, FieldEntry>>,
}

/// Persisted record for one (lot, attribute) pair. Only entered slots
/// are stored; round-tripping through this shape reproduces the same
/// verdict and tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecordPayload {
    /// Schema of this payload.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Lot number.
    pub lot_no: String,
    /// Attribute wire name.
    pub attribute: String,
    /// Operator remarks.
    pub remarks: String,
    /// Audit trail stamped by the caller.
    #[serde(default)]
    pub audit: AuditTrail,
    /// Entered samples across both stages.
    pub samples: Vec<PersistedSample>,
}

/// Encodes a session into the persisted record shape.
pub fn encode(session: &SamplingSession, remarks: &str, audit: AuditTrail) -> SampleRecordPayload {
    let mut samples = Vec::new();
    for (stage, sampling_no) in [(Stage::First, 1u8), (Stage::Second, 2u8)] {
        for (index, slot) in session.slots(stage).iter().enumerate() {
            if let Some(value) = slot {
                samples.push(encode_sample(sampling_no, index as u32 + 1, value));
            }
        }
    }
    SampleRecordPayload {
        schema_version: SchemaVersion::default(),
        lot_no: session.lot_no().to_string(),
        attribute: session.attribute().wire_name().to_string(),
        remarks: remarks.to_string(),
        audit,
        samples,
    }
}

/// Rebuilds a session (and its remarks) from a persisted record.
///
/// Decoding is lenient the way the entry forms are: malformed numeric
/// text or incomplete multi-field samples leave the slot unset, and
/// samples pointing outside the current plan's stage sizes are dropped
/// (a stale record saved against a different lot quantity). A record
/// naming an unknown attribute is a structural error.
pub fn decode(
    payload: &SampleRecordPayload,
    lot: &LotDescriptor,
) -> Result<(SamplingSession, String), InspectError> {
    let attribute = Attribute::from_wire_name(&payload.attribute).ok_or_else(|| {
        InspectError::Record(
            ErrorInfo::new("unknown-attribute", "record names an unknown attribute")
                .with_context("attribute", payload.attribute.clone()),
        )
    })?;
    let empty = SamplingSession::open(lot, attribute);
    let mut stage1: Vec<Option<SampleValue>> = vec![None; empty.slots(Stage::First).len()];
    let mut stage2: Vec<Option<SampleValue>> = vec![None; empty.slots(Stage::Second).len()];
    for sample in &payload.samples {
        let slots = match sample.sampling_no {
            1 => &mut stage1,
            2 => &mut stage2,
            _ => continue,
        };
        if sample.sample_no == 0 {
            continue;
        }
        let index = sample.sample_no as usize - 1;
        if index < slots.len() {
            slots[index] = decode_sample(attribute, sample);
        }
    }
    let session = SamplingSession::restore(
        lot,
        attribute,
        stage1.into_boxed_slice(),
        stage2.into_boxed_slice(),
    );
    Ok((session, payload.remarks.clone()))
}

/// Serializes a record to pretty JSON.
pub fn to_json(payload: &SampleRecordPayload) -> Result<String, InspectError> {
    serde_json::to_string_pretty(payload)
        .map_err(|err| InspectError::Record(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a record from JSON.
pub fn from_json(data: &str) -> Result<SampleRecordPayload, InspectError> {
    serde_json::from_str(data)
        .map_err(|err| InspectError::Record(ErrorInfo::new("json-deserialize", err.to_string())))
}

/// Serializes a record into a binary blob. The blob wraps the JSON
/// form so optional fields stay schema-tolerant across versions.
pub fn to_bytes(payload: &SampleRecordPayload) -> Result<Vec<u8>, InspectError> {
    let json = to_json(payload)?;
    bincode::serialize(&json)
        .map_err(|err| InspectError::Record(ErrorInfo::new("bincode-serialize", err.to_string())))
}

/// Rehydrates a record from a binary blob.
pub fn from_bytes(bytes: &[u8]) -> Result<SampleRecordPayload, InspectError> {
    let json: String = bincode::deserialize(bytes)
        .map_err(|err| InspectError::Record(ErrorInfo::new("bincode-deserialize", err.to_string())))?;
    from_json(&json)
}

/// Writes the record to disk as pretty JSON.
pub fn store(payload: &SampleRecordPayload, path: &Path) -> Result<(), InspectError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            InspectError::Record(
                ErrorInfo::new("record-mkdir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let json = to_json(payload)?;
    fs::write(path, json).map_err(|err| {
        InspectError::Record(
            ErrorInfo::new("record-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Restores a record from disk.
pub fn load(path: &Path) -> Result<SampleRecordPayload, InspectError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        InspectError::Record(
            ErrorInfo::new("record-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json(&contents)
}

const PASS_LABEL: &str = "PASS";
const FAIL_LABEL: &str = "FAIL";
const GAUGE_OK: &str = "OK";
const GAUGE_NOT_OK: &str = "NOT_OK";

fn encode_sample(sampling_no: u8, sample_no: u32, value: &SampleValue) -> PersistedSample {
    let mut sample = PersistedSample {
        sampling_no,
        sample_no,
        sample_value: None,
        sample_type: None,
        fields: None,
    };
    match value {
        SampleValue::Measure(number) => {
            sample.sample_value = Some(number.to_string());
        }
        SampleValue::Judged(judgement) => {
            sample.sample_type = Some(
                match judgement {
                    Judgement::Pass => PASS_LABEL,
                    Judgement::Fail => FAIL_LABEL,
                }
                .to_string(),
            );
        }
        SampleValue::Gauge { go, no_go, flat } => {
            let mut fields = BTreeMap::new();
            for (name, fit) in [("go", go), ("noGo", no_go), ("flat", flat)] {
                fields.insert(name.to_string(), FieldEntry::kind(gauge_label(*fit)));
            }
            sample.fields = Some(fields);
        }
        SampleValue::Inclusion { a, b, c, d } => {
            let mut fields = BTreeMap::new();
            for (name, channel) in [("a", a), ("b", b), ("c", c), ("d", d)] {
                fields.insert(
                    name.to_string(),
                    FieldEntry {
                        value: Some(channel.severity.to_string()),
                        kind: Some(inclusion_label(channel.form).to_string()),
                    },
                );
            }
            sample.fields = Some(fields);
        }
        SampleValue::Structure { micro, defects } => {
            let mut fields = BTreeMap::new();
            fields.insert(
                "microstructure".to_string(),
                FieldEntry::kind(micro_label(*micro)),
            );
            fields.insert(
                "freedomFromDefects".to_string(),
                FieldEntry::kind(defects_label(*defects)),
            );
            sample.fields = Some(fields);
        }
        SampleValue::ToeLoad {
            deflection_mm,
            readings,
        } => {
            let mut fields = BTreeMap::new();
            if let Some(deflection) = deflection_mm {
                fields.insert("deflection".to_string(), FieldEntry::value(deflection.to_string()));
            }
            for (name, reading) in [("r1", readings[0]), ("r2", readings[1]), ("r3", readings[2])]
            {
                if let Some(reading) = reading {
                    fields.insert(name.to_string(), FieldEntry::value(reading.to_string()));
                }
            }
            sample.fields = Some(fields);
        }
    }
    sample
}

fn decode_sample(attribute: Attribute, sample: &PersistedSample) -> Option<SampleValue> {
    match attribute {
        Attribute::Hardness | Attribute::Weight | Attribute::Decarburization => sample
            .sample_value
            .as_deref()
            .and_then(parse_number)
            .map(SampleValue::Measure),
        Attribute::Visual | Attribute::Deflection => {
            match sample.sample_type.as_deref() {
                Some(PASS_LABEL) => Some(SampleValue::Judged(Judgement::Pass)),
                Some(FAIL_LABEL) => Some(SampleValue::Judged(Judgement::Fail)),
                _ => None,
            }
        }
        Attribute::Dimensional => {
            let fields = sample.fields.as_ref()?;
            let go = gauge_fit(fields.get("go")?)?;
            let no_go = gauge_fit(fields.get("noGo")?)?;
            let flat = gauge_fit(fields.get("flat")?)?;
            Some(SampleValue::Gauge { go, no_go, flat })
        }
        Attribute::InclusionRating => {
            let fields = sample.fields.as_ref()?;
            let a = inclusion_channel(fields.get("a")?)?;
            let b = inclusion_channel(fields.get("b")?)?;
            let c = inclusion_channel(fields.get("c")?)?;
            let d = inclusion_channel(fields.get("d")?)?;
            Some(SampleValue::Inclusion { a, b, c, d })
        }
        Attribute::Microstructure => {
            let fields = sample.fields.as_ref()?;
            let micro = match fields.get("microstructure")?.kind.as_deref()? {
                MICRO_TEMPERED => Microstructure::TemperedMartensite,
                _ => Microstructure::Other,
            };
            let defects = match fields.get("freedomFromDefects")?.kind.as_deref()? {
                DEFECTS_SATISFACTORY => DefectFreedom::Satisfactory,
                _ => DefectFreedom::NotSatisfactory,
            };
            Some(SampleValue::Structure { micro, defects })
        }
        Attribute::ToeLoad => {
            let fields = sample.fields.as_ref()?;
            let number = |name: &str| {
                fields
                    .get(name)
                    .and_then(|entry| entry.value.as_deref())
                    .and_then(parse_number)
            };
            let value = SampleValue::ToeLoad {
                deflection_mm: number("deflection"),
                readings: [number("r1"), number("r2"), number("r3")],
            };
            if value.is_blank() {
                None
            } else {
                Some(value)
            }
        }
    }
}

/// Lenient numeric parse matching the entry forms: surrounding
/// whitespace is dropped and a decimal comma is accepted.
fn parse_number(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

fn gauge_label(fit: GaugeFit) -> &'static str {
    match fit {
        GaugeFit::Ok => GAUGE_OK,
        GaugeFit::NotOk => GAUGE_NOT_OK,
    }
}

fn gauge_fit(entry: &FieldEntry) -> Option<GaugeFit> {
    match entry.kind.as_deref()? {
        GAUGE_OK => Some(GaugeFit::Ok),
        GAUGE_NOT_OK => Some(GaugeFit::NotOk),
        _ => None,
    }
}

const INCLUSION_THIN: &str = "Thin";
const INCLUSION_THICK: &str = "Thick";
const MICRO_TEMPERED: &str = "Tempered Martensite";
const MICRO_OTHER: &str = "Other";
const DEFECTS_SATISFACTORY: &str = "Satisfactory";
const DEFECTS_NOT_SATISFACTORY: &str = "Not Satisfactory";

fn inclusion_label(form: InclusionForm) -> &'static str {
    match form {
        InclusionForm::Thin => INCLUSION_THIN,
        InclusionForm::Thick => INCLUSION_THICK,
    }
}

fn inclusion_channel(entry: &FieldEntry) -> Option<InclusionChannel> {
    let severity = entry.value.as_deref().and_then(parse_number)?;
    let form = match entry.kind.as_deref() {
        Some(INCLUSION_THICK) => InclusionForm::Thick,
        _ => InclusionForm::Thin,
    };
    Some(InclusionChannel { form, severity })
}

fn micro_label(micro: Microstructure) -> &'static str {
    match micro {
        Microstructure::TemperedMartensite => MICRO_TEMPERED,
        Microstructure::Other => MICRO_OTHER,
    }
}

fn defects_label(defects: DefectFreedom) -> &'static str {
    match defects {
        DefectFreedom::Satisfactory => DEFECTS_SATISFACTORY,
        DefectFreedom::NotSatisfactory => DEFECTS_NOT_SATISFACTORY,
    }
}
