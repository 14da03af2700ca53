use std::collections::{BTreeMap, VecDeque};

use is2500_core::{
    Attribute, AuditTrail, ErrorInfo, InspectError, LotDescriptor, LotVerdict, SampleValue,
    Verdict,
};
use is2500_session::record::{self, SampleRecordPayload};
use is2500_session::{ConfirmationChoice, SamplingSession, SessionTally, Stage};

use crate::aggregate::lot_verdict;

/// Owns every attribute session of one lot and serializes their
/// stage-two confirmations: however many sessions are conflicted, the
/// operator is shown exactly one at a time, in arrival order.
#[derive(Debug, Clone)]
pub struct LotInspection {
    descriptor: LotDescriptor,
    sessions: BTreeMap<Attribute, SamplingSession>,
    remarks: BTreeMap<Attribute, String>,
    conflict_order: VecDeque<Attribute>,
}

impl LotInspection {
    /// Creates an inspection with no attribute opened yet.
    pub fn new(descriptor: LotDescriptor) -> Self {
        Self {
            descriptor,
            sessions: BTreeMap::new(),
            remarks: BTreeMap::new(),
            conflict_order: VecDeque::new(),
        }
    }

    /// Lot metadata this inspection was opened for.
    pub fn descriptor(&self) -> &LotDescriptor {
        &self.descriptor
    }

    /// Opens (or returns) the session for an attribute.
    pub fn open_attribute(&mut self, attribute: Attribute) -> &SamplingSession {
        self.sessions
            .entry(attribute)
            .or_insert_with(|| SamplingSession::open(&self.descriptor, attribute))
    }

    /// The session for an attribute, if opened.
    pub fn session(&self, attribute: Attribute) -> Option<&SamplingSession> {
        self.sessions.get(&attribute)
    }

    /// Attributes opened so far, in canonical order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.sessions.keys().copied()
    }

    /// Applies a single-slot edit to an attribute's session, opening it
    /// on first touch.
    pub fn apply_edit(
        &mut self,
        attribute: Attribute,
        stage: Stage,
        index: usize,
        value: Option<SampleValue>,
    ) -> Result<(), InspectError> {
        self.open_attribute(attribute);
        let next = self.sessions[&attribute].apply_edit(stage, index, value)?;
        self.sessions.insert(attribute, next);
        self.refresh_conflicts(attribute);
        Ok(())
    }

    /// Applies a bulk import to an attribute's session.
    pub fn apply_bulk_import(
        &mut self,
        attribute: Attribute,
        stage: Stage,
        values: Vec<Option<SampleValue>>,
    ) -> Result<(), InspectError> {
        self.open_attribute(attribute);
        let next = self.sessions[&attribute].apply_bulk_import(stage, values)?;
        self.sessions.insert(attribute, next);
        self.refresh_conflicts(attribute);
        Ok(())
    }

    /// Clears a stage of an attribute's session.
    pub fn clear_stage(&mut self, attribute: Attribute, stage: Stage) -> Result<(), InspectError> {
        let session = self.sessions.get(&attribute).ok_or_else(|| {
            InspectError::Lot(
                ErrorInfo::new("attribute-not-opened", "no session opened for attribute")
                    .with_context("attribute", attribute.to_string()),
            )
        })?;
        let next = session.clear_stage(stage);
        self.sessions.insert(attribute, next);
        self.refresh_conflicts(attribute);
        Ok(())
    }

    /// The attribute whose stage-two conflict is currently surfaced, if
    /// any. Later-arriving conflicts wait their turn behind it.
    pub fn active_confirmation(&self) -> Option<Attribute> {
        self.conflict_order.front().copied()
    }

    /// Resolves the surfaced conflict with the operator's choice and
    /// returns the attribute it belonged to.
    pub fn resolve_active(
        &mut self,
        choice: ConfirmationChoice,
    ) -> Result<Attribute, InspectError> {
        let attribute = self.active_confirmation().ok_or_else(|| {
            InspectError::Lot(ErrorInfo::new(
                "no-active-confirmation",
                "no stage-two conflict is surfaced for this lot",
            ))
        })?;
        let next = self.sessions[&attribute].resolve_confirmation(choice)?;
        self.sessions.insert(attribute, next);
        self.refresh_conflicts(attribute);
        Ok(attribute)
    }

    /// Verdict of one attribute, if its session is opened.
    pub fn verdict_of(&self, attribute: Attribute) -> Option<Verdict> {
        self.sessions.get(&attribute).map(SamplingSession::verdict)
    }

    /// Counts of one attribute, if its session is opened.
    pub fn tally_of(&self, attribute: Attribute) -> Option<SessionTally> {
        self.sessions.get(&attribute).map(|s| s.tally())
    }

    /// Lot verdict over every opened attribute.
    pub fn verdict(&self) -> LotVerdict {
        lot_verdict(
            self.sessions
                .iter()
                .map(|(attribute, session)| (*attribute, session.verdict())),
        )
    }

    /// Stores operator remarks for an attribute.
    pub fn set_remarks(&mut self, attribute: Attribute, remarks: impl Into<String>) {
        self.remarks.insert(attribute, remarks.into());
    }

    /// Remarks stored for an attribute.
    pub fn remarks_of(&self, attribute: Attribute) -> &str {
        self.remarks.get(&attribute).map_or("", String::as_str)
    }

    /// Encodes an opened attribute into the persisted record shape.
    pub fn export_record(
        &self,
        attribute: Attribute,
        audit: AuditTrail,
    ) -> Option<SampleRecordPayload> {
        self.sessions
            .get(&attribute)
            .map(|session| record::encode(session, self.remarks_of(attribute), audit))
    }

    /// Restores an attribute session from a persisted record. Loading
    /// derives visibility from the data alone and never surfaces a
    /// confirmation.
    pub fn import_record(&mut self, payload: &SampleRecordPayload) -> Result<(), InspectError> {
        let (session, remarks) = record::decode(payload, &self.descriptor)?;
        let attribute = session.attribute();
        self.sessions.insert(attribute, session);
        self.remarks.insert(attribute, remarks);
        self.refresh_conflicts(attribute);
        Ok(())
    }

    /// Keeps the conflict queue consistent with the sessions: drops
    /// attributes whose conflict is gone, enqueues a newly conflicted
    /// attribute at the back.
    fn refresh_conflicts(&mut self, touched: Attribute) {
        self.conflict_order
            .retain(|attribute| match self.sessions.get(attribute) {
                Some(session) => session.pending_confirmation().is_some(),
                None => false,
            });
        let pending = self.sessions[&touched].pending_confirmation().is_some();
        if pending && !self.conflict_order.contains(&touched) {
            self.conflict_order.push_back(touched);
        }
    }
}
