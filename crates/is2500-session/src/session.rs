use is2500_core::{Attribute, ErrorInfo, InspectError, LotDescriptor, SampleValue, Verdict};
use is2500_judge::{rule_for, ThresholdContext};
use is2500_plan::{resolve, SamplingPlan};
use serde::{Deserialize, Serialize};

use crate::hash::SessionId;

/// Which sample stage a mutation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// First sampling (n1 slots).
    First,
    /// Second sampling (n2 slots).
    Second,
}

/// Operator decision resolving a parked stage-two conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationChoice {
    /// Hide the second-stage surface but retain its entered data.
    HideOnly,
    /// Wipe the second-stage data and hide the surface.
    ClearAndHide,
}

/// A stage-two retraction waiting on the operator. Raised when the
/// first-stage reject count leaves the inconclusive gap while the
/// second stage already holds entered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTwoConflict {
    /// First-stage reject count observed when the conflict arose.
    pub rejected1_at_conflict: u32,
}

/// Reject and entry counts over the entered slots of both stages,
/// exposed to callers for display next to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    /// Entered first-stage slots.
    pub entered1: u32,
    /// Rejected first-stage samples (R1).
    pub rejected1: u32,
    /// Entered second-stage slots.
    pub entered2: u32,
    /// Rejected second-stage samples (R2).
    pub rejected2: u32,
    /// R1 + R2.
    pub total: u32,
}

/// Sampling state for one (lot, attribute) pair.
///
/// The session is an immutable value: every mutation is a pure
/// transition returning the successor state, so callers can test the
/// protocol without a UI harness and the verdict can never drift from
/// the arrays it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSession {
    id: SessionId,
    lot_no: String,
    attribute: Attribute,
    plan: SamplingPlan,
    context: ThresholdContext,
    stage1: Box<[Option<SampleValue>]>,
    stage2: Box<[Option<SampleValue>]>,
    stage2_visible: bool,
    pending_confirmation: Option<StageTwoConflict>,
}

impl SamplingSession {
    /// Opens an empty session for a lot and attribute. Also the contract
    /// for a failed collaborator load: start empty rather than propagate.
    pub fn open(lot: &LotDescriptor, attribute: Attribute) -> Self {
        let plan = resolve(lot.quantity, attribute.plan_family());
        Self {
            id: SessionId::derive(&lot.lot_no, attribute),
            lot_no: lot.lot_no.clone(),
            attribute,
            plan,
            context: ThresholdContext::for_lot(lot),
            stage1: empty_slots(plan.n1),
            stage2: empty_slots(plan.n2),
            stage2_visible: false,
            pending_confirmation: None,
        }
    }

    /// Rebuilds a session from persisted slot contents. Visibility is
    /// derived from the gap condition alone; restoring never raises a
    /// confirmation, because hysteresis belongs to edit transitions.
    pub(crate) fn restore(
        lot: &LotDescriptor,
        attribute: Attribute,
        stage1: Box<[Option<SampleValue>]>,
        stage2: Box<[Option<SampleValue>]>,
    ) -> Self {
        let mut session = Self::open(lot, attribute);
        debug_assert_eq!(stage1.len(), session.stage1.len());
        debug_assert_eq!(stage2.len(), session.stage2.len());
        session.stage1 = stage1;
        session.stage2 = stage2;
        session.stage2_visible = session.plan.needs_second_stage(session.tally().rejected1);
        session
    }

    /// Deterministic identifier for this (lot, attribute) pair.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Lot number this session belongs to.
    pub fn lot_no(&self) -> &str {
        &self.lot_no
    }

    /// Attribute this session judges.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Resolved sampling plan.
    pub fn plan(&self) -> &SamplingPlan {
        &self.plan
    }

    /// Threshold context shared by every rule evaluation.
    pub fn context(&self) -> &ThresholdContext {
        &self.context
    }

    /// Slot contents of a stage.
    pub fn slots(&self, stage: Stage) -> &[Option<SampleValue>] {
        match stage {
            Stage::First => &self.stage1,
            Stage::Second => &self.stage2,
        }
    }

    /// Whether the second-stage input surface is currently shown.
    pub fn stage2_visible(&self) -> bool {
        self.stage2_visible
    }

    /// The parked retraction conflict, if one awaits the operator.
    pub fn pending_confirmation(&self) -> Option<&StageTwoConflict> {
        self.pending_confirmation.as_ref()
    }

    /// Sets one slot. Blank values normalize to unset so they count
    /// neither as entered nor as rejected.
    pub fn apply_edit(
        &self,
        stage: Stage,
        index: usize,
        value: Option<SampleValue>,
    ) -> Result<Self, InspectError> {
        let len = self.slots(stage).len();
        if index >= len {
            return Err(InspectError::Session(
                ErrorInfo::new("slot-out-of-range", "sample slot index exceeds stage size")
                    .with_context("index", index.to_string())
                    .with_context("stage_size", len.to_string()),
            ));
        }
        let mut next = self.clone();
        next.slots_mut(stage)[index] = normalize(value);
        Ok(next.reevaluate_gate())
    }

    /// Replaces the whole stage array from a bulk import (spreadsheet
    /// template upload). Shorter imports leave the tail unset; an
    /// oversize import is caller misuse.
    pub fn apply_bulk_import(
        &self,
        stage: Stage,
        values: Vec<Option<SampleValue>>,
    ) -> Result<Self, InspectError> {
        let len = self.slots(stage).len();
        if values.len() > len {
            return Err(InspectError::Session(
                ErrorInfo::new("import-overflow", "bulk import exceeds stage size")
                    .with_context("import_len", values.len().to_string())
                    .with_context("stage_size", len.to_string())
                    .with_hint("trim the imported rows to the plan's sample size"),
            ));
        }
        let mut next = self.clone();
        let slots = next.slots_mut(stage);
        for slot in slots.iter_mut() {
            *slot = None;
        }
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = normalize(value);
        }
        Ok(next.reevaluate_gate())
    }

    /// Resets every slot of a stage. Clearing the second stage also
    /// retracts its surface and drops any parked conflict (the data the
    /// conflict guarded is gone).
    pub fn clear_stage(&self, stage: Stage) -> Self {
        let mut next = self.clone();
        for slot in next.slots_mut(stage).iter_mut() {
            *slot = None;
        }
        if stage == Stage::Second {
            next.stage2_visible = false;
            next.pending_confirmation = None;
        }
        next.reevaluate_gate()
    }

    /// Resolves a parked stage-two conflict with the operator's choice.
    pub fn resolve_confirmation(
        &self,
        choice: ConfirmationChoice,
    ) -> Result<Self, InspectError> {
        if self.pending_confirmation.is_none() {
            return Err(InspectError::Session(ErrorInfo::new(
                "no-pending-confirmation",
                "no stage-two conflict awaits resolution",
            )));
        }
        let mut next = self.clone();
        next.pending_confirmation = None;
        next.stage2_visible = false;
        if choice == ConfirmationChoice::ClearAndHide {
            for slot in next.stage2.iter_mut() {
                *slot = None;
            }
        }
        // Edits made while the conflict was parked may have moved R1
        // back into the gap; the gate re-arms against current data.
        Ok(next.reevaluate_gate())
    }

    /// Counts entered and rejected samples over both stages.
    pub fn tally(&self) -> SessionTally {
        let rule = rule_for(self.attribute);
        let count = |slots: &[Option<SampleValue>]| {
            let mut entered = 0u32;
            let mut rejected = 0u32;
            for value in slots.iter().flatten() {
                entered += 1;
                if rule.is_reject(value, &self.context) {
                    rejected += 1;
                }
            }
            (entered, rejected)
        };
        let (entered1, rejected1) = count(&self.stage1);
        let (entered2, rejected2) = count(&self.stage2);
        SessionTally {
            entered1,
            rejected1,
            entered2,
            rejected2,
            total: rejected1 + rejected2,
        }
    }

    /// Derives the current verdict. Recomputed on demand, never cached.
    ///
    /// R1 at or above the rejection number fails the lot before the
    /// first stage is even full. Acceptance always requires the relevant
    /// stages to be fully entered. Single-sampling plans have an empty
    /// gap (re1 = ac1 + 1) and therefore resolve from stage one alone.
    pub fn verdict(&self) -> Verdict {
        let tally = self.tally();
        if tally.rejected1 >= self.plan.re1 {
            return Verdict::Rejected;
        }
        if tally.rejected1 <= self.plan.ac1 {
            return if tally.entered1 == self.plan.n1 {
                Verdict::Accepted
            } else {
                Verdict::Pending
            };
        }
        if tally.total >= self.plan.cumm_rej {
            return Verdict::Rejected;
        }
        if tally.entered1 == self.plan.n1 && tally.entered2 == self.plan.n2 {
            Verdict::Accepted
        } else {
            Verdict::Pending
        }
    }

    fn slots_mut(&mut self, stage: Stage) -> &mut [Option<SampleValue>] {
        match stage {
            Stage::First => &mut self.stage1,
            Stage::Second => &mut self.stage2,
        }
    }

    /// Stage gate. Visibility tracks the inconclusive gap continuously,
    /// evaluated over the entered first-stage slots even while the stage
    /// is partially filled. Leaving the gap with an empty second stage
    /// hides silently; with entered data it parks a conflict for the
    /// operator. While a conflict is parked the gate takes no automatic
    /// decision.
    fn reevaluate_gate(mut self) -> Self {
        if self.pending_confirmation.is_some() {
            return self;
        }
        let tally = self.tally();
        let in_gap = self.plan.needs_second_stage(tally.rejected1);
        if in_gap && !self.stage2_visible {
            self.stage2_visible = true;
        } else if !in_gap && self.stage2_visible {
            if tally.entered2 == 0 {
                self.stage2_visible = false;
                for slot in self.stage2.iter_mut() {
                    *slot = None;
                }
            } else {
                self.pending_confirmation = Some(StageTwoConflict {
                    rejected1_at_conflict: tally.rejected1,
                });
            }
        }
        self
    }
}

fn empty_slots(n: u32) -> Box<[Option<SampleValue>]> {
    vec![None; n as usize].into_boxed_slice()
}

fn normalize(value: Option<SampleValue>) -> Option<SampleValue> {
    value.filter(|v| !v.is_blank())
}
