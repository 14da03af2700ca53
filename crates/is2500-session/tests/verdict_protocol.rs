use is2500_core::{Attribute, SampleValue, Verdict};
use is2500_session::{SamplingSession, Stage};


use fixtures::{fill_weights, grams, lot, weight_session_500};

#[test]
fn empty_session_is_pending() {
    let session = weight_session_500();
    assert_eq!(session.verdict(), Verdict::Pending);
    assert_eq!(session.tally().entered1, 0);
}

#[test]
fn accepts_at_acceptance_number_when_stage_full() {
    // ac1 = 1: one reject among a full first stage still accepts.
    let session = fill_weights(weight_session_500(), Stage::First, 32, 1);
    assert_eq!(session.tally().rejected1, 1);
    assert_eq!(session.verdict(), Verdict::Accepted);
}

#[test]
fn acceptance_waits_for_a_full_stage() {
    let session = fill_weights(weight_session_500(), Stage::First, 31, 0);
    assert_eq!(session.verdict(), Verdict::Pending);
    let session = session.apply_edit(Stage::First, 31, grams(950.0)).unwrap();
    assert_eq!(session.verdict(), Verdict::Accepted);
}

#[test]
fn rejects_fail_fast_before_stage_full() {
    // re1 = 3: the third reject decides with only five slots entered.
    let session = fill_weights(weight_session_500(), Stage::First, 5, 3);
    assert_eq!(session.verdict(), Verdict::Rejected);
}

#[test]
fn gap_requires_second_stage() {
    let session = fill_weights(weight_session_500(), Stage::First, 32, 2);
    assert_eq!(session.verdict(), Verdict::Pending);
    assert!(session.stage2_visible());
}

#[test]
fn second_stage_resolves_under_cumulative_limit() {
    // R1 = 2, R2 = 2: total 4 stays under the cumulative limit of 5.
    let session = fill_weights(weight_session_500(), Stage::First, 32, 2);
    let session = fill_weights(session, Stage::Second, 32, 2);
    assert_eq!(session.tally().total, 4);
    assert_eq!(session.verdict(), Verdict::Accepted);
}

#[test]
fn cumulative_limit_rejects_before_second_stage_full() {
    let session = fill_weights(weight_session_500(), Stage::First, 32, 2);
    let session = fill_weights(session, Stage::Second, 10, 3);
    assert_eq!(session.tally().total, 5);
    assert_eq!(session.verdict(), Verdict::Rejected);
}

#[test]
fn single_sampling_resolves_from_stage_one() {
    let session = SamplingSession::open(&lot(100), Attribute::Weight);
    assert_eq!(session.plan().n1, 20);
    assert!(session.plan().single_sampling);

    let accepted = fill_weights(session.clone(), Stage::First, 20, 0);
    assert_eq!(accepted.verdict(), Verdict::Accepted);

    let rejected = fill_weights(session, Stage::First, 1, 1);
    assert_eq!(rejected.verdict(), Verdict::Rejected);
}

#[test]
fn zero_quantity_lot_accepts_vacuously() {
    let session = SamplingSession::open(&lot(0), Attribute::Weight);
    assert_eq!(session.plan().n1, 0);
    assert_eq!(session.verdict(), Verdict::Accepted);
}

#[test]
fn blank_toe_load_normalizes_to_unset() {
    let session = SamplingSession::open(&lot(500), Attribute::ToeLoad);
    let blank = SampleValue::ToeLoad {
        deflection_mm: Some(12.5),
        readings: [None, None, None],
    };
    let session = session.apply_edit(Stage::First, 0, Some(blank)).unwrap();
    assert!(session.slots(Stage::First)[0].is_none());
    assert_eq!(session.tally().entered1, 0);
}

#[test]
fn edit_out_of_range_is_session_misuse() {
    let session = weight_session_500();
    let err = session
        .apply_edit(Stage::First, 32, grams(950.0))
        .unwrap_err();
    assert_eq!(err.info().code, "slot-out-of-range");
}

#[test]
fn bulk_import_pads_short_and_rejects_oversize() {
    let session = weight_session_500();
    let short = session
        .apply_bulk_import(Stage::First, vec![grams(950.0); 10])
        .unwrap();
    assert_eq!(short.tally().entered1, 10);
    assert!(short.slots(Stage::First)[10..].iter().all(Option::is_none));

    let err = session
        .apply_bulk_import(Stage::First, vec![grams(950.0); 33])
        .unwrap_err();
    assert_eq!(err.info().code, "import-overflow");
}

#[test]
fn clear_stage_resets_slots() {
    let session = fill_weights(weight_session_500(), Stage::First, 32, 1);
    let cleared = session.clear_stage(Stage::First);
    assert_eq!(cleared.tally().entered1, 0);
    assert_eq!(cleared.verdict(), Verdict::Pending);
}
