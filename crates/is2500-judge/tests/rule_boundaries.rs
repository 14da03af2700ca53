use is2500_core::{
    Attribute, DefectFreedom, GaugeFit, InclusionChannel, InclusionForm, Judgement,
    Microstructure, SampleValue, SpringType,
};
use is2500_judge::{max_decarb, rule_for, ThresholdContext, ToeLoadBand};

fn ctx(spring: SpringType, bar_dia_mm: f64) -> ThresholdContext {
    ThresholdContext {
        spring_type: spring,
        bar_dia_mm,
    }
}

fn toe_load(readings: [Option<f64>; 3]) -> SampleValue {
    SampleValue::ToeLoad {
        deflection_mm: Some(12.5),
        readings,
    }
}

fn inclusion(a: f64, b: f64, c: f64, d: f64) -> SampleValue {
    let channel = |severity| InclusionChannel {
        form: InclusionForm::Thin,
        severity,
    };
    SampleValue::Inclusion {
        a: channel(a),
        b: channel(b),
        c: channel(c),
        d: channel(d),
    }
}

#[test]
fn hardness_window_is_inclusive() {
    let rule = rule_for(Attribute::Hardness);
    let ctx = ctx(SpringType::MkIii, 20.6);
    assert!(!rule.is_reject(&SampleValue::Measure(40.0), &ctx));
    assert!(!rule.is_reject(&SampleValue::Measure(44.0), &ctx));
    assert!(rule.is_reject(&SampleValue::Measure(39.9), &ctx));
    assert!(rule.is_reject(&SampleValue::Measure(44.1), &ctx));
}

#[test]
fn toe_load_bands_per_spring_type() {
    let rule = rule_for(Attribute::ToeLoad);
    let mk3 = ctx(SpringType::MkIii, 20.6);
    assert!(!rule.is_reject(&toe_load([Some(850.0), None, None]), &mk3));
    assert!(!rule.is_reject(&toe_load([Some(1100.0), None, None]), &mk3));
    assert!(rule.is_reject(&toe_load([Some(849.9), None, None]), &mk3));
    assert!(rule.is_reject(&toe_load([Some(1100.1), None, None]), &mk3));

    let mk5 = ctx(SpringType::MkV, 20.6);
    assert!(!rule.is_reject(&toe_load([Some(1200.0), Some(1500.0), None]), &mk5));
    assert!(rule.is_reject(&toe_load([Some(1100.0), None, None]), &mk5));
}

#[test]
fn erc_j_floor_is_exclusive_and_open_ended() {
    let rule = rule_for(Attribute::ToeLoad);
    let ercj = ctx(SpringType::ErcJ, 20.6);
    assert!(rule.is_reject(&toe_load([Some(650.0), None, None]), &ercj));
    assert!(!rule.is_reject(&toe_load([Some(650.1), None, None]), &ercj));
    assert!(!rule.is_reject(&toe_load([Some(5000.0), None, None]), &ercj));
    assert_eq!(ercj.toe_load_band(), ToeLoadBand::OpenAbove { floor: 650.0 });
}

#[test]
fn toe_load_judges_the_average() {
    let rule = rule_for(Attribute::ToeLoad);
    let mk3 = ctx(SpringType::MkIii, 20.6);
    // 800 alone fails but the three-reading average is 900.
    assert!(!rule.is_reject(
        &toe_load([Some(800.0), Some(900.0), Some(1000.0)]),
        &mk3
    ));
    // All readings absent: nothing to judge.
    assert!(!rule.is_reject(&toe_load([None, None, None]), &mk3));
}

#[test]
fn weight_minimum_per_spring_type() {
    let rule = rule_for(Attribute::Weight);
    let mk3 = ctx(SpringType::MkIii, 20.6);
    assert!(!rule.is_reject(&SampleValue::Measure(904.0), &mk3));
    assert!(rule.is_reject(&SampleValue::Measure(903.9), &mk3));

    let mk5 = ctx(SpringType::MkV, 20.6);
    assert!(!rule.is_reject(&SampleValue::Measure(1068.0), &mk5));
    assert!(rule.is_reject(&SampleValue::Measure(1067.0), &mk5));

    let ercj = ctx(SpringType::ErcJ, 20.6);
    assert!(!rule.is_reject(&SampleValue::Measure(904.0), &ercj));
}

#[test]
fn gauge_rejects_on_any_bad_fit() {
    let rule = rule_for(Attribute::Dimensional);
    let ctx = ctx(SpringType::MkIii, 20.6);
    let good = SampleValue::Gauge {
        go: GaugeFit::Ok,
        no_go: GaugeFit::Ok,
        flat: GaugeFit::Ok,
    };
    assert!(!rule.is_reject(&good, &ctx));
    for bad in [
        SampleValue::Gauge {
            go: GaugeFit::NotOk,
            no_go: GaugeFit::Ok,
            flat: GaugeFit::Ok,
        },
        SampleValue::Gauge {
            go: GaugeFit::Ok,
            no_go: GaugeFit::NotOk,
            flat: GaugeFit::Ok,
        },
        SampleValue::Gauge {
            go: GaugeFit::Ok,
            no_go: GaugeFit::Ok,
            flat: GaugeFit::NotOk,
        },
    ] {
        assert!(rule.is_reject(&bad, &ctx));
    }
}

#[test]
fn inclusion_rejects_above_severity_two_on_any_channel() {
    let rule = rule_for(Attribute::InclusionRating);
    let ctx = ctx(SpringType::MkIii, 20.6);
    assert!(!rule.is_reject(&inclusion(2.0, 2.0, 2.0, 2.0), &ctx));
    assert!(rule.is_reject(&inclusion(2.5, 0.0, 0.0, 0.0), &ctx));
    assert!(rule.is_reject(&inclusion(0.0, 0.0, 0.0, 2.1), &ctx));
}

#[test]
fn structure_requires_tempered_martensite_and_clean_defects() {
    let rule = rule_for(Attribute::Microstructure);
    let ctx = ctx(SpringType::MkIii, 20.6);
    let good = SampleValue::Structure {
        micro: Microstructure::TemperedMartensite,
        defects: DefectFreedom::Satisfactory,
    };
    assert!(!rule.is_reject(&good, &ctx));
    assert!(rule.is_reject(
        &SampleValue::Structure {
            micro: Microstructure::Other,
            defects: DefectFreedom::Satisfactory,
        },
        &ctx
    ));
    assert!(rule.is_reject(
        &SampleValue::Structure {
            micro: Microstructure::TemperedMartensite,
            defects: DefectFreedom::NotSatisfactory,
        },
        &ctx
    ));
}

#[test]
fn decarb_cap_scales_with_bar_diameter() {
    let rule = rule_for(Attribute::Decarburization);
    // 20.6 mm bar: cap is 0.206 mm.
    let thin = ctx(SpringType::MkIii, 20.6);
    assert!(!rule.is_reject(&SampleValue::Measure(0.206), &thin));
    assert!(rule.is_reject(&SampleValue::Measure(0.21), &thin));
    // Thick bar: cap saturates at 0.25 mm.
    let thick = ctx(SpringType::MkIii, 32.0);
    assert_eq!(max_decarb(32.0), 0.25);
    assert!(!rule.is_reject(&SampleValue::Measure(0.25), &thick));
    assert!(rule.is_reject(&SampleValue::Measure(0.26), &thick));
}

#[test]
fn judged_attributes_reject_only_fail() {
    let ctx = ctx(SpringType::MkIii, 20.6);
    for attribute in [Attribute::Visual, Attribute::Deflection] {
        let rule = rule_for(attribute);
        assert!(!rule.is_reject(&SampleValue::Judged(Judgement::Pass), &ctx));
        assert!(rule.is_reject(&SampleValue::Judged(Judgement::Fail), &ctx));
    }
}

#[test]
fn mismatched_variant_is_never_a_reject() {
    let ctx = ctx(SpringType::MkIii, 20.6);
    // A judged value offered to the hardness rule carries nothing the
    // rule can measure.
    let rule = rule_for(Attribute::Hardness);
    assert!(!rule.is_reject(&SampleValue::Judged(Judgement::Fail), &ctx));
    let rule = rule_for(Attribute::Dimensional);
    assert!(!rule.is_reject(&SampleValue::Measure(1.0), &ctx));
}
