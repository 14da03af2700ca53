use is2500_core::{
    Attribute, AuditTrail, GaugeFit, InclusionChannel, InclusionForm, Judgement, SampleValue,
    SchemaVersion, SpringType,
};

#[test]
fn attribute_wire_names_roundtrip() {
    for attribute in Attribute::ALL {
        let name = attribute.wire_name();
        assert_eq!(Attribute::from_wire_name(name), Some(attribute));
    }
    assert_eq!(Attribute::from_wire_name("torsion"), None);
}

#[test]
fn spring_type_labels_roundtrip() {
    for spring in [SpringType::MkIii, SpringType::MkV, SpringType::ErcJ] {
        let parsed: SpringType = spring.label().parse().unwrap();
        assert_eq!(parsed, spring);
    }
    let err = "MK-IV".parse::<SpringType>().unwrap_err();
    assert_eq!(err.info().code, "unknown-spring-type");
}

#[test]
fn sample_value_json_roundtrip() {
    let values = vec![
        SampleValue::Measure(42.5),
        SampleValue::ToeLoad {
            deflection_mm: Some(12.0),
            readings: [Some(900.0), None, Some(950.0)],
        },
        SampleValue::Gauge {
            go: GaugeFit::Ok,
            no_go: GaugeFit::NotOk,
            flat: GaugeFit::Ok,
        },
        SampleValue::Inclusion {
            a: InclusionChannel {
                form: InclusionForm::Thin,
                severity: 1.5,
            },
            b: InclusionChannel {
                form: InclusionForm::Thick,
                severity: 0.5,
            },
            c: InclusionChannel {
                form: InclusionForm::Thin,
                severity: 2.0,
            },
            d: InclusionChannel {
                form: InclusionForm::Thick,
                severity: 1.0,
            },
        },
        SampleValue::Judged(Judgement::Fail),
    ];
    for value in values {
        let json = serde_json::to_string(&value).unwrap();
        let back: SampleValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}

#[test]
fn toe_load_blankness_and_average() {
    let blank = SampleValue::ToeLoad {
        deflection_mm: Some(12.0),
        readings: [None, None, None],
    };
    assert!(blank.is_blank());
    assert_eq!(blank.toe_load_average(), None);

    let partial = SampleValue::ToeLoad {
        deflection_mm: None,
        readings: [Some(800.0), Some(1000.0), None],
    };
    assert!(!partial.is_blank());
    assert_eq!(partial.toe_load_average(), Some(900.0));

    assert_eq!(SampleValue::Measure(41.0).toe_load_average(), None);
}

#[test]
fn schema_version_defaults_to_one() {
    assert_eq!(SchemaVersion::default(), SchemaVersion::new(1, 0, 0));
}

#[test]
fn audit_trail_camel_case_shape() {
    let trail = AuditTrail::created("inspector1", "2024-05-01T09:00:00Z")
        .touched("inspector2", "2024-05-02T10:30:00Z");
    let json = serde_json::to_value(&trail).unwrap();
    assert_eq!(json["createdBy"], "inspector1");
    assert_eq!(json["updatedBy"], "inspector2");
    assert_eq!(json["updatedAt"], "2024-05-02T10:30:00Z");
}
