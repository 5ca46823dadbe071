use fieldmap_core::{
    apply_transition, bounding_box, centroid, parse_tap_payload, select_by_query, select_by_tap,
    GeoError, GeoPoint, RecordSet, SiteRecord, SiteStatus, TapError,
};

fn records(ids: &[&str]) -> RecordSet {
    ids.iter()
        .enumerate()
        .map(|(i, id)| SiteRecord::new(*id, i as f64, i as f64))
        .collect()
}

#[test]
fn tap_payload_with_or_without_space_yields_same_id() {
    let rs = records(&["41", "42"]);

    assert_eq!(select_by_tap(&rs, "ID:42"), Ok("42".to_string()));
    assert_eq!(select_by_tap(&rs, "ID: 42"), Ok("42".to_string()));
    assert_eq!(select_by_tap(&rs, "Ticket:  42  "), Ok("42".to_string()));
}

#[test]
fn tap_payload_splits_on_first_separator_only() {
    assert_eq!(parse_tap_payload("Ticket: A:7"), Ok("A:7"));
}

#[test]
fn tap_payload_without_separator_is_malformed() {
    let rs = records(&["42"]);

    assert_eq!(
        select_by_tap(&rs, "Ticket 42"),
        Err(TapError::MalformedTapPayload("Ticket 42".to_string()))
    );
    assert!(matches!(
        select_by_tap(&rs, "Ticket:   "),
        Err(TapError::MalformedTapPayload(_))
    ));
}

#[test]
fn tap_on_stale_marker_reports_unknown_site() {
    let rs = records(&["42"]);

    assert_eq!(
        select_by_tap(&rs, "ID: 99"),
        Err(TapError::UnknownSite("99".to_string()))
    );
}

#[test]
fn query_returns_first_substring_match_in_record_order() {
    let rs = records(&["142", "42", "423"]);

    assert_eq!(select_by_query(&rs, "42"), Some("142".to_string()));
    assert_eq!(select_by_query(&rs, " 423 "), Some("423".to_string()));
    assert_eq!(select_by_query(&rs, "7"), None);
}

#[test]
fn empty_query_matches_nothing() {
    let rs = records(&["142", "42"]);

    assert_eq!(select_by_query(&rs, ""), None);
    assert_eq!(select_by_query(&rs, "   "), None);
}

#[test]
fn query_is_case_preserving() {
    let rs = records(&["AB-1"]);

    assert_eq!(select_by_query(&rs, "ab"), None);
    assert_eq!(select_by_query(&rs, "AB"), Some("AB-1".to_string()));
}

#[test]
fn transition_updates_status_and_is_idempotent() {
    let rs = records(&["1", "2"]);

    let rs = apply_transition(rs, "2", SiteStatus::EnRoute);
    assert_eq!(rs.status_of("2"), Some(SiteStatus::EnRoute));

    let again = apply_transition(rs.clone(), "2", SiteStatus::EnRoute);
    assert_eq!(again, rs);
}

#[test]
fn transition_touches_every_duplicate_id() {
    let mut rs = records(&["7", "8", "7"]);

    let touched = rs.apply_transition("7", SiteStatus::NoAccess);

    assert_eq!(touched, 2);
    assert_eq!(rs.count_with(SiteStatus::NoAccess), 2);
    assert_eq!(rs.status_of("8"), Some(SiteStatus::Pending));
}

#[test]
fn transition_on_unknown_id_is_noop() {
    let rs = records(&["1", "2"]);

    let after = apply_transition(rs.clone(), "999", SiteStatus::Completed);

    assert_eq!(after, rs);
}

#[test]
fn every_status_is_reachable_from_every_status() {
    for from in SiteStatus::ALL {
        for to in SiteStatus::ALL {
            let rs = apply_transition(records(&["1"]), "1", from);
            let rs = apply_transition(rs, "1", to);
            assert_eq!(rs.status_of("1"), Some(to), "{from} -> {to}");
        }
    }
}

#[test]
fn status_labels_parse_leniently() {
    for status in SiteStatus::ALL {
        assert_eq!(status.label().parse::<SiteStatus>(), Ok(status));
    }
    assert_eq!("EnRoute".parse::<SiteStatus>(), Ok(SiteStatus::EnRoute));
    assert_eq!("no-access".parse::<SiteStatus>(), Ok(SiteStatus::NoAccess));
    assert!("archived".parse::<SiteStatus>().is_err());
}

#[test]
fn bounding_box_and_centroid_frame_the_records() {
    let rs: RecordSet = vec![
        SiteRecord::new("a", 10.0, -5.0),
        SiteRecord::new("b", 20.0, -1.0),
        SiteRecord::new("c", 15.0, -3.0),
    ]
    .into();

    let bounds = bounding_box(&rs).unwrap();
    assert_eq!(bounds.south_west, GeoPoint::new(10.0, -5.0));
    assert_eq!(bounds.north_east, GeoPoint::new(20.0, -1.0));
    assert_eq!(centroid(&rs), Ok(GeoPoint::new(15.0, -3.0)));
}

#[test]
fn framing_an_empty_record_set_fails() {
    let rs = RecordSet::new();

    assert_eq!(centroid(&rs), Err(GeoError::EmptyRecordSet));
    assert_eq!(bounding_box(&rs), Err(GeoError::EmptyRecordSet));
}
