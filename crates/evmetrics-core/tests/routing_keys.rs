#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use evmetrics_core::error::ErrorKind;
use evmetrics_core::{RoutingKey, RoutingPattern, Segment};

#[test]
fn splits_into_ordered_triple() {
    let key = RoutingKey::parse("service.object.action").unwrap();
    assert_eq!(key.service, "service");
    assert_eq!(key.object_type, "object");
    assert_eq!(key.action, "action");
    assert_eq!(key.labels(), ["service", "object", "action"]);
}

#[test]
fn segments_are_not_trimmed() {
    let key = RoutingKey::parse(" org_unit.employee .Create").unwrap();
    assert_eq!(key.labels(), [" org_unit", "employee ", "Create"]);
}

#[test]
fn wrong_segment_counts_are_malformed() {
    for raw in ["", "employee", "employee.employee", "a.b.c.d", "a.b.c.d.e"] {
        let err = RoutingKey::parse(raw).expect_err(raw);
        assert_eq!(err.kind(), ErrorKind::Message, "{raw}");
        assert!(!err.is_fatal());
    }
}

#[test]
fn empty_segments_are_malformed() {
    for raw in ["..", "a..c", ".b.c", "a.b."] {
        assert!(RoutingKey::parse(raw).is_err(), "{raw}");
    }
}

#[test]
fn display_round_trips() {
    let key: RoutingKey = "employee.employee.create".parse().unwrap();
    assert_eq!(key.to_string(), "employee.employee.create");
}

#[test]
fn wildcard_pattern_matches_everything() {
    let any = RoutingPattern::any();
    assert_eq!(any.binding_key(), "*.*.*");
    assert_eq!(RoutingPattern::parse("*.*.*").unwrap(), any);
    assert!(any.matches(&RoutingKey::new("org_unit", "address", "terminate")));
}

#[test]
fn exact_segments_narrow_the_match() {
    let p = RoutingPattern::parse("employee.*.create").unwrap();
    assert_eq!(p.object_type, Segment::Any);
    assert!(p.matches(&RoutingKey::new("employee", "address", "create")));
    assert!(!p.matches(&RoutingKey::new("employee", "address", "edit")));
    assert!(!p.matches(&RoutingKey::new("org_unit", "address", "create")));
}

#[test]
fn rejects_unsupported_patterns() {
    for raw in ["#", "*.*", "*.*.*.*", "a.#.c", "a.b*.c", "a..c"] {
        let err = RoutingPattern::parse(raw).expect_err(raw);
        assert_eq!(err.kind(), ErrorKind::Config, "{raw}");
    }
}
