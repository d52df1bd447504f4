use pretty_assertions::assert_eq;

use super::*;

#[test]
fn kind_order_is_canonical() {
    let mut data = vec![
        Datum::from("b"),
        Datum::from(2),
        Datum::Null,
        Datum::from(true),
        Datum::from("a"),
        Datum::from(1),
    ];
    data.sort();
    assert_eq!(
        data,
        vec![
            Datum::Null,
            Datum::from(true),
            Datum::from(1),
            Datum::from(2),
            Datum::from("a"),
            Datum::from("b"),
        ]
    );
}

#[test]
fn hashability() {
    assert!(Datum::from(1).is_hashable());
    assert!(Datum::from("x").is_hashable());
    assert!(!Datum::list([Datum::from(1)]).is_hashable());
    assert!(!Datum::map([]).is_hashable());
    assert!(Datum::record([Datum::from(1), Datum::from("x")]).is_hashable());
    assert!(!Datum::record([Datum::list([])]).is_hashable());
}

#[test]
fn lengths() {
    assert_eq!(Datum::from("héllo").length(), Some(5));
    assert_eq!(Datum::list([Datum::Null, Datum::Null]).length(), Some(2));
    assert_eq!(Datum::from(42).length(), None);
}

#[test]
fn node_counts() {
    // {1: {2: {3: 4}}} has one node per key, value, and container
    let inner = Datum::map([(Datum::from(3), Datum::from(4))]);
    let mid = Datum::map([(Datum::from(2), inner)]);
    let top = Datum::map([(Datum::from(1), mid)]);
    assert_eq!(top.node_count(), 7);
    assert_eq!(Datum::list((0..3).map(Datum::from)).node_count(), 4);
    assert_eq!(Datum::from(9).node_count(), 1);
}

#[test]
fn display_round() {
    let datum = Datum::map([(
        Datum::from("k"),
        Datum::list([Datum::from(1), Datum::float(2.5)]),
    )]);
    assert_eq!(datum.to_string(), "{'k': [1, 2.5]}");
}
