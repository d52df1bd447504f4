//! Property-based tests for the merge semilattice.
//!
//! Merging is the operation sibling subtrees collapse through, so its
//! algebraic laws matter: on compatible patterns it must be commutative
//! and associative, idempotent up to sample addition, and the merged
//! pattern must still validate everything its inputs validated.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use scry_collections::FrozenBag;
use scry_ir::{Datum, Real};
use scry_types::{Bool, Float, Int, Pattern, Str};

fn bool_pattern(values: Vec<bool>) -> Pattern {
    Pattern::Bool(Bool::new(values.into_iter().collect()).expect("non-empty"))
}

fn int_pattern(values: Vec<i64>) -> Pattern {
    Pattern::Int(Int::new(values.into_iter().collect()).expect("non-empty"))
}

fn float_pattern(values: Vec<f64>) -> Pattern {
    Pattern::Float(Float::new(values.into_iter().map(Real::new).collect()).expect("non-empty"))
}

fn str_pattern(values: Vec<String>) -> Pattern {
    let bag: FrozenBag<Box<str>> = values.into_iter().map(Box::from).collect();
    Pattern::Str(Str::new(bag).expect("non-empty"))
}

fn numeric_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        prop::collection::vec(any::<bool>(), 1..16).prop_map(bool_pattern),
        prop::collection::vec(-1_000_000i64..1_000_000, 1..16).prop_map(int_pattern),
        prop::collection::vec(-1.0e6f64..1.0e6, 1..16).prop_map(float_pattern),
    ]
}

fn string_pattern() -> impl Strategy<Value = Pattern> {
    prop::collection::vec("[a-z]{0,6}", 1..12).prop_map(str_pattern)
}

proptest! {
    #[test]
    fn numeric_merge_is_commutative(a in numeric_pattern(), b in numeric_pattern()) {
        prop_assert!(a.compare(&b));
        prop_assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn numeric_merge_is_associative(
        a in numeric_pattern(),
        b in numeric_pattern(),
        c in numeric_pattern(),
    ) {
        let left = a.merge(&b).and_then(|ab| ab.merge(&c));
        let right = b.merge(&c).and_then(|bc| a.merge(&bc));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn merge_never_narrows_validation(a in numeric_pattern(), b in numeric_pattern()) {
        let merged = a.merge(&b).expect("numeric patterns are compatible");
        let probes: Vec<Datum> = match (&a, &b) {
            (Pattern::Int(x), _) => x.values.sample().keys().map(|&i| Datum::from(i)).collect(),
            (Pattern::Float(x), _) => {
                x.values.sample().keys().map(|r| Datum::Float(*r)).collect()
            }
            (Pattern::Bool(x), _) => x.values.sample().keys().map(|&v| Datum::from(v)).collect(),
            _ => vec![],
        };
        for probe in &probes {
            prop_assert!(a.validate(probe), "input validates its own sample");
            prop_assert!(merged.validate(probe), "merge must not narrow: {merged:?} vs {probe:?}");
        }
    }

    #[test]
    fn string_merge_is_commutative(a in string_pattern(), b in string_pattern()) {
        prop_assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn self_merge_doubles_cardinality(a in numeric_pattern()) {
        let merged = a.merge(&a).expect("self-merge is always compatible");
        let (before, after) = match (&a, &merged) {
            (Pattern::Bool(x), Pattern::Bool(y)) => (x.values.card(), y.values.card()),
            (Pattern::Int(x), Pattern::Int(y)) => (x.values.card(), y.values.card()),
            (Pattern::Float(x), Pattern::Float(y)) => (x.values.card(), y.values.card()),
            other => panic!("self-merge changed kind: {other:?}"),
        };
        prop_assert_eq!(after, before * 2);
    }
}
