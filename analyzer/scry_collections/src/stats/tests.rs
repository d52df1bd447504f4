use pretty_assertions::assert_eq;

use super::*;

fn stats_of(values: impl IntoIterator<Item = i64>) -> Stats<i64> {
    match Stats::from_sample(values.into_iter().collect()) {
        Ok(stats) => stats,
        Err(err) => panic!("unexpected {err}"),
    }
}

#[test]
fn empty_sample_is_an_error() {
    let empty: FrozenBag<i64> = FrozenBag::from_counts([]);
    assert_eq!(Stats::from_sample(empty), Err(EmptySampleError));
}

#[test]
fn quartiles_of_uniform_run() {
    let stats = stats_of(0..100);
    assert_eq!(*stats.min(), 0);
    assert_eq!(*stats.q1(), 25);
    assert_eq!(*stats.median(), 50);
    assert_eq!(*stats.q3(), 75);
    assert_eq!(*stats.max(), 99);
    assert_eq!(stats.card(), 100);
    assert!(stats.unique());
}

#[test]
fn quartiles_are_ordered() {
    let stats = stats_of([5, 1, 9, 1, 7, 3, 1, 9]);
    assert!(stats.min() <= stats.q1());
    assert!(stats.q1() <= stats.median());
    assert!(stats.median() <= stats.q3());
    assert!(stats.q3() <= stats.max());
    assert!(!stats.unique());
}

#[test]
fn singleton_sample() {
    let stats = stats_of([42]);
    assert_eq!(*stats.min(), 42);
    assert_eq!(*stats.q1(), 42);
    assert_eq!(*stats.median(), 42);
    assert_eq!(*stats.q3(), 42);
    assert_eq!(*stats.max(), 42);
    assert!(stats.unique());
}

#[test]
fn quartiles_respect_counts() {
    // 1 occurs 90 times, 100 occurs 10 times: q_k is the first key whose
    // cumulative position reaches k * card / 4, so every quartile past
    // the minimum lands on the second key.
    let sample = FrozenBag::from_counts([(1i64, 90), (100i64, 10)]);
    let stats = match Stats::from_sample(sample) {
        Ok(stats) => stats,
        Err(err) => panic!("unexpected {err}"),
    };
    assert_eq!(*stats.min(), 1);
    assert_eq!(*stats.q1(), 100);
    assert_eq!(*stats.median(), 100);
    assert_eq!(*stats.q3(), 100);
    assert_eq!(*stats.max(), 100);
    assert!(!stats.unique());
}

#[test]
fn quartiles_settle_on_key_after_heavy_run() {
    // A heavy run pushes the cumulative position past several targets at
    // once; the quartiles all land on the key where the walk notices.
    let sample = FrozenBag::from_counts([(1i64, 10), (2i64, 1), (100i64, 1)]);
    let stats = match Stats::from_sample(sample) {
        Ok(stats) => stats,
        Err(err) => panic!("unexpected {err}"),
    };
    assert_eq!(*stats.min(), 1);
    assert_eq!(*stats.q1(), 2);
    assert_eq!(*stats.median(), 2);
    assert_eq!(*stats.q3(), 2);
    assert_eq!(*stats.max(), 100);
}

#[test]
fn merge_is_rederivation_from_summed_samples() {
    let left = stats_of(0..50);
    let right = stats_of(50..100);
    let merged = left.merge(&right);
    assert_eq!(merged, stats_of(0..100));
}

#[test]
fn merge_is_commutative() {
    let left = stats_of([1, 2, 2, 3]);
    let right = stats_of([2, 4, 4]);
    assert_eq!(left.merge(&right), right.merge(&left));
}

#[test]
fn lengths_from_bag() {
    let bag: FrozenBag<&str> = ["a", "bb", "bb", "cccc"].into_iter().collect();
    let stats = match Stats::from_lengths(&bag) {
        Ok(stats) => stats,
        Err(err) => panic!("unexpected {err}"),
    };
    assert_eq!(*stats.min(), 1);
    assert_eq!(*stats.max(), 4);
    assert_eq!(stats.card(), 4);
}

#[test]
fn lengths_from_iter() {
    let stats = match Stats::from_lengths_iter([3, 3, 3]) {
        Ok(stats) => stats,
        Err(err) => panic!("unexpected {err}"),
    };
    assert_eq!(*stats.min(), 3);
    assert_eq!(*stats.max(), 3);
    assert!(!stats.unique());
}
