use super::*;

#[test]
fn idle_until_begun() {
    let progress = Progress::new();
    assert_eq!(progress.ratio(), None);
}

#[test]
fn weighs_top_and_sub_entries() {
    let progress = Progress::new();
    progress.begin(1000, 1000);
    assert_eq!(progress.ratio(), Some(0.0));
    progress.retire_top(500);
    assert_eq!(progress.ratio(), Some(0.1));
    progress.retire_top(500);
    assert_eq!(progress.ratio(), Some(0.2));
    progress.retire_sub(500);
    assert_eq!(progress.ratio(), Some(0.6));
    progress.retire_sub(500);
    assert_eq!(progress.ratio(), Some(1.0));
}

#[test]
fn over_retirement_clamps() {
    let progress = Progress::new();
    progress.begin(10, 10);
    progress.retire_top(100);
    progress.retire_sub(100);
    assert_eq!(progress.ratio(), Some(1.0));
}

#[test]
fn finish_pins_to_one() {
    let progress = Progress::new();
    progress.begin(10, 10);
    progress.retire_sub(3);
    progress.finish();
    assert_eq!(progress.ratio(), Some(1.0));
}

#[test]
fn handles_are_shared() {
    let progress = Progress::new();
    let other = progress.clone();
    progress.begin(4, 4);
    other.retire_sub(4);
    progress.retire_top(4);
    assert_eq!(progress.ratio(), other.ratio());
    assert_eq!(progress.ratio(), Some(1.0));
}

#[test]
fn empty_input_reads_complete() {
    let progress = Progress::new();
    progress.begin(0, 0);
    assert_eq!(progress.ratio(), Some(1.0));
}
