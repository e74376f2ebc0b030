// tests/change_report.rs

use std::path::PathBuf;

use buildwatch::watch::ChangeReport;

fn report(names: &[&str]) -> ChangeReport {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn short_lists_are_printed_in_full() {
    let r = report(&["a.go", "b.go", "c.go"]);
    assert_eq!(r.summary(3).to_string(), "a.go,b.go,c.go");
}

#[test]
fn long_lists_collapse_the_tail_but_keep_every_path() {
    let r = report(&["a.go", "b.go", "c.go", "d.go", "e.go"]);

    assert_eq!(r.summary(3).to_string(), "a.go,b.go,... +3 more");

    // Display is lossy, the report is not.
    assert_eq!(r.len(), 5);
    assert_eq!(r.paths().last(), Some(&PathBuf::from("e.go")));
}

#[test]
fn limit_is_configurable_and_never_below_two() {
    let r = report(&["a", "b", "c", "d", "e"]);

    assert_eq!(r.summary(4).to_string(), "a,b,c,... +2 more");
    assert_eq!(r.summary(0).to_string(), "a,... +4 more");
}

#[test]
fn empty_report_has_no_changes() {
    let r = ChangeReport::default();
    assert!(!r.changed());
    assert_eq!(r.summary(3).to_string(), "");
}
