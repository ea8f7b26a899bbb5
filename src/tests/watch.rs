use super::FileWatch;
use std::fs::{self, File};
use std::time::{Duration, SystemTime};

fn touch(path: &std::path::Path, secs: u64) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn test_quiet_files_report_no_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.tex");
    fs::write(&path, "\\section{A}").unwrap();

    let mut watch = FileWatch::new(vec![path.clone()]);
    assert_eq!(watch.paths(), &[path]);
    assert!(!watch.changed());
}

#[test]
fn test_modification_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.tex");
    fs::write(&path, "\\section{A}").unwrap();
    touch(&path, 1_000_000);

    let mut watch = FileWatch::new(vec![path.clone()]);
    touch(&path, 2_000_000);

    assert!(watch.changed());
    assert!(!watch.changed());
}

#[test]
fn test_creation_and_removal_are_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("later.tex");

    let mut watch = FileWatch::new(vec![path.clone()]);
    fs::write(&path, "").unwrap();
    assert!(watch.changed());

    fs::remove_file(&path).unwrap();
    assert!(watch.changed());
}

#[test]
fn test_retarget_resets_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.tex");
    let second = dir.path().join("b.tex");
    fs::write(&first, "").unwrap();
    fs::write(&second, "").unwrap();

    let mut watch = FileWatch::new(vec![first.clone()]);
    watch.retarget(vec![first.clone(), second.clone()]);

    assert_eq!(watch.paths(), &[first, second]);
    assert!(!watch.changed());
}
