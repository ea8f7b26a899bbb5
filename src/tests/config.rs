use super::Config;
use crate::error::Error;
use crate::schedule::UpdateFrequency;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.update_frequency, "Medium");
    assert!(config.follow_inclusions);
    assert_eq!(config.file_extensions, vec!["tex"]);
    assert_eq!(config.frequency().unwrap(), UpdateFrequency::Medium);
}

#[test]
fn test_empty_toml_gives_defaults() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn test_toml_overrides() {
    let config = Config::from_toml(
        "update_frequency = \"On Save Only\"\nfollow_inclusions = false\nfile_extensions = [\"tex\", \"ltx\"]\n",
    )
    .unwrap();

    assert_eq!(config.frequency().unwrap(), UpdateFrequency::OnSaveOnly);
    assert!(!config.follow_inclusions);
    assert_eq!(config.file_extensions, vec!["tex", "ltx"]);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "update_frequency = \"Low\"").unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.frequency().unwrap(), UpdateFrequency::Low);
    assert!(config.follow_inclusions);
}

#[test]
fn test_load_from_rejects_unknown_frequency() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "update_frequency = \"Sometimes\"").unwrap();

    assert!(matches!(
        Config::load_from(file.path()),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_load_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        Config::load_from(&dir.path().join("latex-outline.toml")),
        Err(Error::Read { .. })
    ));
}
