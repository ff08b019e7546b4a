//! Command-level tests against a temporary installation root

use pretty_assertions::assert_eq;
use std::fs;
use test_log::test;

use crate::common::fixtures::{EXAMPLE_CONFIG, SINGLE_REGION_CONFIG};
use crate::common::TestInstall;
use simfin_harness::config::list_files;
use simfin_harness::verify::Section;
use simfin_harness::VerifySection;

#[test]
fn test_verify_all_on_complete_install() {
    let install = TestInstall::with_config(SINGLE_REGION_CONFIG);
    let names = install.harness.names("zip").unwrap();
    install.touch_downloads(names.as_slice());

    let results = install.harness.verify(VerifySection::All);
    let sections: Vec<Section> = results.iter().map(|r| r.section).collect();

    assert_eq!(
        sections,
        vec![Section::SimFin, Section::Logging, Section::Database, Section::Files]
    );
    assert!(results.iter().all(|r| r.is_valid()), "{:?}", results);
}

#[test]
fn test_verify_files_lists_missing_sorted() {
    let install = TestInstall::with_config(EXAMPLE_CONFIG);
    let names = install.harness.names("zip").unwrap();
    let (present, absent) = names.split_at(names.len() - 2);
    install.touch_downloads(present);

    let result = install.harness.verify(VerifySection::Files).remove(0);
    let mut expected: Vec<&String> = absent.iter().collect();
    expected.sort();

    assert_eq!(result.discrepancies.len(), 2);
    assert!(result.discrepancies[0].starts_with(&format!("Missing file: {}", expected[0])));
    assert!(result.discrepancies[1].starts_with(&format!("Missing file: {}", expected[1])));
}

#[test]
fn test_verify_without_config_reports_every_section() {
    let install = TestInstall::without_config();
    let results = install.harness.verify(VerifySection::All);

    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0].discrepancies,
        vec!["Entire simfin section missing from config file"]
    );
    assert!(results.iter().all(|r| !r.is_valid()));
}

#[test]
fn test_malformed_config_still_verifies() {
    let install = TestInstall::with_config("simfin: [unclosed");
    let results = install.harness.verify(VerifySection::All);

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| !r.is_valid()));
}

#[test]
fn test_samples_then_clean() {
    let install = TestInstall::with_config(SINGLE_REGION_CONFIG);
    let samples = install.root().join("data").join("samples");
    fs::create_dir_all(&samples).unwrap();
    fs::write(samples.join("markets.zip"), b"sample").unwrap();
    fs::write(samples.join("notes.txt"), b"ignored").unwrap();

    assert_eq!(install.harness.samples().unwrap(), 1);
    let downloads = install.harness.downloads().unwrap();
    assert_eq!(list_files(&downloads, "zip").unwrap(), vec!["markets.zip"]);

    assert_eq!(install.harness.clean().unwrap(), 1);
    assert!(list_files(&downloads, "zip").unwrap().is_empty());
}

#[test]
fn test_archive_copies_downloads() {
    let install = TestInstall::with_config(SINGLE_REGION_CONFIG);
    install.touch_downloads(&["markets.zip", "us-companies.zip"]);

    let folder = install.harness.archive().unwrap().expect("archive folder");

    assert!(folder.starts_with(install.root().join("data").join("archive")));
    assert_eq!(
        list_files(&folder, "zip").unwrap(),
        vec!["markets.zip", "us-companies.zip"]
    );
    // downloads stay in place
    assert_eq!(list_files(&install.harness.downloads().unwrap(), "zip").unwrap().len(), 2);
}
