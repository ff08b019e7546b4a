use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use simfin_harness::errors::HarnessError;
use simfin_harness::verify::files::{CompanyKind, Region, StatementKind, TimeFrameKind};
use simfin_harness::verify::{check_files, MissingFile, Section};
use simfin_harness::{ConfigFile, ConfigVerifier};

fn parse(text: &str) -> ConfigFile {
    ConfigFile::parse(text, "config.yml").unwrap()
}

#[test]
fn test_missing_companies_key_reported_once() {
    let config = parse("simfin:\n  regions: [us]\n  time-frames: [annual]\n  others: [markets]\n");
    let result = ConfigVerifier::new(Ok(&config)).check_simfin();

    assert!(!result.is_valid());
    assert_eq!(result.discrepancies, vec!["Companies definition section missing"]);
}

#[test]
fn test_empty_companies_is_empty_not_shape_error() {
    let config = parse("simfin:\n  regions: [us]\n  time-frames: [annual]\n  companies: []\n  others: [markets]\n");
    let result = ConfigVerifier::new(Ok(&config)).check_simfin();

    assert!(!result.is_valid());
    assert!(result.contains("Companies definition is empty"));
    assert!(!result.contains("Companies definition is not a list"));
}

#[test]
fn test_scalar_value_is_not_a_list() {
    let config = parse("simfin:\n  regions: us\n  time-frames: [annual]\n  companies: [standard]\n  others: [markets]\n");
    let result = ConfigVerifier::new(Ok(&config)).check_simfin();

    assert_eq!(result.discrepancies, vec!["Regions definition is not a list"]);
}

#[test]
fn test_checks_are_independent_of_order() {
    let config = parse("logging:\n  level: info\ndatabase:\n  user: bob\n");
    let verifier = ConfigVerifier::new(Ok(&config));

    let forward = vec![verifier.check_simfin(), verifier.check_logging(), verifier.check_database()];
    let backward = vec![verifier.check_database(), verifier.check_logging(), verifier.check_simfin()];

    assert_eq!(forward[0], backward[2]);
    assert_eq!(forward[1], backward[1]);
    assert_eq!(forward[2], backward[0]);
    assert_eq!(
        forward[0].discrepancies,
        vec!["Entire simfin section missing from config file"]
    );
    assert_eq!(forward[1].discrepancies, vec!["File name not defined"]);
    assert_eq!(
        forward[2].discrepancies,
        vec!["Database name not defined", "User password not defined"]
    );
}

#[test]
fn test_unreadable_config_reports_each_section() {
    let err = ConfigFile::load("/nonexistent/config.yml").unwrap_err();
    assert_matches!(err, HarnessError::FileNotFound { .. });

    let verifier = ConfigVerifier::new(Err(&err));
    assert_eq!(
        verifier.check_logging().discrepancies,
        vec!["Entire logging section missing from config file"]
    );
    assert_eq!(
        verifier.check_database().discrepancies,
        vec!["Entire database section missing from config file"]
    );
}

#[test]
fn test_one_file_missing() {
    let presence = check_files(&["A.zip", "B.zip"], &["A.zip"]);

    assert!(!presence.is_valid());
    assert_eq!(presence.missing_names(), vec!["B.zip"]);
    assert_eq!(presence.to_result().section, Section::Files);
}

#[test]
fn test_same_files_in_any_order_is_valid() {
    let presence = check_files(&["A.zip", "B.zip"], &["B.zip", "A.zip"]);
    assert!(presence.is_valid());
    assert!(presence.to_result().is_valid());
}

#[test]
fn test_match_is_case_sensitive() {
    let presence = check_files(&["us-companies.zip"], &["US-companies.zip"]);
    assert_eq!(presence.missing_names(), vec!["us-companies.zip"]);
}

#[test]
fn test_classify_china_insurance_income() {
    let missing = MissingFile::classify("cn-income-insurance-annual.zip");

    assert_eq!(missing.region, Region::China);
    assert_eq!(missing.statement, StatementKind::Income);
    assert_eq!(missing.company, CompanyKind::Insurance);
    assert_eq!(missing.time_frame, TimeFrameKind::Annual);
    assert_eq!(
        missing.describe(),
        "cn-income-insurance-annual.zip - China Income Statement (Insurance), Annual"
    );
}

#[test]
fn test_unknown_prefix_falls_back_to_usa() {
    let missing = MissingFile::classify("markets.zip");

    assert_eq!(missing.region, Region::Usa);
    assert_eq!(missing.statement, StatementKind::Unknown);
    assert_eq!(missing.describe(), "markets.zip - USA Unknown Document, Unknown Time Frame");
}
