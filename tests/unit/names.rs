use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::fixtures::{example_config, simfin_config};
use simfin_harness::NameBuilder;

#[test]
fn test_all_count_matches_formula() {
    let cases = [
        simfin_config(&["us", "de", "cn"], &["annual", "quarterly", "ttm"], &["standard", "bank"], &["markets", "industries"]),
        simfin_config(&["us"], &["annual"], &["standard"], &[]),
        simfin_config(&["us", "de"], &["ttm"], &["standard", "bank", "insurance"], &["markets"]),
        simfin_config(&[], &["annual"], &["standard"], &["markets"]),
    ];

    for config in &cases {
        let n = config.regions.len();
        let expected = config.others.len() + 2 * n + n * config.companies.len() * config.time_frames.len() * 3;

        assert_eq!(NameBuilder::new(config).all("zip").len(), expected);
        assert_eq!(NameBuilder::expected_count(config), expected);
    }
}

#[test]
fn test_all_is_repeatable() {
    let simfin = example_config().simfin().unwrap();
    let builder = NameBuilder::new(&simfin);

    assert_eq!(builder.all("zip"), builder.all("zip"));
}

#[test]
fn test_example_names_present() {
    let simfin = example_config().simfin().unwrap();
    let names = NameBuilder::new(&simfin).all("zip");

    for name in [
        "markets.zip",
        "us-companies.zip",
        "de-shareprices-daily.zip",
        "us-income-annual.zip",
        "us-income-bank-annual.zip",
    ] {
        assert!(names.iter().any(|n| n == name), "{} not in {:?}", name, names);
    }
    assert!(!names.iter().any(|n| n.contains("-standard-")));
}

#[test]
fn test_statement_order_groups_by_statement_then_time_frame() {
    let config = simfin_config(&["us"], &["annual", "quarterly"], &["standard", "bank"], &[]);
    let statements = NameBuilder::new(&config).statements("zip");

    assert_eq!(
        statements,
        vec![
            "us-income-annual.zip",
            "us-income-quarterly.zip",
            "us-cashflow-annual.zip",
            "us-cashflow-quarterly.zip",
            "us-balance-annual.zip",
            "us-balance-quarterly.zip",
            "us-income-bank-annual.zip",
            "us-income-bank-quarterly.zip",
            "us-cashflow-bank-annual.zip",
            "us-cashflow-bank-quarterly.zip",
            "us-balance-bank-annual.zip",
            "us-balance-bank-quarterly.zip",
        ]
    );
}

#[test]
fn test_empty_companies_yield_no_statements() {
    let config = simfin_config(&["us", "de"], &["annual"], &[], &["markets"]);
    let names = NameBuilder::new(&config).all("zip");

    assert_eq!(
        names,
        vec![
            "markets.zip",
            "us-companies.zip",
            "de-companies.zip",
            "us-shareprices-daily.zip",
            "de-shareprices-daily.zip",
        ]
    );
}

#[test]
fn test_duplicate_regions_collapse_in_maps_but_not_in_all() {
    let config = simfin_config(&["us", "de", "us"], &["annual"], &["standard"], &[]);
    let builder = NameBuilder::new(&config);

    let companies = builder.companies("zip");
    assert_eq!(companies.len(), 2);
    assert_eq!(companies.keys().collect::<Vec<_>>(), vec!["us", "de"]);
    assert_eq!(companies.get("us"), Some("us-companies.zip"));
    assert!(companies.contains_key("de"));
    assert!(!companies.contains_key("cn"));

    let prices = builder.share_prices("zip");
    assert_eq!(prices.len(), 2);
    assert_eq!(
        prices.names().collect::<Vec<_>>(),
        vec!["us-shareprices-daily.zip", "de-shareprices-daily.zip"]
    );

    // all() passes duplicates through unchanged
    assert_eq!(builder.all("zip").len(), NameBuilder::expected_count(&config));
}

#[test]
fn test_regions_are_independent_copies() {
    let config = simfin_config(&["us"], &["annual"], &["standard"], &[]);
    let builder = NameBuilder::new(&config);

    let mut regions = builder.regions();
    regions.push("de".to_string());

    assert_eq!(builder.regions(), vec!["us"]);
    assert_eq!(config.regions, vec!["us"]);
}

#[test]
fn test_others_keyed_by_name() {
    let simfin = example_config().simfin().unwrap();
    let others = NameBuilder::new(&simfin).others("csv");

    assert_eq!(
        others.iter().collect::<Vec<_>>(),
        vec![("markets", "markets.csv"), ("industries", "industries.csv")]
    );
}
