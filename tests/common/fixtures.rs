//! Configuration fixtures

use simfin_harness::{ConfigFile, SimFinConfig};

pub const EXAMPLE_CONFIG: &str = r#"
simfin:
  regions: [us, de, cn]
  time-frames: [annual, quarterly, ttm]
  companies: [standard, bank]
  others: [markets, industries]
database:
  database: simfin
  user: simfin_dev_user
  password: dev_password
logging:
  level: debug
  file_name: simfin.log
"#;

/// Smallest config that names one file of every kind
pub const SINGLE_REGION_CONFIG: &str = r#"
simfin:
  regions: [us]
  time-frames: [annual]
  companies: [standard]
  others: [markets]
database:
  database: simfin
  user: simfin_dev_user
  password: dev_password
logging:
  level: info
  file_name: simfin.log
"#;

pub fn example_config() -> ConfigFile {
    ConfigFile::parse(EXAMPLE_CONFIG, "config.yml").expect("example config parses")
}

pub fn simfin_config(regions: &[&str], time_frames: &[&str], companies: &[&str], others: &[&str]) -> SimFinConfig {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    SimFinConfig {
        regions: owned(regions),
        time_frames: owned(time_frames),
        companies: owned(companies),
        others: owned(others),
    }
}
