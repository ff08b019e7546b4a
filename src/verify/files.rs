//! Download completeness check
//!
//! Compares the names the [`crate::names::NameBuilder`] expects with the files
//! actually present in the downloads folder. Missing files are classified by
//! region, statement, company type and time frame for the report only; the
//! classification plays no part in deciding validity.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::{Section, VerificationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    German,
    China,
    // Default bucket: any unrecognised prefix lands here.
    Usa,
}

impl Region {
    pub fn classify(name: &str) -> Self {
        let prefix: String = name.chars().take(2).collect();
        match prefix.as_str() {
            "de" => Region::German,
            "cn" => Region::China,
            _ => Region::Usa,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::German => "German",
            Region::China => "China",
            Region::Usa => "USA",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementKind {
    BalanceSheet,
    CashFlow,
    Income,
    Unknown,
}

impl StatementKind {
    pub fn classify(name: &str) -> Self {
        if name.contains("balance-") {
            StatementKind::BalanceSheet
        } else if name.contains("cashflow-") {
            StatementKind::CashFlow
        } else if name.contains("income-") {
            StatementKind::Income
        } else {
            StatementKind::Unknown
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::CashFlow => "Cash Flow Statement",
            StatementKind::Income => "Income Statement",
            StatementKind::Unknown => "Unknown Document",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompanyKind {
    Bank,
    Insurance,
    Standard,
}

impl CompanyKind {
    pub fn classify(name: &str) -> Self {
        if name.contains("bank-") {
            CompanyKind::Bank
        } else if name.contains("insurance-") {
            CompanyKind::Insurance
        } else {
            CompanyKind::Standard
        }
    }
}

impl fmt::Display for CompanyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompanyKind::Bank => "Bank",
            CompanyKind::Insurance => "Insurance",
            CompanyKind::Standard => "",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeFrameKind {
    Annual,
    Quarterly,
    Ttm,
    Unknown,
}

impl TimeFrameKind {
    pub fn classify(name: &str) -> Self {
        if name.contains("-annual") {
            TimeFrameKind::Annual
        } else if name.contains("-quarterly") {
            TimeFrameKind::Quarterly
        } else if name.contains("-ttm") {
            TimeFrameKind::Ttm
        } else {
            TimeFrameKind::Unknown
        }
    }
}

impl fmt::Display for TimeFrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeFrameKind::Annual => "Annual",
            TimeFrameKind::Quarterly => "Quarterly",
            TimeFrameKind::Ttm => "TTM",
            TimeFrameKind::Unknown => "Unknown Time Frame",
        })
    }
}

/// An expected file that is not in the downloads folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFile {
    pub name: String,
    pub region: Region,
    pub statement: StatementKind,
    pub company: CompanyKind,
    pub time_frame: TimeFrameKind,
}

impl MissingFile {
    pub fn classify(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            region: Region::classify(&name),
            statement: StatementKind::classify(&name),
            company: CompanyKind::classify(&name),
            time_frame: TimeFrameKind::classify(&name),
            name,
        }
    }

    pub fn describe(&self) -> String {
        let company = match self.company {
            CompanyKind::Standard => String::new(),
            other => format!(" ({})", other),
        };
        format!(
            "{} - {} {}{}, {}",
            self.name, self.region, self.statement, company, self.time_frame
        )
    }
}

/// Result of comparing expected downloads against the folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePresence {
    pub expected: usize,
    pub present: usize,
    /// Sorted by name
    pub missing: Vec<MissingFile>,
}

impl FilePresence {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn to_result(&self) -> VerificationResult {
        VerificationResult::new(
            Section::Files,
            self.missing
                .iter()
                .map(|m| format!("Missing file: {}", m.describe()))
                .collect(),
        )
    }
}

/// `expected - present`, matched exactly and case-sensitively
pub fn check_files<E, P>(expected: &[E], present: &[P]) -> FilePresence
where
    E: AsRef<str>,
    P: AsRef<str>,
{
    let on_disk: HashSet<&str> = present.iter().map(|p| p.as_ref()).collect();

    let mut missing: Vec<&str> = expected
        .iter()
        .map(|e| e.as_ref())
        .filter(|name| !on_disk.contains(name))
        .collect();
    missing.sort_unstable();
    missing.dedup();

    FilePresence {
        expected: expected.len(),
        present: on_disk.len(),
        missing: missing.into_iter().map(MissingFile::classify).collect(),
    }
}
