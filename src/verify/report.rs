//! Console output for verification results

use super::{Section, VerificationResult};

pub fn render(result: &VerificationResult) -> String {
    let subject = match result.section {
        Section::Files => "downloaded files".to_string(),
        section => format!("{} configuration", section),
    };

    if result.is_valid() {
        let verdict = match result.section {
            Section::Files => "are complete",
            _ => "is valid",
        };
        return format!("✅ The {} {}", subject, verdict);
    }

    let mut out = match result.section {
        Section::Files => format!(
            "❌ The {} are incomplete ({} missing):",
            subject,
            result.discrepancies.len()
        ),
        _ => format!("❌ The {} has errors:", subject),
    };
    for discrepancy in &result.discrepancies {
        out.push_str("\n   - ");
        out.push_str(discrepancy);
    }
    out
}

pub fn print_result(result: &VerificationResult) {
    println!("\n{}", render(result));
}

pub fn print_summary(results: &[VerificationResult]) {
    let failed = results.iter().filter(|r| !r.is_valid()).count();
    println!("\n{}", "=".repeat(60));
    if failed == 0 {
        println!("🎉 All {} checks passed", results.len());
    } else {
        println!("⚠️  {} of {} checks failed", failed, results.len());
    }
}
