use ad2cp_core::{scanner::scan_file, ScanConfig, ScanResult, StopReason};
use anyhow::{Context, Result};
use colored::*;
use tracing::{info, warn};

/// Overall outcome of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every record checks out and the headers are clean
    Valid,
    /// Payloads check out but headers show garbage or checksum anomalies
    HeaderAnomalies,
    /// The file ends inside a payload, with no bad checksums
    Truncated,
    /// At least one payload checksum failed
    Corrupted,
    /// No sync byte led to a complete or partial record
    NoRecords,
}

impl Verdict {
    /// Classify a scan result
    pub fn of(result: &ScanResult) -> Self {
        if result.checksum_mismatches > 0 {
            Verdict::Corrupted
        } else if result.truncated {
            Verdict::Truncated
        } else if result.is_empty() {
            Verdict::NoRecords
        } else if result.header_checksum_mismatches > 0 || result.leading_garbage > 0 {
            Verdict::HeaderAnomalies
        } else {
            Verdict::Valid
        }
    }

    /// Whether the file passes verification
    pub fn is_clean(&self) -> bool {
        matches!(self, Verdict::Valid | Verdict::HeaderAnomalies)
    }
}

/// Verify every checksum in `input`
///
/// Returns `Ok(true)` when at least one record was found, no payload checksum
/// failed and the file did not end inside a payload.
pub fn execute(input: &str, config: &ScanConfig) -> Result<bool> {
    info!("Verifying file: {}", input);

    let result =
        scan_file(input, config).with_context(|| format!("Failed to scan file: {}", input))?;

    println!("\n=== Verification Results ===");
    println!("Total records:      {}", result.len());

    let good = result.len() as u64 - result.checksum_mismatches;
    println!("Valid checksums:    {}", good.to_string().green());
    if result.checksum_mismatches > 0 {
        println!(
            "Bad checksums:      {}",
            result.checksum_mismatches.to_string().red()
        );
        for record in result.records.iter().filter(|r| !r.checksum_ok) {
            warn!(
                "Record {} (id 0x{:02x}) at offset {} failed its data checksum",
                record.ordinal, record.id, record.offset
            );
        }
    } else {
        println!("Bad checksums:      {}", result.checksum_mismatches);
    }

    println!("\n=== Header Analysis ===");
    println!("Leading garbage:    {} bytes", result.leading_garbage);
    println!("Unknown ids:        {}", result.unknown_ids);
    println!("Foreign family:     {}", result.foreign_family);
    if result.header_checksum_mismatches > 0 {
        println!(
            "{} {} header checksum mismatches",
            "!".yellow(),
            result.header_checksum_mismatches
        );
    } else {
        println!("{} All header checksums valid", "✓".green());
    }

    if result.stop == StopReason::TruncatedPayload {
        println!(
            "{} File ends inside a payload at byte {}",
            "✗".red(),
            result.bytes_consumed
        );
    }

    // Overall status
    println!("\n=== Summary ===");
    let verdict = Verdict::of(&result);
    match verdict {
        Verdict::Valid => println!("{} File is fully valid", "✓".green()),
        Verdict::HeaderAnomalies => println!(
            "{} Payloads are valid but the file has header anomalies",
            "!".yellow()
        ),
        Verdict::Truncated => println!("{} File is truncated", "✗".red()),
        Verdict::Corrupted => println!("{} File contains corrupted records", "✗".red()),
        Verdict::NoRecords => println!("{} No records found", "✗".red()),
    }

    Ok(verdict.is_clean())
}
