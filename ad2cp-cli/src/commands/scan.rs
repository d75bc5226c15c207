use ad2cp_core::{constants::RecordKind, scanner::scan_file, ScanConfig, ScanResult};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::info;

#[derive(Serialize)]
struct ScanReport<'a> {
    input: &'a str,
    broken: bool,
    #[serde(flatten)]
    result: &'a ScanResult,
}

fn kind_name(id: u8) -> String {
    match RecordKind::from_id(id) {
        Some(kind) => format!("{:?}", kind),
        None => "unknown".to_string(),
    }
}

pub fn execute(
    input: &str,
    output: Option<&str>,
    config: &ScanConfig,
    stats_only: bool,
) -> Result<()> {
    info!("Scanning file: {}", input);

    let result =
        scan_file(input, config).with_context(|| format!("Failed to scan file: {}", input))?;

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Bytes consumed:    {} bytes", result.bytes_consumed);
    println!("Leading garbage:   {} bytes", result.leading_garbage);
    println!("Frames seen:       {}", result.frames_seen);
    println!("Records indexed:   {}", result.len());
    println!("Bytes indexed:     {} bytes", result.bytes_indexed());
    println!("Checksum errors:   {}", result.checksum_mismatches);
    println!("Header cs errors:  {}", result.header_checksum_mismatches);
    println!("Unknown ids:       {}", result.unknown_ids);
    println!("Foreign family:    {}", result.foreign_family);
    println!("Truncated:         {}", if result.truncated { "yes" } else { "no" });
    println!("Stop reason:       {:?}", result.stop);
    println!();

    let mut by_id: BTreeMap<u8, usize> = BTreeMap::new();
    for record in &result.records {
        *by_id.entry(record.id).or_default() += 1;
    }
    if !by_id.is_empty() {
        println!("=== Records by Id ===");
        for (id, count) in &by_id {
            println!("0x{:02x} {:<20} {}", id, kind_name(*id), count);
        }
        println!();
    }

    if stats_only {
        return Ok(());
    }

    if let Some(output_path) = output {
        let report = ScanReport {
            input,
            broken: result.is_broken(),
            result: &result,
        };
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize record index")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Record index written to: {}", output_path);
    } else {
        println!("=== Records ===");
        for record in &result.records {
            let flag = if record.checksum_ok { "" } else { " [checksum mismatch]" };
            println!(
                "Record {} @ offset {}: id 0x{:02x} ({}) {} bytes{}",
                record.ordinal,
                record.offset,
                record.id,
                kind_name(record.id),
                record.length,
                flag
            );
        }
    }

    Ok(())
}
