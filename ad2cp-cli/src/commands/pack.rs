use ad2cp_core::encoder::FrameBuilder;
use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Deserialize;
use std::fs;
use tracing::info;

/// One record to pack
#[derive(Debug, Deserialize)]
pub struct PackEntry {
    /// Record id byte
    pub id: u8,

    /// Payload as a hex string
    pub payload: String,

    /// Family byte, 0x10 when absent
    #[serde(default)]
    pub family: Option<u8>,
}

pub fn execute(input: &str, output: &str, wide: bool) -> Result<()> {
    info!("Packing records from {} to {}", input, output);

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input))?;

    let entries: Vec<PackEntry> =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON input")?;

    info!("Found {} records to pack", entries.len());

    let mut output_data = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let payload = hex::decode(&entry.payload)
            .with_context(|| format!("Record {} has an invalid hex payload", i + 1))?;

        let mut builder = FrameBuilder::new(entry.id).payload(Bytes::from(payload));

        if let Some(family) = entry.family {
            builder = builder.family(family);
        }

        if wide {
            builder = builder.long_header();
        }

        let encoded = builder
            .build()
            .with_context(|| format!("Failed to build record {}", i + 1))?;

        output_data.extend_from_slice(&encoded);

        info!("Packed record {} id 0x{:02x} ({} bytes)", i + 1, entry.id, encoded.len());
    }

    fs::write(output, &output_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully packed {} records ({} bytes total)",
        entries.len(),
        output_data.len()
    );

    Ok(())
}
