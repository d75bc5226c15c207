use ad2cp_cli::{commands, log_filter};
use ad2cp_core::ScanConfig;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ad2cp")]
#[command(about = "AD2CP - index and verify Nortek AD2CP data files", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase logging (-v for a scan summary, -vv for per-record trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the records in a file
    Scan {
        /// Input file to scan
        #[arg(short, long)]
        input: String,

        /// Output JSON file for the record index
        #[arg(short, long)]
        output: Option<String>,

        /// First record to keep (1-based)
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        from: i64,

        /// Last record to process (0 = whole file)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        to: i64,

        /// Keep every Nth record
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        by: i64,

        /// Largest payload to buffer in memory; longer ones are checksummed in place
        #[arg(long)]
        max_payload: Option<u32>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Check every checksum in a file
    Verify {
        /// Input file to verify
        #[arg(short, long)]
        input: String,

        /// Largest payload to buffer in memory; longer ones are checksummed in place
        #[arg(long)]
        max_payload: Option<u32>,
    },

    /// Build an AD2CP file from a JSON list of records
    Pack {
        /// Input JSON file (array of {"id", "payload"} objects, payload in hex)
        #[arg(short, long)]
        input: String,

        /// Output file for packed frames
        #[arg(short, long)]
        output: String,

        /// Always use 12-byte headers
        #[arg(long)]
        wide: bool,
    },
}

fn scan_config(from: i64, to: i64, by: i64, max_payload: Option<u32>) -> Result<ScanConfig> {
    let config = ScanConfig::from_bounds(from, to, by)?;
    Ok(match max_payload {
        Some(max) => config.max_payload_len(max),
        None => config,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(log_filter(cli.verbose)))
        .init();

    // Execute command
    match cli.command {
        Commands::Scan {
            input,
            output,
            from,
            to,
            by,
            max_payload,
            stats_only,
        } => {
            let config = scan_config(from, to, by, max_payload)?;
            commands::scan::execute(&input, output.as_deref(), &config, stats_only)
        }

        Commands::Verify { input, max_payload } => {
            let config = scan_config(1, 0, 1, max_payload)?;
            if !commands::verify::execute(&input, &config)? {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Pack {
            input,
            output,
            wide,
        } => commands::pack::execute(&input, &output, wide),
    }
}
