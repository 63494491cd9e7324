use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use uwacomm_codec::crc::CrcKind;
use uwacomm_codec::{analyze, from_json, init_logger, log_info};

/// Report the per-field and per-mode wire footprint of a message schema.
#[derive(Parser)]
#[command(name = "uwacomm-analyze")]
#[command(about = "Analyze the packed wire size of a uwacomm schema document")]
struct Cli {
    /// Path to a schema source JSON document.
    schema: PathBuf,

    /// Numeric message id to assume for mode-2/3 header sizing, overriding
    /// any id declared in the schema document.
    #[arg(long)]
    id: Option<u16>,

    /// Which CRC to assume when reporting framed sizes.
    #[arg(long, value_enum, default_value = "crc16")]
    crc: CrcArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CrcArg {
    Crc16,
    Crc32,
}

impl From<CrcArg> for CrcKind {
    fn from(value: CrcArg) -> Self {
        match value {
            CrcArg::Crc16 => CrcKind::Crc16,
            CrcArg::Crc32 => CrcKind::Crc32,
        }
    }
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let json = fs::read_to_string(&cli.schema)
        .with_context(|| format!("failed to read schema file {:?}", cli.schema))?;
    let descriptor = from_json(&json).with_context(|| "failed to parse schema document")?;

    let id = cli.id.or(descriptor.id).unwrap_or(0);
    let report = analyze(&descriptor, id, cli.crc.into());

    log_info(&format!(
        "schema: {} field(s), body = {} bits ({} bytes)",
        report.fields.len(),
        report.body_bits,
        report.body_bytes
    ));

    for field in &report.fields {
        println!("  {:<24} {:>3} bits", field.name, field.bits);
    }

    println!();
    println!("body: {} bits, {} bytes", report.body_bits, report.body_bytes);
    if let Some(max_bytes) = report.max_bytes {
        println!(
            "max_bytes: {max_bytes} ({})",
            if report.exceeds_max { "EXCEEDED" } else { "ok" }
        );
    }

    println!();
    for mode in &report.modes {
        println!(
            "{:<6} header={:>2}B body={:>3}B framed={:>3}B",
            mode.mode, mode.header_bytes, mode.body_bytes, mode.framed_bytes
        );
    }

    if report.exceeds_max {
        anyhow::bail!("schema body exceeds its declared max_bytes");
    }

    Ok(())
}
