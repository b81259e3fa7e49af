//! AXI4 DRAM model CLI.
//!
//! This binary drives the model the way an RTL testbench would. It provides:
//! 1. **Self-test:** The reference read scenarios (single beat, 1/2/4-byte bursts)
//!    against a store seeded with its own address pattern.
//! 2. **Read:** Issue one burst and print every beat with its cycle number.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` or pass `--trace`.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use axi_dram_core::config::Config;
use axi_dram_core::sim::{Beat, Harness, ReadRequest, loader};
use axi_dram_core::{AxiDram, DramResult};

#[derive(Parser, Debug)]
#[command(
    name = "dram-sim",
    author,
    version,
    about = "Cycle-accurate AXI4 read-channel DRAM model",
    long_about = "Drive the DRAM model from the command line.\n\nExamples:\n  dram-sim selftest\n  dram-sim --seed 7 read --addr 0x30 --len 4 --size 2\n  dram-sim --config dram.json --stats read --addr 0x80 --len 16 --size 2"
)]
struct Cli {
    /// JSON configuration file (defaults: 1 KiB, 10 cycles + 0..=2 jitter, seed 42).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the jitter seed.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Raw image to load into the store instead of the address pattern.
    #[arg(long, global = true)]
    image: Option<PathBuf>,

    /// Byte offset at which the image is loaded.
    #[arg(long, global = true, default_value_t = 0)]
    image_offset: usize,

    /// Print statistics after the run.
    #[arg(long, global = true)]
    stats: bool,

    /// Print statistics as JSON instead of text (implies --stats).
    #[arg(long, global = true)]
    json: bool,

    /// Log every accepted request and beat.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the reference read scenarios and check every beat.
    Selftest,

    /// Issue a single INCR burst and print its beats.
    Read {
        /// Start address (decimal or 0x-prefixed hex).
        #[arg(long, value_parser = parse_u64)]
        addr: u64,

        /// Number of beats (1..=256).
        #[arg(long, default_value_t = 1)]
        len: u16,

        /// Transfer size code; bytes per beat = 2^size.
        #[arg(long, default_value_t = 0)]
        size: u8,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.trace);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{e}");
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).map_or_else(
        || s.parse::<u64>(),
        |hex| u64::from_str_radix(hex, 16),
    );
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

fn build(cli: &Cli) -> DramResult<AxiDram> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(seed) = cli.seed {
        config.latency.seed = seed;
    }
    info!(
        size = config.memory.size_bytes,
        model = ?config.latency.model,
        fixed = config.latency.fixed_cycles,
        jitter = config.latency.max_jitter,
        seed = config.latency.seed,
        "configuration"
    );

    let mut dram = AxiDram::from_config(&config)?;
    match &cli.image {
        Some(path) => {
            let n = loader::load_image(dram.memory_mut(), path, cli.image_offset)?;
            info!(bytes = n, offset = cli.image_offset, "image loaded");
        }
        None => loader::seed_address_pattern(dram.memory_mut()),
    }
    Ok(dram)
}

/// Runs the selected command. Returns `Ok(false)` when a check failed.
fn run(cli: &Cli) -> DramResult<bool> {
    let mut harness = Harness::new(build(cli)?);
    harness.reset(1)?;

    let passed = match cli.command {
        Commands::Selftest => cmd_selftest(&mut harness)?,
        Commands::Read { addr, len, size } => {
            let req = ReadRequest::new(addr).beats(len).size(size);
            let beats = harness.read(req, 0)?;
            for (i, beat) in beats.iter().enumerate() {
                print_beat(i, beat);
            }
            true
        }
    };

    if cli.stats || cli.json {
        let stats = harness.dram().stats();
        if cli.json {
            match serde_json::to_string_pretty(stats) {
                Ok(text) => println!("{text}"),
                Err(e) => error!("failed to serialize statistics: {e}"),
            }
        } else {
            stats.print();
        }
    }
    std::io::stdout().flush()?;
    Ok(passed)
}

fn print_beat(index: usize, beat: &Beat) {
    let hex: String = beat.data.iter().rev().map(|b| format!("{b:02x}")).collect();
    println!(
        "beat {index:>3} @ cycle {:>5}: 0x{hex}  resp={}  last={}",
        beat.cycle,
        beat.resp,
        u8::from(beat.last)
    );
}

/// The reference scenarios: (name, address, beats, size code).
const SCENARIOS: [(&str, u64, u16, u8); 5] = [
    ("single read", 0x10, 1, 0),
    ("burst read", 0x20, 4, 0),
    ("burst read, 4-byte beats", 0x30, 4, 2),
    ("burst read, 2-byte beats x8", 0x40, 8, 1),
    ("burst read, 4-byte beats x16", 0x80, 16, 2),
];

fn cmd_selftest(harness: &mut Harness) -> DramResult<bool> {
    println!("DRAM self-test started");
    let mut ok = true;

    for (n, (name, addr, len, size)) in SCENARIOS.into_iter().enumerate() {
        println!("Test {}: {name}", n + 1);
        let req = ReadRequest::new(addr).beats(len).size(size);
        let beats = harness.read(req, 0)?;

        if beats.len() != usize::from(len) {
            println!("  FAIL: expected {len} beats, got {}", beats.len());
            ok = false;
            continue;
        }
        for (i, beat) in beats.iter().enumerate() {
            print_beat(i, beat);
            let offset = addr as usize + i * req.width();
            let expected = harness.dram().memory().read_span(offset as u64, req.width());
            let last_expected = i + 1 == beats.len();
            if beat.data != expected || beat.last != last_expected {
                println!("  FAIL: beat {i} mismatch (expected {expected:02x?}, last={last_expected})");
                ok = false;
            }
        }
    }

    if ok {
        println!("DRAM self-test completed successfully");
    } else {
        println!("DRAM self-test FAILED");
    }
    Ok(ok)
}
