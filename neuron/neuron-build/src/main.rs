//! Batch converter from SWC reconstructions to sweepable neuron geometry.
//!
//! For every input `<stem>.swc` this writes `<stem>.paths.json` (soma,
//! segment paths, radii and rails) and, with `--plan`, `<stem>.scene.json`
//! (the host object hierarchy). Files are processed in parallel; a file
//! that fails produces no output and makes the exit status non-zero.
//!
//! # Usage
//!
//! ```text
//! neuron-build cells/*.swc --out-dir build --plan
//! neuron-build cell.swc --config neuron.json --sides 8 --strict
//! ```
//!
//! Set `RUST_LOG=debug` to see the scene outline of every file.

mod run;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use neuron_paths::{DegeneratePolicy, RailOffset};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::run::{BuildConfig, Written, process_all};

/// Convert SWC neuron morphologies into path segments with radius rails
#[derive(Parser, Debug)]
#[command(name = "neuron-build", author, version, about, long_about = None)]
struct Args {
    /// SWC files to convert
    #[arg(name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON configuration with optional `paths` and `scene` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep SWC right-handed coordinates (no Z flip)
    #[arg(long)]
    no_flip: bool,

    /// Do not emit radius rails
    #[arg(long)]
    no_rails: bool,

    /// Offset rails along the path normal instead of +X
    #[arg(long)]
    transport_rails: bool,

    /// Sides of the sweep profile polygon
    #[arg(long, value_parser = clap::value_parser!(u8).range(3..=8))]
    sides: Option<u8>,

    /// Fail a file on segments too short to sweep instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Also write the scene plan
    #[arg(long)]
    plan: bool,
}

impl Args {
    fn build_config(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::default(),
        };
        if self.no_flip {
            config.paths.flip_handedness = false;
        }
        if self.no_rails {
            config.paths.generate_rail_paths = false;
        }
        if self.transport_rails {
            config.paths.rail_offset = RailOffset::TransportNormal;
        }
        if let Some(sides) = self.sides {
            config.paths.profile_sides = sides;
        }
        if self.strict {
            config.paths.degenerate = DegeneratePolicy::Fail;
        }
        config.paths.validate()?;
        config.scene.validate()?;
        Ok(config)
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// One line of the run summary for a converted file.
fn summary_line(input: &Path, written: &Written) -> String {
    let outputs = match &written.scene_file {
        Some(scene_file) => {
            format!("{} + {}", written.paths_file.display(), scene_file.display())
        }
        None => written.paths_file.display().to_string(),
    };
    let skipped = if written.skipped > 0 {
        format!(", {} skipped", written.skipped)
    } else {
        String::new()
    };
    format!(
        "{} -> {outputs} ({} segments{skipped})",
        input.display(),
        written.segments
    )
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let config = args.build_config()?;
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let results = process_all(&args.files, args.out_dir.as_deref(), &config, args.plan);

    let mut failed = 0usize;
    for (input, result) in &results {
        match result {
            Ok(written) => {
                println!("{} {}", "ok".green().bold(), summary_line(input, written));
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {e:#}", "failed".red().bold(), input.display());
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} files failed", results.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
