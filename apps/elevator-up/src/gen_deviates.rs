//! gen_deviates — write a seeded deviate file for `elevator_up`.
//!
//! ```text
//! gen_deviates <OUT> [--count N] [--seed S]
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lift_core::{SimRng, write_deviates};

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Output path.
    out: PathBuf,

    /// Number of deviates to write.
    #[clap(long, default_value = "1000000")]
    count: u64,

    /// Random seed.
    #[clap(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let file = File::create(&args.out)
        .with_context(|| format!("cannot create {}", args.out.display()))?;
    write_deviates(BufWriter::new(file), &mut SimRng::new(args.seed), args.count)?;
    eprintln!("wrote {} deviates (seed {}) to {}", args.count, args.seed, args.out.display());
    Ok(())
}
