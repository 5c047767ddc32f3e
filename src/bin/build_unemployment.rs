//! build_unemployment.rs
//!
//! Runs just the unemployment pipeline: `une_rt_a` extract in,
//! per-country latest rate out.

use anyhow::Result;
use eurocrunch::{ingest, output, process};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

static SRC: &str = "data/une_rt_a$defaultview_linear_2_0.csv";
static OUT: &str = "data/unemployment_clean.csv";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let frame = ingest::load_csv(SRC)?;
    let rates = process::unemployment::build_unemployment(&frame)?;
    output::write_records(Path::new(OUT), &rates)?;
    Ok(())
}
