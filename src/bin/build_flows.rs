//! build_flows.rs
//!
//! Runs just the migration pipeline: `migr_asytpsm` extract in,
//! per-destination demographic summary out.

use anyhow::Result;
use eurocrunch::{ingest, output, process};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

static SRC: &str = "data/migr_asytpsm_linear_2_0.csv";
static OUT: &str = "data/flows_ua_agg.csv";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let frame = ingest::load_csv(SRC)?;
    let flows = process::flows::build_flows(&frame)?;
    output::write_records(Path::new(OUT), &flows)?;
    Ok(())
}
