use anyhow::Result;
use eurocrunch::{ingest, output, process};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Input extracts sit next to the outputs under `data/`, named as the
/// Eurostat bulk download API delivers them.
static MIGRATION_SRC: &str = "data/migr_asytpsm_linear_2_0.csv";
static UNEMPLOYMENT_SRC: &str = "data/une_rt_a$defaultview_linear_2_0.csv";
static FLOWS_OUT: &str = "data/flows_ua_agg.csv";
static UNEMPLOYMENT_OUT: &str = "data/unemployment_clean.csv";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) flows summary ────────────────────────────────────────────
    let frame = ingest::load_csv(MIGRATION_SRC)?;
    let flows = process::flows::build_flows(&frame)?;
    output::write_records(Path::new(FLOWS_OUT), &flows)?;

    // ─── 3) unemployment summary ─────────────────────────────────────
    let frame = ingest::load_csv(UNEMPLOYMENT_SRC)?;
    let rates = process::unemployment::build_unemployment(&frame)?;
    output::write_records(Path::new(UNEMPLOYMENT_OUT), &rates)?;

    info!("all done");
    Ok(())
}
