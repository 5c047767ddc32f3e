//! inspect_columns.rs
//!
//! Prints the header a raw extract actually ships with, to check what the
//! column resolver will see after a dataset revision. Point `SRC_PATH` at
//! the file.

use anyhow::{Context, Result};
use eurocrunch::ingest;

fn main() -> Result<()> {
    let path = std::env::var("SRC_PATH")
        .context("set SRC_PATH to the extract you want to inspect")?;
    let frame = ingest::load_csv(&path)?;

    for (i, name) in frame.headers.iter().enumerate() {
        println!("{:2}: {:?}", i, name);
    }
    println!("{} data rows", frame.rows.len());
    Ok(())
}
