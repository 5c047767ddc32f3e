// src/ingest/mod.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::BufReader, path::Path};
use tracing::{debug, info};

/// One loaded Eurostat "linear" extract: the header row plus every data row
/// as raw string cells. Rows are heterogeneous across the category
/// dimensions; filtering happens downstream.
#[derive(Debug)]
pub struct RawFrame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawFrame {
    /// Resolve a logical column name against the raw header, ignoring case.
    /// Eurostat publishes mixed-case headers (`geo` next to `OBS_VALUE`),
    /// and the casing has shifted between dataset revisions, so everything
    /// downstream addresses cells through this.
    pub fn column(&self, logical: &str) -> Result<usize> {
        let want = logical.trim().to_lowercase();
        for (idx, name) in self.headers.iter().enumerate() {
            if name.trim().to_lowercase() == want {
                return Ok(idx);
            }
        }
        bail!(
            "could not find column `{}` (available: {})",
            logical,
            self.headers.join(", ")
        );
    }
}

/// Cell accessor tolerant of short rows (the reader runs flexible).
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Read an extract into memory. Lines starting with `#` (the download
/// banner Eurostat prepends) are ignored.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawFrame> {
    let path = path.as_ref();
    info!("reading {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!(?headers, "discovered columns");

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    info!(rows = rows.len(), "loaded {}", path.display());
    Ok(RawFrame { headers, rows })
}
