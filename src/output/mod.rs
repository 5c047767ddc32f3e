// src/output/mod.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

/// Serialize `records` to CSV at `path`. The file is written to a `.tmp`
/// sibling first and renamed into place, so a crash mid-write never
/// leaves a half-written summary behind. Missing numeric fields
/// serialize as empty cells.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");

    let mut wtr = csv::Writer::from_path(&tmp)
        .with_context(|| format!("creating {}", tmp.display()))?;
    for record in records {
        wtr.serialize(record).context("serializing summary row")?;
    }
    wtr.flush().context("flushing CSV writer")?;
    drop(wtr);

    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    info!(rows = records.len(), "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Row {
        dest_iso3: String,
        total_refugees: Option<f64>,
        pct_children: Option<f64>,
    }

    #[test]
    fn writes_header_and_empty_cells_for_missing_figures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            Row {
                dest_iso3: "DEU".to_string(),
                total_refugees: Some(1000.0),
                pct_children: Some(0.3),
            },
            Row {
                dest_iso3: "CZE".to_string(),
                total_refugees: None,
                pct_children: None,
            },
        ];
        write_records(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("dest_iso3,total_refugees,pct_children"));
        assert_eq!(lines.next(), Some("DEU,1000.0,0.3"));
        assert_eq!(lines.next(), Some("CZE,,"));
    }

    #[test]
    fn no_tmp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![Row {
            dest_iso3: "AUT".to_string(),
            total_refugees: Some(1.0),
            pct_children: Some(1.0),
        }];
        write_records(&path, &rows).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("csv.tmp").exists());
    }
}
