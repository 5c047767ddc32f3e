// src/process/unemployment.rs

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::geo;
use crate::ingest::{cell, RawFrame};
use crate::process::window::select_latest_years;

/// Share of the active population, the only unit this pipeline reads.
const UNIT_RATE: &str = "PC_ACT";
const SEX_TOTAL: &str = "T";
/// Working-age band used for the headline rate.
const AGE_ACTIVE: &str = "Y15-74";
/// Row kind marker in linear extracts; anything else is metadata.
const STRUCTURE_DATA: &str = "dataflow";

/// One row of the unemployment summary. The rate is a 0..1 fraction.
#[derive(Debug, Clone, Serialize)]
pub struct UnemploymentRecord {
    pub dest_iso3: String,
    pub unemployment: f64,
    pub year: i32,
}

/// Build the per-country latest unemployment rate from a raw `une_rt_a`
/// extract.
pub fn build_unemployment(frame: &RawFrame) -> Result<Vec<UnemploymentRecord>> {
    let structure = frame.column("structure")?;
    let unit = frame.column("unit")?;
    let sex = frame.column("sex")?;
    let age = frame.column("age")?;
    let geo_col = frame.column("geo")?;
    let time = frame.column("time_period")?;
    let value = frame.column("obs_value")?;

    // (geo, year, rate-in-percent) for every usable row.
    let mut filtered: Vec<(String, i32, f64)> = Vec::new();
    for row in &frame.rows {
        if cell(row, structure) != STRUCTURE_DATA {
            continue;
        }
        if cell(row, unit) != UNIT_RATE
            || cell(row, sex) != SEX_TOTAL
            || cell(row, age) != AGE_ACTIVE
        {
            continue;
        }
        let rate = match cell(row, value).parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let year = match cell(row, time).parse::<i32>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        filtered.push((cell(row, geo_col).to_string(), year, rate));
    }
    info!(rows = filtered.len(), "rate filter applied");

    let years: Vec<(String, i32)> = filtered
        .iter()
        .map(|(geo, year, _)| (geo.clone(), *year))
        .collect();
    let latest = select_latest_years(&years);

    let mut records = Vec::with_capacity(latest.len());
    for (geo_code, &idx) in &latest {
        let iso3 = match geo::to_iso3(geo_code) {
            Some(code) => code,
            None => {
                debug!(geo = %geo_code, "dropping geography without ISO3 mapping");
                continue;
            }
        };
        let (_, year, rate) = &filtered[idx];
        records.push(UnemploymentRecord {
            dest_iso3: iso3.to_string(),
            unemployment: rate / 100.0,
            year: *year,
        });
    }

    info!(rows = records.len(), "unemployment summary built");
    Ok(records)
}
