// src/process/flows.rs

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::geo;
use crate::ingest::{cell, RawFrame};
use crate::process::buckets::{self, SexBreakdown, CHILD_COMBOS, ELDER_COMBOS};
use crate::process::period::parse_month;
use crate::process::window::select_latest_months;

/// Citizenship whose flows this pipeline aggregates.
const CITIZENSHIP: &str = "UA";
/// Eurostat unit code for "number of persons".
const UNIT_PERSONS: &str = "NR";

const SEX_TOTAL: &str = "T";
const SEX_FEMALE: &str = "F";
const SEX_MALE: &str = "M";
const AGE_TOTAL: &str = "TOTAL";
const AGE_UNKNOWN: &str = "UNK";

/// One row of the flows summary. Figures are missing (empty CSV cells)
/// when the geography's headline total is non-positive: shares anchored to
/// nothing are undefined, not zero.
#[derive(Debug, Clone, Serialize)]
pub struct FlowRecord {
    pub dest_iso3: String,
    pub total_refugees: Option<f64>,
    pub pct_children: Option<f64>,
    pub pct_elderly: Option<f64>,
    pub pct_women_adult: Option<f64>,
    pub pct_men_adult: Option<f64>,
    pub pct_unknown_age: Option<f64>,
}

/// One filtered observation from the extract.
#[derive(Debug, Clone)]
struct Obs {
    sex: String,
    age: String,
    geo: String,
    month: NaiveDate,
    value: f64,
}

/// Everything observed for one geography in its selected month.
#[derive(Debug, Default)]
struct GeoAgg {
    /// Officially published total (sex=T, age=TOTAL).
    headline: Option<f64>,
    /// Sum of sex=T observations with an unknown age band.
    unknown_age: f64,
    /// sex → its TOTAL-age value.
    total_by_sex: HashMap<String, f64>,
    /// sex → age band → value, excluding unknown-age rows.
    ages_by_sex: HashMap<String, HashMap<String, f64>>,
}

/// Build the per-destination demographic summary from a raw
/// `migr_asytpsm` extract.
pub fn build_flows(frame: &RawFrame) -> Result<Vec<FlowRecord>> {
    let cit = frame.column("citizen")?;
    let sex = frame.column("sex")?;
    let age = frame.column("age")?;
    let geo_col = frame.column("geo")?;
    let time = frame.column("time_period")?;
    let value = frame.column("obs_value")?;
    let unit = frame.column("unit")?;

    // Citizenship first: an extract with no UA rows at all means the wrong
    // dataflow was downloaded, so stop rather than emit an empty summary.
    let ua_rows: Vec<&Vec<String>> = frame
        .rows
        .iter()
        .filter(|row| cell(row, cit) == CITIZENSHIP)
        .collect();
    if ua_rows.is_empty() {
        bail!("no rows with citizen == `{CITIZENSHIP}`, check citizenship codes in the extract");
    }
    info!(rows = ua_rows.len(), "citizenship filter applied");

    // Revisions without a person-count unit dimension keep everything;
    // otherwise only NR rows.
    let has_nr = ua_rows.iter().any(|row| cell(row, unit) == UNIT_PERSONS);
    let ua_rows: Vec<&Vec<String>> = if has_nr {
        ua_rows
            .into_iter()
            .filter(|row| cell(row, unit) == UNIT_PERSONS)
            .collect()
    } else {
        ua_rows
    };

    // Numeric and monthly parsing; anything unparseable is dropped.
    let mut observations: Vec<Obs> = Vec::with_capacity(ua_rows.len());
    for row in &ua_rows {
        let val = match cell(row, value).parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let month = match parse_month(cell(row, time)) {
            Some(m) => m,
            None => continue,
        };
        observations.push(Obs {
            sex: cell(row, sex).to_string(),
            age: cell(row, age).to_string(),
            geo: cell(row, geo_col).to_string(),
            month,
            value: val,
        });
    }
    if observations.is_empty() {
        warn!("no usable monthly observations after filtering");
    }

    let dated: Vec<(String, NaiveDate)> = observations
        .iter()
        .map(|o| (o.geo.clone(), o.month))
        .collect();
    let selected = select_latest_months(&dated);
    info!(geos = selected.len(), "geographies with data inside the window");

    // Fold each geography's selected month into its aggregate.
    let mut per_geo: BTreeMap<String, GeoAgg> = BTreeMap::new();
    for obs in &observations {
        let month = match selected.get(&obs.geo) {
            Some(m) => *m,
            None => continue,
        };
        if obs.month != month {
            continue;
        }
        let agg = per_geo.entry(obs.geo.clone()).or_default();
        if obs.age == AGE_UNKNOWN {
            if obs.sex == SEX_TOTAL {
                agg.unknown_age += obs.value;
            }
            continue;
        }
        if obs.age == AGE_TOTAL {
            agg.total_by_sex.insert(obs.sex.clone(), obs.value);
            if obs.sex == SEX_TOTAL {
                agg.headline = Some(obs.value);
            }
        }
        agg.ages_by_sex
            .entry(obs.sex.clone())
            .or_default()
            .insert(obs.age.clone(), obs.value);
    }

    let mut records = Vec::with_capacity(per_geo.len());
    for (geo_code, agg) in &per_geo {
        let iso3 = match geo::to_iso3(geo_code) {
            Some(code) => code,
            None => {
                debug!(geo = %geo_code, "dropping geography without ISO3 mapping");
                continue;
            }
        };
        // Only geographies reporting a headline total make the summary.
        let headline = match agg.headline {
            Some(v) => v,
            None => {
                debug!(geo = %geo_code, "no headline total inside window");
                continue;
            }
        };

        let empty = HashMap::new();
        let ages_t = agg.ages_by_sex.get(SEX_TOTAL).unwrap_or(&empty);
        let children = buckets::sum_first_combo(ages_t, CHILD_COMBOS);
        let elderly = buckets::sum_first_combo(ages_t, ELDER_COMBOS);
        let women = sex_breakdown(agg, SEX_FEMALE);
        let men = sex_breakdown(agg, SEX_MALE);
        let b = buckets::reconcile(headline, children, elderly, &women, &men, agg.unknown_age);

        if headline <= 0.0 {
            records.push(FlowRecord {
                dest_iso3: iso3.to_string(),
                total_refugees: None,
                pct_children: None,
                pct_elderly: None,
                pct_women_adult: None,
                pct_men_adult: None,
                pct_unknown_age: None,
            });
            continue;
        }
        records.push(FlowRecord {
            dest_iso3: iso3.to_string(),
            total_refugees: Some(headline),
            pct_children: Some(b.children / headline),
            pct_elderly: Some(b.elderly / headline),
            pct_women_adult: Some(b.women_adult / headline),
            pct_men_adult: Some(b.men_adult / headline),
            pct_unknown_age: Some(b.unknown_age / headline),
        });
    }

    info!(rows = records.len(), "flows summary built");
    Ok(records)
}

fn sex_breakdown(agg: &GeoAgg, sex: &str) -> SexBreakdown {
    let total = agg.total_by_sex.get(sex).copied().unwrap_or(0.0);
    let (children, elderly) = match agg.ages_by_sex.get(sex) {
        Some(map) => (
            buckets::sum_first_combo(map, CHILD_COMBOS),
            buckets::sum_first_combo(map, ELDER_COMBOS),
        ),
        None => (0.0, 0.0),
    };
    SexBreakdown {
        total,
        children,
        elderly,
    }
}
