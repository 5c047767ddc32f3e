// src/process/window.rs

use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;
use tracing::info;

/// Trailing window length for the flows pipeline, in calendar months.
const WINDOW_MONTHS: u32 = 6;

/// Per geography, the most recent month inside the trailing window ending
/// at the latest month observed anywhere in the extract.
///
/// The window spans `WINDOW_MONTHS` calendar months inclusive of both
/// ends. A geography whose freshest month is stale but still inside the
/// window keeps that month; a geography with nothing inside the window is
/// absent from the result and thereby dropped from the pipeline.
pub fn select_latest_months(dated: &[(String, NaiveDate)]) -> BTreeMap<String, NaiveDate> {
    let max = match dated.iter().map(|(_, d)| *d).max() {
        Some(d) => d,
        None => return BTreeMap::new(),
    };
    let cutoff = max
        .checked_sub_months(Months::new(WINDOW_MONTHS - 1))
        .unwrap_or(NaiveDate::MIN);
    info!(%max, %cutoff, "month window");

    let mut latest: BTreeMap<String, NaiveDate> = BTreeMap::new();
    for (geo, date) in dated {
        if *date < cutoff || *date > max {
            continue;
        }
        let entry = latest.entry(geo.clone()).or_insert(*date);
        if *date > *entry {
            *entry = *date;
        }
    }
    latest
}

/// Per geography, the index of the row carrying the maximum year. First
/// occurrence wins on ties. No windowing for annual data.
pub fn select_latest_years(rows: &[(String, i32)]) -> BTreeMap<String, usize> {
    let mut best: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, (geo, year)) in rows.iter().enumerate() {
        match best.get(geo) {
            Some(&i) if rows[i].1 >= *year => {}
            _ => {
                best.insert(geo.clone(), idx);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn keeps_each_geos_own_latest_month() {
        let dated = vec![
            ("DE".to_string(), ym(2024, 1)),
            ("DE".to_string(), ym(2024, 3)),
            ("PL".to_string(), ym(2024, 2)),
        ];
        let latest = select_latest_months(&dated);
        assert_eq!(latest.get("DE"), Some(&ym(2024, 3)));
        assert_eq!(latest.get("PL"), Some(&ym(2024, 2)));
    }

    #[test]
    fn stale_geo_inside_window_survives() {
        // Global max is 2024-06, so the window opens at 2024-01. CZ's only
        // month is stale but inside it.
        let dated = vec![
            ("DE".to_string(), ym(2024, 6)),
            ("CZ".to_string(), ym(2024, 1)),
        ];
        let latest = select_latest_months(&dated);
        assert_eq!(latest.get("CZ"), Some(&ym(2024, 1)));
    }

    #[test]
    fn geo_with_only_out_of_window_data_is_dropped() {
        let dated = vec![
            ("DE".to_string(), ym(2024, 6)),
            ("CZ".to_string(), ym(2023, 12)),
        ];
        let latest = select_latest_months(&dated);
        assert_eq!(latest.get("CZ"), None);
        assert_eq!(latest.len(), 1);
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(select_latest_months(&[]).is_empty());
    }

    #[test]
    fn picks_max_year_per_geo() {
        let rows = vec![
            ("DE".to_string(), 2022),
            ("DE".to_string(), 2024),
            ("DE".to_string(), 2023),
            ("PL".to_string(), 2024),
        ];
        let best = select_latest_years(&rows);
        assert_eq!(best.get("DE"), Some(&1));
        assert_eq!(best.get("PL"), Some(&3));
    }

    #[test]
    fn first_occurrence_wins_year_ties() {
        let rows = vec![("DE".to_string(), 2024), ("DE".to_string(), 2024)];
        let best = select_latest_years(&rows);
        assert_eq!(best.get("DE"), Some(&0));
    }
}
