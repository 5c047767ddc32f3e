// src/process/buckets.rs

use std::collections::HashMap;

/// Alternative age-band codings for the under-18 bucket, in priority order.
/// Different countries and dataset revisions code the same concept with
/// different bands; the first combination with any data wins.
pub const CHILD_COMBOS: &[&[&str]] = &[
    &["Y_LT18"],
    &["Y_LT14", "Y15-17"],
    &["Y0-14", "Y15-17"],
    &["Y0-14", "Y14-17"],
];

/// Alternative age-band codings for the 65-and-over bucket, in priority order.
pub const ELDER_COMBOS: &[&[&str]] = &[
    &["Y_GE65"],
    &["Y65-79", "Y_GE80"],
    &["Y65-79", "Y80-84", "Y85-89", "Y_GE90"],
];

/// Sum the first combination for which at least one code has a value.
///
/// First match wins even when later combinations also carry data with
/// different figures. Codes missing inside a combination count as absent,
/// not zero, so a partial combination still matches.
pub fn sum_first_combo(ages: &HashMap<String, f64>, combos: &[&[&str]]) -> f64 {
    for combo in combos {
        let present: Vec<f64> = combo
            .iter()
            .filter_map(|code| ages.get(*code).copied())
            .collect();
        if !present.is_empty() {
            return present.iter().sum();
        }
    }
    0.0
}

/// Raw per-sex figures for one geography, before reconciliation against
/// the headline total.
#[derive(Debug, Default, Clone)]
pub struct SexBreakdown {
    pub total: f64,
    pub children: f64,
    pub elderly: f64,
}

impl SexBreakdown {
    /// Adults are derived, not coded: whatever of the sex total is left
    /// after children and elderly, floored at zero against inconsistent
    /// cross-tabs.
    pub fn adult_raw(&self) -> f64 {
        (self.total - self.children - self.elderly).max(0.0)
    }
}

/// Disjoint buckets for one geography after rescaling the adults so that
/// children + elderly + adults matches the headline total.
#[derive(Debug, Clone)]
pub struct Buckets {
    pub children: f64,
    pub elderly: f64,
    pub women_adult: f64,
    pub men_adult: f64,
    pub unknown_age: f64,
}

/// Rescale raw adult figures against the headline total.
///
/// The headline total is trusted over the demographic cross-tabs when the
/// two disagree, so adults absorb the difference: the target is whatever
/// of the headline is left after children and elderly (floored at zero),
/// split across the sexes in proportion to their raw adult figures. A zero
/// raw sum yields zero scaled adults, never a division.
pub fn reconcile(
    headline: f64,
    children: f64,
    elderly: f64,
    women: &SexBreakdown,
    men: &SexBreakdown,
    unknown_age: f64,
) -> Buckets {
    let target = (headline - children - elderly).max(0.0);
    let raw_sum = women.adult_raw() + men.adult_raw();
    let (women_adult, men_adult) = if raw_sum > 0.0 {
        let scale = target / raw_sum;
        (women.adult_raw() * scale, men.adult_raw() * scale)
    } else {
        (0.0, 0.0)
    };
    Buckets {
        children,
        elderly,
        women_adult,
        men_adult,
        unknown_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn first_combo_wins_over_later_data() {
        // Y_LT18 present, so the split bands must not be consulted even
        // though they carry different figures.
        let map = ages(&[("Y_LT18", 5.0), ("Y0-14", 40.0), ("Y15-17", 10.0)]);
        assert_eq!(sum_first_combo(&map, CHILD_COMBOS), 5.0);
    }

    #[test]
    fn falls_back_through_combos_in_order() {
        let map = ages(&[("Y0-14", 40.0), ("Y15-17", 10.0)]);
        assert_eq!(sum_first_combo(&map, CHILD_COMBOS), 50.0);

        let map = ages(&[("Y65-79", 7.0), ("Y_GE80", 3.0)]);
        assert_eq!(sum_first_combo(&map, ELDER_COMBOS), 10.0);
    }

    #[test]
    fn partial_combo_still_matches() {
        // Y15-17 missing: Y_LT14 alone satisfies the second combination.
        let map = ages(&[("Y_LT14", 12.0)]);
        assert_eq!(sum_first_combo(&map, CHILD_COMBOS), 12.0);
    }

    #[test]
    fn no_matching_combo_is_zero() {
        let map = ages(&[("TOTAL", 100.0), ("Y18-34", 60.0)]);
        assert_eq!(sum_first_combo(&map, CHILD_COMBOS), 0.0);
        assert_eq!(sum_first_combo(&map, ELDER_COMBOS), 0.0);
    }

    #[test]
    fn adult_raw_clamps_negative_results() {
        let sex = SexBreakdown {
            total: 10.0,
            children: 8.0,
            elderly: 5.0,
        };
        assert_eq!(sex.adult_raw(), 0.0);
    }

    #[test]
    fn zero_raw_sum_yields_exactly_zero_adults() {
        let women = SexBreakdown::default();
        let men = SexBreakdown::default();
        let b = reconcile(100.0, 30.0, 10.0, &women, &men, 0.0);
        assert_eq!(b.women_adult, 0.0);
        assert_eq!(b.men_adult, 0.0);
    }

    #[test]
    fn adults_rescale_to_the_headline_remainder() {
        // Cross-tabs claim 90 adults but the headline only leaves room for
        // 60; the 2:1 split between the sexes must be preserved.
        let women = SexBreakdown {
            total: 70.0,
            children: 10.0,
            elderly: 0.0,
        };
        let men = SexBreakdown {
            total: 40.0,
            children: 10.0,
            elderly: 0.0,
        };
        let b = reconcile(100.0, 30.0, 10.0, &women, &men, 0.0);
        let eps = 1e-9;
        assert!((b.women_adult - 40.0).abs() < eps);
        assert!((b.men_adult - 20.0).abs() < eps);
        assert!((b.children + b.elderly + b.women_adult + b.men_adult - 100.0).abs() < eps);
    }

    #[test]
    fn target_is_clamped_when_children_exceed_headline() {
        let women = SexBreakdown {
            total: 50.0,
            children: 0.0,
            elderly: 0.0,
        };
        let men = SexBreakdown::default();
        let b = reconcile(20.0, 25.0, 0.0, &women, &men, 0.0);
        assert_eq!(b.women_adult, 0.0);
        assert_eq!(b.men_adult, 0.0);
    }
}
