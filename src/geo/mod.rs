// src/geo/mod.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Eurostat geo codes are ISO2-ish: mostly ISO 3166-1 alpha-2, with `EL`
/// for Greece and `UK` for the United Kingdom. Aggregates (`EU27_2020`,
/// `EA20`) and candidate codes (`XK`) are deliberately absent, so lookups
/// for them fall through to `None`.
static ISO2_TO_ISO3: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AT", "AUT"),
        ("BE", "BEL"),
        ("BG", "BGR"),
        ("HR", "HRV"),
        ("CY", "CYP"),
        ("CZ", "CZE"),
        ("DE", "DEU"),
        ("DK", "DNK"),
        ("EE", "EST"),
        ("ES", "ESP"),
        ("FI", "FIN"),
        ("FR", "FRA"),
        ("GR", "GRC"),
        ("EL", "GRC"),
        ("HU", "HUN"),
        ("IE", "IRL"),
        ("IS", "ISL"),
        ("IT", "ITA"),
        ("LT", "LTU"),
        ("LU", "LUX"),
        ("LV", "LVA"),
        ("MT", "MLT"),
        ("NL", "NLD"),
        ("NO", "NOR"),
        ("PL", "POL"),
        ("PT", "PRT"),
        ("RO", "ROU"),
        ("SE", "SWE"),
        ("SI", "SVN"),
        ("SK", "SVK"),
        ("CH", "CHE"),
        ("UK", "GBR"),
        ("GB", "GBR"),
        ("AL", "ALB"),
        ("BA", "BIH"),
        ("RS", "SRB"),
        ("ME", "MNE"),
        ("MK", "MKD"),
        ("MD", "MDA"),
        ("UA", "UKR"),
    ])
});

/// Three-letter code for a Eurostat geography, or `None` when the code is
/// not a tracked destination.
pub fn to_iso3(geo: &str) -> Option<&'static str> {
    ISO2_TO_ISO3.get(geo).copied()
}
