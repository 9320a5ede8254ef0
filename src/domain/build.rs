// src/domain/build.rs

use crate::config::ReportConfig;
use crate::db::tables::{GeocodeRow, PropertyRow, UpdateRow};
use crate::domain::listing::Listing;
use crate::domain::property_type::PropertyType;
use crate::domain::status::Status;
use std::collections::{HashMap, HashSet};

/// The two listing views every calculator works from.
/// `all` carries every update event; `deduped` collapses repeated
/// identical scrapes of the same (property, status, price) into one
/// observation, keeping the earliest.
#[derive(Debug, Default)]
pub struct ListingSet {
    pub all: Vec<Listing>,
    pub deduped: Vec<Listing>,
}

/// Joins updates to properties and geocode bins in memory. Rows lacking a
/// property record, type, status, price, list date, or location bin are
/// skipped; so is the excluded bin. Output is sorted by event timestamp.
pub fn build_listings(
    properties: &[PropertyRow],
    updates: &[UpdateRow],
    geocode: &[GeocodeRow],
    config: &ReportConfig,
) -> ListingSet {
    let props: HashMap<&str, &PropertyRow> =
        properties.iter().map(|p| (p.pid.as_str(), p)).collect();
    let bins: HashMap<&str, &str> = geocode
        .iter()
        .map(|g| (g.address.as_str(), g.bin.as_str()))
        .collect();

    let mut all = Vec::new();
    for upd in updates {
        let Some(prop) = props.get(upd.pid.as_str()) else {
            continue;
        };
        let Some(status) = upd.status.as_deref().and_then(Status::parse) else {
            continue;
        };
        let Some(type_label) = prop.prop_type.as_deref() else {
            continue;
        };
        let (Some(price), Some(list_date)) = (upd.price, upd.list_date) else {
            continue;
        };
        let Some(bin) = locate(prop, &bins, config) else {
            continue;
        };
        if bin == config.excluded_bin {
            continue;
        }

        all.push(Listing {
            pid: upd.pid.clone(),
            ts: upd.ts,
            status,
            price,
            list_date,
            mls: upd.mls.clone(),
            address: prop.address.clone(),
            unit: prop.unit.clone(),
            city: prop.city.clone(),
            postal_code: prop.postal_code.clone(),
            sqft: prop.sqft,
            assessment: prop.assessment,
            assessment_year: prop.assessment_year,
            prop_type: PropertyType::parse(type_label),
            bin,
        });
    }
    all.sort_by(|a, b| a.ts.cmp(&b.ts));

    let mut seen = HashSet::new();
    let deduped = all
        .iter()
        .filter(|l| seen.insert((l.pid.clone(), l.status, l.price)))
        .cloned()
        .collect();

    ListingSet { all, deduped }
}

/// Geocode bin for a property, falling back to the peninsula
/// postal-prefix mapping when the address was never geocoded.
fn locate(
    prop: &PropertyRow,
    bins: &HashMap<&str, &str>,
    config: &ReportConfig,
) -> Option<String> {
    if let Some(bin) = bins.get(prop.address.as_str()) {
        return Some((*bin).to_string());
    }
    let postal = prop.postal_code.as_deref()?;
    if config
        .peninsula_prefixes
        .iter()
        .any(|prefix| postal.starts_with(prefix.as_str()))
    {
        return Some(config.peninsula_bin.clone());
    }
    None
}

/// Most recent status per property, from the full event log. "Currently
/// for sale" means the last event's status is `For Sale`.
pub fn latest_status(all: &[Listing]) -> HashMap<String, Status> {
    let mut latest = HashMap::new();
    for l in all {
        // `all` is ts-ascending, so the last write wins.
        latest.insert(l.pid.clone(), l.status);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prop(pid: &str, address: &str) -> PropertyRow {
        PropertyRow {
            pid: pid.to_string(),
            address: address.to_string(),
            unit: None,
            city: Some("Halifax".to_string()),
            postal_code: Some("B3H 1A1".to_string()),
            sqft: Some(1200),
            assessment: None,
            assessment_year: None,
            prop_type: Some("Residential".to_string()),
        }
    }

    fn upd(pid: &str, day: u32, status: &str, price: i64) -> UpdateRow {
        UpdateRow {
            pid: pid.to_string(),
            ts: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            status: Some(status.to_string()),
            price: Some(price),
            list_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            mls: None,
        }
    }

    fn geo(address: &str, bin: &str) -> GeocodeRow {
        GeocodeRow {
            address: address.to_string(),
            bin: bin.to_string(),
        }
    }

    #[test]
    fn identical_scrapes_collapse_but_price_change_survives() {
        let props = vec![prop("P1", "1 Main St")];
        let geos = vec![geo("1 Main St", "Halifax Peninsula")];
        let updates = vec![
            upd("P1", 1, "For Sale", 300_000),
            upd("P1", 2, "For Sale", 300_000),
            upd("P1", 3, "For Sale", 290_000),
        ];
        let set = build_listings(&props, &updates, &geos, &ReportConfig::default());

        assert_eq!(set.all.len(), 3);
        assert_eq!(set.deduped.len(), 2);
        assert_eq!(set.deduped[0].price, 300_000);
        assert_eq!(set.deduped[1].price, 290_000);
    }

    #[test]
    fn out_of_region_and_unknown_status_rows_drop() {
        let props = vec![prop("P1", "1 Main St"), prop("P2", "9 Far Rd")];
        let geos = vec![
            geo("1 Main St", "Dartmouth"),
            geo("9 Far Rd", "Rest of Province"),
        ];
        let updates = vec![
            upd("P1", 1, "For Sale", 300_000),
            upd("P1", 2, "Leased", 300_000),
            upd("P2", 1, "For Sale", 200_000),
        ];
        let set = build_listings(&props, &updates, &geos, &ReportConfig::default());

        assert_eq!(set.all.len(), 1);
        assert_eq!(set.all[0].pid, "P1");
        assert_eq!(set.all[0].bin, "Dartmouth");
    }

    #[test]
    fn ungeocoded_peninsula_postal_code_falls_back() {
        let props = vec![prop("P1", "2 South St")];
        let updates = vec![upd("P1", 1, "For Sale", 450_000)];
        let set = build_listings(&props, &updates, &[], &ReportConfig::default());

        assert_eq!(set.all.len(), 1);
        assert_eq!(set.all[0].bin, "Halifax Peninsula");
    }

    #[test]
    fn latest_status_takes_last_event() {
        let props = vec![prop("P1", "1 Main St")];
        let geos = vec![geo("1 Main St", "Dartmouth")];
        let updates = vec![
            upd("P1", 1, "For Sale", 300_000),
            upd("P1", 5, "Sold", 295_000),
        ];
        let set = build_listings(&props, &updates, &geos, &ReportConfig::default());
        let latest = latest_status(&set.all);
        assert_eq!(latest.get("P1"), Some(&Status::Sold));
    }
}
