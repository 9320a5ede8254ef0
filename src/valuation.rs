// src/valuation.rs
//
// The valuation model itself lives elsewhere; this module only shapes its
// precomputed prediction table into the page's four views.

use crate::config::ReportConfig;
use crate::db::tables::ValuationRow;
use crate::domain::Status;
use std::collections::{BTreeMap, HashMap};

/// The valuation table views rendered on the page, each capped at the
/// configured row count.
#[derive(Debug, Default)]
pub struct ValuationViews {
    /// Bin label -> strongest deviations in that bin.
    pub by_region: BTreeMap<String, Vec<ValuationRow>>,
    /// Lowest z first: priced furthest below the model's prediction.
    pub undervalued: Vec<ValuationRow>,
    /// Highest z first: priced furthest above the model's prediction.
    pub overvalued: Vec<ValuationRow>,
    /// Addresses matching a configured watch street.
    pub streets: Vec<ValuationRow>,
}

/// Filters the prediction table to properties currently `For Sale` and
/// builds the four views.
pub fn build_views(
    rows: &[ValuationRow],
    latest: &HashMap<String, Status>,
    bins: &HashMap<String, String>,
    config: &ReportConfig,
) -> ValuationViews {
    let cap = config.valuation_rows;
    let mut active: Vec<ValuationRow> = rows
        .iter()
        .filter(|r| latest.get(&r.pid) == Some(&Status::ForSale))
        .cloned()
        .collect();

    let mut by_region: BTreeMap<String, Vec<ValuationRow>> = BTreeMap::new();
    for row in &active {
        let Some(bin) = bins.get(&row.pid) else {
            continue;
        };
        by_region.entry(bin.clone()).or_default().push(row.clone());
    }
    for view in by_region.values_mut() {
        view.sort_by(|a, b| b.z.abs().total_cmp(&a.z.abs()));
        view.truncate(cap);
    }

    active.sort_by(|a, b| a.z.total_cmp(&b.z));
    let undervalued: Vec<ValuationRow> = active.iter().take(cap).cloned().collect();
    let overvalued: Vec<ValuationRow> = active.iter().rev().take(cap).cloned().collect();

    let mut streets: Vec<ValuationRow> = active
        .iter()
        .filter(|r| {
            let addr = r.address.to_lowercase();
            config
                .watch_streets
                .iter()
                .any(|s| addr.contains(&s.to_lowercase()))
        })
        .cloned()
        .collect();
    streets.truncate(cap);

    ValuationViews {
        by_region,
        undervalued,
        overvalued,
        streets,
    }
}
