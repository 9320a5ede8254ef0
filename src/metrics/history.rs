// src/metrics/history.rs

use crate::domain::{Listing, Status};
use crate::metrics::price_change::PriceChange;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// How many recently-sold trajectories the page shows as small multiples.
pub const HISTORY_COUNT: usize = 20;

/// Full price trajectory for one property that repriced and then sold.
#[derive(Debug, Clone)]
pub struct SaleHistory {
    pub pid: String,
    pub address: String,
    pub list_date: NaiveDate,
    pub points: Vec<(NaiveDateTime, i64)>,
}

/// Properties with at least one genuine price change and a terminal
/// `Sold` event, newest list date first, capped at `limit`.
pub fn recent_sale_histories(
    all: &[Listing],
    changes: &[PriceChange],
    limit: usize,
) -> Vec<SaleHistory> {
    let repriced: HashSet<&str> = changes.iter().map(|c| c.pid.as_str()).collect();

    let mut by_prop: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for l in all {
        by_prop.entry(l.pid.as_str()).or_default().push(l);
    }

    let mut histories: Vec<SaleHistory> = by_prop
        .into_iter()
        .filter(|(pid, _)| repriced.contains(pid))
        .filter_map(|(pid, mut events)| {
            events.sort_by_key(|l| l.ts);
            // Terminal means the log ends on a Sold event.
            let last = events.last()?;
            if last.status != Status::Sold {
                return None;
            }
            Some(SaleHistory {
                pid: pid.to_string(),
                address: last.address.clone(),
                list_date: events.iter().map(|l| l.list_date).max()?,
                points: events.iter().map(|l| (l.ts, l.price)).collect(),
            })
        })
        .collect();

    histories.sort_by(|a, b| b.list_date.cmp(&a.list_date));
    histories.truncate(limit);
    histories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PropertyType;
    use crate::metrics::price_change::price_changes;

    fn event(pid: &str, day: u32, status: Status, price: i64) -> Listing {
        Listing {
            pid: pid.to_string(),
            ts: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            status,
            price,
            list_date: NaiveDate::from_ymd_opt(2025, 6, day.min(5)).unwrap(),
            mls: None,
            address: format!("{pid} Main St"),
            unit: None,
            city: None,
            postal_code: None,
            sqft: Some(1000),
            assessment: None,
            assessment_year: None,
            prop_type: PropertyType::Residential,
            bin: "Halifax Peninsula".to_string(),
        }
    }

    #[test]
    fn needs_both_a_reprice_and_a_terminal_sale() {
        let listings = vec![
            // P1: repriced then sold -> included
            event("P1", 1, Status::ForSale, 300_000),
            event("P1", 5, Status::ForSale, 290_000),
            event("P1", 9, Status::Sold, 285_000),
            // P2: sold without any reprice -> excluded
            event("P2", 1, Status::ForSale, 400_000),
            event("P2", 9, Status::Sold, 400_000),
            // P3: repriced but still on market -> excluded
            event("P3", 1, Status::ForSale, 500_000),
            event("P3", 5, Status::ForSale, 480_000),
        ];
        let changes = price_changes(&listings);
        let histories = recent_sale_histories(&listings, &changes, HISTORY_COUNT);

        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].pid, "P1");
        assert_eq!(histories[0].points.len(), 3);
        assert_eq!(histories[0].points[2].1, 285_000);
    }

    #[test]
    fn sale_at_the_original_asking_price_never_appears() {
        // A status flip to Sold with no price movement carries no
        // repricing event, so the trajectory stays off the page.
        let listings = vec![
            event("P1", 1, Status::ForSale, 400_000),
            event("P1", 9, Status::Sold, 400_000),
        ];
        let changes = price_changes(&listings);
        assert!(changes.is_empty());
        assert!(recent_sale_histories(&listings, &changes, HISTORY_COUNT).is_empty());
    }

    #[test]
    fn newest_list_date_first_and_capped() {
        let mut listings = Vec::new();
        for (i, day) in [(1, 1u32), (2, 3), (3, 5)] {
            let pid = format!("P{i}");
            let mut a = event(&pid, day, Status::ForSale, 300_000);
            a.list_date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
            let mut b = event(&pid, day + 10, Status::ForSale, 290_000);
            b.list_date = a.list_date;
            let mut c = event(&pid, day + 20, Status::Sold, 290_000);
            c.list_date = a.list_date;
            listings.extend([a, b, c]);
        }
        let changes = price_changes(&listings);
        let histories = recent_sale_histories(&listings, &changes, 2);

        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].pid, "P3");
        assert_eq!(histories[1].pid, "P2");
    }
}
