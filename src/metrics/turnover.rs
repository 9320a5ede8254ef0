// src/metrics/turnover.rs

use crate::domain::{Direction, Listing};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Inventory movement within one time bucket (a day, or a week keyed by
/// its Monday). `net_change` is `None` only when the bucket is suppressed
/// (the current, incomplete week).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCount {
    pub bucket: NaiveDate,
    pub entrances: u32,
    pub exits: u32,
    pub net_change: Option<i64>,
}

/// Entrances and exits per day. `For Sale` events enter, terminal
/// statuses exit, `Pending` counts as neither.
pub fn daily_turnover(listings: &[Listing]) -> Vec<BucketCount> {
    bucketize(listings, |d| d).map(|(bucket, (entrances, exits))| BucketCount {
        bucket,
        entrances,
        exits,
        net_change: Some(entrances as i64 - exits as i64),
    })
    .collect()
}

/// Entrances and exits per ISO week. The week containing `today` is still
/// being scraped, so its net change is suppressed rather than reported as
/// an artificially low point.
pub fn weekly_turnover(listings: &[Listing], today: NaiveDate) -> Vec<BucketCount> {
    let current_week = week_monday(today);
    bucketize(listings, week_monday)
        .map(|(bucket, (entrances, exits))| BucketCount {
            bucket,
            entrances,
            exits,
            net_change: if bucket == current_week {
                None
            } else {
                Some(entrances as i64 - exits as i64)
            },
        })
        .collect()
}

/// Trailing rolling mean of daily net change. The first `window - 1`
/// buckets lack history and stay `None`. Suppressed buckets contribute
/// nothing and also break the window.
pub fn rolling_mean(daily: &[BucketCount], window: usize) -> Vec<Option<f64>> {
    assert!(window > 0);
    daily
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let slice = &daily[i + 1 - window..=i];
            let mut sum = 0.0;
            for b in slice {
                sum += b.net_change? as f64;
            }
            Some(sum / window as f64)
        })
        .collect()
}

pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let iso = date.iso_week();
    NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
        .unwrap_or(date)
}

fn bucketize(
    listings: &[Listing],
    key: impl Fn(NaiveDate) -> NaiveDate,
) -> impl Iterator<Item = (NaiveDate, (u32, u32))> {
    let mut buckets: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for l in listings {
        let entry = buckets.entry(key(l.ts.date())).or_default();
        match l.status.direction() {
            Direction::Enter => entry.0 += 1,
            Direction::Exit => entry.1 += 1,
            Direction::Ignored => {}
        }
    }
    buckets.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PropertyType, Status};

    fn listing(day: u32, status: Status) -> Listing {
        let ts = NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Listing {
            pid: format!("P{day}-{}", status.as_str()),
            ts,
            status,
            price: 400_000,
            list_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            mls: None,
            address: "1 Main St".to_string(),
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
    fn net_change_is_entrances_minus_exits() {
        // June 2 2025: three enter, one sells, one expires, one pending.
        let listings = vec![
            listing(2, Status::ForSale),
            listing(2, Status::ForSale),
            listing(2, Status::ForSale),
            listing(2, Status::Sold),
            listing(2, Status::Expired),
            listing(2, Status::Pending),
        ];
        let daily = daily_turnover(&listings);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].entrances, 3);
        assert_eq!(daily[0].exits, 2);
        assert_eq!(daily[0].net_change, Some(1));
    }

    #[test]
    fn current_week_is_suppressed() {
        // June 2 and June 9 2025 are both Mondays.
        let listings = vec![listing(2, Status::ForSale), listing(9, Status::ForSale)];
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let weekly = weekly_turnover(&listings, today);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].net_change, Some(1));
        assert_eq!(weekly[1].net_change, None);
        assert_eq!(weekly[1].entrances, 1);
    }

    #[test]
    fn rolling_mean_needs_full_history() {
        let listings = vec![
            listing(1, Status::ForSale),
            listing(2, Status::ForSale),
            listing(3, Status::Sold),
            listing(4, Status::ForSale),
        ];
        let daily = daily_turnover(&listings);
        let means = rolling_mean(&daily, 3);
        assert_eq!(means[0], None);
        assert_eq!(means[1], None);
        // (+1 +1 -1) / 3, (+1 -1 +1) / 3
        assert_eq!(means[2], Some(1.0 / 3.0));
        assert_eq!(means[3], Some(1.0 / 3.0));
    }
}
