// src/metrics/price_change.rs

use crate::domain::{Listing, Status};
use crate::metrics::price_per_area::MIN_LOESS_OBS;
use crate::stats::loess;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Relative changes at or beyond this magnitude are data-entry noise or
/// re-listings under a new record, not genuine repricing.
pub const MAX_REL_CHANGE: f64 = 0.5;

const LOESS_FRAC: f64 = 0.5;

/// One repricing event: the relative change against the property's
/// previous observed price.
#[derive(Debug, Clone)]
pub struct PriceChange {
    pub pid: String,
    pub ts: NaiveDateTime,
    pub status: Status,
    pub rel_change: f64,
}

/// Loess trend of relative price change over time, suppressed for
/// sparse series.
#[derive(Debug, Clone)]
pub struct ChangeTrend {
    pub dates: Vec<NaiveDate>,
    pub changes: Vec<f64>,
    pub fitted: Option<Vec<f64>>,
}

/// Per property, in event order: (price − previous price) / previous
/// price. The first event has no prior price and is dropped; so are
/// zero-previous-price ratios and changes with |change| >= 0.5.
/// An unchanged price (a status-only transition, e.g. going Sold at the
/// asking price) is not a repricing and produces no entry.
pub fn price_changes(listings: &[Listing]) -> Vec<PriceChange> {
    let mut by_prop: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for l in listings {
        by_prop.entry(l.pid.as_str()).or_default().push(l);
    }

    let mut changes = Vec::new();
    for events in by_prop.values_mut() {
        events.sort_by_key(|l| l.ts);
        for pair in events.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.price == 0 || cur.price == prev.price {
                continue;
            }
            let rel = (cur.price - prev.price) as f64 / prev.price as f64;
            if rel.abs() >= MAX_REL_CHANGE {
                continue;
            }
            changes.push(PriceChange {
                pid: cur.pid.clone(),
                ts: cur.ts,
                status: cur.status,
                rel_change: rel,
            });
        }
    }
    changes.sort_by_key(|c| c.ts);
    changes
}

/// Mean relative change over the trailing seven days, for the two
/// headline statuses only.
pub fn trailing_week_mean(changes: &[PriceChange], now: NaiveDateTime) -> Vec<(Status, f64)> {
    let cutoff = now - Duration::days(7);
    [Status::Sold, Status::ForSale]
        .into_iter()
        .filter_map(|status| {
            let recent: Vec<f64> = changes
                .iter()
                .filter(|c| c.status == status && c.ts > cutoff && c.ts <= now)
                .map(|c| c.rel_change)
                .collect();
            if recent.is_empty() {
                None
            } else {
                Some((status, recent.iter().sum::<f64>() / recent.len() as f64))
            }
        })
        .collect()
}

/// Loess fit of change magnitude over time. Same sparse-group threshold
/// as the price-per-area trends.
pub fn change_trend(changes: &[PriceChange]) -> ChangeTrend {
    let dates: Vec<NaiveDate> = changes.iter().map(|c| c.ts.date()).collect();
    let values: Vec<f64> = changes.iter().map(|c| c.rel_change).collect();

    let fitted = if values.len() >= MIN_LOESS_OBS {
        let xs: Vec<f64> = dates.iter().map(|d| d.num_days_from_ce() as f64).collect();
        Some(loess::smooth(&xs, &values, LOESS_FRAC))
    } else {
        None
    };

    ChangeTrend {
        dates,
        changes: values,
        fitted,
    }
}
