// src/metrics/time_on_market.rs

use crate::domain::{Listing, Status};
use crate::metrics::turnover::week_monday;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::ops::Range;

/// One sold listing's time on market, keyed by the week it was listed.
#[derive(Debug, Clone)]
pub struct TimeOnMarket {
    pub pid: String,
    pub list_week: NaiveDate,
    pub days: i64,
}

/// Distribution of days-to-sale for one list week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSpread {
    pub week: NaiveDate,
    pub n: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Days from list date to the sold event for every `Sold` listing in the
/// given bin and price band. Same-day (or backdated) sales clamp to 1 day.
pub fn days_to_sale(
    listings: &[Listing],
    bin: Option<&str>,
    price_band: Range<i64>,
) -> Vec<TimeOnMarket> {
    listings
        .iter()
        .filter(|l| l.status == Status::Sold)
        .filter(|l| bin.map_or(true, |b| l.bin == b))
        .filter(|l| price_band.contains(&l.price))
        .map(|l| TimeOnMarket {
            pid: l.pid.clone(),
            list_week: week_monday(l.list_date),
            days: (l.ts.date() - l.list_date).num_days().max(1),
        })
        .collect()
}

/// Median and quartiles of days-to-sale per list week.
pub fn weekly_spread(tom: &[TimeOnMarket]) -> Vec<WeekSpread> {
    let mut by_week: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for t in tom {
        by_week.entry(t.list_week).or_default().push(t.days as f64);
    }

    by_week
        .into_iter()
        .map(|(week, mut days)| {
            days.sort_by(|a, b| a.total_cmp(b));
            WeekSpread {
                week,
                n: days.len(),
                q1: quantile(&days, 0.25),
                median: quantile(&days, 0.5),
                q3: quantile(&days, 0.75),
            }
        })
        .collect()
}

/// Linear-interpolation quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
