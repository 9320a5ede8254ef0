// src/metrics/price_per_area.rs

use crate::domain::{Listing, PropertyType, Status};
use crate::stats::{loess, ols};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::ops::Range;

/// Fewer observations than this and a loess trend would mostly be
/// fitting noise, so the curve is suppressed.
pub const MIN_LOESS_OBS: usize = 20;

const LOESS_FRAC: f64 = 0.5;

/// OLS of price on square footage for one (bin, type) group. Slope is
/// dollars per square foot; intercept the base price. `None` on a
/// degenerate fit (single point, or no area spread).
#[derive(Debug, Clone)]
pub struct AreaFit {
    pub bin: String,
    pub prop_type: PropertyType,
    pub n: usize,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
}

/// Price-per-square-foot observations over time for one
/// (status, bin, type) group, with an optional loess curve.
#[derive(Debug, Clone)]
pub struct PpsTrend {
    pub status: Status,
    pub bin: String,
    pub prop_type: PropertyType,
    pub dates: Vec<NaiveDate>,
    pub pps: Vec<f64>,
    pub fitted: Option<Vec<f64>>,
}

fn in_scope(l: &Listing, price_band: &Range<i64>, area_band: &Range<i64>) -> Option<i64> {
    if !l.prop_type.is_dwelling() || !price_band.contains(&l.price) {
        return None;
    }
    l.sqft.filter(|s| area_band.contains(s))
}

/// One price-on-area regression per (bin, type) group of dwellings
/// inside the price and area bands.
pub fn fit_price_by_area(
    listings: &[Listing],
    price_band: Range<i64>,
    area_band: Range<i64>,
) -> Vec<AreaFit> {
    let mut groups: BTreeMap<(String, PropertyType), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for l in listings {
        let Some(sqft) = in_scope(l, &price_band, &area_band) else {
            continue;
        };
        let (xs, ys) = groups.entry((l.bin.clone(), l.prop_type)).or_default();
        xs.push(sqft as f64);
        ys.push(l.price as f64);
    }

    groups
        .into_iter()
        .map(|((bin, prop_type), (xs, ys))| {
            let fit = ols::fit(&xs, &ys);
            AreaFit {
                bin,
                prop_type,
                n: xs.len(),
                slope: fit.map(|f| f.slope),
                intercept: fit.map(|f| f.intercept),
            }
        })
        .collect()
}

/// Price-per-square-foot over time, one loess curve per
/// (status, bin, type) group with at least `MIN_LOESS_OBS` observations.
pub fn pps_trends(
    listings: &[Listing],
    price_band: Range<i64>,
    area_band: Range<i64>,
) -> Vec<PpsTrend> {
    let mut groups: BTreeMap<(Status, String, PropertyType), Vec<(NaiveDate, f64)>> =
        BTreeMap::new();
    for l in listings {
        let Some(sqft) = in_scope(l, &price_band, &area_band) else {
            continue;
        };
        groups
            .entry((l.status, l.bin.clone(), l.prop_type))
            .or_default()
            .push((l.ts.date(), l.price as f64 / sqft as f64));
    }

    groups
        .into_iter()
        .map(|((status, bin, prop_type), mut points)| {
            points.sort_by_key(|(d, _)| *d);
            let dates: Vec<NaiveDate> = points.iter().map(|(d, _)| *d).collect();
            let pps: Vec<f64> = points.iter().map(|(_, v)| *v).collect();

            let fitted = if pps.len() >= MIN_LOESS_OBS {
                let xs: Vec<f64> = dates
                    .iter()
                    .map(|d| d.num_days_from_ce() as f64)
                    .collect();
                Some(loess::smooth(&xs, &pps, LOESS_FRAC))
            } else {
                None
            };

            PpsTrend {
                status,
                bin,
                prop_type,
                dates,
                pps,
                fitted,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dwelling(pid: &str, day: u32, price: i64, sqft: i64) -> Listing {
        Listing {
            pid: pid.to_string(),
            ts: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(day as u64))
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            status: Status::ForSale,
            price,
            list_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            mls: None,
            address: format!("{pid} Main St"),
            unit: None,
            city: None,
            postal_code: None,
            sqft: Some(sqft),
            assessment: None,
            assessment_year: None,
            prop_type: PropertyType::Residential,
            bin: "Halifax Peninsula".to_string(),
        }
    }

    const PRICE_BAND: Range<i64> = 50_000..2_000_000;
    const AREA_BAND: Range<i64> = 300..10_000;

    #[test]
    fn perfect_linear_group_recovers_slope_and_intercept() {
        // price = 100000 + 150 * sqft
        let listings: Vec<Listing> = [800, 1000, 1250, 1600]
            .iter()
            .enumerate()
            .map(|(i, &sqft)| dwelling(&format!("P{i}"), i as u32, 100_000 + 150 * sqft, sqft))
            .collect();

        let fits = fit_price_by_area(&listings, PRICE_BAND, AREA_BAND);
        assert_eq!(fits.len(), 1);
        let fit = &fits[0];
        assert_eq!(fit.n, 4);
        assert!((fit.slope.unwrap() - 150.0).abs() < 1e-9);
        assert!((fit.intercept.unwrap() - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn single_point_group_reports_undefined_slope() {
        let listings = vec![dwelling("P1", 0, 400_000, 1200)];
        let fits = fit_price_by_area(&listings, PRICE_BAND, AREA_BAND);
        assert_eq!(fits.len(), 1);
        assert!(fits[0].slope.is_none());
        assert!(fits[0].intercept.is_none());
    }

    #[test]
    fn loess_suppressed_at_nineteen_observations_not_twenty() {
        let group_of = |n: usize| -> Vec<Listing> {
            (0..n)
                .map(|i| dwelling(&format!("P{i}"), i as u32, 350_000 + 1000 * i as i64, 1000))
                .collect()
        };

        let trends = pps_trends(&group_of(19), PRICE_BAND, AREA_BAND);
        assert_eq!(trends.len(), 1);
        assert!(trends[0].fitted.is_none());

        let trends = pps_trends(&group_of(20), PRICE_BAND, AREA_BAND);
        assert_eq!(trends.len(), 1);
        let fitted = trends[0].fitted.as_ref().unwrap();
        assert_eq!(fitted.len(), 20);
    }

    #[test]
    fn non_dwellings_and_out_of_band_rows_stay_out() {
        let mut vacant = dwelling("P1", 0, 400_000, 1200);
        vacant.prop_type = PropertyType::Vacant;
        let listings = vec![
            vacant,
            dwelling("P2", 0, 5_000_000, 1200), // above price band
            dwelling("P3", 0, 400_000, 50),     // below area band
        ];
        assert!(fit_price_by_area(&listings, PRICE_BAND, AREA_BAND).is_empty());
    }
}
