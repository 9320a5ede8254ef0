// src/report.rs

use crate::config::ReportConfig;
use crate::db::tables::{fetch_geocode, fetch_properties, fetch_updates, fetch_valuations};
use crate::db::Database;
use crate::domain::{build_listings, latest_status};
use crate::errors::ReportError;
use crate::metrics::{assessment, history, price_change, price_per_area, time_on_market, turnover};
use crate::templates::{report_page, ReportVm};
use crate::valuation;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::ops::Range;

/// Price and area bands bounding every per-area and time-on-market
/// calculation; listings outside them are scrape noise or non-market
/// transfers.
const PRICE_BAND: Range<i64> = 50_000..2_000_000;
const AREA_BAND: Range<i64> = 300..10_000;

/// One full read-evaluate-render pass. Returns the rendered page;
/// any query failure aborts the run.
pub fn generate(
    db: &Database,
    config: &ReportConfig,
    now: NaiveDateTime,
) -> Result<String, ReportError> {
    let properties = fetch_properties(db)?;
    let updates = fetch_updates(db)?;
    let geocode = fetch_geocode(db)?;
    let valuations = fetch_valuations(db)?;

    let set = build_listings(&properties, &updates, &geocode, config);
    let latest = latest_status(&set.all);

    let daily = turnover::daily_turnover(&set.deduped);
    let weekly = turnover::weekly_turnover(&set.deduped, now.date());
    let rolling7 = turnover::rolling_mean(&daily, 7);
    let rolling14 = turnover::rolling_mean(&daily, 14);

    let tom = time_on_market::days_to_sale(&set.deduped, None, PRICE_BAND);
    let tom_spread = time_on_market::weekly_spread(&tom);
    let tom_peninsula =
        time_on_market::days_to_sale(&set.deduped, Some(config.peninsula_bin.as_str()), PRICE_BAND);
    let tom_spread_peninsula = time_on_market::weekly_spread(&tom_peninsula);

    let area_fits = price_per_area::fit_price_by_area(&set.deduped, PRICE_BAND, AREA_BAND);
    let pps_trends = price_per_area::pps_trends(&set.deduped, PRICE_BAND, AREA_BAND);

    let changes = price_change::price_changes(&set.deduped);
    let headline_means = price_change::trailing_week_mean(&changes, now);
    let change_trend = price_change::change_trend(&changes);

    let assessments = assessment::assessment_vs_sale(&set.deduped, config.assessment_year);
    let histories = history::recent_sale_histories(&set.all, &changes, history::HISTORY_COUNT);

    let bins: HashMap<String, String> = set
        .all
        .iter()
        .map(|l| (l.pid.clone(), l.bin.clone()))
        .collect();
    let valuation_views = valuation::build_views(&valuations, &latest, &bins, config);

    let vm = ReportVm {
        generated_at: now,
        daily,
        weekly,
        rolling7,
        rolling14,
        tom_spread,
        tom_spread_peninsula,
        area_fits,
        pps_trends,
        headline_means,
        change_trend,
        assessments,
        histories,
        valuations: valuation_views,
    };

    Ok(report_page(&vm, config).into_string())
}
