// src/templates/pages/report.rs

use crate::config::ReportConfig;
use crate::metrics::assessment::AssessmentPair;
use crate::metrics::history::SaleHistory;
use crate::metrics::price_change::ChangeTrend;
use crate::metrics::price_per_area::{AreaFit, PpsTrend};
use crate::metrics::time_on_market::WeekSpread;
use crate::metrics::turnover::BucketCount;
use crate::domain::Status;
use crate::templates::components::chart::{chart, Trace};
use crate::templates::components::table::{
    area_fit_table, fmt_money, headline_cards, valuation_table,
};
use crate::templates::layouts::report::report_layout;
use crate::valuation::ValuationViews;
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};

/// Everything the page renders, computed upstream. The renderer only
/// formats; it never filters or fits.
pub struct ReportVm {
    pub generated_at: NaiveDateTime,
    pub daily: Vec<BucketCount>,
    pub weekly: Vec<BucketCount>,
    pub rolling7: Vec<Option<f64>>,
    pub rolling14: Vec<Option<f64>>,
    pub tom_spread: Vec<WeekSpread>,
    pub tom_spread_peninsula: Vec<WeekSpread>,
    pub area_fits: Vec<AreaFit>,
    pub pps_trends: Vec<PpsTrend>,
    pub headline_means: Vec<(Status, f64)>,
    pub change_trend: ChangeTrend,
    pub assessments: Vec<AssessmentPair>,
    pub histories: Vec<SaleHistory>,
    pub valuations: ValuationViews,
}

fn day_label(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn report_page(vm: &ReportVm, config: &ReportConfig) -> Markup {
    report_layout(
        "Halifax Market Report",
        vm.generated_at,
        html! {
            main class="container" {
                (headline_cards(&vm.headline_means))
                (turnover_section(vm, config))
                (time_on_market_section(vm))
                (area_fit_table(&vm.area_fits))
                (pps_section(vm, config))
                (price_change_section(vm, config))
                (assessment_section(vm))
                (history_section(vm))
                (valuation_section(vm))
            }
        },
    )
}

fn turnover_section(vm: &ReportVm, config: &ReportConfig) -> Markup {
    let weekly_x: Vec<String> = vm.weekly.iter().map(|b| day_label(b.bucket)).collect();
    let entrances = Trace::bar(
        "Entered market",
        weekly_x.clone(),
        vm.weekly.iter().map(|b| b.entrances as f64).collect(),
    )
    .colored(config.color_for("For Sale"));
    let exits = Trace::bar(
        "Left market",
        weekly_x,
        vm.weekly.iter().map(|b| -(b.exits as f64)).collect(),
    )
    .colored(config.color_for("Sold"));

    // Suppressed (incomplete) weeks drop out of the net-change line.
    let reported: Vec<(&BucketCount, i64)> = vm
        .weekly
        .iter()
        .filter_map(|b| b.net_change.map(|n| (b, n)))
        .collect();
    let net = Trace::line(
        "Net change",
        reported.iter().map(|(b, _)| day_label(b.bucket)).collect(),
        reported.iter().map(|(_, n)| *n as f64).collect(),
    )
    .colored("#0f172a");

    let mut traces = vec![entrances, exits, net];
    for (window, rolling) in [(7usize, &vm.rolling7), (14, &vm.rolling14)] {
        let pts: Vec<(String, f64)> = vm
            .daily
            .iter()
            .zip(rolling)
            .filter_map(|(b, m)| m.map(|m| (day_label(b.bucket), m)))
            .collect();
        traces.push(
            Trace::line(
                format!("{window}-day mean"),
                pts.iter().map(|(x, _)| x.clone()).collect(),
                pts.iter().map(|(_, y)| *y).collect(),
            )
            .colored("#64748b")
            .dashed(),
        );
    }

    chart("turnover", "Inventory turnover by week", &traces)
}

fn time_on_market_section(vm: &ReportVm) -> Markup {
    let x: Vec<String> = vm.tom_spread.iter().map(|s| day_label(s.week)).collect();
    let median = Trace::line(
        "Median days to sale",
        x.clone(),
        vm.tom_spread.iter().map(|s| s.median).collect(),
    )
    .colored("#0f172a");
    let q1 = Trace::line(
        "Lower quartile",
        x.clone(),
        vm.tom_spread.iter().map(|s| s.q1).collect(),
    )
    .colored("#94a3b8")
    .dashed();
    let q3 = Trace::line(
        "Upper quartile",
        x,
        vm.tom_spread.iter().map(|s| s.q3).collect(),
    )
    .colored("#94a3b8")
    .dashed();
    let peninsula = Trace::line(
        "Peninsula median",
        vm.tom_spread_peninsula
            .iter()
            .map(|s| day_label(s.week))
            .collect(),
        vm.tom_spread_peninsula.iter().map(|s| s.median).collect(),
    )
    .colored("#2563eb");

    chart(
        "time-on-market",
        "Days to sale by list week",
        &[median, peninsula, q1, q3],
    )
}

fn pps_section(vm: &ReportVm, config: &ReportConfig) -> Markup {
    // Only groups dense enough to carry a loess curve make the chart;
    // sparse groups would just be noise.
    let traces: Vec<Trace> = vm
        .pps_trends
        .iter()
        .filter_map(|t| {
            let fitted = t.fitted.as_ref()?;
            Some(
                Trace::line(
                    format!("{} · {} · {}", t.status.as_str(), t.bin, t.prop_type.as_str()),
                    t.dates.iter().map(|d| day_label(*d)).collect(),
                    fitted.clone(),
                )
                .colored(config.color_for(t.status.as_str())),
            )
        })
        .collect();

    chart("pps-trend", "Price per square foot over time", &traces)
}

fn price_change_section(vm: &ReportVm, config: &ReportConfig) -> Markup {
    let x: Vec<String> = vm.change_trend.dates.iter().map(|d| day_label(*d)).collect();
    let mut traces = vec![Trace::scatter(
        "Relative price change",
        x.clone(),
        vm.change_trend.changes.clone(),
    )
    .colored(config.color_for("For Sale"))];

    if let Some(fitted) = &vm.change_trend.fitted {
        traces.push(Trace::line("Trend", x, fitted.clone()).colored("#0f172a"));
    }

    chart("price-change", "Repricing over time", &traces)
}

fn assessment_section(vm: &ReportVm) -> Markup {
    let traces = vec![Trace::numeric_scatter(
        "Sold listings",
        vm.assessments.iter().map(|p| p.assessment as f64).collect(),
        vm.assessments.iter().map(|p| p.sale_price as f64).collect(),
    )
    .colored("#16a34a")];

    chart("assessment", "Assessment vs. sale price", &traces)
}

fn history_section(vm: &ReportVm) -> Markup {
    let charts: Vec<Markup> = vm
        .histories
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let trace = Trace::line(
                h.address.clone(),
                h.points.iter().map(|(ts, _)| day_label(ts.date())).collect(),
                h.points.iter().map(|(_, p)| *p as f64).collect(),
            )
            .labeled(h.points.iter().map(|(_, p)| fmt_money(*p)).collect());
            chart(&format!("history-{i}"), &h.address, &[trace])
        })
        .collect();

    html! {
        section class="card" {
            h3 { "Recently sold after repricing" }
            div class="small-multiples" {
                @for c in charts {
                    (c)
                }
            }
        }
    }
}

fn valuation_section(vm: &ReportVm) -> Markup {
    html! {
        section {
            h2 { "Model valuations for current listings" }
            (valuation_table("Most undervalued", &vm.valuations.undervalued))
            (valuation_table("Most overvalued", &vm.valuations.overvalued))
            @for (bin, rows) in &vm.valuations.by_region {
                (valuation_table(bin, rows))
            }
            @if !vm.valuations.streets.is_empty() {
                (valuation_table("Watched streets", &vm.valuations.streets))
            }
        }
    }
}
