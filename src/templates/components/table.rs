// src/templates/components/table.rs

use crate::db::tables::ValuationRow;
use crate::domain::Status;
use crate::metrics::price_per_area::AreaFit;
use maud::{html, Markup};

/// "$1,234,567". Negative amounts keep the sign ahead of the dollar sign.
pub fn fmt_money(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// "-1.7%" with one decimal, from a ratio.
pub fn fmt_pct(ratio: f64) -> String {
    format!("{:+.1}%", ratio * 100.0)
}

/// One valuation view as a table. The address links back to the original
/// listing when the model carried a URL through.
pub fn valuation_table(title: &str, rows: &[ValuationRow]) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            @if rows.is_empty() {
                p class="empty" { "No current listings." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Address" }
                            th { "Listed" }
                            th { "Asking" }
                            th { "Predicted" }
                            th { "Deviation" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td {
                                    @match &row.url {
                                        Some(url) => { a href=(url) { (row.address) } },
                                        None => { (row.address) },
                                    }
                                }
                                td {
                                    @if let Some(listed) = row.list_date {
                                        (listed.format("%Y-%m-%d"))
                                    }
                                }
                                td { (fmt_money(row.price)) }
                                td { (fmt_money(row.predicted)) }
                                td { (format!("{:+.2}", row.z)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Price-per-square-foot regression results per (bin, type) group.
/// Degenerate fits render blank rather than erroring.
pub fn area_fit_table(fits: &[AreaFit]) -> Markup {
    html! {
        section class="card" {
            h3 { "Price per square foot" }
            table {
                thead {
                    tr {
                        th { "Region" }
                        th { "Type" }
                        th { "Listings" }
                        th { "$ / sqft" }
                        th { "Base price" }
                    }
                }
                tbody {
                    @for fit in fits {
                        tr {
                            td { (fit.bin) }
                            td { (fit.prop_type.as_str()) }
                            td { (fit.n) }
                            td {
                                @if let Some(slope) = fit.slope {
                                    (format!("{slope:.0}"))
                                }
                            }
                            td {
                                @if let Some(intercept) = fit.intercept {
                                    (fmt_money(intercept as i64))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Trailing-week repricing headline, one card per headline status.
pub fn headline_cards(means: &[(Status, f64)]) -> Markup {
    html! {
        section class="headlines" {
            @for (status, mean) in means {
                div class="card headline" {
                    h4 { (status.as_str()) " — 7-day repricing" }
                    p class="figure" { (fmt_pct(*mean)) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(fmt_money(0), "$0");
        assert_eq!(fmt_money(950), "$950");
        assert_eq!(fmt_money(1_234_567), "$1,234,567");
        assert_eq!(fmt_money(-45_000), "-$45,000");
    }

    #[test]
    fn pct_keeps_sign() {
        assert_eq!(fmt_pct(-0.0167), "-1.7%");
        assert_eq!(fmt_pct(0.021), "+2.1%");
    }

    #[test]
    fn valuation_table_links_address_when_url_present() {
        let rows = vec![ValuationRow {
            pid: "P1".to_string(),
            address: "10 Quinpool Rd".to_string(),
            predicted: 600_000,
            z: -1.25,
            price: 540_000,
            list_date: None,
            scraped_at: None,
            url: Some("https://example.com/listing/1".to_string()),
        }];
        let markup = valuation_table("Most undervalued", &rows).into_string();
        assert!(markup.contains(r#"href="https://example.com/listing/1""#));
        assert!(markup.contains("$540,000"));
        assert!(markup.contains("-1.25"));
    }
}
