// src/metrics/assessment.rs

use crate::domain::{Listing, Status};

/// Upper bounds excluding outlier pairs from the scatter.
pub const MAX_SALE_PRICE: i64 = 2_000_000;
pub const MAX_ASSESSMENT: i64 = 2_000_000;

/// One sold property's assessed value paired with its realized sale price.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentPair {
    pub pid: String,
    pub bin: String,
    pub assessment: i64,
    pub sale_price: i64,
}

/// Assessment vs. realized price for `Sold` listings whose assessment
/// comes from the configured year. A filtered join only; no fitting.
pub fn assessment_vs_sale(listings: &[Listing], assessment_year: i32) -> Vec<AssessmentPair> {
    listings
        .iter()
        .filter(|l| l.status == Status::Sold)
        .filter(|l| l.assessment_year == Some(assessment_year))
        .filter_map(|l| {
            let assessment = l.assessment?;
            if l.price > MAX_SALE_PRICE || assessment > MAX_ASSESSMENT {
                return None;
            }
            Some(AssessmentPair {
                pid: l.pid.clone(),
                bin: l.bin.clone(),
                assessment,
                sale_price: l.price,
            })
        })
        .collect()
}
