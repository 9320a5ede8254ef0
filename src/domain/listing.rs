// src/domain/listing.rs

use crate::domain::property_type::PropertyType;
use crate::domain::status::Status;
use chrono::{NaiveDate, NaiveDateTime};

/// One scrape observation joined to its property and geocode attributes.
/// Rows missing a type, status, price, list date, or valid location bin
/// never make it into this struct.
#[derive(Debug, Clone)]
pub struct Listing {
    pub pid: String,
    pub ts: NaiveDateTime,
    pub status: Status,
    pub price: i64,
    pub list_date: NaiveDate,
    pub mls: Option<String>,

    pub address: String,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub sqft: Option<i64>,
    pub assessment: Option<i64>,
    pub assessment_year: Option<i32>,
    pub prop_type: PropertyType,
    pub bin: String,
}
