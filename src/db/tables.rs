use crate::db::connection::Database;
use crate::errors::ReportError;
use chrono::{NaiveDate, NaiveDateTime};

/// Static attributes of a property, one row per `pid`.
#[derive(Debug, Clone)]
pub struct PropertyRow {
    pub pid: String,
    pub address: String,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub sqft: Option<i64>,
    pub assessment: Option<i64>,
    pub assessment_year: Option<i32>,
    pub prop_type: Option<String>,
}

/// One scrape event for a property.
#[derive(Debug, Clone)]
pub struct UpdateRow {
    pub pid: String,
    pub ts: NaiveDateTime,
    pub status: Option<String>,
    pub price: Option<i64>,
    pub list_date: Option<NaiveDate>,
    pub mls: Option<String>,
}

/// Address -> location bin mapping produced by the geocoder.
#[derive(Debug, Clone)]
pub struct GeocodeRow {
    pub address: String,
    pub bin: String,
}

/// Precomputed output of the external valuation model. Consumed as-is.
#[derive(Debug, Clone)]
pub struct ValuationRow {
    pub pid: String,
    pub address: String,
    pub predicted: i64,
    pub z: f64,
    pub price: i64,
    pub list_date: Option<NaiveDate>,
    pub scraped_at: Option<NaiveDateTime>,
    pub url: Option<String>,
}

pub fn fetch_properties(db: &Database) -> Result<Vec<PropertyRow>, ReportError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT pid, address, unit, city, postal_code,
                       sqft, assessment, assessment_year, prop_type
                FROM properties
                "#,
            )
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PropertyRow {
                    pid: row.get(0)?,
                    address: row.get(1)?,
                    unit: row.get(2)?,
                    city: row.get(3)?,
                    postal_code: row.get(4)?,
                    sqft: row.get(5)?,
                    assessment: row.get(6)?,
                    assessment_year: row.get(7)?,
                    prop_type: row.get(8)?,
                })
            })
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ReportError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

pub fn fetch_updates(db: &Database) -> Result<Vec<UpdateRow>, ReportError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT pid, ts, status, price, list_date, mls
                FROM updates
                ORDER BY ts ASC
                "#,
            )
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(UpdateRow {
                    pid: row.get(0)?,
                    ts: row.get(1)?,
                    status: row.get(2)?,
                    price: row.get(3)?,
                    list_date: row.get(4)?,
                    mls: row.get(5)?,
                })
            })
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ReportError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

pub fn fetch_geocode(db: &Database) -> Result<Vec<GeocodeRow>, ReportError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT address, bin FROM geocode")
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(GeocodeRow {
                    address: row.get(0)?,
                    bin: row.get(1)?,
                })
            })
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ReportError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

pub fn fetch_valuations(db: &Database) -> Result<Vec<ValuationRow>, ReportError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT pid, address, predicted, z, price, list_date, scraped_at, url
                FROM valuations
                "#,
            )
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ValuationRow {
                    pid: row.get(0)?,
                    address: row.get(1)?,
                    predicted: row.get(2)?,
                    z: row.get(3)?,
                    price: row.get(4)?,
                    list_date: row.get(5)?,
                    scraped_at: row.get(6)?,
                    url: row.get(7)?,
                })
            })
            .map_err(|e| ReportError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ReportError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
