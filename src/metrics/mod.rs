pub mod assessment;
pub mod history;
pub mod price_change;
pub mod price_per_area;
pub mod time_on_market;
pub mod turnover;
