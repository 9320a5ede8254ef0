pub mod loess;
pub mod ols;
