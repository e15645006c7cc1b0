//! Defect-inflow forecasting over weekly defect counts.
//!
//! Loads a weekly defect CSV with column auto-detection, extrapolates
//! `horizon` future weeks with one of four models, and presents the result
//! as a table, indicator summary, line chart, and persisted forecast CSV.

pub mod columns;
pub mod model;
pub mod output;
pub mod series;
