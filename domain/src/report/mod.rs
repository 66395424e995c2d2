//! Report view models.
//!
//! The backend's report endpoints return loosely shaped JSON. Rows are
//! consumed positionally by field name and turned into counters, chart
//! series and table rows here; nothing beyond that is validated.

pub mod charts;
pub mod endpoints;
pub mod risk;
pub mod rows;
pub mod series;
pub mod summary;
