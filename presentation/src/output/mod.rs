//! Output formatting for dashboard pages

pub mod console;
