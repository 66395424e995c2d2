//! Live progress rendering

pub mod reporter;
