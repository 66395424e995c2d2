//! View state shared by the presentation layer.

pub mod pagination;
