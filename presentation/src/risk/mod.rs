//! Interactive risk dashboard page

mod pager;

pub use pager::{PagerStep, RiskPager};
