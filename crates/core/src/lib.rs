#![forbid(unsafe_code)]

pub mod eligibility;
pub mod model;
pub mod time;

pub use eligibility::{Certification, EligibilityWindow};
pub use time::Clock;
