mod form;
mod induction;
mod name_check;
mod quiz;
mod results;
mod state;
mod video;

pub use induction::InductionView;
pub use state::{ViewError, ViewState};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
