pub mod coalescer;
pub mod coverage;
pub mod fragment;
pub mod planner;

pub use coalescer::{FragmentCoalescer, Run};
pub use coverage::verify_coverage;
pub use fragment::Fragment;
pub use planner::FragmentPlanner;
