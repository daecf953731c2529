pub mod request;
pub mod selector;

pub use request::{ScanContext, SplitMode, SplitPlanRequest};
pub use selector::{PlannerOptions, SplitStrategySelector};
