pub mod datum;
pub mod scanner;

pub use datum::{Datum, Tuple};
pub use scanner::FragmentScanner;
