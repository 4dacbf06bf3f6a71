//! Output module for reporting on the frontier
//!
//! Progress lines are printed by the crawler itself; this module renders the
//! statistics shown by `--stats`.

pub mod stats;

pub use stats::{load_statistics, print_statistics, FrontierStatistics};
