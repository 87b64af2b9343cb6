pub mod args;
pub mod runner;

pub use args::{get_args, get_level_from_verbose, Args};
pub use runner::{diagnostics_logger, facade_equivalent, Runner};
