pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod sequence_processor;
pub mod stratify;
pub(crate) mod utils;

pub use error::{FilterError, FilterResult};
pub use filter::{Comparator, Criterion, Filter, MismatchPolicy, StratumValue, ValueDomain};
