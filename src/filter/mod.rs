//! Rule-file driven read filters.
//!
//! A rule file names a filter and lists tab separated criteria:
//!
//! ```text
//! # comment
//! low_quality_tail
//! base_quality	int	<	20
//! cycle	int	>	100
//! ```
//!
//! Each observation is excluded when every criterion holds.

mod comparator;
mod criterion;
mod logging;
mod parser;
mod read_filter;
mod value;

pub use comparator::Comparator;
pub use criterion::Criterion;
pub use logging::{default_log, FilterLog, LogFacade, RecordingLog};
pub use read_filter::{Filter, MismatchPolicy, Observation};
pub use value::{StratumValue, ValueDomain};
