pub mod core;
pub mod filter_processor;
pub mod readers;
pub mod threading;

// Re-export commonly used items
pub use core::{ProcessingStats, SequenceProcessor, SequenceReader};
pub use filter_processor::{ExclusionCounts, FilterProcessor, ObservationLevel};
