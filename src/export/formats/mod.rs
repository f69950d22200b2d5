pub mod exclusion;
pub mod filter;
