mod bam;

pub use bam::BamReader;
