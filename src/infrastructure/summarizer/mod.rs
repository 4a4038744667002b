mod extractive;

pub use extractive::ExtractiveSummarizer;
