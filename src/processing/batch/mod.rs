mod processor;

pub use processor::BatchProcessor;
