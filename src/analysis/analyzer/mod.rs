//! Analyzer implementations that combine char filters, a tokenizer and token filters.

mod analyzer;
mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
