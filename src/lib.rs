pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod pdf;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use config::{Config, LLMProvider};
pub use error::DocforgeError;
pub use types::{DocumentRequest, DocumentSection, StructuredDocument};
