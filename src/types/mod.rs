pub mod document;

pub use document::{DocumentRequest, DocumentSection, StructuredDocument};
