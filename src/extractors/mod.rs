// src/extractors/mod.rs
pub mod fields;
pub mod mapper;

// Re-export key extraction types for convenience
pub use fields::FieldExtractor;
pub use mapper::SchemaMapper;
