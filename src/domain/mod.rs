// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A labelled movie review
pub mod review;

// Word → index mapping with reserved padding / unknown slots
pub mod vocabulary;

// Pretrained vector table and the dense embedding matrix
pub mod embedding;

// Typed errors of the embedding pipeline
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
