//! Document storage backends
//!
//! Only an in-memory backend exists; it implements both [`crate::Processor`]
//! and [`crate::Resolver`] for a single namespace.

pub mod memory;

pub use memory::MemoryDocumentHandler;
