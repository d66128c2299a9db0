//! [`Materializer`](kiln_core::application::ports::Materializer) implementations.

mod memory;

pub use memory::MemoryMaterializer;
