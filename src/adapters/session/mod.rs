//! Session Store Adapters
//!
//! - `InMemorySessionStore` - process-local, default and test substitute
//! - `FileSessionStore` - YAML file, restores credentials at start-up

mod file;
mod in_memory;

pub use file::FileSessionStore;
pub use in_memory::InMemorySessionStore;
