// file: src/database/mod.rs
// description: document store and institution cache module exports
// reference: internal module structure

pub mod institutions;
pub mod memory;
pub mod store;

pub use institutions::{CacheStatus, InstitutionCache, InstitutionSnapshot};
pub use memory::MemoryStore;
pub use store::{DocumentStore, InstitutionFilter, InstitutionSource, TypeCount};
