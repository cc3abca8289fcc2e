// Cache module.
// In-process TTL slot for the proxy and a file-backed keyed store for the viewer.

pub mod memory;
pub mod paths;
pub mod store;

pub use memory::MemoryCache;
pub use paths::*;
pub use store::{
    CachedData, DEFAULT_TTL, EVENTS_KEY, LocalStore, PROJECTS_KEY, read_cached, write_cached,
};
