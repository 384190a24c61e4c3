pub mod environment;
pub mod fetcher;
pub mod storage;

pub use environment::{Environment, FixedEnvironment, SystemEnvironment};
pub use fetcher::{ResourceClient, ResourceFetcher, StaticFetcher};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
