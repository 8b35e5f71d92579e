pub mod config;
pub mod error;
pub mod origin;
pub mod schema;
pub mod store;
pub mod worker;

pub use config::{CACHE_DB_FILE, CacheSettings, Config, default_base_dir};
pub use error::{CacheError, Result};
pub use origin::{Asset, DirOrigin, HttpOrigin, Origin, SourceOrigin};
pub use store::CacheStorage;
pub use worker::{OfflineWorker, Served};
