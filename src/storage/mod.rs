pub mod b2;
pub mod backend;

pub use b2::B2Storage;
pub use backend::StorageBackend;

use crate::config::Config;
use std::sync::Arc;

/// Factory function to create the storage backend
pub fn create_storage(config: &Config) -> anyhow::Result<Arc<dyn StorageBackend>> {
    Ok(Arc::new(B2Storage::new(config)?))
}
