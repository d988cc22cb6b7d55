//! Durable local key-value storage for the shop storefront.
//!
//! Records are opaque byte blobs addressed by a short key. The [`StorageExt`]
//! extension adds typed access with automatic JSON serialization for any
//! type that implements `Serialize` and `DeserializeOwned`.
//!
//! # Example
//!
//! ```rust,no_run
//! use shop_storage::{FileStorage, Storage, StorageExt};
//!
//! # fn main() -> Result<(), shop_storage::StorageError> {
//! let store = FileStorage::open("/tmp/shop")?;
//!
//! // Store a value
//! store.set("greeting", &"hello".to_string())?;
//!
//! // Retrieve a value
//! let greeting: Option<String> = store.get("greeting")?;
//! assert_eq!(greeting.as_deref(), Some("hello"));
//!
//! // Delete a value
//! store.delete("greeting")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;
mod store;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{validate_key, Storage, StorageExt};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStorage, MemoryStorage, Storage, StorageError, StorageExt};
}
