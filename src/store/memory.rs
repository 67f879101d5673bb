//! Thread-safe in-memory [`CredentialStore`] for tests, demos, and short-lived processes.

// self
use crate::{
	_prelude::*,
	store::{CredentialStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Keeps credentials in-process; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns a snapshot of the stored keys, mainly for assertions.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<_> = self.0.read().keys().cloned().collect();

		keys.sort();

		keys
	}

	fn load_now(map: StoreMap, key: &str) -> Option<String> {
		map.read().get(key).cloned()
	}

	fn save_now(map: StoreMap, key: &str, value: String) -> Result<(), StoreError> {
		map.write().insert(key.to_owned(), value);

		Ok(())
	}

	fn remove_now(map: StoreMap, key: &str) -> Option<String> {
		map.write().remove(key)
	}
}
impl CredentialStore for MemoryStore {
	fn load<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(map, key)) })
	}

	fn save<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, key, value) })
	}

	fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::remove_now(map, key)) })
	}
}
