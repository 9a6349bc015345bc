//! Settings adapter: the persistent key/value store behind the settings service

use async_trait::async_trait;
use parking_lot::RwLock;
use std::{collections::HashMap, fmt::Debug};

use crate::prelude::*;

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Read a single setting by name
	async fn read_setting(&self, name: &str) -> ClResult<Option<serde_json::Value>>;

	/// Update or create a setting
	async fn update_setting(&self, name: &str, value: serde_json::Value) -> ClResult<()>;
}

/// Volatile settings store, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySettingsAdapter {
	values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemorySettingsAdapter {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SettingsAdapter for MemorySettingsAdapter {
	async fn read_setting(&self, name: &str) -> ClResult<Option<serde_json::Value>> {
		Ok(self.values.read().get(name).cloned())
	}

	async fn update_setting(&self, name: &str, value: serde_json::Value) -> ClResult<()> {
		self.values.write().insert(name.to_string(), value);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_memory_adapter_update_overwrites() {
		let adapter = MemorySettingsAdapter::new();
		assert_eq!(adapter.read_setting("login_redirect.leder").await.unwrap(), None);

		adapter.update_setting("login_redirect.leder", json!("/a/")).await.unwrap();
		adapter.update_setting("login_redirect.leder", json!("/b/")).await.unwrap();
		assert_eq!(adapter.read_setting("login_redirect.leder").await.unwrap(), Some(json!("/b/")));
		assert_eq!(adapter.read_setting("login_redirect.admin").await.unwrap(), None);
	}
}

// vim: ts=4
