//! Settings service with caching, validation, and permission checks

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use roledirect_types::settings_adapter::SettingsAdapter;

use super::types::{FrozenSettingsRegistry, Setting, SettingValue};
use crate::prelude::*;

const DEFAULT_CACHE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// LRU cache for settings values
pub struct SettingsCache<V = SettingValue> {
	cache: parking_lot::Mutex<LruCache<String, V>>,
}

impl<V: Clone> SettingsCache<V> {
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CACHE_SIZE);
		Self { cache: parking_lot::Mutex::new(LruCache::new(capacity)) }
	}

	pub fn get(&self, key: &str) -> Option<V> {
		self.cache.lock().get(key).cloned()
	}

	pub fn put(&self, key: String, value: V) {
		self.cache.lock().put(key, value);
	}

	pub fn invalidate(&self, key: &str) {
		self.cache.lock().pop(key);
	}
}

/// Settings service - main interface for accessing and managing settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	cache: SettingsCache,
	/// Stored values only (no defaults); `None` caches absence
	stored: SettingsCache<Option<SettingValue>>,
	adapter: Arc<dyn SettingsAdapter>,
}

impl SettingsService {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		adapter: Arc<dyn SettingsAdapter>,
		cache_size: usize,
	) -> Self {
		Self {
			registry,
			cache: SettingsCache::new(cache_size),
			stored: SettingsCache::new(cache_size),
			adapter,
		}
	}

	/// Resolve a setting: cache -> store -> default.
	/// `Ok(None)` when neither stored nor defaulted.
	async fn resolve(&self, key: &str) -> ClResult<Option<SettingValue>> {
		if let Some(value) = self.cache.get(key) {
			debug!("Setting cache hit: {}", key);
			return Ok(Some(value));
		}

		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if let Some(value) = self.read_stored(key).await? {
			self.cache.put(key.to_string(), value.clone());
			return Ok(Some(value));
		}

		match &def.default {
			Some(default) => {
				self.cache.put(key.to_string(), default.clone());
				Ok(Some(default.clone()))
			}
			None => Ok(None),
		}
	}

	/// Read the stored value, ignoring the default
	async fn read_stored(&self, key: &str) -> ClResult<Option<SettingValue>> {
		if let Some(value) = self.stored.get(key) {
			return Ok(value);
		}

		let value = match self.adapter.read_setting(key).await? {
			Some(json_value) => Some(
				serde_json::from_value::<SettingValue>(json_value)
					.map_err(|e| Error::ValidationError(format!("Invalid setting value: {}", e)))?,
			),
			None => None,
		};
		self.stored.put(key.to_string(), value.clone());
		Ok(value)
	}

	/// Get setting value, failing if it is neither stored nor defaulted
	pub async fn get(&self, key: &str) -> ClResult<SettingValue> {
		self.resolve(key).await?.ok_or_else(|| {
			Error::ValidationError(format!("Setting '{}' has no default and must be configured", key))
		})
	}

	/// Set setting value with validation and permission checks
	/// The `roles` parameter should be the authenticated principal's roles
	pub async fn set<S: AsRef<str>>(
		&self,
		key: &str,
		value: SettingValue,
		roles: &[S],
	) -> ClResult<Setting> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if !def.permission.check(roles) {
			warn!("Permission denied for setting '{}': requires {:?}", key, def.permission);
			return Err(Error::PermissionDenied);
		}

		if let Some(default) = &def.default
			&& !value.matches_type(default)
		{
			return Err(Error::ValidationError(format!(
				"Type mismatch for setting '{}': expected {}, got {}",
				key,
				default.type_name(),
				value.type_name()
			)));
		}

		if let Some(validator) = &def.validator {
			validator(&value)?;
		}

		let json_value = serde_json::to_value(&value)
			.map_err(|e| Error::ValidationError(format!("Failed to serialize setting: {}", e)))?;
		self.adapter.update_setting(key, json_value).await?;
		self.invalidate(key);

		info!("Setting '{}' updated", key);

		Ok(Setting { key: key.to_string(), value })
	}

	fn invalidate(&self, key: &str) {
		self.cache.invalidate(key);
		self.stored.invalidate(key);
	}

	/// Validate that all required settings (no default) are configured
	pub async fn validate_required_settings(&self) -> ClResult<()> {
		for def in self.registry.list() {
			if def.default.is_some() {
				continue;
			}

			if self.adapter.read_setting(&def.key).await?.is_none() {
				return Err(Error::ValidationError(format!(
					"Required setting '{}' is not configured",
					def.key
				)));
			}
		}
		Ok(())
	}

	/// Typed getter (required - returns error if not found)
	pub async fn get_string(&self, key: &str) -> ClResult<String> {
		match self.get(key).await? {
			SettingValue::String(s) => Ok(s),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a string, got {}",
				key,
				v.type_name()
			))),
		}
	}

	/// Stored string value without falling back to the default.
	/// `None` for unknown settings and for settings never written.
	pub async fn get_stored_string(&self, key: &str) -> ClResult<Option<String>> {
		if self.registry.get(key).is_none() {
			return Ok(None);
		}
		match self.read_stored(key).await? {
			Some(SettingValue::String(s)) => Ok(Some(s)),
			Some(v) => Err(Error::ValidationError(format!(
				"Setting '{}' is not a string, got {}",
				key,
				v.type_name()
			))),
			None => Ok(None),
		}
	}
}


// vim: ts=4
