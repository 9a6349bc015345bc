//! Redirect filters applied after a successful login
//!
//! Each filter receives the redirect proposed so far and returns the redirect
//! to hand to the next one. Filters run in ascending priority; filters with
//! equal priority keep their registration order.
//!
//! The standard pipeline holds two filters:
//! - [`StaticRedirectFilter`] (priority 10): built-in per-role targets
//! - [`StoredRedirectFilter`] (priority 20): overrides stored by an administrator
//!
//! so a stored override beats a built-in target, and a principal matching no
//! rule keeps the host's default redirect.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::rules::{BaseUrl, RedirectRules};
use crate::prelude::*;
use crate::settings::service::SettingsService;

pub const STATIC_FILTER_PRIORITY: i32 = 10;
pub const STORED_FILTER_PRIORITY: i32 = 20;

/// Login request context passed through by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	/// Redirect explicitly requested by the login form, if any
	#[serde(default)]
	pub requested_redirect: Option<String>,
	/// Client address or user agent as reported by the host
	#[serde(default)]
	pub client: Option<String>,
}

#[async_trait]
pub trait RedirectFilter: Send + Sync {
	fn name(&self) -> &'static str;

	/// Lower runs first
	fn priority(&self) -> i32 {
		STATIC_FILTER_PRIORITY
	}

	async fn filter(
		&self,
		redirect_to: String,
		req: &LoginRequest,
		principal: Option<&Principal>,
	) -> String;
}

// StaticRedirectFilter //
//**********************//
pub struct StaticRedirectFilter {
	rules: RedirectRules,
	base: BaseUrl,
}

impl StaticRedirectFilter {
	pub fn new(base: BaseUrl) -> Self {
		Self { rules: RedirectRules::builtin(), base }
	}
}

#[async_trait]
impl RedirectFilter for StaticRedirectFilter {
	fn name(&self) -> &'static str {
		"static"
	}

	async fn filter(
		&self,
		redirect_to: String,
		_req: &LoginRequest,
		principal: Option<&Principal>,
	) -> String {
		self.rules.resolve_principal(principal, &redirect_to, &self.base)
	}
}

// StoredRedirectFilter //
//**********************//
pub struct StoredRedirectFilter {
	settings: Arc<SettingsService>,
	base: BaseUrl,
}

impl StoredRedirectFilter {
	pub fn new(settings: Arc<SettingsService>, base: BaseUrl) -> Self {
		Self { settings, base }
	}
}

#[async_trait]
impl RedirectFilter for StoredRedirectFilter {
	fn name(&self) -> &'static str {
		"stored"
	}

	fn priority(&self) -> i32 {
		STORED_FILTER_PRIORITY
	}

	async fn filter(
		&self,
		redirect_to: String,
		_req: &LoginRequest,
		principal: Option<&Principal>,
	) -> String {
		// Skip the store entirely when there is nothing to match
		let Some(principal) = principal.filter(|p| !p.roles.is_empty()) else {
			return redirect_to;
		};
		let rules = RedirectRules::load(&self.settings).await;
		rules.resolve_principal(Some(principal), &redirect_to, &self.base)
	}
}

// RedirectPipeline //
//******************//
#[derive(Default)]
pub struct RedirectPipeline {
	filters: Vec<Arc<dyn RedirectFilter>>,
}

impl RedirectPipeline {
	pub fn new() -> Self {
		Self::default()
	}

	/// Built-in targets first, then stored overrides
	pub fn standard(settings: Arc<SettingsService>, base: &BaseUrl) -> Self {
		let mut pipeline = Self::new();
		pipeline.add(Arc::new(StaticRedirectFilter::new(base.clone())));
		pipeline.add(Arc::new(StoredRedirectFilter::new(settings, base.clone())));
		pipeline
	}

	/// Insert a filter after every filter with a lower or equal priority
	pub fn add(&mut self, filter: Arc<dyn RedirectFilter>) -> &mut Self {
		let pos = self.filters.partition_point(|f| f.priority() <= filter.priority());
		debug!("Registering redirect filter '{}' (priority {})", filter.name(), filter.priority());
		self.filters.insert(pos, filter);
		self
	}

	/// Filter names in execution order
	pub fn names(&self) -> Vec<&'static str> {
		self.filters.iter().map(|f| f.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.filters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Run every filter in order, threading the redirect through
	pub async fn apply(
		&self,
		redirect_to: impl Into<String>,
		req: &LoginRequest,
		principal: Option<&Principal>,
	) -> String {
		let mut redirect_to = redirect_to.into();
		for filter in &self.filters {
			let next = filter.filter(redirect_to.clone(), req, principal).await;
			if next != redirect_to {
				debug!("Redirect filter '{}': {} -> {}", filter.name(), redirect_to, next);
			}
			redirect_to = next;
		}
		redirect_to
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::redirect::settings::register_settings;
	use crate::settings::{SettingValue, SettingsRegistry};
	use roledirect_types::settings_adapter::{MemorySettingsAdapter, SettingsAdapter};

	const ADMIN: &[&str] = &["administrator"];

	fn base() -> BaseUrl {
		BaseUrl::parse("https://intra.example").unwrap()
	}

	fn settings_with(adapter: Arc<dyn SettingsAdapter>) -> Arc<SettingsService> {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		Arc::new(SettingsService::new(Arc::new(registry.freeze()), adapter, 10))
	}

	fn settings() -> Arc<SettingsService> {
		settings_with(Arc::new(MemorySettingsAdapter::new()))
	}

	/// Store whose every call fails
	#[derive(Debug)]
	struct UnavailableStore;

	#[async_trait]
	impl SettingsAdapter for UnavailableStore {
		async fn read_setting(&self, _name: &str) -> ClResult<Option<serde_json::Value>> {
			Err(Error::DbError)
		}

		async fn update_setting(&self, _name: &str, _value: serde_json::Value) -> ClResult<()> {
			Err(Error::DbError)
		}
	}

	async fn store(settings: &SettingsService, role: Role, value: &str) {
		settings
			.set(&role.setting_key(), SettingValue::String(value.into()), ADMIN)
			.await
			.unwrap();
	}

	struct Fixed(&'static str, i32);

	#[async_trait]
	impl RedirectFilter for Fixed {
		fn name(&self) -> &'static str {
			self.0
		}

		fn priority(&self) -> i32 {
			self.1
		}

		async fn filter(
			&self,
			_redirect_to: String,
			_req: &LoginRequest,
			_principal: Option<&Principal>,
		) -> String {
			format!("/{}/", self.0)
		}
	}

	#[test]
	fn test_filters_sorted_by_priority_stable() {
		let mut pipeline = RedirectPipeline::new();
		pipeline.add(Arc::new(Fixed("late", 30)));
		pipeline.add(Arc::new(Fixed("first", 10)));
		pipeline.add(Arc::new(Fixed("second", 10)));
		assert_eq!(pipeline.names(), vec!["first", "second", "late"]);
	}

	#[tokio::test]
	async fn test_last_filter_output_wins() {
		let mut pipeline = RedirectPipeline::new();
		pipeline.add(Arc::new(Fixed("b", 20)));
		pipeline.add(Arc::new(Fixed("a", 10)));
		let res = pipeline.apply("/home/", &LoginRequest::default(), None).await;
		assert_eq!(res, "/b/");
	}

	#[tokio::test]
	async fn test_empty_pipeline_returns_input() {
		let pipeline = RedirectPipeline::new();
		assert!(pipeline.is_empty());
		assert_eq!(pipeline.apply("/home/", &LoginRequest::default(), None).await, "/home/");
	}

	#[tokio::test]
	async fn test_standard_administrator_without_override() {
		let pipeline = RedirectPipeline::standard(settings(), &base());
		let principal = Principal::new(["administrator"]);
		let res = pipeline.apply("/home/", &LoginRequest::default(), Some(&principal)).await;
		assert_eq!(res, "https://intra.example/admin-dashboard/");
	}

	#[tokio::test]
	async fn test_standard_stored_override() {
		let settings = settings();
		store(&settings, Role::Leder, "/custom-leder/").await;
		let pipeline = RedirectPipeline::standard(settings, &base());
		let principal = Principal::new(["leder"]);
		let res = pipeline.apply("/home/", &LoginRequest::default(), Some(&principal)).await;
		assert_eq!(res, "https://intra.example/custom-leder/");
	}

	#[tokio::test]
	async fn test_standard_unrecognized_role_and_no_principal() {
		let pipeline = RedirectPipeline::standard(settings(), &base());
		let principal = Principal::new(["subscriber"]);
		let req = LoginRequest::default();
		assert_eq!(pipeline.apply("/home/", &req, Some(&principal)).await, "/home/");
		assert_eq!(pipeline.apply("/home/", &req, Some(&Principal::default())).await, "/home/");
		assert_eq!(pipeline.apply("/home/", &req, None).await, "/home/");
	}

	#[tokio::test]
	async fn test_empty_override_degrades_to_builtin() {
		let settings = settings();
		store(&settings, Role::Leder, "").await;
		let pipeline = RedirectPipeline::standard(settings, &base());
		let principal = Principal::new(["leder"]);
		let res = pipeline.apply("/home/", &LoginRequest::default(), Some(&principal)).await;
		assert_eq!(res, "https://intra.example/leder-dashboard/");
	}

	#[tokio::test]
	async fn test_stored_override_on_later_role_beats_builtin_on_earlier_role() {
		let settings = settings();
		store(&settings, Role::Administrator, "/ops/").await;
		let pipeline = RedirectPipeline::standard(settings, &base());
		let principal = Principal::new(["leder", "administrator"]);
		let res = pipeline.apply("/home/", &LoginRequest::default(), Some(&principal)).await;
		assert_eq!(res, "https://intra.example/ops/");
	}

	#[tokio::test]
	async fn test_writing_same_override_twice_is_idempotent() {
		let settings = settings();
		let pipeline = RedirectPipeline::standard(settings.clone(), &base());
		let principal = Principal::new(["medarbajder"]);
		let req = LoginRequest::default();

		store(&settings, Role::Medarbajder, "/team/").await;
		let first = pipeline.apply("/home/", &req, Some(&principal)).await;
		store(&settings, Role::Medarbajder, "/team/").await;
		let second = pipeline.apply("/home/", &req, Some(&principal)).await;
		assert_eq!(first, second);
		assert_eq!(first, "https://intra.example/team/");
	}

	#[tokio::test]
	async fn test_store_failure_degrades_to_builtin_or_fallback() {
		let pipeline = RedirectPipeline::standard(settings_with(Arc::new(UnavailableStore)), &base());
		let req = LoginRequest::default();

		let leder = Principal::new(["leder"]);
		assert_eq!(
			pipeline.apply("/home/", &req, Some(&leder)).await,
			"https://intra.example/leder-dashboard/"
		);

		let subscriber = Principal::new(["subscriber"]);
		assert_eq!(pipeline.apply("/home/", &req, Some(&subscriber)).await, "/home/");
	}

	#[tokio::test]
	async fn test_stored_filter_alone_ignores_builtins() {
		let filter = StoredRedirectFilter::new(settings(), base());
		let principal = Principal::new(["administrator"]);
		let res = filter.filter("/home/".into(), &LoginRequest::default(), Some(&principal)).await;
		assert_eq!(res, "/home/");
	}
}

// vim: ts=4
