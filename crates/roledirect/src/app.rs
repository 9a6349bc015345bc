//! App builder - constructs and runs the roledirect application

use std::sync::Arc;

use crate::prelude::*;
use crate::settings::SettingsRegistry;
use crate::settings::service::SettingsService;
use crate::settings_adapter::SettingsAdapter;
use crate::{routes, webserver};
pub use roledirect_core::app::{App, AppBuilderOpts, AppState, VERSION};
use roledirect_core::redirect::{BaseUrl, RedirectFilter, RedirectPipeline};
use roledirect_core::template::TemplateEngine;

const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
const DEFAULT_CACHE_SIZE: usize = 100;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	base_url: Option<Box<str>>,
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	filters: Vec<Arc<dyn RedirectFilter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// May already be installed by an embedding host or another test
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: DEFAULT_LISTEN.into(),
				base_url: BaseUrl::default(),
				cache_size: DEFAULT_CACHE_SIZE,
			},
			base_url: None,
			settings_adapter: None,
			filters: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	/// Site base URL the redirect paths are appended to; validated in `build()`
	pub fn base_url(&mut self, base_url: impl Into<Box<str>>) -> &mut Self {
		self.base_url = Some(base_url.into());
		self
	}
	pub fn cache_size(&mut self, cache_size: usize) -> &mut Self {
		self.opts.cache_size = cache_size;
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.settings_adapter = Some(settings_adapter);
		self
	}

	/// Register an extra redirect filter, ordered by its priority
	pub fn filter(&mut self, filter: Arc<dyn RedirectFilter>) -> &mut Self {
		self.filters.push(filter);
		self
	}

	pub async fn build(self) -> ClResult<App> {
		let Some(settings_adapter) = self.settings_adapter else {
			error!("FATAL: No settings adapter configured");
			return Err(Error::ConfigError("No settings adapter configured".to_string()));
		};

		let mut opts = self.opts;
		if let Some(base_url) = self.base_url {
			opts.base_url = BaseUrl::parse(&base_url)
				.inspect_err(|e| error!("FATAL: Invalid base URL: {}", e))?;
		}

		// Initialize settings registry and service
		let mut settings_registry = SettingsRegistry::new();
		roledirect_core::register_settings(&mut settings_registry)?;
		info!("Registered {} settings", settings_registry.len());

		let frozen_registry = Arc::new(settings_registry.freeze());
		let settings_service = Arc::new(SettingsService::new(
			frozen_registry.clone(),
			settings_adapter,
			opts.cache_size,
		));

		settings_service.validate_required_settings().await?;
		info!("Settings subsystem initialized and validated");

		let mut redirects = RedirectPipeline::standard(settings_service.clone(), &opts.base_url);
		for filter in self.filters {
			redirects.add(filter);
		}
		info!("Login redirect filters: {:?}", redirects.names());

		let templates = TemplateEngine::new()?;

		Ok(Arc::new(AppState {
			opts,
			settings: settings_service,
			settings_registry: frozen_registry,
			redirects,
			templates,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("roledirect V{}", VERSION);
		info!("");

		let app = self.build().await?;
		info!("Base URL: {}", app.opts.base_url);

		let router = routes::init(app.clone());
		webserver::serve(&app.opts.listen, router).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
