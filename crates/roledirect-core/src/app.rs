//! App state type

use std::sync::Arc;

use crate::redirect::{BaseUrl, RedirectPipeline};
use crate::settings::service::SettingsService;
use crate::settings::types::FrozenSettingsRegistry;
use crate::template::TemplateEngine;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,

	// Login redirect filters, in execution order
	pub redirects: RedirectPipeline,

	pub templates: TemplateEngine,
}

pub type App = Arc<AppState>;

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub base_url: BaseUrl,
	/// Capacity of the settings LRU cache
	pub cache_size: usize,
}

// vim: ts=4
