use std::{env, path, process::ExitCode, sync::Arc};

use roledirect::AppBuilder;
use roledirect_settings_adapter_sqlite::SettingsAdapterSqlite;
use tracing::error;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub base_url: String,
	pub cache_size: Option<usize>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string())),
			base_url: env::var("BASE_URL").unwrap_or("http://localhost:8080".to_string()),
			cache_size: env::var("SETTINGS_CACHE_SIZE").ok().and_then(|s| s.parse().ok()),
		}
	}
}

#[tokio::main]
async fn main() -> ExitCode {
	let config = Config::from_env();

	let mut builder = AppBuilder::new();

	let settings_adapter = match SettingsAdapterSqlite::new(&config.db_dir).await {
		Ok(adapter) => adapter,
		Err(e) => {
			error!("FATAL: Cannot open settings store in {}: {}", config.db_dir.display(), e);
			return ExitCode::FAILURE;
		}
	};

	builder
		.listen(config.listen)
		.base_url(config.base_url)
		.settings_adapter(Arc::new(settings_adapter));
	if let Some(cache_size) = config.cache_size {
		builder.cache_size(cache_size);
	}

	match builder.run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("FATAL: {}", e);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
