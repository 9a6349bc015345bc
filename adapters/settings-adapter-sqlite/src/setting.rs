//! Settings key-value store management
//!
//! Values are stored as JSON text.

use sqlx::{Row, SqlitePool};

use roledirect::prelude::*;

/// Read a single setting by name
pub(crate) async fn read(db: &SqlitePool, name: &str) -> ClResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM settings WHERE name = ?")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(row.and_then(|r| {
		let value: Option<String> = r.get("value");
		value.and_then(|v| serde_json::from_str(&v).ok())
	}))
}

/// Update or create a setting
pub(crate) async fn update(db: &SqlitePool, name: &str, value: serde_json::Value) -> ClResult<()> {
	sqlx::query("INSERT OR REPLACE INTO settings (name, value) VALUES (?, ?)")
		.bind(name)
		.bind(value.to_string())
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
