//! Settings management handlers

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use roledirect_core::extract::{Auth, OptionalRequestId};
use roledirect_core::settings::SettingValue;

use crate::{prelude::*, response::ApiResponse};

/// Response for a single setting with metadata
#[derive(Serialize)]
pub struct SettingResponse {
	pub key: String,
	pub value: SettingValue,
	pub permission: String,
	pub description: String,
}

/// GET /api/settings - List all settings with their current values
pub async fn list_settings(
	State(app): State<App>,
	Auth(_auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<SettingResponse>>>)> {
	let mut settings_response = Vec::new();

	for definition in app.settings_registry.list() {
		if let Ok(value) = app.settings.get(&definition.key).await {
			settings_response.push(SettingResponse {
				key: definition.key.clone(),
				value,
				permission: format!("{:?}", definition.permission),
				description: definition.description.clone(),
			});
		}
	}

	let total = settings_response.len();
	let response =
		ApiResponse::with_pagination(settings_response, 0, total, total).with_req_id(req_id);

	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/settings/{name} - Get a specific setting with metadata
pub async fn get_setting(
	State(app): State<App>,
	Auth(_auth): Auth,
	Path(name): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	let definition = app.settings_registry.get(&name).ok_or(Error::NotFound)?;
	let value = app.settings.get(&name).await?;

	let response_data = SettingResponse {
		key: definition.key.clone(),
		value,
		permission: format!("{:?}", definition.permission),
		description: definition.description.clone(),
	};

	let response = ApiResponse::new(response_data).with_req_id(req_id);

	Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/settings/{name} - Update a setting
#[derive(Deserialize)]
pub struct UpdateSettingRequest {
	pub value: SettingValue,
}

pub async fn update_setting(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(name): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<UpdateSettingRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	let definition = app.settings_registry.get(&name).ok_or(Error::NotFound)?;

	// Permission and validation are enforced by the service
	app.settings.set(&name, req.value, auth.roles.as_slice()).await?;

	info!("Principal {:?} updated setting {}", auth.id, name);

	let value = app.settings.get(&name).await?;

	let response_data = SettingResponse {
		key: definition.key.clone(),
		value,
		permission: format!("{:?}", definition.permission),
		description: definition.description.clone(),
	};

	let response = ApiResponse::new(response_data).with_req_id(req_id);

	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
