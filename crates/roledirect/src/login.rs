//! Login redirect hook

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use roledirect_core::extract::{OptionalAuth, OptionalRequestId};
use roledirect_core::redirect::LoginRequest;

use crate::{prelude::*, response::ApiResponse};

/// # POST /api/login-redirect
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRedirectReq {
	/// Default redirect proposed by the host
	pub redirect_to: String,
	/// Principal completing login; the forwarded principal headers are used when absent
	#[serde(default)]
	pub principal: Option<Principal>,
	#[serde(default)]
	pub request: LoginRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRedirect {
	pub redirect_to: String,
}

pub async fn post_login_redirect(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<LoginRedirectReq>,
) -> ClResult<(StatusCode, Json<ApiResponse<LoginRedirect>>)> {
	let principal = req.principal.or(auth);

	let redirect_to = app.redirects.apply(req.redirect_to, &req.request, principal.as_ref()).await;
	info!(
		"Login redirect for {}: {}",
		principal.as_ref().and_then(|p| p.id.as_deref()).unwrap_or("<anonymous>"),
		redirect_to
	);

	let response = ApiResponse::new(LoginRedirect { redirect_to }).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
