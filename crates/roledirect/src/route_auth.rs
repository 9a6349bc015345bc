//! Request middleware: forwarded principal and request id
//!
//! The host is trusted to authenticate the user and forward the principal in
//! the `X-Principal-Id` / `X-Principal-Roles` headers.

use axum::{
	body::Body,
	http::{HeaderValue, Request, Response},
	middleware::Next,
};

use roledirect_core::extract::{
	Auth, REQUEST_ID_HEADER, RequestId, principal_from_headers,
};

use crate::prelude::*;

/// Attach the forwarded principal (if any) and a request id to the request
pub async fn optional_auth(mut req: Request<Body>, next: Next) -> Response<Body> {
	let req_id = req
		.headers()
		.get(REQUEST_ID_HEADER)
		.and_then(|h| h.to_str().ok())
		.map(str::to_string)
		.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

	if let Some(principal) = principal_from_headers(req.headers()) {
		debug!("Principal {:?} with roles {:?}", principal.id, principal.roles);
		req.extensions_mut().insert(Auth(principal));
	}
	req.extensions_mut().insert(RequestId(req_id.clone()));

	let mut res = next.run(req).await;
	if let Ok(value) = HeaderValue::from_str(&req_id) {
		res.headers_mut().insert(REQUEST_ID_HEADER, value);
	}
	res
}

/// Reject requests without a forwarded principal
pub async fn require_auth(req: Request<Body>, next: Next) -> ClResult<Response<Body>> {
	if req.extensions().get::<Auth>().is_none() {
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
