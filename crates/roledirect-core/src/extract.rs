//! Custom extractors for roledirect request data
//!
//! The host platform authenticates users; it forwards the principal on each
//! request to this service. The server's auth middleware parses those headers
//! into an [`Auth`] request extension, these extractors read it back.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};

use crate::prelude::*;

pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";
pub const PRINCIPAL_ROLES_HEADER: &str = "x-principal-roles";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the principal from forwarded headers
///
/// `None` without a roles header. An empty roles header is a principal
/// with no roles.
pub fn principal_from_headers(headers: &HeaderMap) -> Option<Principal> {
	let roles = headers.get(PRINCIPAL_ROLES_HEADER)?.to_str().ok()?;
	let roles = roles.split(',').map(str::trim).filter(|r| !r.is_empty());
	let mut principal = Principal::new(roles);
	if let Some(id) = headers.get(PRINCIPAL_ID_HEADER).and_then(|h| h.to_str().ok()) {
		principal = principal.with_id(id);
	}
	Some(principal)
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// OptionalAuth //
//***************//
/// Optional auth extractor that doesn't fail if auth is missing
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth = parts.extensions.get::<Auth>().cloned().map(|a| a.0);
		Ok(OptionalAuth(auth))
	}
}

// RequestId //
//***********//
/// Request ID for tracing and debugging
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Optional Request ID extractor - always succeeds, returns None if not available
#[derive(Clone, Debug)]
pub struct OptionalRequestId(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalRequestId
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let req_id = parts.extensions.get::<RequestId>().map(|r| r.0.clone());
		Ok(OptionalRequestId(req_id))
	}
}


// vim: ts=4
