//! Error type shared by all roledirect crates

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,
	ValidationError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Parse | Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-CORE-NOTFOUND",
			Error::PermissionDenied => "E-AUTH-NOPERM",
			Error::Parse => "E-CORE-PARSE",
			Error::ValidationError(_) => "E-VAL-INVALID",
			Error::DbError => "E-CORE-DBERR",
			Error::ConfigError(_) => "E-CORE-CONFIG",
			Error::Internal(_) | Error::Io(_) => "E-CORE-INTERNAL",
		}
	}

	/// Message safe to return to a client
	fn public_message(&self) -> String {
		match self {
			Error::NotFound => "Resource not found".into(),
			Error::PermissionDenied => "Permission denied".into(),
			Error::Parse => "Malformed request".into(),
			Error::ValidationError(msg) => msg.clone(),
			_ => "Internal server error".into(),
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			_ => write!(f, "{:?}", self),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("JSON: {}", err);
		Self::Parse
	}
}

#[derive(Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
	error: ErrorBody,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!("Request failed: {}", self);
		}
		let body = ErrorResponse { error: ErrorBody { code: self.code(), message: self.public_message() } };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
