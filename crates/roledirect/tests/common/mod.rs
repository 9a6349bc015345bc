//! Common test utilities and helpers
//!
//! Builds a full application over a SQLite settings store in a temporary
//! directory and drives the router without binding a socket.

#![allow(dead_code)]

use axum::{
	Router,
	body::Body,
	http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use roledirect::{App, AppBuilder, routes};
use roledirect_settings_adapter_sqlite::SettingsAdapterSqlite;

pub const BASE_URL: &str = "https://intra.example";

pub struct TestServer {
	pub app: App,
	pub router: Router,
	_temp: TempDir,
}

pub async fn setup() -> TestServer {
	let temp = TempDir::new().expect("Failed to create temp directory");
	let adapter = SettingsAdapterSqlite::new(temp.path()).await.expect("Failed to create adapter");

	let mut builder = AppBuilder::new();
	builder.base_url(BASE_URL).settings_adapter(Arc::new(adapter));
	let app = builder.build().await.expect("Failed to build app");
	let router = routes::init(app.clone());

	TestServer { app, router, _temp: temp }
}

pub struct TestResponse {
	pub status: StatusCode,
	pub request_id: Option<String>,
	pub body: String,
}

impl TestResponse {
	pub fn json(&self) -> Value {
		serde_json::from_str(&self.body).expect("Response is not JSON")
	}
}

impl TestServer {
	pub async fn send(&self, req: Request<Body>) -> TestResponse {
		let res = self.router.clone().oneshot(req).await.expect("Request failed");
		let status = res.status();
		let request_id = res
			.headers()
			.get("x-request-id")
			.and_then(|h| h.to_str().ok())
			.map(str::to_string);
		let bytes = res.into_body().collect().await.expect("Failed to read body").to_bytes();
		TestResponse { status, request_id, body: String::from_utf8_lossy(&bytes).into_owned() }
	}

	pub async fn login_redirect(&self, body: Value) -> TestResponse {
		let req = Request::post("/api/login-redirect")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.expect("Invalid request");
		self.send(req).await
	}

	pub async fn get_page(&self, roles: Option<&str>) -> TestResponse {
		let mut req = Request::get("/admin/login-redirects");
		if let Some(roles) = roles {
			req = req.header("x-principal-roles", roles);
		}
		self.send(req.body(Body::empty()).expect("Invalid request")).await
	}

	pub async fn post_page(&self, roles: &str, fields: &[(&str, &str)]) -> TestResponse {
		let form = serde_urlencoded::to_string(fields).expect("Invalid form");
		let req = Request::post("/admin/login-redirects")
			.header("x-principal-roles", roles)
			.header("x-principal-id", "u1")
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from(form))
			.expect("Invalid request");
		self.send(req).await
	}
}

// vim: ts=4
