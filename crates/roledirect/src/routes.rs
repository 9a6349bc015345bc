use axum::{
	Json, Router, middleware,
	routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use roledirect_core::app::VERSION;

use crate::prelude::*;
use crate::route_auth::{optional_auth, require_auth};
use crate::webserver::log_request;
use crate::{admin, login, settings_handler};

async fn get_health() -> Json<Value> {
	Json(json!({ "status": "ok", "version": VERSION }))
}

fn init_admin() -> Router<App> {
	Router::new()
		.route(
			"/admin/login-redirects",
			get(admin::get_settings_page).post(admin::post_settings_page),
		)
		.route("/api/settings", get(settings_handler::list_settings))
		.route(
			"/api/settings/{name}",
			get(settings_handler::get_setting).put(settings_handler::update_setting),
		)
		.route_layer(middleware::from_fn(require_auth))
}

fn init_public() -> Router<App> {
	Router::new()
		.route("/api/login-redirect", post(login::post_login_redirect))
		.route("/health", get(get_health))
}

pub fn init(app: App) -> axum::Router {
	Router::new()
		.merge(init_public())
		.merge(init_admin())
		.layer(middleware::from_fn(optional_auth))
		.layer(middleware::from_fn(log_request))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
