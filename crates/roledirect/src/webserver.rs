// Webserver implementation

use axum::{
	body::Body,
	http::{Request, Response},
	middleware::Next,
};
use std::time::Instant;

use crate::prelude::*;

/// Log every request with its status and duration
pub async fn log_request(req: Request<Body>, next: Next) -> Response<Body> {
	let start = Instant::now();
	let method = req.method().clone();
	let path = req.uri().path().to_string();
	info!("REQ {} {}", method, path);

	let res = next.run(req).await;

	let status = res.status();
	if status.is_client_error() || status.is_server_error() {
		warn!("RES: {} {} {} tm:{:?}", status, method, path, start.elapsed().as_millis());
	} else {
		info!("RES: {} {} {} tm:{:?}", status, method, path, start.elapsed().as_millis());
	}
	res
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
	info!("Shutdown signal received");
}

pub async fn serve(listen: &str, router: axum::Router) -> ClResult<()> {
	let listener = tokio::net::TcpListener::bind(listen).await.map_err(|e| {
		error!("FATAL: Cannot bind {}: {}", listen, e);
		e
	})?;

	info!("Listening on HTTP {}", listen);
	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

// vim: ts=4
