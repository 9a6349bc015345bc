//! Core of the roledirect login redirect service.
//!
//! Holds the settings subsystem, the per-role redirect rules with their
//! filter pipeline, and the shared application state used by the server crate.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod prelude;
pub mod redirect;
pub mod sanitize;
pub mod settings;
pub mod template;

pub use app::{App, AppBuilderOpts, AppState};
pub use extract::{Auth, OptionalAuth, OptionalRequestId};

pub fn register_settings(
	registry: &mut settings::SettingsRegistry,
) -> roledirect_types::error::ClResult<()> {
	redirect::settings::register_settings(registry)
}

// vim: ts=4
