//! roledirect maps an authenticated principal's roles to the URL a login
//! should land on.
//!
//! # Features
//!
//! - Login redirect hook for the host platform
//!     - built-in per-role targets
//!     - administrator overrides stored in the settings store
//!     - ordered, extensible redirect filters
//! - Settings page and JSON settings API for administrators
//! - SQLite settings adapter (separate crate)

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from roledirect-types
pub use roledirect_types::error;
pub use roledirect_types::settings_adapter;
pub use roledirect_types::types;

pub use roledirect_core::redirect;
pub use roledirect_core::sanitize;
pub use roledirect_core::settings;

// Local modules
pub mod admin;
pub mod app;
pub mod login;
pub mod prelude;
pub mod route_auth;
pub mod routes;
pub mod settings_handler;
pub mod webserver;
pub mod response;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
