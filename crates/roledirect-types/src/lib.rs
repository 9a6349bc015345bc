//! Shared types, adapter traits, and core utilities for roledirect.
//!
//! This crate holds the foundational types shared between the core crate,
//! the server crate, and the settings adapter implementations.

#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
